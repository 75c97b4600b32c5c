//! Command-line XML beautifier
//!
//! Reads the file named by the single command line argument, beautifies it,
//! and prints the result.
//!
//! Run with: `cargo run --example beautify -- file.xml`
use std::path::PathBuf;
use std::process::ExitCode;
use xmltidy::{XmlError, XmlResult};

fn main() -> ExitCode {
    //
    // Parser diagnostics go to stderr through the log facade;
    // set RUST_LOG=debug to also see the tolerated no-ops.
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let (Some(path), None) = (args.next(), args.next()) else {
        eprintln!("Usage: beautify <file.xml>");
        return ExitCode::FAILURE;
    };

    match run(PathBuf::from(path)) {
        Ok(Some(output)) => {
            println!("{output}");
            ExitCode::SUCCESS
        }

        //
        // The file parsed but held no elements, so there is nothing to print.
        // This is distinct from an empty root element, which would print fine.
        Ok(None) => {
            eprintln!("No output");
            ExitCode::SUCCESS
        }

        //
        // Terminal failures carry their context; the Display output includes
        // the path and the parser-reported position when available.
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: PathBuf) -> XmlResult<Option<String>> {
    let source = std::fs::read_to_string(&path)
        .map_err(|e| XmlError::from(e).with_path(path.clone()))?;
    xmltidy::beautify(&source, None).map_err(|e| e.with_path(path))
}
