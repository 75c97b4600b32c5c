//! XML formatting module
//!
//! Use [`Document::to_xml`] unless you need to write the XML to a file or other writer.
use crate::{Document, Element, Namespace, ProcessingInstruction, QName};
use htmlentity::entity::ICodedDataTrait;
use htmlentity::entity::{CharacterSet, EncodeType, encode};

const TAB: &str = "\t";

/// Flatten a document as a formatted XML string using the given writer.
///
/// The declaration comes first if present, then every processing instruction
/// in document order, then the element tree with one element per line.
///
/// # Errors
/// This function will return an error if the writer fails to write the XML string.
pub fn write_xml(
    writer: &mut dyn std::io::Write,
    document: &Document,
    tab_char: Option<&str>,
) -> std::io::Result<()> {
    let tab_char = tab_char.unwrap_or(TAB);

    //
    // Write the XML declaration
    if let Some(declaration) = &document.declaration {
        let version = encode_entities(&declaration.version)?;
        writer.write_all(format!(r#"<?xml version="{version}""#).as_bytes())?;

        if let Some(encoding) = &declaration.encoding {
            let encoding = encode_entities(encoding)?;
            writer.write_all(format!(r#" encoding="{encoding}""#).as_bytes())?;
        }

        if let Some(standalone) = declaration.standalone {
            let standalone = if standalone { "yes" } else { "no" };
            writer.write_all(format!(r#" standalone="{standalone}""#).as_bytes())?;
        }

        writer.write_all(b" ?>\n")?;
    }

    //
    // Write the processing instructions, in document order
    for instruction in &document.instructions {
        write_instruction(writer, instruction)?;
    }

    //
    // Write the element tree
    let mut document_namespace = document.namespace.as_ref();
    let mut stack = vec![(NodeTask::Open(&document.root), 0u8)];
    loop {
        let Some((task, depth)) = stack.pop() else {
            break;
        };
        let tab = tab_char.repeat(depth as usize);

        match task {
            NodeTask::Close(node_name) => {
                let name = encode_entities(&node_name.to_string())?;
                writer.write_all(format!("{tab}</{name}>\n").as_bytes())?;
            }

            NodeTask::Open(element) => {
                let name = encode_entities(&element.name().to_string())?;
                writer.write_all(format!("{tab}<{name}").as_bytes())?;

                // The document-level binding renders on the root open tag
                if let Some(namespace) = document_namespace.take() {
                    write_namespace(writer, namespace)?;
                }
                if let Some(namespace) = element.namespace() {
                    write_namespace(writer, namespace)?;
                }

                for attr in element.attributes() {
                    let attr_name = encode_entities(&attr.name().to_string())?;
                    let attr_value = encode_entities(attr.value())?;
                    writer.write_all(format!(r#" {attr_name}="{attr_value}""#).as_bytes())?;
                }

                if element.children().is_empty() {
                    writer.write_all(b" />\n")?;
                    continue;
                }

                writer.write_all(b">\n")?;
                stack.push((NodeTask::Close(element.name()), depth));
                for child in element.children().iter().rev() {
                    stack.push((NodeTask::Open(child), depth + 1));
                }
            }
        }
    }

    Ok(())
}

fn encode_entities(input: &str) -> std::io::Result<String> {
    encode(
        input.as_bytes(),
        &EncodeType::NamedOrHex,
        &CharacterSet::Html,
    )
    .to_string()
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Instruction targets and data are written raw; entity-escaping them would
/// change what a re-parse delivers.
fn write_instruction(
    writer: &mut dyn std::io::Write,
    instruction: &ProcessingInstruction,
) -> std::io::Result<()> {
    writer.write_all(format!("<?{}", instruction.target()).as_bytes())?;

    if let Some(data) = instruction.data() {
        writer.write_all(format!(" {data}").as_bytes())?;
    }

    writer.write_all(b"?>\n")?;
    Ok(())
}

fn write_namespace(
    writer: &mut dyn std::io::Write,
    namespace: &Namespace,
) -> std::io::Result<()> {
    let name = encode_entities(&namespace.attribute_name())?;
    let uri = encode_entities(namespace.uri())?;
    writer.write_all(format!(r#" {name}="{uri}""#).as_bytes())?;
    Ok(())
}

enum NodeTask<'doc> {
    Open(&'doc Element),
    Close(&'doc QName),
}
