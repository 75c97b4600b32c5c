//! Tree builder walkthrough
//!
//! Shows the event-level API: the builder consumes the same flat event
//! stream a streaming parser would deliver, so a document can be assembled
//! without any source text at all.
//!
//! Run with: `cargo run --example builder`
use xmltidy::{ParseEvent, QName, TreeBuilder};

fn main() {
    env_logger::init();

    let events = vec![
        //
        // Instructions may arrive before the root exists; they are buffered
        // and attached once the document is finalized.
        ParseEvent::ProcessingInstruction {
            target: "xml-stylesheet".to_string(),
            data: Some("href=\"s.xsl\"".to_string()),
        },
        //
        // The first start-event creates the document. Namespace declarations
        // on the root bind at document level; everything else becomes an
        // ordinary attribute of the element they follow.
        ParseEvent::StartElement {
            name: QName::from("inventory"),
        },
        ParseEvent::Attribute {
            name: QName::from("xmlns:inv"),
            value: "urn:inventory".to_string(),
        },
        ParseEvent::StartElement {
            name: QName::from("inv:item"),
        },
        ParseEvent::Attribute {
            name: QName::from("sku"),
            value: "A101".to_string(),
        },
        ParseEvent::EndElement { name: None },
        ParseEvent::EndElement {
            name: Some(QName::from("inventory")),
        },
        ParseEvent::EndDocument,
    ];

    let mut builder = TreeBuilder::new();
    for event in events {
        builder
            .handle_event(event)
            .expect("the tolerant builder accepts any event stream");
    }

    let document = builder
        .finish()
        .expect("the stream contained a root element");
    println!("{}", document.to_xml(Some("  ")).expect("formatting failed"));
}
