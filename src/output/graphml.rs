//! GraphML export of the reference graph
//!
//! Only produced when the graph engine is compiled in; each node is
//! annotated with its document's format, size, and token count before
//! export so visualization tools can size and color nodes.

use crate::Result;
use crate::graph::KnowledgeGraph;
use std::path::{Path, PathBuf};

#[cfg(feature = "graph")]
pub fn write_graphml(graph: &KnowledgeGraph, output_dir: &Path) -> Result<PathBuf> {
    use crate::refgraph::RELATION;
    use quick_xml::Writer;
    use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

    fn data<W: std::io::Write>(writer: &mut Writer<W>, key: &str, value: &str) -> Result<()> {
        let mut el = BytesStart::new("data");
        el.push_attribute(("key", key));
        writer.write_event(Event::Start(el))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new("data")))?;
        Ok(())
    }

    let mut buf = Vec::new();
    let mut writer = Writer::new_with_indent(&mut buf, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut graphml = BytesStart::new("graphml");
    graphml.push_attribute(("xmlns", "http://graphml.graphdrawing.org/xmlns"));
    writer.write_event(Event::Start(graphml))?;

    for (id, target, name, ty) in [
        ("d0", "node", "format", "string"),
        ("d1", "node", "size", "long"),
        ("d2", "node", "tokens", "long"),
        ("d3", "edge", "relation", "string"),
    ] {
        let mut key = BytesStart::new("key");
        key.push_attribute(("id", id));
        key.push_attribute(("for", target));
        key.push_attribute(("attr.name", name));
        key.push_attribute(("attr.type", ty));
        writer.write_event(Event::Empty(key))?;
    }

    let mut graph_el = BytesStart::new("graph");
    graph_el.push_attribute(("edgedefault", "directed"));
    writer.write_event(Event::Start(graph_el))?;

    let refgraph = graph.reference_graph();

    for node in refgraph.nodes() {
        let mut el = BytesStart::new("node");
        el.push_attribute(("id", node));
        writer.write_event(Event::Start(el))?;
        // Broken-reference targets have no document and stay bare nodes
        if let Some(doc) = graph.documents().get(node) {
            data(&mut writer, "d0", &doc.format)?;
            data(&mut writer, "d1", &doc.byte_size.to_string())?;
            data(&mut writer, "d2", &doc.token_count().to_string())?;
        }
        writer.write_event(Event::End(BytesEnd::new("node")))?;
    }

    for (source, target) in refgraph.edges() {
        let mut el = BytesStart::new("edge");
        el.push_attribute(("source", source));
        el.push_attribute(("target", target));
        writer.write_event(Event::Start(el))?;
        data(&mut writer, "d3", RELATION)?;
        writer.write_event(Event::End(BytesEnd::new("edge")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("graph")))?;
    writer.write_event(Event::End(BytesEnd::new("graphml")))?;

    let path = output_dir.join("relationships.graphml");
    std::fs::write(&path, buf)?;
    Ok(path)
}

#[cfg(not(feature = "graph"))]
pub fn write_graphml(_graph: &KnowledgeGraph, _output_dir: &Path) -> Result<PathBuf> {
    Err(crate::Error::Config(
        "graph engine not compiled in (enable the `graph` feature)".to_string(),
    ))
}
