//! XML serialization of the sitemap tree

use super::tree::{NodeId, SitemapTree, LOC_TAG};
use crate::SitemapError;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Serializes a sitemap tree to an XML string
///
/// The root is written as `<SITEMAP>`; every link node becomes an element
/// named after its category holding a `<LOC>` child, followed by the nodes
/// discovered on that link's page.
///
/// `LOC` values are already entity-encoded in the tree and are escaped once
/// more on write, so a parser reading the document gets the encoded form
/// back.
///
/// # Arguments
///
/// * `tree` - The tree to serialize
/// * `indent` - Pretty-print with two-space indentation
pub fn to_xml(tree: &SitemapTree, indent: bool) -> Result<String, SitemapError> {
    let mut writer = if indent {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };

    write_node(&mut writer, tree, tree.root())?;

    String::from_utf8(writer.into_inner()).map_err(|e| SitemapError::Output(e.to_string()))
}

fn write_node(writer: &mut Writer<Vec<u8>>, tree: &SitemapTree, id: NodeId) -> Result<(), SitemapError> {
    let node = tree.node(id);
    let tag = node.tag_name();

    writer.write_event(Event::Start(BytesStart::new(tag)))?;

    if let Some(loc) = &node.loc {
        writer.write_event(Event::Start(BytesStart::new(LOC_TAG)))?;
        writer.write_event(Event::Text(BytesText::new(loc)))?;
        writer.write_event(Event::End(BytesEnd::new(LOC_TAG)))?;
    }

    for &child in tree.children(id) {
        write_node(writer, tree, child)?;
    }

    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
