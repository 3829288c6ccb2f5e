mod tree;

use std::sync::OnceLock;

use regex::Regex;

use crate::error::Error;
use crate::model::{Block, Document, ListKind, Paragraph, Table};

use tree::Node;

/// Render the document as `<html><body>…</body></html>` markup, then
/// strip base64-looking runs from the serialized string.
pub fn render(doc: &Document) -> Result<String, Error> {
    let mut body = Node::new("body");
    // Pending list run: consecutive list paragraphs of one kind collapse
    // into a single <ol>/<ul>, flushed on kind change, non-list block,
    // or end of input.
    let mut open_list: Option<(Node, ListKind)> = None;

    for block in &doc.blocks {
        match block {
            Block::Paragraph(para) => match para.list {
                Some(kind) => {
                    let mut list = match open_list.take() {
                        Some((list, open_kind)) if open_kind == kind => list,
                        stale => {
                            if let Some((done, _)) = stale {
                                body.push(done);
                            }
                            Node::new(list_tag(kind))
                        }
                    };
                    list.push(Node::with_text("li", &para.text));
                    open_list = Some((list, kind));
                }
                None => {
                    flush_list(&mut body, &mut open_list);
                    body.push(paragraph_node(para)?);
                }
            },
            Block::Table(table) => {
                flush_list(&mut body, &mut open_list);
                body.push(table_node(table));
            }
        }
    }
    flush_list(&mut body, &mut open_list);

    let mut html = Node::new("html");
    html.push(body);
    Ok(strip_encoded_runs(&html.serialize()))
}

fn list_tag(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Ordered => "ol",
        ListKind::Unordered => "ul",
    }
}

fn flush_list(body: &mut Node, open_list: &mut Option<(Node, ListKind)>) {
    if let Some((list, _)) = open_list.take() {
        body.push(list);
    }
}

/// A style id of "Heading" plus a numeric suffix maps to <hN>; any other
/// suffix after "Heading" is a structural error for the document. All
/// other styles render as plain <p>.
fn paragraph_node(para: &Paragraph) -> Result<Node, Error> {
    if let Some(style) = para.style.as_deref()
        && let Some(suffix) = style.strip_prefix("Heading")
    {
        let level: u32 = suffix.parse().map_err(|_| {
            Error::Html(format!("heading style {style:?} has no numeric level suffix"))
        })?;
        return Ok(Node::with_text(format!("h{level}"), &para.text));
    }
    Ok(Node::with_text("p", &para.text))
}

fn table_node(table: &Table) -> Node {
    let mut node = Node::new("table");
    for row in &table.rows {
        let mut tr = Node::new("tr");
        for cell in &row.cells {
            tr.push(Node::with_text("td", cell));
        }
        node.push(tr);
    }
    node
}

/// Delete every maximal run of 30+ base64-alphabet characters from the
/// rendered markup. The filter runs over the whole string, not just text
/// content; none of the emitted elements carry attributes, so tags stay
/// intact in practice.
fn strip_encoded_runs(markup: &str) -> String {
    static ENCODED_RUN: OnceLock<Regex> = OnceLock::new();
    let re = ENCODED_RUN.get_or_init(|| Regex::new("[A-Za-z0-9+/=]{30,}").unwrap());
    re.replace_all(markup, "").into_owned()
}
