use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::Error;
use crate::model::{Block, Document, ListKind, Paragraph, Table, TableRow};

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

struct NumberingInfo {
    num_to_abstract: HashMap<String, String>,
    multi_level_types: HashMap<String, String>,
}

impl NumberingInfo {
    /// Collapse a numbering id to two kinds: single-level and hybrid
    /// multilevel definitions render as bullets; everything else,
    /// including ids with no surviving definition, is numbered.
    fn list_kind(&self, num_id: &str) -> ListKind {
        let multi_level = self
            .num_to_abstract
            .get(num_id)
            .and_then(|abs_id| self.multi_level_types.get(abs_id));
        match multi_level.map(String::as_str) {
            Some("singleLevel") | Some("hybridMultilevel") => ListKind::Unordered,
            _ => ListKind::Ordered,
        }
    }
}

fn wml<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children()
        .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(WML_NS))
}

fn wml_attr<'a>(node: roxmltree::Node<'a, 'a>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}

fn read_zip_text<R: Read + Seek>(zip: &mut zip::ZipArchive<R>, name: &str) -> Option<String> {
    let mut content = String::new();
    zip.by_name(name).ok()?.read_to_string(&mut content).ok()?;
    Some(content)
}

fn parse_numbering<R: Read + Seek>(zip: &mut zip::ZipArchive<R>) -> NumberingInfo {
    let mut num_to_abstract: HashMap<String, String> = HashMap::new();
    let mut multi_level_types: HashMap<String, String> = HashMap::new();

    let Some(xml_content) = read_zip_text(zip, "word/numbering.xml") else {
        return NumberingInfo {
            num_to_abstract,
            multi_level_types,
        };
    };
    let Ok(xml) = roxmltree::Document::parse(&xml_content) else {
        return NumberingInfo {
            num_to_abstract,
            multi_level_types,
        };
    };

    for node in xml.root_element().children() {
        if node.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match node.tag_name().name() {
            "abstractNum" => {
                let Some(abs_id) = node.attribute((WML_NS, "abstractNumId")) else {
                    continue;
                };
                if let Some(multi_level) = wml_attr(node, "multiLevelType") {
                    multi_level_types.insert(abs_id.to_string(), multi_level.to_string());
                }
            }
            "num" => {
                let Some(num_id) = node.attribute((WML_NS, "numId")) else {
                    continue;
                };
                let Some(abs_id) = wml_attr(node, "abstractNumId") else {
                    continue;
                };
                num_to_abstract.insert(num_id.to_string(), abs_id.to_string());
            }
            _ => {}
        }
    }

    NumberingInfo {
        num_to_abstract,
        multi_level_types,
    }
}

/// Flatten SDT wrappers: descend into w:sdtContent and collect effective children.
fn collect_block_nodes<'a>(parent: roxmltree::Node<'a, 'a>) -> Vec<roxmltree::Node<'a, 'a>> {
    let mut nodes = Vec::new();
    for child in parent.children() {
        if child.tag_name().name() == "sdt" && child.tag_name().namespace() == Some(WML_NS) {
            if let Some(content) = wml(child, "sdtContent") {
                nodes.extend(collect_block_nodes(content));
            }
        } else {
            nodes.push(child);
        }
    }
    nodes
}

/// Concatenated text of every w:t descendant, in document order. Text
/// inside hyperlinks and nested SDT runs is included.
fn inner_text(node: roxmltree::Node) -> String {
    let mut text = String::new();
    for n in node.descendants() {
        if n.tag_name().name() == "t"
            && n.tag_name().namespace() == Some(WML_NS)
            && let Some(t) = n.text()
        {
            text.push_str(t);
        }
    }
    text
}

fn parse_paragraph(node: roxmltree::Node, numbering: &NumberingInfo) -> Paragraph {
    let ppr = wml(node, "pPr");
    let style = ppr
        .and_then(|ppr| wml_attr(ppr, "pStyle"))
        .map(str::to_string);
    let list = ppr
        .and_then(|ppr| wml(ppr, "numPr"))
        .and_then(|num_pr| wml_attr(num_pr, "numId"))
        .map(|num_id| numbering.list_kind(num_id));

    Paragraph {
        text: inner_text(node),
        style,
        list,
    }
}

fn parse_table(node: roxmltree::Node) -> Table {
    let mut rows = Vec::new();
    for tr in collect_block_nodes(node)
        .into_iter()
        .filter(|n| n.tag_name().name() == "tr" && n.tag_name().namespace() == Some(WML_NS))
    {
        let cells = collect_block_nodes(tr)
            .into_iter()
            .filter(|n| n.tag_name().name() == "tc" && n.tag_name().namespace() == Some(WML_NS))
            .map(inner_text)
            .collect();
        rows.push(TableRow { cells });
    }
    Table { rows }
}

pub fn parse(path: &Path) -> Result<Document, Error> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    })?;
    parse_archive(file)
}

pub fn parse_bytes(input: &[u8]) -> Result<Document, Error> {
    parse_archive(Cursor::new(input))
}

fn parse_archive<R: Read + Seek>(reader: R) -> Result<Document, Error> {
    let mut zip = zip::ZipArchive::new(reader)
        .map_err(|_| Error::InvalidDocx("file is not a ZIP archive".into()))?;

    let numbering = parse_numbering(&mut zip);

    let mut xml_content = String::new();
    zip.by_name("word/document.xml")
        .map_err(|_| Error::InvalidDocx("missing word/document.xml (is this a DOCX file?)".into()))?
        .read_to_string(&mut xml_content)?;

    let xml = roxmltree::Document::parse(&xml_content)?;
    let root = xml.root_element();

    let body = wml(root, "body").ok_or_else(|| Error::InvalidDocx("missing w:body".into()))?;

    let mut blocks = Vec::new();
    for node in collect_block_nodes(body) {
        if node.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match node.tag_name().name() {
            "p" => blocks.push(Block::Paragraph(parse_paragraph(node, &numbering))),
            "tbl" => blocks.push(Block::Table(parse_table(node))),
            _ => {}
        }
    }

    Ok(Document { blocks })
}
