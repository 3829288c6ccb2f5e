use std::io::{Cursor, Write};
use std::path::PathBuf;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Assemble a minimal DOCX archive in memory: word/document.xml plus an
/// optional word/numbering.xml. The converter reads nothing else.
pub fn docx_bytes(document_body: &str, numbering: Option<&str>) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = SimpleFileOptions::default();

    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{WML_NS}"><w:body>{document_body}</w:body></w:document>"#
    );
    zip.start_file("word/document.xml", opts).unwrap();
    zip.write_all(document.as_bytes()).unwrap();

    if let Some(numbering_body) = numbering {
        let numbering = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:numbering xmlns:w="{WML_NS}">{numbering_body}</w:numbering>"#
        );
        zip.start_file("word/numbering.xml", opts).unwrap();
        zip.write_all(numbering.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

pub fn paragraph(text: &str) -> String {
    format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
}

pub fn styled_paragraph(style: &str, text: &str) -> String {
    format!(
        "<w:p><w:pPr><w:pStyle w:val=\"{style}\"/></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"
    )
}

pub fn list_paragraph(num_id: &str, text: &str) -> String {
    format!(
        "<w:p><w:pPr><w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"{num_id}\"/></w:numPr></w:pPr>\
         <w:r><w:t>{text}</w:t></w:r></w:p>"
    )
}

pub fn table(rows: &[&[&str]]) -> String {
    let mut xml = String::from("<w:tbl>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in *row {
            xml.push_str(&format!(
                "<w:tc><w:p><w:r><w:t>{cell}</w:t></w:r></w:p></w:tc>"
            ));
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// numbering.xml body: one abstract definition per (abstract id,
/// multiLevelType) pair, one instance per (num id, abstract id) pair.
pub fn numbering(abstracts: &[(&str, &str)], nums: &[(&str, &str)]) -> String {
    let mut xml = String::new();
    for (abs_id, multi_level) in abstracts {
        xml.push_str(&format!(
            "<w:abstractNum w:abstractNumId=\"{abs_id}\">\
             <w:multiLevelType w:val=\"{multi_level}\"/>\
             </w:abstractNum>"
        ));
    }
    for (num_id, abs_id) in nums {
        xml.push_str(&format!(
            "<w:num w:numId=\"{num_id}\"><w:abstractNumId w:val=\"{abs_id}\"/></w:num>"
        ));
    }
    xml
}

pub fn output_path(name: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output");
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

/// Convert in-memory DOCX bytes and read the written markup back.
pub fn convert(name: &str, docx: &[u8]) -> String {
    let out = output_path(name);
    docx2html::convert_docx_bytes_to_html(docx, &out).expect("conversion failed");
    std::fs::read_to_string(&out).expect("read output")
}
