//! Fixture builders shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::{dictionary, Object, Stream};
use rust_xlsxwriter::Workbook;

/// Build a PDF where each inner slice is one page and each string one line.
///
/// Every line sits in its own `BT`/`ET` block.
pub fn pdf_with_lines(pages: &[&[&str]]) -> Vec<u8> {
    let streams: Vec<String> = pages
        .iter()
        .map(|lines| {
            lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    let y = 720 - 20 * i as i64;
                    format!("BT /F1 12 Tf 72 {y} Td ({line}) Tj ET\n")
                })
                .collect()
        })
        .collect();
    let streams: Vec<&str> = streams.iter().map(String::as_str).collect();
    pdf_with_content(&streams)
}

/// Build a PDF with one page per raw content stream. Font `F1` is Helvetica.
pub fn pdf_with_content(pages: &[&str]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ];

    let mut page_ids = Vec::new();
    for content in pages {
        let stream = Stream::new(dictionary! {}, content.as_bytes().to_vec());
        let content_id = doc.add_object(stream);

        let resources = dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        };

        let page_dict = dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box.clone(),
            "Contents" => Object::Reference(content_id),
            "Resources" => resources,
        };
        page_ids.push(doc.add_object(page_dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(pages.len() as i64),
    };
    let pages_id = doc.add_object(pages_dict);

    for &pid in &page_ids {
        if let Ok(page_obj) = doc.get_object_mut(pid) {
            if let Ok(dict) = page_obj.as_dict_mut() {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Write a PDF built by [`pdf_with_lines`] into `dir`.
pub fn write_pdf(dir: &Path, name: &str, pages: &[&[&str]]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pdf_with_lines(pages)).unwrap();
    path
}

/// Write a PDF built by [`pdf_with_content`] into `dir`.
pub fn write_pdf_content(dir: &Path, name: &str, pages: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pdf_with_content(pages)).unwrap();
    path
}

/// A cell value for [`write_xlsx`].
#[derive(Debug, Clone, Copy)]
pub enum Value<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

/// Write a one-sheet workbook with a header row and body rows into `dir`.
pub fn write_xlsx(dir: &Path, name: &str, headers: &[&str], rows: &[Vec<Value>]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            match value {
                Value::Text(s) => {
                    sheet.write_string(r, col as u16, *s).unwrap();
                }
                Value::Number(n) => {
                    sheet.write_number(r, col as u16, *n).unwrap();
                }
                Value::Blank => {}
            }
        }
    }

    workbook.save(&path).unwrap();
    path
}
