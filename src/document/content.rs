//! Page text from a PDF content stream.
//!
//! Text is rebuilt line by line from the text-showing operators. A line ends
//! whenever a positioning operator moves the baseline (`Td`, `TD`, `Tm`) and
//! on every explicit line advance (`T*`, `'`, `"`). Horizontal moves on the
//! same baseline become a single space.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Encoding, Object, ObjectId};

/// Baselines closer than this (in user space units) count as one line.
const BASELINE_TOLERANCE: f32 = 0.5;

/// `TJ` adjustments past this (thousandths of an em) are word gaps.
const WORD_GAP: f32 = 200.0;

/// Render the text of one page, one line per output line.
pub(crate) fn page_text(doc: &LopdfDocument, page_id: ObjectId) -> lopdf::Result<String> {
    let encodings: BTreeMap<Vec<u8>, Encoding> = match doc.get_page_fonts(page_id) {
        Ok(fonts) => fonts
            .into_iter()
            .filter_map(|(name, font)| match font.get_font_encoding(doc) {
                Ok(encoding) => Some((name, encoding)),
                Err(e) => {
                    log::debug!(
                        "font {} has no usable encoding ({}); decoding bytes directly",
                        String::from_utf8_lossy(&name),
                        e
                    );
                    None
                }
            })
            .collect(),
        Err(e) => {
            log::debug!("page fonts unavailable: {}", e);
            BTreeMap::new()
        }
    };

    let content = Content::decode(&doc.get_page_content(page_id)?)?;

    let mut lines = LineBuilder::default();
    let mut matrix = TextMatrix::default();
    let mut encoding: Option<&Encoding> = None;

    for op in &content.operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => matrix = TextMatrix::default(),
            "Tf" => {
                encoding = operands
                    .first()
                    .and_then(|o| o.as_name().ok())
                    .and_then(|name| encodings.get(name));
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(get_number) {
                    matrix.leading = leading;
                }
            }
            "Td" | "TD" => {
                if operands.len() >= 2 {
                    let tx = get_number(&operands[0]).unwrap_or(0.0);
                    let ty = get_number(&operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        matrix.leading = -ty;
                    }
                    matrix.translate(tx, ty);
                    lines.move_to(matrix.f);
                }
            }
            "Tm" => {
                if operands.len() >= 6 {
                    matrix.set(
                        get_number(&operands[0]).unwrap_or(1.0),
                        get_number(&operands[1]).unwrap_or(0.0),
                        get_number(&operands[2]).unwrap_or(0.0),
                        get_number(&operands[3]).unwrap_or(1.0),
                        get_number(&operands[4]).unwrap_or(0.0),
                        get_number(&operands[5]).unwrap_or(0.0),
                    );
                    lines.move_to(matrix.f);
                }
            }
            "T*" => {
                matrix.next_line();
                lines.new_line(matrix.f);
            }
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    lines.push(&decode(encoding, bytes));
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    for item in items {
                        match item {
                            Object::String(bytes, _) => lines.push(&decode(encoding, bytes)),
                            other => {
                                if get_number(other).is_some_and(|n| -n > WORD_GAP) {
                                    lines.word_gap();
                                }
                            }
                        }
                    }
                }
            }
            "'" | "\"" => {
                matrix.next_line();
                lines.new_line(matrix.f);
                let text_idx = if op.operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = operands.get(text_idx) {
                    lines.push(&decode(encoding, bytes));
                }
            }
            _ => {}
        }
    }

    Ok(lines.finish())
}

/// Decode a shown string with the font's encoding, or directly when the font
/// has none lopdf understands (e.g. Identity-H without a ToUnicode map).
fn decode(encoding: Option<&Encoding>, bytes: &[u8]) -> String {
    encoding
        .and_then(|enc| LopdfDocument::decode_text(enc, bytes).ok())
        .unwrap_or_else(|| decode_text_simple(bytes))
}

fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Scripts written without spaces between words.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2EBEF
        | 0x3040..=0x309F
        | 0x30A0..=0x30FF)
}

#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }
}

/// Accumulates shown text into lines.
#[derive(Debug, Default)]
struct LineBuilder {
    lines: Vec<String>,
    current: String,
    baseline: Option<f32>,
}

impl LineBuilder {
    fn push(&mut self, text: &str) {
        self.current.push_str(text);
    }

    /// Start a new line unless `y` is on the current baseline, in which case
    /// the move only separates words.
    fn move_to(&mut self, y: f32) {
        match self.baseline {
            Some(baseline) if (baseline - y).abs() <= BASELINE_TOLERANCE => self.word_gap(),
            _ => self.new_line(y),
        }
    }

    fn new_line(&mut self, y: f32) {
        let line = std::mem::take(&mut self.current);
        if !line.trim().is_empty() {
            self.lines.push(line);
        }
        self.baseline = Some(y);
    }

    fn word_gap(&mut self) {
        match self.current.chars().last() {
            Some(c) if !c.is_whitespace() && !is_spaceless_script_char(c) => {
                self.current.push(' ')
            }
            _ => {}
        }
    }

    fn finish(mut self) -> String {
        self.new_line(0.0);
        let mut text = String::new();
        for line in self.lines {
            text.push_str(&line);
            text.push('\n');
        }
        text
    }
}
