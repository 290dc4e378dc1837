//! Layout provider backed by `lopdf`.
//!
//! Walks each page's content stream, tracking the text matrix and the
//! current font, and groups positioned text runs into baseline-aligned
//! lines. Only the attributes the analysis engine needs survive: text,
//! font size, and font name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use super::LayoutProvider;
use crate::error::{Error, Result};
use crate::model::{Line, Page, Span};

/// A [`LayoutProvider`] that extracts lines and spans from a PDF file.
#[derive(Debug)]
pub struct LopdfProvider {
    doc: LopdfDocument,
    name: String,
}

impl LopdfProvider {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingInput(PathBuf::from(path)));
        }
        let doc = LopdfDocument::load(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { doc, name })
    }

    /// Load a PDF from an in-memory byte slice.
    pub fn from_bytes(data: &[u8], name: impl Into<String>) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self {
            doc,
            name: name.into(),
        })
    }

    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        self.doc
            .get_page_content(page_id)
            .map_err(|e| Error::Pdf(e.to_string()))
    }

    /// Extract positioned spans from a single page's content stream.
    fn page_spans(&self, page_id: ObjectId) -> Result<Vec<PositionedSpan>> {
        // Resource name → base font name ("Helvetica-Bold" etc.)
        let lopdf_fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::Pdf(e.to_string()))?;

        let mut base_fonts: HashMap<Vec<u8>, String> = HashMap::new();
        for (name, font_dict) in &lopdf_fonts {
            let base = font_dict
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            base_fonts.insert(name.clone(), base);
        }

        let raw = self.page_content(page_id)?;
        let content =
            lopdf::content::Content::decode(&raw).map_err(|e| Error::Pdf(e.to_string()))?;

        let mut spans = Vec::new();
        let mut font_name = String::new();
        let mut font_key: Vec<u8> = Vec::new();
        let mut font_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut in_text = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix {
                        leading: matrix.leading,
                        ..TextMatrix::default()
                    };
                }
                "ET" => in_text = false,
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(key) = &op.operands[0] {
                            font_key = key.clone();
                            font_name = base_fonts
                                .get(key.as_slice())
                                .cloned()
                                .unwrap_or_else(|| String::from_utf8_lossy(key).to_string());
                        }
                        font_size = as_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(l) = op.operands.first().and_then(as_number) {
                        matrix.leading = l;
                    }
                }
                "Td" => {
                    if op.operands.len() >= 2 {
                        matrix.translate(
                            as_number(&op.operands[0]).unwrap_or(0.0),
                            as_number(&op.operands[1]).unwrap_or(0.0),
                        );
                    }
                }
                "TD" => {
                    if op.operands.len() >= 2 {
                        let ty = as_number(&op.operands[1]).unwrap_or(0.0);
                        matrix.leading = -ty;
                        matrix.translate(as_number(&op.operands[0]).unwrap_or(0.0), ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        let vals: Vec<f32> = op
                            .operands
                            .iter()
                            .take(6)
                            .map(|o| as_number(o).unwrap_or(0.0))
                            .collect();
                        matrix.set(vals[0], vals[1], vals[2], vals[3], vals[4], vals[5]);
                    }
                }
                "T*" => matrix.next_line(),
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        matrix.next_line();
                    }
                    if !in_text {
                        continue;
                    }
                    let text = self.decode_show_text(page_id, &font_key, &op);
                    if !text.trim().is_empty() {
                        let (x, y) = matrix.position();
                        spans.push(PositionedSpan {
                            span: Span::new(text, font_size * matrix.scale(), font_name.clone()),
                            x,
                            y,
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }

    /// Decode the string operand(s) of a text-showing operator.
    fn decode_show_text(
        &self,
        page_id: ObjectId,
        font_key: &[u8],
        op: &lopdf::content::Operation,
    ) -> String {
        match op.operator.as_str() {
            "TJ" => {
                let mut combined = String::new();
                if let Some(Object::Array(arr)) = op.operands.first() {
                    for item in arr {
                        match item {
                            Object::String(bytes, _) => {
                                combined.push_str(&self.decode_bytes(page_id, font_key, bytes));
                            }
                            // Large negative adjustments are word spaces.
                            Object::Integer(n) if *n < -200 => {
                                if !combined.ends_with(' ') {
                                    combined.push(' ');
                                }
                            }
                            Object::Real(n) if *n < -200.0 => {
                                if !combined.ends_with(' ') {
                                    combined.push(' ');
                                }
                            }
                            _ => {}
                        }
                    }
                }
                combined
            }
            "\"" => match op.operands.get(2) {
                Some(Object::String(bytes, _)) => self.decode_bytes(page_id, font_key, bytes),
                _ => String::new(),
            },
            // Tj and '
            _ => match op.operands.first() {
                Some(Object::String(bytes, _)) => self.decode_bytes(page_id, font_key, bytes),
                _ => String::new(),
            },
        }
    }

    /// Encoding name declared by a font on a page, if any.
    fn font_encoding_name(&self, page_id: ObjectId, font_key: &[u8]) -> Option<String> {
        let fonts = self.doc.get_page_fonts(page_id).ok()?;
        let font_dict = fonts.get(font_key)?;
        match font_dict.get(b"Encoding").ok()? {
            Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
            _ => None,
        }
    }

    fn decode_bytes(&self, page_id: ObjectId, font_key: &[u8], bytes: &[u8]) -> String {
        // Identity-H/V fonts carry 2-byte CID codes; try UTF-16BE first.
        if let Some(enc_name) = self.font_encoding_name(page_id, font_key) {
            if enc_name.contains("Identity") && bytes.len() >= 2 && bytes.len() % 2 == 0 {
                let code_units: Vec<u16> = bytes
                    .chunks(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                let decoded = String::from_utf16_lossy(&code_units);
                if !decoded.is_empty() && !decoded.chars().all(|c| c == '\u{FFFD}' || c == '\0') {
                    return decoded;
                }
            }
        }
        decode_text_simple(bytes)
    }
}

impl LayoutProvider for LopdfProvider {
    fn produce_pages(&self) -> Result<Vec<Page>> {
        let mut pages = Vec::new();
        for (page_num, page_id) in self.doc.get_pages() {
            let lines = match self.page_spans(page_id) {
                Ok(spans) => group_into_lines(spans),
                Err(e) => {
                    // A single unreadable page should not lose the document.
                    log::warn!("page {page_num}: {e}");
                    Vec::new()
                }
            };
            pages.push(Page::with_lines(page_num, lines));
        }
        Ok(pages)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A span plus its text-space position, used only while grouping lines.
struct PositionedSpan {
    span: Span,
    x: f32,
    y: f32,
}

/// Group positioned spans into baseline-aligned lines in reading order.
fn group_into_lines(mut spans: Vec<PositionedSpan>) -> Vec<Line> {
    if spans.is_empty() {
        return Vec::new();
    }

    // Top-to-bottom (PDF Y grows upward), then left-to-right.
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<Span> = Vec::new();
    let mut current_y = f32::MAX;

    for ps in spans {
        let tolerance = ps.span.size * 0.3;
        if current.is_empty() || (ps.y - current_y).abs() <= tolerance {
            if current.is_empty() {
                current_y = ps.y;
            }
            current.push(ps.span);
        } else {
            lines.push(Line::from_spans(std::mem::take(&mut current)));
            current_y = ps.y;
            current.push(ps.span);
        }
    }
    if !current.is_empty() {
        lines.push(Line::from_spans(current));
    }

    lines
}

/// Text matrix tracking for content-stream position.
#[derive(Debug, Clone)]
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
            leading: 12.0,
        }
    }
}

impl TextMatrix {
    #[allow(clippy::many_single_char_names)]
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
        let leading = self.leading;
        self.translate(0.0, -leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Extract a number from a PDF object operand.
fn as_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Simple text decoding fallback when no font encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Latin-1 fallback
    bytes.iter().map(|&b| b as char).collect()
}
