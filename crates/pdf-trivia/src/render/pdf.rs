//! PDF document surface built on lopdf
//!
//! Each page collects content stream operations until `show_page`, which
//! writes them out as the page's content stream. Fonts are the standard
//! Type1 fonts in WinAnsiEncoding, so no font data is embedded.

use crate::constants::BEZIER_CIRCLE_FACTOR;
use crate::layout::Rect;
use crate::text::{StandardFont, encode_win_ansi};
use crate::types::*;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::{Color, DocumentSurface};

/// Font used when text is drawn before any `set_font`
const FALLBACK_FONT: (StandardFont, f32) = (StandardFont::Helvetica, 12.0);

pub struct PdfSurface {
    doc: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    page_width: f32,
    page_height: f32,
    ops: Vec<Operation>,
    /// Registered fonts: (font, resource name, font object)
    fonts: Vec<(StandardFont, String, ObjectId)>,
    font: Option<(StandardFont, f32)>,
    font_stack: Vec<Option<(StandardFont, f32)>>,
}

impl PdfSurface {
    /// Start an empty document whose pages are `page_width` × `page_height` points
    pub fn new(page_width: f32, page_height: f32) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_tree_id = doc.new_object_id();
        Self {
            doc,
            pages_tree_id,
            page_refs: Vec::new(),
            page_width,
            page_height,
            ops: Vec::new(),
            fonts: Vec::new(),
            font: None,
            font_stack: Vec::new(),
        }
    }

    /// Pages closed so far
    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Resource name for a font, registering the font object on first use
    fn font_resource(&mut self, font: StandardFont) -> String {
        if let Some((_, name, _)) = self.fonts.iter().find(|(f, _, _)| *f == font) {
            return name.clone();
        }

        let font_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type1".to_vec())),
            ("BaseFont", Object::Name(font.name().as_bytes().to_vec())),
            ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
        ]));
        let name = format!("F{}", self.fonts.len() + 1);
        self.fonts.push((font, name.clone(), font_id));
        name
    }

    fn push(&mut self, operator: &str, operands: Vec<f32>) {
        self.ops.push(Operation::new(
            operator,
            operands.into_iter().map(Object::Real).collect(),
        ));
    }

    fn paint(&mut self, stroke: bool, fill: bool) {
        let operator = match (stroke, fill) {
            (true, true) => "B",
            (false, true) => "f",
            (true, false) => "S",
            (false, false) => "n",
        };
        self.push(operator, vec![]);
    }
}

impl DocumentSurface for PdfSurface {
    type Output = Document;

    fn set_stroke_color(&mut self, color: Color) {
        self.push("RG", color.components().to_vec());
    }

    fn set_fill_color(&mut self, color: Color) {
        self.push("rg", color.components().to_vec());
    }

    fn set_line_width(&mut self, width: f32) {
        self.push("w", vec![width]);
    }

    fn set_font(&mut self, name: &str, size: f32) -> Result<()> {
        let font =
            StandardFont::from_name(name).ok_or_else(|| TriviaError::UnknownFont(name.into()))?;
        self.font = Some((font, size));
        Ok(())
    }

    fn rounded_rect(&mut self, rect: Rect, radius: f32, stroke: bool, fill: bool) {
        let r = radius.clamp(0.0, rect.width.min(rect.height) / 2.0);
        let k = r * BEZIER_CIRCLE_FACTOR;
        let (x, y, right, top) = (rect.x, rect.y, rect.right(), rect.top());

        self.push("m", vec![x + r, y]);
        self.push("l", vec![right - r, y]);
        self.push("c", vec![right - r + k, y, right, y + r - k, right, y + r]);
        self.push("l", vec![right, top - r]);
        self.push("c", vec![right, top - r + k, right - r + k, top, right - r, top]);
        self.push("l", vec![x + r, top]);
        self.push("c", vec![x + r - k, top, x, top - r + k, x, top - r]);
        self.push("l", vec![x, y + r]);
        self.push("c", vec![x, y + r - k, x + r - k, y, x + r, y]);
        self.push("h", vec![]);
        self.paint(stroke, fill);
    }

    fn ellipse(&mut self, rect: Rect, stroke: bool, fill: bool) {
        let (cx, cy) = (rect.center_x(), rect.center_y());
        let (rx, ry) = (rect.width / 2.0, rect.height / 2.0);
        let (kx, ky) = (rx * BEZIER_CIRCLE_FACTOR, ry * BEZIER_CIRCLE_FACTOR);

        self.push("m", vec![cx + rx, cy]);
        self.push("c", vec![cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry]);
        self.push("c", vec![cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy]);
        self.push("c", vec![cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry]);
        self.push("c", vec![cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy]);
        self.push("h", vec![]);
        self.paint(stroke, fill);
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str) {
        let (font, size) = self.font.unwrap_or(FALLBACK_FONT);
        let resource = self.font_resource(font);

        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![Object::Name(resource.into_bytes()), Object::Real(size)],
        ));
        self.push("Td", vec![x, y]);
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn save_state(&mut self) {
        self.push("q", vec![]);
        self.font_stack.push(self.font);
    }

    fn restore_state(&mut self) {
        self.push("Q", vec![]);
        if let Some(font) = self.font_stack.pop() {
            self.font = font;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.push("cm", vec![1.0, 0.0, 0.0, 1.0, dx, dy]);
    }

    fn rotate(&mut self, degrees: f32) {
        let (sin, cos) = exact_sin_cos(degrees);
        self.push("cm", vec![cos, sin, -sin, cos, 0.0, 0.0]);
    }

    fn show_page(&mut self) -> Result<()> {
        let content = Content {
            operations: std::mem::take(&mut self.ops),
        };
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut fonts = Dictionary::new();
        for (_, name, id) in &self.fonts {
            fonts.set(name.as_bytes(), Object::Reference(*id));
        }
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.page_width),
                Object::Real(self.page_height),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.doc.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));

        // Graphics state does not carry across pages
        self.font = None;
        self.font_stack.clear();
        Ok(())
    }

    fn finish(mut self) -> Result<Document> {
        if !self.ops.is_empty() {
            self.show_page()?;
        }
        finalize_document(&mut self.doc, self.pages_tree_id, self.page_refs);
        Ok(self.doc)
    }
}

/// Sine and cosine with exact values on quarter turns
fn exact_sin_cos(degrees: f32) -> (f32, f32) {
    let turned = degrees.rem_euclid(360.0);
    match turned {
        0.0 => (0.0, 1.0),
        90.0 => (1.0, 0.0),
        180.0 => (0.0, -1.0),
        270.0 => (-1.0, 0.0),
        _ => turned.to_radians().sin_cos(),
    }
}

/// Create pages tree and catalog, finalize document structure
fn finalize_document(output: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}

/// Serialize a finished document
pub(crate) fn document_bytes(mut doc: Document) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}
