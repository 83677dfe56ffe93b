use crate::constants::{MAX_LINES_PER_ROW, ROW_LINE_HEIGHT, mm_to_pt};
use crate::text::StandardFont;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard paper sizes (portrait)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Legal,
}

impl PaperSize {
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
        }
    }

    pub fn dimensions_pt(self) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        (mm_to_pt(w), mm_to_pt(h))
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
        }
    }
}

/// Page, grid and card styling configuration.
///
/// All lengths are in PDF points (1/72 inch).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    // Page/grid
    pub page_width: f32,
    pub page_height: f32,
    pub cols: usize,
    pub rows: usize,
    pub margin: f32,
    pub gutter_x: f32,
    pub gutter_y: f32,

    // Card chrome
    pub corner_radius: f32,
    pub border_width: f32,
    pub padding: f32,
    pub header_height: f32,

    // Subject badge (oval bullet)
    pub badge_width: f32,
    pub badge_height: f32,
    pub badge_margin: f32,

    // Typography
    pub font_name: String,
    pub font_name_bold: String,
    pub font_size_body: f32,
    pub font_size_header: f32,
    pub font_size_subject: f32,

    // Hard limits for the single-question layout
    pub max_chars_level: usize,
    pub max_chars_subject: usize,
    pub max_chars_question: usize,
    pub max_chars_answer: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let (page_width, page_height) = PaperSize::A4.dimensions_pt();
        Self {
            page_width,
            page_height,
            cols: 2,
            rows: 4,
            margin: mm_to_pt(10.0),
            gutter_x: mm_to_pt(4.0),
            gutter_y: mm_to_pt(4.0),
            corner_radius: mm_to_pt(3.0),
            border_width: 1.0,
            padding: mm_to_pt(5.0),
            header_height: mm_to_pt(8.0),
            badge_width: mm_to_pt(10.0),
            badge_height: mm_to_pt(6.0),
            badge_margin: mm_to_pt(2.0),
            font_name: StandardFont::Helvetica.name().to_string(),
            font_name_bold: StandardFont::HelveticaBold.name().to_string(),
            font_size_body: 9.0,
            font_size_header: 10.0,
            font_size_subject: 7.0,
            max_chars_level: 20,
            max_chars_subject: 3,
            max_chars_question: 170,
            max_chars_answer: 120,
        }
    }
}

impl LayoutConfig {
    /// Default layout on a different paper size
    pub fn with_paper(paper: PaperSize) -> Self {
        let (page_width, page_height) = paper.dimensions_pt();
        Self {
            page_width,
            page_height,
            ..Default::default()
        }
    }

    /// Cards per sheet
    pub fn cards_per_sheet(&self) -> usize {
        self.cols * self.rows
    }

    /// Width left for wrapped text to the right of a badge
    pub fn row_text_width(&self, card_width: f32) -> f32 {
        card_width - 2.0 * self.padding - self.badge_width - self.badge_margin
    }

    /// Height of the content area below the header
    pub fn content_height(&self, card_height: f32) -> f32 {
        card_height - 2.0 * self.padding - self.header_height
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config = serde_json::from_slice(&bytes)
            .map_err(|e| TriviaError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| TriviaError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the configuration before any card is processed
    pub fn validate(&self) -> Result<()> {
        if self.cols == 0 || self.rows == 0 {
            return Err(TriviaError::Geometry(format!(
                "Grid must have at least one column and one row (got {}x{})",
                self.cols, self.rows
            )));
        }

        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(TriviaError::Geometry(format!(
                "Page size must be positive (got {:.1}x{:.1}pt)",
                self.page_width, self.page_height
            )));
        }

        if self.margin < 0.0 || self.gutter_x < 0.0 || self.gutter_y < 0.0 {
            return Err(TriviaError::Geometry(
                "Margin and gutters cannot be negative".to_string(),
            ));
        }

        for (name, size) in [
            ("body", self.font_size_body),
            ("header", self.font_size_header),
            ("subject", self.font_size_subject),
        ] {
            if size <= 0.0 {
                return Err(TriviaError::Geometry(format!(
                    "Font size for {} must be positive (got {})",
                    name, size
                )));
            }
        }

        // Usable width/height after margins and gutters
        let geometry = crate::layout::grid_geometry(self)?;

        let content_height = self.content_height(geometry.card_height);
        if content_height <= 0.0 {
            return Err(TriviaError::Geometry(format!(
                "Padding and header leave no room for questions (card height {:.1}pt)",
                geometry.card_height
            )));
        }

        let two_lines = MAX_LINES_PER_ROW as f32 * ROW_LINE_HEIGHT * self.font_size_body;
        let band = content_height / QUESTIONS_PER_CARD as f32;
        if band < self.badge_height || band < two_lines {
            log::warn!(
                "Question band ({:.1}pt) is shorter than a badge or two text lines; rows will overlap",
                band
            );
        }

        if self.row_text_width(geometry.card_width) <= 0.0 {
            return Err(TriviaError::Geometry(format!(
                "Padding and badge leave no room for text (card width {:.1}pt)",
                geometry.card_width
            )));
        }

        for name in [&self.font_name, &self.font_name_bold] {
            if StandardFont::from_name(name).is_none() {
                return Err(TriviaError::UnknownFont(name.clone()));
            }
        }

        Ok(())
    }
}
