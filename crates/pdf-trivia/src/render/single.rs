//! Single-question cards: one CSV row per card

use crate::constants::{BODY_LINE_HEIGHT, INK};
use crate::layout::Rect;
use crate::options::LayoutConfig;
use crate::records::validate_rows;
use crate::text::{TextMeasure, check_fit, wrap_text};
use crate::types::*;

use super::card::draw_border;
use super::{DocumentSurface, SheetRenderer};

/// Render one card per row, questions on the front and answers on the back.
///
/// Rows are checked against the configured length limits before anything
/// is drawn. Body text that does not fit the card fails the whole render.
pub fn render_single_cards<S, M>(
    rows: &[QuestionRow],
    config: &LayoutConfig,
    measure: &M,
    mode: PrintMode,
    surface: S,
) -> Result<S::Output>
where
    S: DocumentSurface,
    M: TextMeasure + ?Sized,
{
    validate_rows(rows, config)?;
    let renderer = SheetRenderer::new(config, measure)?;
    log::info!("Rendering {} single-question cards ({:?})", rows.len(), mode);

    renderer.render_with(rows, mode, surface, |surface, cell, row, face| {
        let body = match face {
            CardFace::Questions => &row.question,
            CardFace::Answers => &row.answer,
        };
        draw_single_card(surface, measure, config, cell, row, body)
    })
}

fn draw_single_card<S, M>(
    surface: &mut S,
    measure: &M,
    config: &LayoutConfig,
    cell: Rect,
    row: &QuestionRow,
    body: &str,
) -> Result<()>
where
    S: DocumentSurface,
    M: TextMeasure + ?Sized,
{
    draw_border(surface, config, cell);

    let header_bottom = cell.top() - config.padding - config.header_height;
    surface.set_fill_color(INK);
    surface.set_font(&config.font_name, config.font_size_header)?;
    surface.draw_text(
        cell.x + config.padding,
        header_bottom + (config.header_height - config.font_size_header) / 2.0,
        &row.level,
    );

    // Outlined badge at the right end of the header
    let badge = Rect::new(
        cell.right() - config.padding - config.badge_width,
        header_bottom + (config.header_height - config.badge_height) / 2.0,
        config.badge_width,
        config.badge_height,
    );
    surface.ellipse(badge, true, false);
    let subject_width =
        measure.text_width(&row.subject, &config.font_name, config.font_size_header)?;
    surface.draw_text(
        badge.x + (badge.width - subject_width) / 2.0,
        badge.y + (badge.height - config.font_size_header) / 2.0,
        &row.subject,
    );

    let body_width = cell.width - 2.0 * config.padding;
    let body_height = config.content_height(cell.height);
    let line_height = config.font_size_body * BODY_LINE_HEIGHT;

    let lines = wrap_text(
        measure,
        body,
        &config.font_name,
        config.font_size_body,
        body_width,
    )?;
    check_fit(lines.len(), line_height, body_height)?;

    surface.set_font(&config.font_name, config.font_size_body)?;
    let start_y = cell.y + config.padding + body_height - line_height;
    for (i, line) in lines.iter().enumerate() {
        surface.draw_text(cell.x + config.padding, start_y - i as f32 * line_height, line);
    }

    Ok(())
}
