//! Drawing a single six-question card face

use crate::constants::{
    ANSWER_HEADER_SUFFIX, BADGE_LABEL, CAP_HEIGHT_RATIO, INK, MAX_LINES_PER_ROW, POSITION_COLORS,
    ROW_LINE_HEIGHT,
};
use crate::layout::Rect;
use crate::options::LayoutConfig;
use crate::text::{TextMeasure, check_fit, wrap_text};
use crate::types::*;

use super::DocumentSurface;

/// Draw one card face into `cell`.
///
/// The content area below the header is cut into six equal bands. Each
/// badge is centered in its band and its text block (at most two lines) is
/// centered on the badge. Rows with no subject or no text are left blank.
pub(crate) fn draw_card<S, M>(
    surface: &mut S,
    measure: &M,
    config: &LayoutConfig,
    cell: Rect,
    card: &Card,
    face: CardFace,
) -> Result<()>
where
    S: DocumentSurface,
    M: TextMeasure + ?Sized,
{
    draw_border(surface, config, cell);

    let header = match face {
        CardFace::Questions => card.level().to_string(),
        CardFace::Answers => format!("{}{}", card.level(), ANSWER_HEADER_SUFFIX),
    };
    surface.set_fill_color(INK);
    surface.set_font(&config.font_name_bold, config.font_size_header)?;
    surface.draw_text(
        cell.x + config.padding,
        cell.top() - config.padding - config.font_size_header,
        &header,
    );

    let content_top = cell.top() - config.padding - config.header_height;
    let band = config.content_height(cell.height) / QUESTIONS_PER_CARD as f32;
    let text_x = cell.x + config.padding + config.badge_width + config.badge_margin;
    let text_width = config.row_text_width(cell.width);
    let line_height = config.font_size_body * ROW_LINE_HEIGHT;

    for (slot, question) in card.questions().iter().enumerate() {
        let body = match face {
            CardFace::Questions => &question.text,
            CardFace::Answers => &question.answer,
        };
        if question.subject.is_empty() || body.is_empty() {
            continue;
        }

        let lines = wrap_text(
            measure,
            body,
            &config.font_name,
            config.font_size_body,
            text_width,
        )?;
        check_fit(
            lines.len(),
            line_height,
            MAX_LINES_PER_ROW as f32 * line_height,
        )
        .inspect_err(|_| {
            log::error!(
                "Level '{}' subject '{}' wraps to {} lines; at most {} fit",
                card.level(),
                question.subject,
                lines.len(),
                MAX_LINES_PER_ROW
            )
        })?;

        let center_y = content_top - (slot as f32 + 0.5) * band;
        let badge = Rect::new(
            cell.x + config.padding,
            center_y - config.badge_height / 2.0,
            config.badge_width,
            config.badge_height,
        );
        draw_badge(surface, measure, config, badge, &question.subject, slot)?;

        surface.set_fill_color(INK);
        surface.set_font(&config.font_name, config.font_size_body)?;
        let first_baseline =
            text_block_baseline(center_y, lines.len(), line_height, config.font_size_body);
        for (i, line) in lines.iter().enumerate() {
            surface.draw_text(text_x, first_baseline - i as f32 * line_height, line);
        }
    }

    Ok(())
}

/// Rounded outer border of a card
pub(crate) fn draw_border<S: DocumentSurface>(surface: &mut S, config: &LayoutConfig, cell: Rect) {
    surface.set_stroke_color(INK);
    surface.set_line_width(config.border_width);
    surface.rounded_rect(cell, config.corner_radius, true, false);
}

/// Filled oval in the slot's color with the subject code centered on it
fn draw_badge<S, M>(
    surface: &mut S,
    measure: &M,
    config: &LayoutConfig,
    badge: Rect,
    subject: &str,
    slot: usize,
) -> Result<()>
where
    S: DocumentSurface,
    M: TextMeasure + ?Sized,
{
    let color = POSITION_COLORS[slot];
    surface.set_fill_color(color);
    surface.set_stroke_color(color);
    surface.ellipse(badge, true, true);

    surface.set_fill_color(BADGE_LABEL);
    surface.set_font(&config.font_name_bold, config.font_size_subject)?;
    let label_width = measure.text_width(subject, &config.font_name_bold, config.font_size_subject)?;
    surface.draw_text(
        badge.center_x() - label_width / 2.0,
        badge.center_y() - config.font_size_subject * CAP_HEIGHT_RATIO / 2.0,
        subject,
    );
    Ok(())
}

/// Baseline of the first line of a text block centered on `center_y`
pub(crate) fn text_block_baseline(
    center_y: f32,
    line_count: usize,
    line_height: f32,
    font_size: f32,
) -> f32 {
    let block_height = line_count as f32 * line_height;
    center_y + block_height / 2.0 - line_height + (line_height - font_size * CAP_HEIGHT_RATIO) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;
    use crate::render::testing::{Call, RecordingSurface};
    use crate::text::StandardMetrics;

    fn card(texts: [&str; 6]) -> Card {
        let subjects = ["G", "E", "H", "A", "S", "L"];
        let questions = std::array::from_fn(|i| Question {
            subject: subjects[i].to_string(),
            text: texts[i].to_string(),
            answer: format!("Answer {}", i),
        });
        Card::new("Year 5".to_string(), questions)
    }

    fn cell() -> Rect {
        Rect::new(28.0, 600.0, 263.0, 187.0)
    }

    fn badges(calls: &[Call]) -> Vec<(Rect, Color)> {
        let mut out = Vec::new();
        let mut fill = None;
        for call in calls {
            match call {
                Call::FillColor(c) => fill = Some(*c),
                Call::Ellipse(rect, true) => out.push((*rect, fill.unwrap())),
                _ => {}
            }
        }
        out
    }

    #[test]
    fn test_question_face_draws_header_and_six_rows() {
        let config = LayoutConfig::default();
        let mut surface = RecordingSurface::default();
        let card = card(["Q1", "Q2", "Q3", "Q4", "Q5", "Q6"]);
        draw_card(&mut surface, &StandardMetrics, &config, cell(), &card, CardFace::Questions)
            .unwrap();

        let texts = RecordingSurface::texts(&surface.calls);
        assert_eq!(texts[0], "Year 5");
        assert_eq!(
            &texts[1..],
            &["G", "Q1", "E", "Q2", "H", "Q3", "A", "Q4", "S", "Q5", "L", "Q6"]
        );
        assert!(matches!(surface.calls[2], Call::RoundedRect(r) if r == cell()));
    }

    #[test]
    fn test_badge_colors_follow_slot() {
        let config = LayoutConfig::default();
        let mut surface = RecordingSurface::default();
        let card = card(["Q1", "Q2", "Q3", "Q4", "Q5", "Q6"]);
        draw_card(&mut surface, &StandardMetrics, &config, cell(), &card, CardFace::Answers)
            .unwrap();

        let colors: Vec<Color> = badges(&surface.calls).iter().map(|(_, c)| *c).collect();
        assert_eq!(colors, POSITION_COLORS.to_vec());
    }

    #[test]
    fn test_badges_centered_in_equal_bands() {
        let config = LayoutConfig::default();
        let mut surface = RecordingSurface::default();
        let card = card(["Q1", "Q2", "Q3", "Q4", "Q5", "Q6"]);
        draw_card(&mut surface, &StandardMetrics, &config, cell(), &card, CardFace::Questions)
            .unwrap();

        let content_top = cell().top() - config.padding - config.header_height;
        let band = config.content_height(cell().height) / 6.0;
        for (slot, (rect, _)) in badges(&surface.calls).iter().enumerate() {
            let expected = content_top - (slot as f32 + 0.5) * band;
            assert!((rect.center_y() - expected).abs() < 0.01);
            assert_eq!(rect.x, cell().x + config.padding);
        }
    }

    #[test]
    fn test_answer_face_header_and_text() {
        let config = LayoutConfig::default();
        let mut surface = RecordingSurface::default();
        let card = card(["Q1", "Q2", "Q3", "Q4", "Q5", "Q6"]);
        draw_card(&mut surface, &StandardMetrics, &config, cell(), &card, CardFace::Answers)
            .unwrap();

        let texts = RecordingSurface::texts(&surface.calls);
        assert_eq!(texts[0], "Year 5 - ANSWERS");
        assert!(texts.contains(&"Answer 0"));
        assert!(!texts.contains(&"Q1"));
    }

    #[test]
    fn test_empty_text_row_is_skipped() {
        let config = LayoutConfig::default();
        let mut surface = RecordingSurface::default();
        let card = card(["Q1", "", "Q3", "Q4", "Q5", "Q6"]);
        draw_card(&mut surface, &StandardMetrics, &config, cell(), &card, CardFace::Questions)
            .unwrap();

        assert_eq!(badges(&surface.calls).len(), 5);
        let texts = RecordingSurface::texts(&surface.calls);
        assert!(!texts.contains(&"E"));
    }

    #[test]
    fn test_two_line_text_is_centered_on_badge() {
        let config = LayoutConfig::default();
        let long = "Which river flows through Vienna Budapest and Belgrade";
        let mut surface = RecordingSurface::default();
        let card = card([long, "Q2", "Q3", "Q4", "Q5", "Q6"]);
        draw_card(&mut surface, &StandardMetrics, &config, cell(), &card, CardFace::Questions)
            .unwrap();

        let body_lines: Vec<(f32, f32)> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(x, y, t) if long.contains(t.as_str()) && t.len() > 3 => Some((*x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(body_lines.len(), 2);

        let (badge, _) = badges(&surface.calls)[0];
        let line_height = config.font_size_body * ROW_LINE_HEIGHT;
        let cap = config.font_size_body * CAP_HEIGHT_RATIO;
        // Midpoint between the two lines' cap centers sits on the badge center
        let mid = (body_lines[0].1 + cap / 2.0 + body_lines[1].1 + cap / 2.0) / 2.0;
        assert!((mid - badge.center_y()).abs() < 0.01);
        assert!((body_lines[0].1 - body_lines[1].1 - line_height).abs() < 0.01);
    }

    #[test]
    fn test_three_lines_overflow() {
        let config = LayoutConfig::default();
        let long = "word ".repeat(80);
        let mut surface = RecordingSurface::default();
        let card = card(["Q1", "Q2", &long, "Q4", "Q5", "Q6"]);
        let result = draw_card(
            &mut surface,
            &StandardMetrics,
            &config,
            cell(),
            &card,
            CardFace::Questions,
        );
        match result {
            Err(TriviaError::TextOverflow {
                line_count,
                needed,
                available,
            }) => {
                assert!(line_count > 2);
                assert!(needed > available);
                assert!((available - 2.0 * 9.0 * 1.2).abs() < 0.01);
            }
            other => panic!("Expected TextOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_single_line_block_centers_caps() {
        let baseline = text_block_baseline(100.0, 1, 12.0, 10.0);
        assert!((baseline + 10.0 * CAP_HEIGHT_RATIO / 2.0 - 100.0).abs() < 0.001);
    }
}
