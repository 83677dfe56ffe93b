//! Width-measured word wrapping

use super::TextMeasure;
use crate::types::{Result, TriviaError};

/// Greedy word wrap using measured glyph widths.
///
/// Words are packed left to right while the line still fits `max_width`.
/// A word wider than the column on its own is then split character by
/// character, so every returned line fits unless it is a single character
/// that is already wider than `max_width`. Empty input yields one empty line.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    font: &str,
    size: f32,
    max_width: f32,
) -> Result<Vec<String>> {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(vec![String::new()]);
    };

    let mut lines = Vec::new();
    let mut current = first.to_string();
    for word in words {
        let candidate = format!("{} {}", current, word);
        if measure.text_width(&candidate, font, size)? <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);

    let mut fitted = Vec::with_capacity(lines.len());
    for line in lines {
        if measure.text_width(&line, font, size)? <= max_width {
            fitted.push(line);
        } else {
            hard_split(measure, &line, font, size, max_width, &mut fitted)?;
        }
    }

    Ok(fitted)
}

/// Pack characters greedily into lines no wider than `max_width`
fn hard_split<M: TextMeasure + ?Sized>(
    measure: &M,
    line: &str,
    font: &str,
    size: f32,
    max_width: f32,
    out: &mut Vec<String>,
) -> Result<()> {
    let mut chunk = String::new();
    for ch in line.chars() {
        chunk.push(ch);
        if measure.text_width(&chunk, font, size)? > max_width {
            chunk.pop();
            if !chunk.is_empty() {
                out.push(std::mem::take(&mut chunk));
            }
            chunk.push(ch);
        }
    }
    if !chunk.is_empty() {
        out.push(chunk);
    }
    Ok(())
}

/// Check that `line_count` lines at `line_height` fit into `available` points
pub fn check_fit(line_count: usize, line_height: f32, available: f32) -> Result<()> {
    let needed = line_count as f32 * line_height;
    if needed > available {
        return Err(TriviaError::TextOverflow {
            line_count,
            needed,
            available,
        });
    }
    Ok(())
}
