//! Sheet rendering: cards onto front pages and duplex back pages

use crate::layout::{GridGeometry, Rect, back_slot, grid_geometry};
use crate::options::LayoutConfig;
use crate::text::{StandardMetrics, TextMeasure};
use crate::types::*;

use super::DocumentSurface;
use super::card::draw_card;

/// Lays cards out on sheets and draws them onto a `DocumentSurface`.
///
/// Each sheet produces a front page and, when duplex printing is
/// selected, a back page whose cards sit directly behind their fronts
/// once the paper is flipped.
pub struct SheetRenderer<'a, M: ?Sized = StandardMetrics> {
    config: &'a LayoutConfig,
    geometry: GridGeometry,
    measure: &'a M,
}

impl<'a, M: TextMeasure + ?Sized> SheetRenderer<'a, M> {
    /// Validate `config` and compute its grid
    pub fn new(config: &'a LayoutConfig, measure: &'a M) -> Result<Self> {
        config.validate()?;
        let geometry = grid_geometry(config)?;
        Ok(Self {
            config,
            geometry,
            measure,
        })
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Render six-question cards and finish the surface
    pub fn render<S: DocumentSurface>(
        &self,
        cards: &[Card],
        mode: PrintMode,
        surface: S,
    ) -> Result<S::Output> {
        log::info!(
            "Rendering {} cards ({:?}, {}x{} per sheet)",
            cards.len(),
            mode,
            self.geometry.cols,
            self.geometry.rows
        );
        self.render_with(cards, mode, surface, |surface, cell, card, face| {
            draw_card(surface, self.measure, self.config, cell, card, face)
        })
    }

    /// Batch `items` into sheets and draw each with `draw`.
    ///
    /// `draw` is called once per item for the front page and once more for
    /// the back page in duplex modes. On rotated back slots it runs inside
    /// a half turn about the cell center.
    pub(crate) fn render_with<T, S, F>(
        &self,
        items: &[T],
        mode: PrintMode,
        mut surface: S,
        mut draw: F,
    ) -> Result<S::Output>
    where
        S: DocumentSurface,
        F: FnMut(&mut S, Rect, &T, CardFace) -> Result<()>,
    {
        if items.is_empty() {
            return Err(TriviaError::NoCards);
        }

        let geometry = &self.geometry;
        for (sheet, batch) in items.chunks(geometry.cell_count()).enumerate() {
            log::debug!("Sheet {}: {} cards", sheet + 1, batch.len());

            for (item, pos) in batch.iter().zip(geometry.positions()) {
                draw(&mut surface, geometry.cell_bounds(pos), item, CardFace::Questions)?;
            }
            surface.show_page()?;

            if !mode.is_duplex() {
                continue;
            }

            for (item, pos) in batch.iter().zip(geometry.positions()) {
                let Some(back) = back_slot(pos, geometry.cols, geometry.rows, mode) else {
                    continue;
                };
                let cell = geometry.cell_bounds(back.grid_pos);
                if back.rotated {
                    surface.save_state();
                    surface.translate(cell.center_x(), cell.center_y());
                    surface.rotate(180.0);
                    surface.translate(-cell.center_x(), -cell.center_y());
                }
                let drawn = draw(&mut surface, cell, item, CardFace::Answers);
                if back.rotated {
                    surface.restore_state();
                }
                drawn?;
            }
            surface.show_page()?;
        }

        surface.finish()
    }
}
