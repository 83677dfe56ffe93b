use crate::options::LayoutConfig;
use crate::render::{PdfSurface, SheetRenderer, document_bytes, render_single_cards};
use crate::text::StandardMetrics;
use crate::types::{Card, PrintMode, QuestionRow, Result};
use std::io::Write;
use std::path::Path;

/// Render six-question cards to PDF bytes
pub fn render_pdf_bytes(cards: &[Card], config: &LayoutConfig, mode: PrintMode) -> Result<Vec<u8>> {
    let renderer = SheetRenderer::new(config, &StandardMetrics)?;
    let surface = PdfSurface::new(config.page_width, config.page_height);
    let doc = renderer.render(cards, mode, surface)?;
    document_bytes(doc)
}

/// Render one card per row to PDF bytes
pub fn render_single_pdf_bytes(
    rows: &[QuestionRow],
    config: &LayoutConfig,
    mode: PrintMode,
) -> Result<Vec<u8>> {
    let surface = PdfSurface::new(config.page_width, config.page_height);
    let doc = render_single_cards(rows, config, &StandardMetrics, mode, surface)?;
    document_bytes(doc)
}

/// Render six-question cards and write the PDF to `output_path`.
///
/// Nothing is written to `output_path` unless rendering succeeds.
pub async fn generate_pdf(
    cards: &[Card],
    config: &LayoutConfig,
    mode: PrintMode,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let cards = cards.to_vec();
    let config = config.clone();
    let output_path = output_path.as_ref().to_owned();

    tokio::task::spawn_blocking(move || {
        let bytes = render_pdf_bytes(&cards, &config, mode)?;
        write_atomically(&output_path, &bytes)
    })
    .await?
}

/// Render one card per row and write the PDF to `output_path`
pub async fn generate_single_pdf(
    rows: &[QuestionRow],
    config: &LayoutConfig,
    mode: PrintMode,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let rows = rows.to_vec();
    let config = config.clone();
    let output_path = output_path.as_ref().to_owned();

    tokio::task::spawn_blocking(move || {
        let bytes = render_single_pdf_bytes(&rows, &config, mode)?;
        write_atomically(&output_path, &bytes)
    })
    .await?
}

/// Write through a temp file next to `path`, then rename it into place.
/// The temp file is removed on drop if anything fails first.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
