use crate::options::LayoutConfig;
use crate::types::*;

/// Calculate sheet and page counts for `card_count` cards
pub fn calculate_statistics(
    card_count: usize,
    config: &LayoutConfig,
    mode: PrintMode,
) -> Result<SheetStatistics> {
    if card_count == 0 {
        return Err(TriviaError::NoCards);
    }

    let cards_per_sheet = config.cards_per_sheet();
    if cards_per_sheet == 0 {
        return Err(TriviaError::Config(
            "Grid must hold at least one card".to_string(),
        ));
    }

    let sheets = card_count.div_ceil(cards_per_sheet);

    Ok(SheetStatistics {
        cards: card_count,
        cards_per_sheet,
        sheets,
        pages: sheets * mode.pages_per_sheet(),
        empty_slots: sheets * cards_per_sheet - card_count,
    })
}
