use crate::records;
use crate::types::{Card, QuestionRow, Result};
use std::path::Path;

/// Split CSV text into raw records.
///
/// No header handling happens here; rows may have differing lengths.
pub fn parse_csv(contents: &str) -> Result<Vec<Vec<String>>> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(records)
}

/// Read a CSV file and group its rows into six-question cards
pub async fn load_from_csv(path: impl AsRef<Path>) -> Result<Vec<Card>> {
    let contents = tokio::fs::read_to_string(path.as_ref()).await?;

    tokio::task::spawn_blocking(move || records::load(&parse_csv(&contents)?)).await?
}

/// Read a CSV file as flat question rows for one-question cards
pub async fn load_rows_from_csv(path: impl AsRef<Path>) -> Result<Vec<QuestionRow>> {
    let contents = tokio::fs::read_to_string(path.as_ref()).await?;

    tokio::task::spawn_blocking(move || records::parse_rows(&parse_csv(&contents)?)).await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_fields_and_ragged_rows() {
        let text = "Level,Subject,Question,Answer\n\"Year 5\",G,\"Capital of France, in Europe?\",Paris\nshort\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1][2], "Capital of France, in Europe?");
        assert_eq!(records[2], vec!["short".to_string()]);
    }

    #[test]
    fn test_bom_stripped() {
        let records = parse_csv("\u{feff}Level,Subject,Question,Answer\n").unwrap();
        assert_eq!(records[0][0], "Level");
    }
}
