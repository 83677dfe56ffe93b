//! Record loading: raw table rows into questions and cards
//!
//! Rows are cleaned and their columns resolved by header name (with
//! aliases), or by the fixed order `level, subject, question, answer`
//! when the first row is not a header. Rows are then grouped by level and
//! cut into cards of six.

use crate::options::LayoutConfig;
use crate::types::*;
use std::collections::HashMap;

/// Trim a field and strip byte-order marks
pub(crate) fn clean(field: &str) -> String {
    field.replace('\u{feff}', "").trim().to_string()
}

/// A first row of only short aliases is taken as a header when it names at
/// least this many distinct columns. A data row like `5, A, Q, ...`
/// already hits the short `a` and `q` aliases.
const HEADER_MIN_MATCHES: usize = 3;

/// Aliases short enough to turn up as ordinary cell values
const AMBIGUOUS_ALIASES: [&str; 3] = ["a", "q", "cat"];

/// Whether a lowercased first row reads as a header.
///
/// Any unambiguous column name is enough, so a header with a misnamed
/// column still fails as a schema error instead of loading as data.
fn is_header(header: &[String]) -> bool {
    let named = header.iter().any(|cell| {
        !AMBIGUOUS_ALIASES.contains(&cell.as_str())
            && Field::ALL.iter().any(|f| f.aliases().contains(&cell.as_str()))
    });
    let matched = Field::ALL
        .iter()
        .filter(|f| find_column(header, **f).is_some())
        .count();
    named || matched >= HEADER_MIN_MATCHES
}

/// Resolve raw rows into cleaned question rows.
///
/// Fails with `TriviaError::Schema` on empty input, a header missing a
/// required column, or a headerless row with fewer than four columns.
pub fn parse_rows(records: &[Vec<String>]) -> Result<Vec<QuestionRow>> {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| r.iter().map(|c| clean(c)).collect::<Vec<_>>())
        .filter(|r| r.iter().any(|c| !c.is_empty()))
        .collect();

    let Some(first) = rows.first() else {
        return Err(TriviaError::Schema("CSV appears to be empty".to_string()));
    };

    let header: Vec<String> = first.iter().map(|c| c.to_lowercase()).collect();

    if is_header(&header) {
        let indices = Field::ALL
            .map(|field| {
                find_column(&header, field).ok_or_else(|| {
                    TriviaError::Schema(format!(
                        "Missing required column. Need one of: {}. Found: {}",
                        field.aliases().join(", "),
                        header.join(", ")
                    ))
                })
            })
            .into_iter()
            .collect::<Result<Vec<usize>>>()?;

        let data = &rows[1..];
        if data.is_empty() {
            return Err(TriviaError::Schema(
                "CSV has a header but no question rows".to_string(),
            ));
        }

        log::debug!("Detected header row, column indices {:?}", indices);

        return Ok(data
            .iter()
            .map(|r| {
                // Short rows are padded with blanks
                let get = |i: usize| r.get(i).cloned().unwrap_or_default();
                QuestionRow {
                    level: get(indices[0]),
                    subject: get(indices[1]),
                    question: get(indices[2]),
                    answer: get(indices[3]),
                }
            })
            .collect());
    }

    // No header: assume fixed order
    rows.iter()
        .enumerate()
        .map(|(idx, r)| {
            if r.len() < 4 {
                return Err(TriviaError::Schema(format!(
                    "Row {} has {} columns, expected 4: level, subject, question, answer",
                    idx + 1,
                    r.len()
                )));
            }
            Ok(QuestionRow {
                level: r[0].clone(),
                subject: r[1].clone(),
                question: r[2].clone(),
                answer: r[3].clone(),
            })
        })
        .collect()
}

fn find_column(header: &[String], field: Field) -> Option<usize> {
    field
        .aliases()
        .iter()
        .find_map(|alias| header.iter().position(|h| h == alias))
}

/// Group question rows by level and cut each level into cards of six.
///
/// Levels keep their first-seen order, and rows keep their input order
/// within a level.
pub fn group_cards(rows: Vec<QuestionRow>) -> Result<Vec<Card>> {
    let mut order: Vec<(String, Vec<Question>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (i, row) in rows.into_iter().enumerate() {
        if row.level.is_empty() {
            return Err(TriviaError::BlankField {
                row: i + 1,
                field: Field::Level,
            });
        }
        let slot = match index.get(&row.level) {
            Some(&slot) => slot,
            None => {
                index.insert(row.level.clone(), order.len());
                order.push((row.level.clone(), Vec::new()));
                order.len() - 1
            }
        };
        let questions = &mut order[slot].1;

        if row.subject.is_empty() {
            return Err(TriviaError::EmptySubject {
                level: row.level,
                chunk_index: questions.len() / QUESTIONS_PER_CARD,
                row: i + 1,
            });
        }

        questions.push(Question {
            subject: row.subject,
            text: row.question,
            answer: row.answer,
        });
    }

    let mut cards = Vec::new();
    for (level, questions) in order {
        for (chunk_index, chunk) in questions.chunks(QUESTIONS_PER_CARD).enumerate() {
            if chunk.len() < QUESTIONS_PER_CARD {
                return Err(TriviaError::IncompleteCard {
                    level,
                    chunk_index,
                    actual_count: chunk.len(),
                });
            }
            let duplicated_subjects = duplicated_subjects(chunk);
            if !duplicated_subjects.is_empty() {
                return Err(TriviaError::DuplicateSubject {
                    level,
                    chunk_index,
                    duplicated_subjects,
                });
            }

            let questions: [Question; QUESTIONS_PER_CARD] =
                chunk.to_vec().try_into().map_err(|q: Vec<Question>| {
                    TriviaError::IncompleteCard {
                        level: level.clone(),
                        chunk_index,
                        actual_count: q.len(),
                    }
                })?;
            cards.push(Card::new(level.clone(), questions));
        }
    }

    Ok(cards)
}

/// Subjects that occur more than once, in first-seen order
fn duplicated_subjects(chunk: &[Question]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for q in chunk {
        *counts.entry(q.subject.as_str()).or_default() += 1;
    }

    let mut duplicates: Vec<String> = Vec::new();
    for q in chunk {
        if counts[q.subject.as_str()] > 1 && !duplicates.contains(&q.subject) {
            duplicates.push(q.subject.clone());
        }
    }
    duplicates
}

/// Resolve raw rows and group them into cards
pub fn load(records: &[Vec<String>]) -> Result<Vec<Card>> {
    let cards = group_cards(parse_rows(records)?)?;
    log::info!("Loaded {} cards", cards.len());
    Ok(cards)
}

/// Content checks for the single-question layout.
///
/// Length ceilings are checked before blankness, field by field. Lengths
/// are counted in characters.
pub fn validate_rows(rows: &[QuestionRow], config: &LayoutConfig) -> Result<()> {
    let limits = [
        (Field::Level, config.max_chars_level),
        (Field::Subject, config.max_chars_subject),
        (Field::Question, config.max_chars_question),
        (Field::Answer, config.max_chars_answer),
    ];

    for (i, row) in rows.iter().enumerate() {
        for (field, max) in limits {
            let length = row.field(field).chars().count();
            if length > max {
                return Err(TriviaError::FieldTooLong {
                    row: i + 1,
                    field,
                    length,
                    max,
                });
            }
        }
        if let Some(field) = Field::ALL.into_iter().find(|f| row.field(*f).is_empty()) {
            return Err(TriviaError::BlankField { row: i + 1, field });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: &[[&str; 4]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn level_rows(level: &str, subjects: &[&str]) -> Vec<[String; 4]> {
        subjects
            .iter()
            .enumerate()
            .map(|(i, s)| {
                [
                    level.to_string(),
                    s.to_string(),
                    format!("Question {}", i + 1),
                    format!("Answer {}", i + 1),
                ]
            })
            .collect()
    }

    fn to_raw(rows: Vec<[String; 4]>) -> Vec<Vec<String>> {
        rows.into_iter().map(|r| r.to_vec()).collect()
    }

    const SIX: [&str; 6] = ["G", "E", "H", "A", "S", "L"];

    #[test]
    fn test_one_full_card() {
        let cards = load(&to_raw(level_rows("Year 5", &SIX))).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].level(), "Year 5");
        let subjects: Vec<_> = cards[0].questions().iter().map(|q| q.subject.as_str()).collect();
        assert_eq!(subjects, SIX);
    }

    #[test]
    fn test_header_with_aliases_in_any_order() {
        let mut records = raw(&[["Q", "Cat", "A", "Tier"]]);
        for (i, s) in SIX.iter().enumerate() {
            records.push(vec![
                format!("q{}", i),
                s.to_string(),
                format!("a{}", i),
                "Easy".to_string(),
            ]);
        }
        let rows = parse_rows(&records).unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].level, "Easy");
        assert_eq!(rows[0].subject, "G");
        assert_eq!(rows[0].question, "q0");
        assert_eq!(rows[0].answer, "a0");
    }

    #[test]
    fn test_header_missing_column() {
        let records = raw(&[
            ["level", "subject", "question", "notes"],
            ["1", "G", "Q", "x"],
        ]);
        match parse_rows(&records) {
            Err(TriviaError::Schema(msg)) => {
                assert!(msg.contains("answer"));
                assert!(msg.contains("notes"));
            }
            other => panic!("Expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_headerless_short_row() {
        let records = vec![vec!["1".to_string(), "G".to_string(), "Q".to_string()]];
        match parse_rows(&records) {
            Err(TriviaError::Schema(msg)) => assert!(msg.contains("Row 1 has 3 columns")),
            other => panic!("Expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_with_unknown_columns_is_a_schema_error() {
        let mut records = raw(&[["Stage", "Category", "Prompt", "Reply"]]);
        records.extend(to_raw(level_rows("Year 5", &SIX)));
        match load(&records) {
            Err(TriviaError::Schema(msg)) => {
                assert!(msg.contains("question"));
                assert!(msg.contains("prompt"));
            }
            other => panic!("Expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_single_long_alias_marks_header() {
        let records = raw(&[["Subject", "x", "y", "z"], ["Year 5", "G", "Q", "A"]]);
        assert!(matches!(parse_rows(&records), Err(TriviaError::Schema(_))));
    }

    #[test]
    fn test_headerless_subject_a_is_not_a_header() {
        let rows = parse_rows(&raw(&[["Year 5", "A", "Q", "Ans"]])).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subject, "A");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_rows(&[]), Err(TriviaError::Schema(_))));
        let blanks = raw(&[["", " ", "\u{feff}", ""]]);
        assert!(matches!(parse_rows(&blanks), Err(TriviaError::Schema(_))));
    }

    #[test]
    fn test_cleaning_trims_and_strips_bom() {
        let rows = parse_rows(&raw(&[["\u{feff}Year 5 ", " G", "  Q?  ", "A\u{feff}"]])).unwrap();
        assert_eq!(
            rows[0],
            QuestionRow {
                level: "Year 5".into(),
                subject: "G".into(),
                question: "Q?".into(),
                answer: "A".into(),
            }
        );
    }

    #[test]
    fn test_blank_rows_dropped() {
        let mut records = raw(&[["", "", "", ""]]);
        records.extend(to_raw(level_rows("L", &SIX)));
        records.push(vec![" ".to_string()]);
        assert_eq!(load(&records).unwrap().len(), 1);
    }

    #[test]
    fn test_five_rows_incomplete() {
        let records = to_raw(level_rows("Year 5", &SIX[..5]));
        match load(&records) {
            Err(TriviaError::IncompleteCard {
                level,
                chunk_index,
                actual_count,
            }) => {
                assert_eq!(level, "Year 5");
                assert_eq!(chunk_index, 0);
                assert_eq!(actual_count, 5);
            }
            other => panic!("Expected IncompleteCard, got {:?}", other),
        }
    }

    #[test]
    fn test_twelve_rows_two_cards() {
        let mut rows = level_rows("Year 5", &SIX);
        rows.extend(level_rows("Year 5", &["L", "S", "A", "H", "E", "G"]));
        let cards = load(&to_raw(rows)).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].questions()[0].subject, "L");
    }

    #[test]
    fn test_levels_grouped_in_first_seen_order() {
        // Interleaved levels: B rows are split around A rows
        let a = level_rows("A", &SIX);
        let b = level_rows("B", &SIX);
        let mut rows = Vec::new();
        rows.extend(b[..3].iter().cloned());
        rows.extend(a.iter().cloned());
        rows.extend(b[3..].iter().cloned());

        let cards = load(&to_raw(rows)).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].level(), "B");
        assert_eq!(cards[1].level(), "A");
        let subjects: Vec<_> = cards[0].questions().iter().map(|q| q.subject.as_str()).collect();
        assert_eq!(subjects, SIX);
    }

    #[test]
    fn test_card_count_matches_levels() {
        let mut rows = Vec::new();
        for level in ["1", "2", "3"] {
            rows.extend(level_rows(level, &SIX));
            rows.extend(level_rows(level, &SIX));
        }
        rows.extend(level_rows("4", &SIX));
        let cards = load(&to_raw(rows)).unwrap();
        assert_eq!(cards.len(), 7);
        for card in &cards {
            let mut subjects: Vec<_> = card.questions().iter().map(|q| &q.subject).collect();
            subjects.sort();
            subjects.dedup();
            assert_eq!(subjects.len(), 6);
        }
    }

    #[test]
    fn test_incomplete_second_chunk() {
        let mut rows = level_rows("7", &SIX);
        rows.extend(level_rows("7", &SIX[..2]));
        match load(&to_raw(rows)) {
            Err(TriviaError::IncompleteCard {
                chunk_index,
                actual_count,
                ..
            }) => {
                assert_eq!(chunk_index, 1);
                assert_eq!(actual_count, 2);
            }
            other => panic!("Expected IncompleteCard, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_subjects() {
        let rows = level_rows("Year 5", &["G", "E", "G", "A", "E", "L"]);
        match load(&to_raw(rows)) {
            Err(TriviaError::DuplicateSubject {
                level,
                chunk_index,
                duplicated_subjects,
            }) => {
                assert_eq!(level, "Year 5");
                assert_eq!(chunk_index, 0);
                assert_eq!(duplicated_subjects, vec!["G", "E"]);
            }
            other => panic!("Expected DuplicateSubject, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_subject() {
        let rows = level_rows("Year 5", &["G", "E", "", "A", "S", "L"]);
        match load(&to_raw(rows)) {
            Err(TriviaError::EmptySubject {
                level,
                chunk_index,
                row,
            }) => {
                assert_eq!(level, "Year 5");
                assert_eq!(chunk_index, 0);
                assert_eq!(row, 3);
            }
            other => panic!("Expected EmptySubject, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_subject_names_chunk_within_level() {
        let mut rows = level_rows("Year 5", &SIX);
        rows.extend(level_rows("Year 6", &SIX));
        rows.extend(level_rows("Year 5", &["G", "", "H", "A", "S", "L"]));
        let err = load(&to_raw(rows)).unwrap_err();
        match &err {
            TriviaError::EmptySubject {
                level,
                chunk_index,
                row,
            } => {
                assert_eq!(level, "Year 5");
                assert_eq!(*chunk_index, 1);
                assert_eq!(*row, 14);
            }
            other => panic!("Expected EmptySubject, got {:?}", other),
        }
        assert!(err.to_string().contains("chunk 1"));
    }

    #[test]
    fn test_error_messages_name_level_and_chunk() {
        let err = load(&to_raw(level_rows("Year 5", &SIX[..5]))).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Year 5"));
        assert!(msg.contains("chunk 0"));
    }

    fn row(level: &str, subject: &str, question: &str, answer: &str) -> QuestionRow {
        QuestionRow {
            level: level.into(),
            subject: subject.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }

    #[test]
    fn test_validate_rows_ok() {
        let rows = vec![row("Year 5", "G", "Capital of France?", "Paris")];
        assert!(validate_rows(&rows, &LayoutConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_rows_too_long() {
        let config = LayoutConfig::default();
        let rows = vec![
            row("Year 5", "G", "Q", "A"),
            row("Year 5", "Geog", "Q", "A"),
        ];
        match validate_rows(&rows, &config) {
            Err(TriviaError::FieldTooLong {
                row,
                field,
                length,
                max,
            }) => {
                assert_eq!(row, 2);
                assert_eq!(field, Field::Subject);
                assert_eq!(length, 4);
                assert_eq!(max, 3);
            }
            other => panic!("Expected FieldTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rows_counts_characters() {
        let config = LayoutConfig::default();
        // Three characters, six bytes
        let rows = vec![row("Year 5", "ÉÀÜ", "Q", "A")];
        assert!(validate_rows(&rows, &config).is_ok());
    }

    #[test]
    fn test_validate_rows_blank() {
        let rows = vec![row("Year 5", "G", "Q", "")];
        match validate_rows(&rows, &LayoutConfig::default()) {
            Err(TriviaError::BlankField { row, field }) => {
                assert_eq!(row, 1);
                assert_eq!(field, Field::Answer);
            }
            other => panic!("Expected BlankField, got {:?}", other),
        }
        let msg = validate_rows(&rows, &LayoutConfig::default())
            .unwrap_err()
            .to_string();
        assert!(msg.contains("Row 1"));
        assert!(msg.contains("answer"));
    }
}
