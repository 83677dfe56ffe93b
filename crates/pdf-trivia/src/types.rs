use std::fmt;
use thiserror::Error;

/// Number of questions printed on one card, one per badge slot
pub const QUESTIONS_PER_CARD: usize = 6;

#[derive(Error, Debug)]
pub enum TriviaError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Schema error: {0}")]
    Schema(String),
    #[error(
        "Level '{level}' chunk {chunk_index} has only {actual_count} questions; \
         each card needs exactly 6 questions (one per subject)"
    )]
    IncompleteCard {
        level: String,
        chunk_index: usize,
        actual_count: usize,
    },
    #[error(
        "Level '{level}' chunk {chunk_index} has duplicate subjects: {}; \
         each card must have 6 different subjects",
        .duplicated_subjects.join(", ")
    )]
    DuplicateSubject {
        level: String,
        chunk_index: usize,
        duplicated_subjects: Vec<String>,
    },
    #[error("Row {row} (level '{level}', chunk {chunk_index}): subject code cannot be empty")]
    EmptySubject {
        level: String,
        chunk_index: usize,
        row: usize,
    },
    #[error("Row {row}: {field} too long ({length}>{max})")]
    FieldTooLong {
        row: usize,
        field: Field,
        length: usize,
        max: usize,
    },
    #[error("Row {row}: {field} is blank")]
    BlankField { row: usize, field: Field },
    #[error(
        "Text does not fit after wrapping: {line_count} lines need {needed:.1}pt but only {available:.1}pt available"
    )]
    TextOverflow {
        line_count: usize,
        needed: f32,
        available: f32,
    },
    #[error("Invalid geometry: {0}")]
    Geometry(String),
    #[error("Unknown font: {0}")]
    UnknownFont(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("No cards to render")]
    NoCards,
}

pub type Result<T> = std::result::Result<T, TriviaError>;

/// Logical column of an input record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Level,
    Subject,
    Question,
    Answer,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Level => "level",
            Field::Subject => "subject",
            Field::Question => "question",
            Field::Answer => "answer",
        }
    }

    /// Header names accepted for this column (lowercase)
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Level => &["level", "stage", "tier"],
            Field::Subject => &["subject", "category", "cat"],
            Field::Question => &["question", "q"],
            Field::Answer => &["answer", "a"],
        }
    }

    pub const ALL: [Field; 4] = [Field::Level, Field::Subject, Field::Question, Field::Answer];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One cleaned input record: a single question with its level and subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRow {
    pub level: String,
    pub subject: String,
    pub question: String,
    pub answer: String,
}

impl QuestionRow {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Level => &self.level,
            Field::Subject => &self.subject,
            Field::Question => &self.question,
            Field::Answer => &self.answer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub subject: String,
    pub text: String,
    pub answer: String,
}

/// A printed card: one level and exactly six questions.
///
/// The position of a question within `questions` fixes its badge color and
/// its row on the printed card. Cards are only built by the record loader,
/// which guarantees the subjects are pairwise distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    level: String,
    questions: [Question; QUESTIONS_PER_CARD],
}

impl Card {
    pub(crate) fn new(level: String, questions: [Question; QUESTIONS_PER_CARD]) -> Self {
        Self { level, questions }
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn questions(&self) -> &[Question; QUESTIONS_PER_CARD] {
        &self.questions
    }
}

/// Which side of a card is being drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    /// Question side (front page)
    Questions,
    /// Answer side (back page)
    Answers,
}

/// Physical printing/binding orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrintMode {
    /// Fronts only, no answer pages
    SingleSided,
    /// Duplex, printer flips the sheet about its long edge
    #[default]
    DuplexLongEdge,
    /// Duplex, printer flips the sheet about its short edge
    DuplexShortEdge,
}

impl PrintMode {
    pub fn is_duplex(self) -> bool {
        !matches!(self, PrintMode::SingleSided)
    }

    /// Pages emitted for each sheet of cards
    pub fn pages_per_sheet(self) -> usize {
        if self.is_duplex() { 2 } else { 1 }
    }
}

/// Statistics about a render, computed without drawing anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetStatistics {
    /// Total number of cards
    pub cards: usize,
    /// Grid capacity of one sheet (cols × rows)
    pub cards_per_sheet: usize,
    /// Number of sheets (batches)
    pub sheets: usize,
    /// Output page count
    pub pages: usize,
    /// Unused grid slots on the last sheet
    pub empty_slots: usize,
}
