use crate::error::{QuestionError, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every question carries exactly this many options.
pub const OPTION_COUNT: usize = 4;

/// Store-assigned identifier. json-server hands out either numbers or strings,
/// so both are accepted and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{}", n),
            QuestionId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Position of the option inside its question, 0 to 3.
    pub id: u8,
    pub text: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

impl QuestionOption {
    pub fn blank(id: u8) -> Self {
        Self {
            id,
            text: String::new(),
            is_correct: false,
        }
    }
}

/// A question as the store holds it.
///
/// Records loaded from the store are not trusted: use [`Question::validate`]
/// before playing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn from_new(id: QuestionId, question: NewQuestion) -> Self {
        Self {
            id,
            text: question.text,
            options: question.options,
        }
    }

    pub fn validate(&self) -> Result<(), QuestionError> {
        check_shape(&self.text, &self.options)
    }

    pub fn correct_option(&self) -> Option<&QuestionOption> {
        self.options.iter().find(|option| option.is_correct)
    }
}

/// Body of a create or update request. Only constructible through
/// [`NewQuestion::new`], so every value holds exactly one correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewQuestion {
    text: String,
    options: Vec<QuestionOption>,
}

impl NewQuestion {
    pub fn new(text: String, options: Vec<QuestionOption>) -> Result<Self, QuestionError> {
        check_shape(&text, &options)?;
        Ok(Self { text, options })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }
}

fn check_shape(text: &str, options: &[QuestionOption]) -> Result<(), QuestionError> {
    if text.trim().is_empty() {
        return Err(QuestionError::EmptyText);
    }
    if options.len() != OPTION_COUNT {
        return Err(QuestionError::WrongOptionCount {
            expected: OPTION_COUNT,
            found: options.len(),
        });
    }
    if let Some((position, option)) = options
        .iter()
        .enumerate()
        .find(|(i, option)| usize::from(option.id) != *i)
    {
        return Err(QuestionError::MisplacedOption {
            position,
            id: option.id,
        });
    }
    match options.iter().filter(|option| option.is_correct).count() {
        0 => Err(QuestionError::NoCorrectOption),
        1 => Ok(()),
        n => Err(QuestionError::MultipleCorrect(n)),
    }
}

/// Identifies the editor draft a create or update was submitted from.
pub type DraftToken = u64;

#[derive(Debug)]
pub enum StoreRequest {
    Load,
    Create {
        draft: DraftToken,
        question: NewQuestion,
    },
    Update {
        id: QuestionId,
        draft: DraftToken,
        question: NewQuestion,
    },
    Delete(QuestionId),
}

#[derive(Debug)]
pub enum StoreResponse {
    Loaded(Result<Vec<Question>, StoreError>),
    Created {
        draft: DraftToken,
        result: Result<Question, StoreError>,
    },
    Updated {
        id: QuestionId,
        draft: DraftToken,
        question: NewQuestion,
        result: Result<(), StoreError>,
    },
    Deleted {
        id: QuestionId,
        result: Result<(), StoreError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Play,
    Manage,
    About,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Play, Tab::Manage, Tab::About];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Play => "Play Quiz",
            Tab::Manage => "Manage Questions",
            Tab::About => "About Us",
        }
    }

    pub fn next(self) -> Tab {
        match self {
            Tab::Play => Tab::Manage,
            Tab::Manage => Tab::About,
            Tab::About => Tab::Play,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_question(id: i64, text: &str, correct: u8) -> Question {
    Question {
        id: QuestionId::Number(id),
        text: text.to_string(),
        options: (0..OPTION_COUNT as u8)
            .map(|i| QuestionOption {
                id: i,
                text: format!("option {}", i),
                is_correct: i == correct,
            })
            .collect(),
    }
}
