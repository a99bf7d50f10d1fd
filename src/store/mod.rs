//! Access to the remote question store.

pub mod http;

pub use http::HttpQuestionStore;

use crate::error::StoreError;
use crate::models::{NewQuestion, Question, QuestionId};
use async_trait::async_trait;

/// CRUD over the `questions` collection.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Question>, StoreError>;

    /// Returns the stored record, including the id the store assigned.
    async fn create(&self, question: &NewQuestion) -> Result<Question, StoreError>;

    async fn update(&self, id: &QuestionId, question: &NewQuestion) -> Result<(), StoreError>;

    async fn delete(&self, id: &QuestionId) -> Result<(), StoreError>;
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use std::sync::Mutex;

    /// In-memory store for tests. `fail` makes every call return a 503.
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        pub questions: Mutex<Vec<Question>>,
        pub next_id: Mutex<i64>,
        pub fail: bool,
    }

    impl MemoryStore {
        pub fn with(questions: Vec<Question>) -> Self {
            let next_id = questions.len() as i64 + 1;
            Self {
                questions: Mutex::new(questions),
                next_id: Mutex::new(next_id),
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.fail {
                Err(StoreError::Status {
                    status: 503,
                    message: "down".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl QuestionStore for MemoryStore {
        async fn list(&self) -> Result<Vec<Question>, StoreError> {
            self.check()?;
            Ok(self.questions.lock().unwrap().clone())
        }

        async fn create(&self, question: &NewQuestion) -> Result<Question, StoreError> {
            self.check()?;
            let mut next_id = self.next_id.lock().unwrap();
            let stored = Question::from_new(QuestionId::Number(*next_id), question.clone());
            *next_id += 1;
            self.questions.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn update(&self, id: &QuestionId, question: &NewQuestion) -> Result<(), StoreError> {
            self.check()?;
            let mut questions = self.questions.lock().unwrap();
            match questions.iter_mut().find(|q| &q.id == id) {
                Some(slot) => {
                    *slot = Question::from_new(id.clone(), question.clone());
                    Ok(())
                }
                None => Err(StoreError::Status {
                    status: 404,
                    message: "Not Found".to_string(),
                }),
            }
        }

        async fn delete(&self, id: &QuestionId) -> Result<(), StoreError> {
            self.check()?;
            self.questions.lock().unwrap().retain(|q| &q.id != id);
            Ok(())
        }
    }
}
