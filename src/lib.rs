pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod logger;
pub mod models;
pub mod session;
pub mod store;
pub mod store_worker;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use app::{App, BankStatus, Notice};
pub use config::Config;
pub use editor::{Draft, DraftField, DraftOrigin, QuestionEditor};
pub use error::{QuestionError, SessionError, StoreError};
pub use models::{
    DraftToken, NewQuestion, Question, QuestionId, QuestionOption, StoreRequest, StoreResponse, Tab,
};
pub use session::{Phase, QuizSession, Results};
pub use store::{HttpQuestionStore, QuestionStore};
pub use store_worker::spawn_store_worker;
