pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use config::MockviewConfig;
pub use error::MockviewError;
pub use models::{InterviewDetail, MockInterview, MockResponse, NewMockInterview, NewUserAnswer, UserAnswer};
pub use store::{InterviewStore, MemoryStore, PgStore};
