//! # Examplan Core Library
//!
//! Core business logic for Examplan, an exam date recommendation tool.
//! Given a catalog of subjects with confirmed exams and a list of candidate
//! dates for one exam still awaiting placement, the recommendation engine
//! scores every candidate from 0 (worst) to 100 (best).
//!
//! ## Architecture
//!
//! - **Engine**: pure, synchronous scoring over an in-memory calendar
//!   snapshot; builds a per-date index once, then simulates each candidate
//!   insertion on an independent clone
//! - **Catalog**: subjects, exams, and recurring weekly moments, plus the
//!   mutations the surrounding application performs on them
//! - **Storage**: JSON-file catalog persistence and TOML configuration
//! - **Notify**: best-effort webhook notifications for calendar changes
//!
//! ## Key Components
//!
//! - [`RecommendationEngine`]: simulate-then-score candidate evaluation
//! - [`CalendarIndex`]: per-date index of scheduled exam entries
//! - [`CatalogStore`]: catalog persistence
//! - [`Config`]: application configuration

pub mod auth;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod notify;
pub mod penalty;
pub mod score;
pub mod storage;
pub mod week;

pub use auth::AdminKeys;
pub use catalog::{AvailableSlot, Catalog, Exam, ExamDuration, ExamSlot, Moment, Subject};
pub use config::Config;
pub use engine::{Candidate, RecommendationEngine, StudiedExam};
pub use error::{ConfigError, CoreError, NotifyError, StorageError, ValidationError};
pub use index::{CalendarIndex, IndexEntry};
pub use notify::Notifier;
pub use penalty::PenaltyFactors;
pub use score::ScoredCandidate;
pub use storage::CatalogStore;
