pub mod conversation;
pub mod engine;
pub mod recommendations;
pub mod scoring;
pub mod territory;

pub use crate::domain::model::{CustomerInfo, PriorityTier, Recommendation, ScoringResult, Territory};
pub use crate::domain::ports::{FeedStore, SpeechSynthesizer};
pub use crate::utils::error::Result;
