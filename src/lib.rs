pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::{ElevenLabsClient, SupabaseStore};
pub use app::AgentService;
pub use config::AgentConfig;
pub use crate::core::{engine::LeadEvaluationEngine, territory::TerritoryTable};
pub use utils::error::{AgentError, Result};
