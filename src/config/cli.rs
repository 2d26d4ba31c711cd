use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "mfc-agent")]
#[command(about = "Montana Feed Company lead desk: scoring, territories, customers and voice")]
pub struct CliConfig {
    /// Path to TOML configuration file (falls back to SUPABASE_* / ELEVENLABS_* env vars)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Score an inquiry and assign a territory without touching the database
    Evaluate {
        #[arg(long)]
        inquiry: String,
        #[arg(long)]
        location: Option<String>,
        /// Number of prior purchases of a known customer
        #[arg(long)]
        purchases: Option<usize>,
        /// Total spend of a known customer
        #[arg(long)]
        spent: Option<f64>,
    },
    /// Resolve the sales territory for a location
    Territory { location: Option<String> },
    /// List territories (configured table, or the database table with --remote)
    Territories {
        #[arg(long)]
        remote: bool,
    },
    /// Record a consultation request
    Consult {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        inquiry: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        urgency: Option<String>,
        #[arg(long)]
        preferred_contact: Option<String>,
    },
    /// Look up customers by phone, email or name (first given wins)
    Lookup {
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Create a customer and assign a territory
    CreateCustomer {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Browse the product catalog
    Products {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Check database connectivity and voice configuration
    Health,
    /// Generate speech and write it as MP3
    Speak {
        text: String,
        #[arg(short, long, default_value = "speech.mp3")]
        output: PathBuf,
    },
    /// Walk through the voice API checks step by step
    VoiceCheck,
    /// Reply to a caller message with the scripted agent
    Converse { message: String },
}

impl Command {
    /// 不需要資料庫或語音服務的指令
    pub fn is_offline(&self) -> bool {
        matches!(
            self,
            Command::Evaluate { .. }
                | Command::Territory { .. }
                | Command::Territories { remote: false }
                | Command::Converse { .. }
        )
    }
}
