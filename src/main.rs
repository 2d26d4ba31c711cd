use clap::Parser;
use mfc_agent::core::conversation;
use mfc_agent::domain::model::CustomerInfo;
use mfc_agent::domain::ports::SpeechSynthesizer;
use mfc_agent::domain::records::{ConsultationRequest, ContactInfo, NewCustomerRequest, ProductFilter};
use mfc_agent::utils::error::ErrorSeverity;
use mfc_agent::utils::logger::{self, LogFormat};
use mfc_agent::utils::validation::Validate;
use mfc_agent::{
    AgentConfig, AgentError, AgentService, CliConfig, Command, ElevenLabsClient,
    LeadEvaluationEngine, SupabaseStore, TerritoryTable,
};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> mfc_agent::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_config(cli: &CliConfig) -> mfc_agent::Result<AgentConfig> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            AgentConfig::from_file(path)?
        }
        None => AgentConfig::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

// 離線指令只需要區域表；沒有指定設定檔就用內建的蒙大拿五區
fn offline_territories(cli: &CliConfig) -> mfc_agent::Result<TerritoryTable> {
    match &cli.config {
        Some(path) => AgentConfig::from_file(path)?.territory_table(),
        None => Ok(TerritoryTable::montana()),
    }
}

fn voice_client(config: &AgentConfig) -> mfc_agent::Result<ElevenLabsClient> {
    let voice = config
        .voice
        .as_ref()
        .ok_or_else(|| AgentError::MissingConfigError {
            field: "voice (ELEVENLABS_API_KEY / ELEVENLABS_VOICE_ID)".to_string(),
        })?;
    ElevenLabsClient::new(voice)
}

async fn run(cli: CliConfig) -> mfc_agent::Result<()> {
    if cli.command.is_offline() {
        let engine = LeadEvaluationEngine::new(offline_territories(&cli)?);
        return match cli.command {
            Command::Evaluate {
                inquiry,
                location,
                purchases,
                spent,
            } => {
                let customer = (purchases.is_some() || spent.is_some()).then(|| CustomerInfo {
                    purchase_count: purchases.unwrap_or(0),
                    total_spent: spent.unwrap_or(0.0),
                    ..Default::default()
                });
                print_json(&engine.evaluate(customer.as_ref(), &inquiry, location.as_deref()))
            }
            Command::Territory { location } => {
                print_json(engine.territory_for(location.as_deref()))
            }
            Command::Territories { .. } => {
                print_json(&engine.territories().iter().collect::<Vec<_>>())
            }
            Command::Converse { message } => print_json(&conversation::respond(&message)),
            _ => unreachable!("online command routed to offline handler"),
        };
    }

    let config = load_config(&cli)?;

    match cli.command {
        Command::Speak { text, output } => {
            let client = voice_client(&config)?;
            let audio = client.synthesize(&text).await?;
            tokio::fs::write(&output, &audio).await?;
            tracing::info!("📁 Audio saved to: {}", output.display());
            println!("✅ Wrote {} bytes to {}", audio.len(), output.display());
            return Ok(());
        }
        Command::VoiceCheck => {
            let client = voice_client(&config)?;
            return print_json(&client.diagnose().await);
        }
        _ => {}
    }

    let store = SupabaseStore::new(&config.store)?;
    let engine = LeadEvaluationEngine::new(config.territory_table()?);
    let service = AgentService::new(store, engine, config.voice_configured());

    match cli.command {
        Command::Health => {
            let report = service.health().await;
            print_json(&report)?;
            if let Some(error) = report.error {
                return Err(AgentError::StoreError {
                    status: 503,
                    message: error,
                });
            }
            Ok(())
        }
        Command::Lookup { phone, email, name } => print_json(
            &service
                .lookup_customers(phone.as_deref(), email.as_deref(), name.as_deref())
                .await?,
        ),
        Command::CreateCustomer {
            name,
            phone,
            email,
            location,
            notes,
        } => {
            let request = NewCustomerRequest {
                name: Some(name),
                phone: Some(phone),
                email,
                location,
                notes,
            };
            print_json(&service.create_customer(request).await?)
        }
        Command::Products { category, search } => {
            let products = service.products(ProductFilter { category, search }).await?;
            print_json(&serde_json::json!({ "products": products }))
        }
        Command::Territories { .. } => {
            let territories = service.territories().await?;
            print_json(&serde_json::json!({ "territories": territories }))
        }
        Command::Consult {
            name,
            phone,
            email,
            inquiry,
            location,
            urgency,
            preferred_contact,
        } => {
            let request = ConsultationRequest {
                customer_info: Some(ContactInfo {
                    name,
                    phone,
                    email,
                    location: None,
                }),
                inquiry: Some(inquiry),
                urgency,
                preferred_contact,
                location,
            };
            print_json(&service.request_consultation(request).await?)
        }
        _ => unreachable!("command handled above"),
    }
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if let Err(e) = logger::init_logger(LogFormat::from_flag(cli.json_logs), cli.verbose) {
        eprintln!("⚠️  {}", e.user_friendly_message());
    }

    tracing::info!("Starting mfc-agent");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        // 依錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}
