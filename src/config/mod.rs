#[cfg(feature = "cli")]
pub mod cli;

use crate::core::territory::{montana_territories, TerritoryTable, DEFAULT_TERRITORY_ID};
use crate::domain::model::Territory;
use crate::utils::error::{AgentError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_secret, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_VOICE_BASE_URL: &str = "https://api.elevenlabs.io";
pub const DEFAULT_VOICE_MODEL: &str = "eleven_multilingual_v2";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub store: StoreConfig,
    pub voice: Option<VoiceConfig>,
    pub territories: Option<TerritoryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub service_key: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub api_key: String,
    pub voice_id: String,
    pub base_url: Option<String>,
    pub model_id: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub settings: Option<VoiceSettings>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.6,
            similarity_boost: 0.8,
            style: 0.2,
            use_speaker_boost: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerritoryConfig {
    pub default: Option<String>,
    pub regions: Option<Vec<Territory>>,
}

impl AgentConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: Self = toml::from_str(&processed_content).map_err(|e| {
            AgentError::config(format!("TOML parsing error: {}", e))
        })?;
        config.normalize();
        Ok(config)
    }

    /// 從環境變數建立配置，語音設定只在金鑰與 voice id 都存在時啟用
    pub fn from_env() -> Result<Self> {
        let store = StoreConfig {
            url: std::env::var("SUPABASE_URL").map_err(|_| AgentError::MissingConfigError {
                field: "SUPABASE_URL".to_string(),
            })?,
            service_key: std::env::var("SUPABASE_SERVICE_KEY").map_err(|_| {
                AgentError::MissingConfigError {
                    field: "SUPABASE_SERVICE_KEY".to_string(),
                }
            })?,
            timeout_seconds: None,
        };

        let voice = match (
            std::env::var("ELEVENLABS_API_KEY"),
            std::env::var("ELEVENLABS_VOICE_ID"),
        ) {
            (Ok(api_key), Ok(voice_id)) => Some(VoiceConfig {
                api_key,
                voice_id,
                base_url: std::env::var("ELEVENLABS_BASE_URL").ok(),
                model_id: None,
                timeout_seconds: None,
                settings: None,
            }),
            _ => None,
        };

        let mut config = Self {
            store,
            voice,
            territories: None,
        };
        config.normalize();
        Ok(config)
    }

    /// 替換環境變數 (例如 ${SUPABASE_URL})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| AgentError::config(format!("Invalid placeholder pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    // 憑證常被貼上多餘的空白或換行
    fn normalize(&mut self) {
        self.store.url = self.store.url.trim().trim_end_matches('/').to_string();
        self.store.service_key = self.store.service_key.trim().to_string();
        if let Some(voice) = self.voice.as_mut() {
            voice.api_key = voice.api_key.trim().to_string();
            voice.voice_id = voice.voice_id.trim().to_string();
            if let Some(base_url) = voice.base_url.as_mut() {
                *base_url = base_url.trim().trim_end_matches('/').to_string();
            }
        }
    }

    pub fn territory_table(&self) -> Result<TerritoryTable> {
        let territories = self.territories.clone().unwrap_or_default();
        let default_id = territories
            .default
            .unwrap_or_else(|| DEFAULT_TERRITORY_ID.to_string());
        let regions = territories.regions.unwrap_or_else(montana_territories);
        TerritoryTable::new(regions, &default_id)
    }

    pub fn voice_configured(&self) -> bool {
        self.voice.is_some()
    }
}

impl StoreConfig {
    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl VoiceConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_VOICE_BASE_URL)
    }

    pub fn model_id(&self) -> &str {
        self.model_id.as_deref().unwrap_or(DEFAULT_VOICE_MODEL)
    }

    pub fn settings(&self) -> VoiceSettings {
        self.settings.unwrap_or_default()
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

fn reject_unresolved(field: &str, value: &str) -> Result<()> {
    if value.starts_with("${") {
        return Err(AgentError::MissingConfigError {
            field: format!("{} (unresolved {})", field, value),
        });
    }
    Ok(())
}

impl Validate for AgentConfig {
    fn validate(&self) -> Result<()> {
        reject_unresolved("store.url", &self.store.url)?;
        validate_url("store.url", &self.store.url)?;
        reject_unresolved("store.service_key", &self.store.service_key)?;
        validate_secret("store.service_key", &self.store.service_key)?;
        if let Some(timeout) = self.store.timeout_seconds {
            validate_range("store.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(voice) = &self.voice {
            reject_unresolved("voice.api_key", &voice.api_key)?;
            validate_secret("voice.api_key", &voice.api_key)?;
            reject_unresolved("voice.voice_id", &voice.voice_id)?;
            validate_secret("voice.voice_id", &voice.voice_id)?;
            validate_url("voice.base_url", voice.base_url())?;
            validate_non_empty_string("voice.model_id", voice.model_id())?;

            let settings = voice.settings();
            validate_range("voice.settings.stability", settings.stability, 0.0, 1.0)?;
            validate_range(
                "voice.settings.similarity_boost",
                settings.similarity_boost,
                0.0,
                1.0,
            )?;
            validate_range("voice.settings.style", settings.style, 0.0, 1.0)?;
        }

        self.territory_table()?;
        Ok(())
    }
}
