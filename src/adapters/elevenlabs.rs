use crate::config::{VoiceConfig, VoiceSettings};
use crate::domain::ports::SpeechSynthesizer;
use crate::utils::error::{AgentError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DIAGNOSTIC_SAMPLE_TEXT: &str =
    "Welcome to Montana Feed Company! Your trusted partner for quality livestock feed.";
const AVAILABLE_VOICES_SHOWN: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSummary {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    voices: Vec<VoiceSummary>,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    voice_settings: Option<VoiceSettings>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticStep {
    VoicesList,
    VoiceCheck,
    VoiceMetadata,
    SpeechGeneration,
    Complete,
    Exception,
}

/// 逐步檢查語音整合，停在第一個失敗的步驟
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDiagnostics {
    pub success: bool,
    pub step: DiagnosticStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub available_voices: Vec<VoiceSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_size: Option<usize>,
}

impl VoiceDiagnostics {
    fn failed(step: DiagnosticStep, error: impl Into<String>) -> Self {
        Self {
            success: false,
            step,
            error: Some(error.into()),
            details: None,
            voice: None,
            available_voices: Vec::new(),
            audio_size: None,
        }
    }

    fn from_error(step: DiagnosticStep, err: AgentError) -> Self {
        match err {
            AgentError::VoiceError { status, details } => {
                let mut report = Self::failed(step, format!("Request failed: {}", status));
                // 上游錯誤通常是 JSON，解析失敗就保留原文
                report.details = Some(
                    serde_json::from_str(&details)
                        .unwrap_or_else(|_| serde_json::json!({ "raw": details })),
                );
                report
            }
            other => Self::failed(DiagnosticStep::Exception, other.to_string()),
        }
    }
}

pub struct ElevenLabsClient {
    client: Client,
    base_url: String,
    api_key: String,
    voice_id: String,
    model_id: String,
    settings: VoiceSettings,
}

impl ElevenLabsClient {
    pub fn new(config: &VoiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        tracing::debug!(
            api_key_len = config.api_key.len(),
            voice_id = %config.voice_id,
            "Voice client configured"
        );

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            voice_id: config.voice_id.clone(),
            model_id: config.model_id().to_string(),
            settings: config.settings(),
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .header("xi-api-key", &self.api_key)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let details = response.text().await.unwrap_or_default();
        tracing::warn!("Voice API returned {}: {}", status, details);
        Err(AgentError::VoiceError {
            status: status.as_u16(),
            details,
        })
    }

    pub async fn list_voices(&self) -> Result<Vec<VoiceSummary>> {
        let response = Self::check(self.get("/v1/voices").send().await?).await?;
        let body: VoicesResponse = response.json().await?;
        Ok(body.voices)
    }

    pub async fn voice_metadata(&self, voice_id: &str) -> Result<serde_json::Value> {
        let response =
            Self::check(self.get(&format!("/v1/voices/{}", voice_id)).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn speak(&self, text: &str, voice_settings: Option<VoiceSettings>) -> Result<Vec<u8>> {
        let url = format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id);
        let body = SpeechRequest {
            text,
            model_id: &self.model_id,
            voice_settings,
        };

        let response = self
            .client
            .post(url)
            .header("xi-api-key", &self.api_key)
            .header("Accept", "audio/mpeg")
            .json(&body)
            .send()
            .await?;

        let audio = Self::check(response).await?.bytes().await?;
        Ok(audio.to_vec())
    }

    /// 列出語音 → 確認目標語音存在 → 讀取語音資料 → 產生一段測試音訊
    pub async fn diagnose(&self) -> VoiceDiagnostics {
        tracing::info!("Step 1: listing voices");
        let voices = match self.list_voices().await {
            Ok(voices) => voices,
            Err(e) => return VoiceDiagnostics::from_error(DiagnosticStep::VoicesList, e),
        };
        tracing::info!("Found {} voices", voices.len());

        tracing::info!("Step 2: checking target voice {}", self.voice_id);
        let target = match voices.iter().find(|v| v.voice_id == self.voice_id) {
            Some(voice) => voice.clone(),
            None => {
                let mut report = VoiceDiagnostics::failed(
                    DiagnosticStep::VoiceCheck,
                    "Target voice ID not found in your available voices",
                );
                report.available_voices =
                    voices.into_iter().take(AVAILABLE_VOICES_SHOWN).collect();
                return report;
            }
        };

        tracing::info!("Step 3: fetching voice metadata");
        if let Err(e) = self.voice_metadata(&self.voice_id).await {
            return VoiceDiagnostics::from_error(DiagnosticStep::VoiceMetadata, e);
        }

        tracing::info!("Step 4: generating sample speech");
        match self.speak(DIAGNOSTIC_SAMPLE_TEXT, None).await {
            Ok(audio) => {
                tracing::info!("✅ Voice integration working ({} bytes)", audio.len());
                VoiceDiagnostics {
                    success: true,
                    step: DiagnosticStep::Complete,
                    error: None,
                    details: None,
                    voice: Some(target),
                    available_voices: Vec::new(),
                    audio_size: Some(audio.len()),
                }
            }
            Err(e) => {
                let mut report = VoiceDiagnostics::from_error(DiagnosticStep::SpeechGeneration, e);
                report.voice = Some(target);
                report
            }
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AgentError::validation("Text is required"));
        }

        let preview: String = text.chars().take(50).collect();
        tracing::info!("Generating speech for: \"{}...\" (voice {})", preview, self.voice_id);

        let audio = self.speak(text, Some(self.settings)).await?;
        tracing::info!("✅ Speech generated: {} bytes", audio.len());
        Ok(audio)
    }
}
