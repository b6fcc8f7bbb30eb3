use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// External capability that turns a situation description into a free-text
/// narrative. Output is untrusted; the interpreter absorbs deviations.
#[allow(async_fn_in_trait)]
pub trait DecisionGenerator {
    async fn generate(&self, situation: &str, max_tokens: u32) -> Result<String>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AIProvider {
    Ollama,
    OpenAI,
}

impl std::fmt::Display for AIProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AIProvider::Ollama => write!(f, "ollama"),
            AIProvider::OpenAI => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for AIProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(AIProvider::Ollama),
            "openai" | "gpt" => Ok(AIProvider::OpenAI),
            _ => Err(anyhow!("Unknown AI provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub provider: AIProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// HTTP-backed decision generator. One blocking request per call; a failure
/// is reported to the caller, which switches to the scripted fallback.
pub struct AIProviderClient {
    config: GeneratorConfig,
    http_client: reqwest::Client,
}

impl AIProviderClient {
    pub fn new(config: GeneratorConfig) -> Self {
        AIProviderClient {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn get_model(&self) -> &str {
        &self.config.model
    }

    async fn generate_ollama(&self, situation: &str, max_tokens: u32) -> Result<String> {
        let default_url = "http://localhost:11434".to_string();
        let base_url = self.config.base_url.as_ref().unwrap_or(&default_url);

        let request_body = serde_json::json!({
            "model": self.config.model,
            "prompt": situation,
            "stream": false,
            "options": { "num_predict": max_tokens }
        });

        let url = format!("{}/api/generate", base_url);
        let response = self.http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("Ollama API error: {}", error_text));
        }

        let response_json: serde_json::Value = response.json().await?;

        response_json["response"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow!("Invalid Ollama response format"))
    }

    async fn generate_openai(&self, situation: &str, max_tokens: u32) -> Result<String> {
        let api_key = self.config.api_key.as_ref()
            .ok_or_else(|| anyhow!("OpenAI API key required"))?;

        let request_body = serde_json::json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": situation }],
            "max_tokens": max_tokens
        });

        let response = self.http_client
            .post("https://api.openai.com/v1/chat/completions")
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("OpenAI API error: {}", error_text));
        }

        let response_json: serde_json::Value = response.json().await?;

        response_json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow!("Invalid OpenAI response format"))
    }
}

impl DecisionGenerator for AIProviderClient {
    async fn generate(&self, situation: &str, max_tokens: u32) -> Result<String> {
        match self.config.provider {
            AIProvider::Ollama => self.generate_ollama(situation, max_tokens).await,
            AIProvider::OpenAI => self.generate_openai(situation, max_tokens).await,
        }
    }
}
