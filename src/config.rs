use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::generator::{AIProvider, GeneratorConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    pub default_provider: String,
    pub providers: HashMap<String, ProviderConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub default_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("ailife")
        });

        std::fs::create_dir_all(&data_dir)
            .context("Failed to create data directory")?;

        let config_path = data_dir.join("config.json");

        if config_path.exists() {
            let config_str = std::fs::read_to_string(&config_path)
                .context("Failed to read config.json")?;
            let mut config: Config = serde_json::from_str(&config_str)
                .context("Failed to parse config.json")?;
            config.data_dir = data_dir;
            // Pick up the API key from the environment when the file leaves it blank
            if let Some(openai_config) = config.providers.get_mut("openai") {
                if openai_config.api_key.as_ref().map_or(true, |key| key.is_empty()) {
                    openai_config.api_key = std::env::var("OPENAI_API_KEY").ok();
                }
            }
            return Ok(config);
        }

        let config = Self::default_config(data_dir);
        config.save()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = self.data_dir.join("config.json");
        let json_str = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(&config_path, json_str)
            .context("Failed to write config.json")?;
        Ok(())
    }

    fn default_config(data_dir: PathBuf) -> Self {
        let mut providers = HashMap::new();

        providers.insert("ollama".to_string(), ProviderConfig {
            default_model: "qwen2.5".to_string(),
            host: Some("http://localhost:11434".to_string()),
            api_key: None,
        });

        providers.insert("openai".to_string(), ProviderConfig {
            default_model: "gpt-4o-mini".to_string(),
            host: None,
            api_key: std::env::var("OPENAI_API_KEY").ok(),
        });

        Config {
            data_dir,
            default_provider: "ollama".to_string(),
            providers,
        }
    }

    pub fn get_provider(&self, provider_name: &str) -> Option<&ProviderConfig> {
        self.providers.get(provider_name)
    }

    pub fn get_generator_config(
        &self,
        provider: Option<String>,
        model: Option<String>,
    ) -> Result<GeneratorConfig> {
        let provider_name = provider.as_deref().unwrap_or(&self.default_provider);
        let provider_config = self.get_provider(provider_name)
            .ok_or_else(|| anyhow::anyhow!("Unknown provider: {}", provider_name))?;

        let provider: AIProvider = provider_name.parse()?;
        let model = model.unwrap_or_else(|| provider_config.default_model.clone());

        Ok(GeneratorConfig {
            provider,
            model,
            api_key: provider_config.api_key.clone(),
            base_url: provider_config.host.clone(),
        })
    }

    pub fn character_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}_character.json", name))
    }

    pub fn memories_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}_memories.json", name))
    }

    pub fn relationships_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}_relationships.json", name))
    }

    pub fn daily_logs_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}_daily_logs.json", name))
    }

    pub fn learning_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}_learning.json", name))
    }
}
