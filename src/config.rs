//! Configuration for the knowledge assistant
//!
//! Loaded once at startup from environment variables (with a `.env` file via
//! `dotenvy` in the binary). Every knob has a default, so an empty
//! environment yields a runnable local config.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Embedding provider configuration
    pub embedding: EmbeddingConfig,
    /// Completion provider configuration
    pub completion: CompletionConfig,
    /// Vector index configuration
    pub index: IndexConfig,
    /// Retrieval and conversation windowing
    pub retrieval: RetrievalConfig,
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_parsed("PORT", 3000)?,
                max_upload_size: env_parsed("MAX_UPLOAD_SIZE", 10 * 1024 * 1024)?,
            },
            chunking: ChunkingConfig {
                chunk_size: env_parsed("CHUNK_SIZE", 1000)?,
                chunk_overlap: env_parsed("CHUNK_OVERLAP", 200)?,
                min_chunk_len: env_parsed("MIN_CHUNK_LEN", 50)?,
            },
            embedding: EmbeddingConfig {
                base_url: env_or("JINA_BASE_URL", "https://api.jina.ai"),
                api_key: env::var("JINA_API_KEY").unwrap_or_default(),
                model: env_or("EMBEDDING_MODEL", "jina-embeddings-v2-base-en"),
                dimensions: env_parsed("EMBEDDING_DIMENSIONS", 768)?,
                batch_size: env_parsed("EMBEDDING_BATCH_SIZE", 5)?,
                batch_delay_ms: env_parsed("EMBEDDING_BATCH_DELAY_MS", 500)?,
            },
            completion: CompletionConfig {
                backend: match env_or("CHAT_PROVIDER", "openrouter").as_str() {
                    "openrouter" => CompletionBackend::OpenRouter,
                    "openai" => CompletionBackend::OpenAi,
                    other => {
                        return Err(Error::Config(format!(
                            "Unknown chat provider '{}' (expected 'openrouter' or 'openai')",
                            other
                        )))
                    }
                },
                model: env_or("CHAT_MODEL", "meta-llama/llama-3.2-3b-instruct:free"),
                openrouter_base_url: env_or("OPENROUTER_BASE_URL", "https://openrouter.ai/api"),
                openrouter_api_key: env::var("OPENROUTER_API_KEY").unwrap_or_default(),
                openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com"),
                openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                referer: env_or("OPENROUTER_REFERER", "http://localhost"),
                max_tokens: env_parsed("CHAT_MAX_TOKENS", 500)?,
                temperature: env_parsed("CHAT_TEMPERATURE", 0.7)?,
            },
            index: IndexConfig {
                host: env_or("CHROMA_HOST", "localhost"),
                port: env_parsed("CHROMA_PORT", 8000)?,
                collection: env_or("COLLECTION_NAME", "company_knowledge"),
            },
            retrieval: RetrievalConfig::default(),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| Error::Config(format!("Invalid value for {}: {}", key, raw))),
        Err(_) => Ok(default),
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Maximum upload size in bytes (default: 10MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_upload_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters (soft bound, never splits a sentence)
    pub chunk_size: usize,
    /// Overlap between chunks in characters, approximated in words
    pub chunk_overlap: usize,
    /// Chunks at or below this length are dropped
    pub min_chunk_len: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            min_chunk_len: 50,
        }
    }
}

/// Embedding provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Provider base URL
    pub base_url: String,
    /// API key
    pub api_key: String,
    /// Embedding model name
    pub model: String,
    /// Embedding dimensions (768 for the default model)
    pub dimensions: usize,
    /// Texts per provider call
    pub batch_size: usize,
    /// Delay between successive batch calls in milliseconds
    pub batch_delay_ms: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.jina.ai".to_string(),
            api_key: String::new(),
            model: "jina-embeddings-v2-base-en".to_string(),
            dimensions: 768,
            batch_size: 5,
            batch_delay_ms: 500,
        }
    }
}

impl EmbeddingConfig {
    /// Delay between successive batch calls
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

/// Completion backend selection, made once per process lifetime
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompletionBackend {
    /// OpenRouter chat completions
    #[default]
    OpenRouter,
    /// OpenAI chat completions
    OpenAi,
}

/// Completion provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Which provider to use
    pub backend: CompletionBackend,
    /// Chat model name
    pub model: String,
    /// OpenRouter base URL
    pub openrouter_base_url: String,
    /// OpenRouter API key
    pub openrouter_api_key: String,
    /// OpenAI base URL
    pub openai_base_url: String,
    /// OpenAI API key
    pub openai_api_key: String,
    /// HTTP-Referer header value sent to OpenRouter
    pub referer: String,
    /// Maximum tokens per completion
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            backend: CompletionBackend::OpenRouter,
            model: "meta-llama/llama-3.2-3b-instruct:free".to_string(),
            openrouter_base_url: "https://openrouter.ai/api".to_string(),
            openrouter_api_key: String::new(),
            openai_base_url: "https://api.openai.com".to_string(),
            openai_api_key: String::new(),
            referer: "http://localhost".to_string(),
            max_tokens: 500,
            temperature: 0.7,
        }
    }
}

/// Vector index (Chroma) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Chroma host
    pub host: String,
    /// Chroma port
    pub port: u16,
    /// Collection name
    pub collection: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8000,
            collection: "company_knowledge".to_string(),
        }
    }
}

impl IndexConfig {
    /// Base URL of the Chroma service
    pub fn base_url(&self) -> String {
        let scheme = if self.port == 443 { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}

/// Retrieval depth and conversation windowing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Chunks retrieved per chat query
    pub chat_top_k: usize,
    /// Chunks retrieved per admin/search query
    pub search_top_k: usize,
    /// Most recent turns of incoming history the engine retains
    pub history_limit: usize,
    /// Trailing turns passed to the completion call
    pub completion_window: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            chat_top_k: 3,
            search_top_k: 5,
            history_limit: 10,
            completion_window: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_base_url_switches_scheme_on_443() {
        let mut cfg = IndexConfig::default();
        assert_eq!(cfg.base_url(), "http://localhost:8000");
        cfg.port = 443;
        assert_eq!(cfg.base_url(), "https://localhost:443");
    }
}
