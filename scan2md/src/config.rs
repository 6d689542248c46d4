use serde::Deserialize;
use std::env;
use std::path::PathBuf;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// MIME types accepted when `UPLOAD_ALLOWED_TYPES` is unset. An explicit
/// allow-list rather than `image/*` prefix matching.
const DEFAULT_ALLOWED_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

const DEFAULT_OCR_MODEL: &str = "meta-llama/Llama-3.2-90B-Vision-Instruct-Turbo";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Upload size ceiling in bytes.
    pub max_bytes: usize,
    pub allowed_types: Vec<String>,
    /// Directory holding per-request scratch artifacts.
    pub scratch_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Process-wide fallback credential. Requests may override it with an
    /// `x-api-key` header; with neither, validation rejects the request.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
    /// Advisory language hint forwarded to the provider.
    pub language: String,
    pub timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("SCAN2MD_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("SCAN2MD_PORT", 3000),
            },
            upload: UploadConfig {
                max_bytes: parse_env_or("UPLOAD_MAX_BYTES", 5 * 1024 * 1024),
                allowed_types: env::var("UPLOAD_ALLOWED_TYPES")
                    .map(|list| list.split(',').map(|s| s.trim().to_string()).collect())
                    .unwrap_or_else(|_| {
                        DEFAULT_ALLOWED_TYPES.iter().map(|s| s.to_string()).collect()
                    }),
                scratch_dir: env::var("SCRATCH_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| env::temp_dir().join("scan2md")),
            },
            ocr: OcrConfig {
                api_key: env::var("OCR_API_KEY").ok(),
                base_url: env::var("OCR_BASE_URL").ok(),
                model: env::var("OCR_MODEL").unwrap_or_else(|_| DEFAULT_OCR_MODEL.to_string()),
                language: env::var("OCR_LANGUAGE").unwrap_or_else(|_| "eng".to_string()),
                timeout_ms: parse_env_or("OCR_TIMEOUT_MS", 30_000),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
