/// Configuration management for voice-comment-service
///
/// Loads configuration from environment variables with sensible defaults.
use std::time::Duration;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub s3: S3Config,
    pub upload: UploadConfig,
    pub transform: TransformConfig,
    pub share: ShareConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub env: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub endpoint: Option<String>,
    /// Base URL clients fetch finished audio from.
    pub public_base_url: String,
}

impl S3Config {
    /// Public URL for a stored object.
    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), key)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UploadConfig {
    /// Scoped directory for in-flight audio files.
    pub temp_dir: String,
    pub max_upload_retries: u32,
    pub retry_initial_backoff_ms: u64,
    /// Placeholders older than this are swept to `failed`.
    pub placeholder_max_age_secs: u64,
    pub sweep_interval_secs: u64,
}

impl UploadConfig {
    pub fn placeholder_max_age(&self) -> Duration {
        Duration::from_secs(self.placeholder_max_age_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct TransformConfig {
    pub ffmpeg_bin: String,
    /// Opaque ffmpeg audio filter chain applied to every comment.
    pub filter: String,
    /// Copy input to output instead of invoking ffmpeg.
    pub enable_mock: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ShareConfig {
    /// Frontend base for shareable question links.
    pub base_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let bucket = std::env::var("S3_BUCKET").unwrap_or_else(|_| "voice-comments".to_string());
        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "ap-northeast-2".to_string());
        let public_base_url = std::env::var("S3_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("https://{}.s3.{}.amazonaws.com", bucket, region));

        Ok(Config {
            app: AppConfig {
                host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("APP_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .unwrap_or(8080),
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            },
            cors: CorsConfig {
                allowed_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/voice_comments".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
            },
            s3: S3Config {
                bucket,
                region,
                access_key_id: std::env::var("AWS_ACCESS_KEY_ID").ok(),
                secret_access_key: std::env::var("AWS_SECRET_ACCESS_KEY")
                    .or_else(|_| std::env::var("AWS_SECRET_KEY"))
                    .ok(),
                endpoint: std::env::var("S3_ENDPOINT").ok(),
                public_base_url,
            },
            upload: UploadConfig {
                temp_dir: std::env::var("UPLOAD_TEMP_DIR").unwrap_or_else(|_| "temp".to_string()),
                max_upload_retries: std::env::var("UPLOAD_MAX_RETRIES")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()
                    .unwrap_or(3),
                retry_initial_backoff_ms: std::env::var("UPLOAD_RETRY_INITIAL_BACKOFF_MS")
                    .unwrap_or_else(|_| "100".to_string())
                    .parse()
                    .unwrap_or(100),
                placeholder_max_age_secs: std::env::var("PLACEHOLDER_MAX_AGE_SECS")
                    .unwrap_or_else(|_| "900".to_string())
                    .parse()
                    .unwrap_or(900),
                sweep_interval_secs: std::env::var("PLACEHOLDER_SWEEP_INTERVAL_SECS")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse()
                    .unwrap_or(300),
            },
            transform: TransformConfig {
                ffmpeg_bin: std::env::var("FFMPEG_BIN").unwrap_or_else(|_| "ffmpeg".to_string()),
                filter: std::env::var("VOICE_FILTER").unwrap_or_else(|_| {
                    "asetrate=44100*1.3,aresample=44100,atempo=0.77".to_string()
                }),
                enable_mock: std::env::var("TRANSFORM_MOCK")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()
                    .unwrap_or(false),
            },
            share: ShareConfig {
                base_url: std::env::var("SHARE_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_url_joins_base_and_key() {
        let config = S3Config {
            bucket: "test-bucket".to_string(),
            region: "ap-northeast-2".to_string(),
            access_key_id: None,
            secret_access_key: None,
            endpoint: None,
            public_base_url: "https://test-bucket.s3.ap-northeast-2.amazonaws.com".to_string(),
        };

        assert_eq!(
            config.object_url("abc"),
            "https://test-bucket.s3.ap-northeast-2.amazonaws.com/abc"
        );
    }

    #[test]
    fn object_url_tolerates_trailing_slash() {
        let config = S3Config {
            bucket: "b".to_string(),
            region: "us-east-1".to_string(),
            access_key_id: None,
            secret_access_key: None,
            endpoint: None,
            public_base_url: "https://cdn.example.com/".to_string(),
        };

        assert_eq!(config.object_url("abc"), "https://cdn.example.com/abc");
    }
}
