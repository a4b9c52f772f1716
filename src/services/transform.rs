/// Voice alteration collaborator
///
/// The transform is an opaque file-to-file effect: it reads the raw upload
/// and produces an altered copy at a sibling path. The pipeline owns both
/// paths and only trusts an output file it can observe on disk.
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::TransformConfig;
use crate::error::AppError;

#[async_trait]
pub trait VoiceTransform: Send + Sync {
    /// Apply the effect to `input`, returning the path of the altered file.
    async fn apply(&self, input: &Path) -> Result<PathBuf, AppError>;
}

/// Derive the output path for a raw upload (`{stem}.voiced.wav`).
pub fn voiced_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}.voiced.wav"))
}

/// ffmpeg-backed transform. The filter chain itself is configuration, not a
/// design subject.
pub struct FfmpegTransform {
    config: TransformConfig,
}

impl FfmpegTransform {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl VoiceTransform for FfmpegTransform {
    async fn apply(&self, input: &Path) -> Result<PathBuf, AppError> {
        if !input.exists() {
            return Err(AppError::Transform(format!(
                "input audio not found: {}",
                input.display()
            )));
        }

        let output = voiced_path(input);

        if self.config.enable_mock {
            tokio::fs::copy(input, &output)
                .await
                .map_err(|e| AppError::Transform(format!("mock copy: {e}")))?;
            return Ok(output);
        }

        let result = Command::new(&self.config.ffmpeg_bin)
            .args([
                "-y",
                "-i",
                input.to_string_lossy().as_ref(),
                "-af",
                &self.config.filter,
                output.to_string_lossy().as_ref(),
            ])
            .output()
            .await
            .map_err(|e| AppError::Transform(format!("ffmpeg spawn error: {e}")))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(AppError::Transform(format!(
                "ffmpeg exited with {}: {}",
                result.status,
                stderr.trim()
            )));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransformConfig;

    fn mock_config() -> TransformConfig {
        TransformConfig {
            ffmpeg_bin: "ffmpeg".to_string(),
            filter: "anull".to_string(),
            enable_mock: true,
        }
    }

    #[test]
    fn voiced_path_is_sibling_of_input() {
        let out = voiced_path(Path::new("temp/abc.wav"));
        assert_eq!(out, PathBuf::from("temp/abc.voiced.wav"));
    }

    #[tokio::test]
    async fn mock_transform_produces_output_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("clip.wav");
        tokio::fs::write(&input, b"RIFF....WAVE").await.expect("write input");

        let transform = FfmpegTransform::new(mock_config());
        let output = transform.apply(&input).await.expect("apply");

        assert!(output.exists());
        assert_eq!(output, voiced_path(&input));
    }

    #[tokio::test]
    async fn missing_input_is_rejected() {
        let transform = FfmpegTransform::new(mock_config());
        let err = transform.apply(Path::new("temp/nope.wav")).await.unwrap_err();
        assert!(matches!(err, AppError::Transform(_)));
    }
}
