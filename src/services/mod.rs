pub mod ingest;
pub mod share_url;
pub mod storage;
pub mod transform;

pub use ingest::VoiceCommentPipeline;
pub use storage::{ObjectStorage, S3Storage};
pub use transform::{FfmpegTransform, VoiceTransform};
