use std::path::PathBuf;

use coordinate_transformer::TransformError;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset table directory not found: {}", .0.display())]
    MissingTableRoot(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no {table} record with token {token:?}")]
    UnknownToken { table: &'static str, token: String },

    #[error("sample {sample_token:?} has no key frame data for channel {channel}")]
    MissingChannel {
        sample_token: String,
        channel: String,
    },

    #[error("sample data {0:?} is not a key frame")]
    NotKeyFrame(String),

    #[error("sample {token:?} is visited twice while walking scene {scene:?}")]
    SampleCycle { scene: String, token: String },

    #[error("scene index {index} is out of range ({len} scenes)")]
    SceneIndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Transform(#[from] TransformError),
}
