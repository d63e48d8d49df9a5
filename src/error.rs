// src/error.rs
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    #[error("default aspect ratio must be a positive finite number, got {0}")]
    InvalidAspectRatio(f64),
    #[error("image cache capacity must be at least 1")]
    ZeroCacheCapacity,
    #[error("swipe threshold must be a non-negative finite number, got {0}")]
    InvalidSwipeThreshold(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FullscreenError {
    #[error("full-screen is not supported in this environment")]
    Unsupported,
    #[error("full-screen request was denied: {0}")]
    Denied(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid viewer configuration: {0}")]
    Viewer(#[from] ViewerError),
    #[error("failed to serialize page data: {0}")]
    Serialize(#[from] serde_json::Error),
}
