use thiserror::Error;

/// Errors produced by the level detectors.
///
/// Detectors fail atomically: on any error no levels are produced. Callers
/// should treat a failure as "no levels available for this input" and may
/// fall back to a different detector.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("clustering failed: {0}")]
    ClusteringFailure(String),
}
