//! Detected price levels

use serde::{Deserialize, Serialize};

/// Whether a level sits below price action (support) or above it (resistance)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelKind {
    Support,
    Resistance,
}

/// A horizontal price level produced by a detector.
///
/// `index` anchors the level to the candle that produced it, when the
/// detector knows one. Clustering centroids carry neither index nor kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<LevelKind>,
}

impl Level {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            index: None,
            kind: None,
        }
    }

    pub fn support(price: f64, index: usize) -> Self {
        Self {
            price,
            index: Some(index),
            kind: Some(LevelKind::Support),
        }
    }

    pub fn resistance(price: f64, index: usize) -> Self {
        Self {
            price,
            index: Some(index),
            kind: Some(LevelKind::Resistance),
        }
    }
}
