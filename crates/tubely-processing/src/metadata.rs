//! Probe results

use serde::{Deserialize, Serialize};
use tubely_core::AspectRatio;

/// Dimensions of the first video stream and the orientation derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub aspect: AspectRatio,
    pub codec: Option<String>,
}

impl VideoMetadata {
    pub fn new(width: u32, height: u32, codec: Option<String>) -> Self {
        Self {
            width,
            height,
            aspect: AspectRatio::classify(width, height),
            codec,
        }
    }
}
