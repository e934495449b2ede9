//! Camera images and the cat-detection boundary.
//!
//! Image recognition is a black box: given an image and a confidence
//! threshold it answers whether a cat is present.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by a detector backend.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("Image could not be decoded: {0}")]
    InvalidImage(String),

    #[error("Detection backend failed: {0}")]
    Backend(String),
}

/// A single camera frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CameraImage {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Decides whether an image contains a cat.
///
/// `confidence_threshold` is a percentage in `0.0..=100.0`; labels scoring
/// below it are ignored.
///
/// Any `Fn(&CameraImage, f32) -> Result<bool, DetectorError>` closure is a
/// detector:
///
/// ```rust
/// use catpoint::detector::{CameraImage, CatDetector, DetectorError};
///
/// let always_cat = |_: &CameraImage, _: f32| -> Result<bool, DetectorError> { Ok(true) };
/// let image = CameraImage::new(1, 1, vec![0]);
/// assert!(always_cat.contains_cat(&image, 50.0).unwrap());
/// ```
pub trait CatDetector {
    fn contains_cat(
        &self,
        image: &CameraImage,
        confidence_threshold: f32,
    ) -> Result<bool, DetectorError>;
}

impl<F> CatDetector for F
where
    F: Fn(&CameraImage, f32) -> Result<bool, DetectorError>,
{
    fn contains_cat(
        &self,
        image: &CameraImage,
        confidence_threshold: f32,
    ) -> Result<bool, DetectorError> {
        self(image, confidence_threshold)
    }
}
