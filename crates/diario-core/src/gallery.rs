//! Header photo gallery
//!
//! A short list of image data URLs shown as the journal cover. The first
//! image is the cover; new images go to the front and the oldest fall off
//! once the gallery is full.

use serde::{Deserialize, Serialize};

/// Maximum number of images kept
pub const GALLERY_CAPACITY: usize = 20;

/// Number of images shown as header thumbnails
pub const THUMBNAIL_COUNT: usize = 6;

/// Bounded, rotatable list of cover images
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Gallery {
    images: Vec<String>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a gallery from stored images, keeping at most the first
    /// `GALLERY_CAPACITY`
    pub fn from_images(mut images: Vec<String>) -> Self {
        images.truncate(GALLERY_CAPACITY);
        Self { images }
    }

    /// Put `image` at the front, dropping the oldest beyond capacity
    pub fn add_cover(&mut self, image: impl Into<String>) {
        self.images.insert(0, image.into());
        self.images.truncate(GALLERY_CAPACITY);
    }

    /// Move the first image to the end
    pub fn rotate_next(&mut self) {
        if !self.images.is_empty() {
            self.images.rotate_left(1);
        }
    }

    /// Move the last image to the front
    pub fn rotate_prev(&mut self) {
        if !self.images.is_empty() {
            self.images.rotate_right(1);
        }
    }

    /// Current cover image
    pub fn cover(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Images shown in the header strip
    pub fn thumbnails(&self) -> &[String] {
        &self.images[..self.images.len().min(THUMBNAIL_COUNT)]
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl From<Vec<String>> for Gallery {
    fn from(images: Vec<String>) -> Self {
        Self::from_images(images)
    }
}

impl From<Gallery> for Vec<String> {
    fn from(gallery: Gallery) -> Self {
        gallery.images
    }
}
