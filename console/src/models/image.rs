//! Image entity

use mamabear_models::ImagePayload;
use serde::Serialize;

/// A content-addressed build artifact with a human-readable tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Image {
    pub hash: Option<String>,
    pub tag: Option<String>,
}

impl Image {
    /// Build an image from an optional payload; a missing payload gives an empty image
    pub fn compose(payload: Option<&ImagePayload>) -> Self {
        let mut image = Image::default();
        if let Some(payload) = payload {
            image.apply(payload);
        }
        image
    }

    /// Overwrite the fields present in the payload
    pub fn apply(&mut self, payload: &ImagePayload) {
        if let Some(id) = &payload.id {
            self.hash = Some(id.clone());
        }
        if let Some(tag) = &payload.tag {
            self.tag = Some(tag.clone());
        }
    }
}
