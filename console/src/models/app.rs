//! App entity

use mamabear_models::{DeploymentPayload, ImagePayload};
use serde::Serialize;

use crate::models::deployment::Deployment;
use crate::models::image::Image;

/// A named application owning images and deployments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct App {
    pub name: String,
    pub images: Vec<Image>,
    pub deployments: Vec<Deployment>,
}

impl App {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Rebuild the image list
    pub fn replace_images(&mut self, images: &[ImagePayload]) {
        self.images.clear();
        self.images
            .extend(images.iter().map(|image| Image::compose(Some(image))));
    }

    /// Rebuild the deployment list
    pub fn replace_deployments(&mut self, deployments: &[DeploymentPayload]) {
        self.deployments.clear();
        self.deployments
            .extend(deployments.iter().map(Deployment::compose));
    }

    /// Tags of every known image, in server order
    pub fn image_tags(&self) -> Vec<String> {
        self.images.iter().filter_map(|i| i.tag.clone()).collect()
    }

    pub fn container_count(&self) -> usize {
        self.deployments.iter().map(|d| d.containers.len()).sum()
    }
}
