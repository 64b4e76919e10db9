//! Image API client

use mamabear_models::{ImagePayload, ListEnvelope};

use crate::errors::ConsoleError;
use crate::http::api::ApiClient;

impl ApiClient {
    /// List images, filtered by `app_name` / `image_tag` query parameters
    pub async fn list_images(
        &self,
        query: Vec<(String, String)>,
    ) -> Result<ListEnvelope<ImagePayload>, ConsoleError> {
        self.get("/image", query).await
    }
}
