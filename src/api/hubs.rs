//! Hubs resource client.

use crate::client::{ForgeClient, RequestOptions};
use crate::error::Result;
use crate::models::{JsonApiPage, ResourceObject};

const HUBS: &str = "project/v1/hubs";

/// Thin wrapper over the `project/v1/hubs` endpoints.
#[derive(Debug)]
pub struct HubsApi<'a> {
    client: &'a ForgeClient,
}

impl<'a> HubsApi<'a> {
    pub(crate) fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// List the hubs visible to the authenticated app.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::ForgeError::TokenExpired`] on 401 and
    /// [`crate::ForgeError::Api`] on any other non-2xx status.
    pub async fn get_hubs(&self) -> Result<Vec<ResourceObject>> {
        let payload = self.client.get_json(HUBS, RequestOptions::new()).await?;
        let page: JsonApiPage = serde_json::from_value(payload)?;
        Ok(page.data)
    }
}
