//! Custom attribute definitions resource client.

use serde_json::Value;

use crate::client::{ForgeClient, RequestOptions};
use crate::endpoint::{self, admin_project_id, require};
use crate::error::Result;

const ATTRIBUTE_DEFINITIONS: &str =
    "bim360/docs/v1/projects/:project_id/folders/:folder_id/custom-attribute-definitions";

/// Thin wrapper over the `bim360/docs/v1` custom-attribute endpoints.
#[derive(Debug)]
pub struct CustomAttributesApi<'a> {
    client: &'a ForgeClient,
}

impl<'a> CustomAttributesApi<'a> {
    pub(crate) fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// Fetch the custom attribute definitions available on a folder.
    pub async fn get_custom_attribute_definitions(
        &self,
        project_id: &str,
        folder_id: &str,
    ) -> Result<Value> {
        require(project_id, "project_id")?;
        require(folder_id, "folder_id")?;
        let project_id = admin_project_id(project_id);
        let path = endpoint::render(
            ATTRIBUTE_DEFINITIONS,
            &[(":project_id", &project_id), (":folder_id", folder_id)],
        );
        self.client.get_json(&path, RequestOptions::new()).await
    }
}
