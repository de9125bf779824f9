//! Item versions resource client.

use crate::client::{ForgeClient, RequestOptions};
use crate::endpoint::{self, data_project_id, require};
use crate::error::Result;
use crate::models::{JsonApiSingle, ResourceObject};

const VERSION: &str = "data/v1/projects/:project_id/versions/:version_id";

/// Thin wrapper over the `data/v1` version endpoints.
#[derive(Debug)]
pub struct VersionsApi<'a> {
    client: &'a ForgeClient,
}

impl<'a> VersionsApi<'a> {
    pub(crate) fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// Fetch one version resource. Version ids are URNs and get
    /// percent-encoded into the path.
    pub async fn get_version(
        &self,
        project_id: &str,
        version_id: &str,
    ) -> Result<ResourceObject> {
        require(project_id, "project_id")?;
        require(version_id, "version_id")?;
        let project_id = data_project_id(project_id);
        let version_id = urlencoding::encode(version_id);
        let path = endpoint::render(
            VERSION,
            &[(":project_id", &project_id), (":version_id", &version_id)],
        );

        let payload = self.client.get_json(&path, RequestOptions::new()).await?;
        let single: JsonApiSingle = serde_json::from_value(payload)?;
        Ok(single.data)
    }
}
