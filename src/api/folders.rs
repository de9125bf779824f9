//! Folders resource client.

use crate::client::{ForgeClient, RequestOptions};
use crate::endpoint::{self, data_project_id, filter_param, require};
use crate::error::{ForgeError, Result};
use crate::models::{JsonApiSingle, ResourceObject};
use crate::pagination::collect_link_pages;

const FOLDER: &str = "data/v1/projects/:project_id/folders/:folder_id";
const FOLDER_CONTENTS: &str = "data/v1/projects/:project_id/folders/:folder_id/contents";
const FOLDER_SEARCH: &str = "data/v1/projects/:project_id/folders/:folder_id/search";

/// Thin wrapper over the `data/v1` folder endpoints. Project ids are
/// normalized to the `b.`-prefixed form the data-management API requires.
#[derive(Debug)]
pub struct FoldersApi<'a> {
    client: &'a ForgeClient,
}

impl<'a> FoldersApi<'a> {
    pub(crate) fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// Fetch one folder resource.
    pub async fn get_folder(&self, project_id: &str, folder_id: &str) -> Result<ResourceObject> {
        require(project_id, "project_id")?;
        require(folder_id, "folder_id")?;
        let project_id = data_project_id(project_id);
        let path = endpoint::render(
            FOLDER,
            &[(":project_id", &project_id), (":folder_id", folder_id)],
        );

        let payload = self.client.get_json(&path, RequestOptions::new()).await?;
        let single: JsonApiSingle = serde_json::from_value(payload)?;
        Ok(single.data)
    }

    /// List a folder's direct contents, following the pagination cursor to
    /// the end. Returns the accumulated `data` objects and the `included`
    /// version objects the API interleaves with them.
    ///
    /// `type_filter` narrows the listing to the given resource types
    /// (`filter[type]`), e.g. `["folders"]`.
    pub async fn get_folder_contents(
        &self,
        project_id: &str,
        folder_id: &str,
        type_filter: &[String],
    ) -> Result<(Vec<ResourceObject>, Vec<ResourceObject>)> {
        require(project_id, "project_id")?;
        require(folder_id, "folder_id")?;
        let project_id = data_project_id(project_id);
        let path = endpoint::render(
            FOLDER_CONTENTS,
            &[(":project_id", &project_id), (":folder_id", folder_id)],
        );

        let mut base_query = Vec::new();
        if let Some(pair) = filter_param("type", type_filter) {
            base_query.push(pair);
        }

        collect_link_pages(self.client, &path, base_query).await
    }

    /// Search a folder and its subfolders by name, following the
    /// pagination cursor to the end. Requires a 3-legged token with the
    /// `data:search` scope upstream.
    ///
    /// # Errors
    ///
    /// Fails with [`ForgeError::MissingParameter`] when `name_filter` is
    /// empty.
    pub async fn search_folder(
        &self,
        project_id: &str,
        folder_id: &str,
        name_filter: &[String],
        type_filter: &[String],
    ) -> Result<(Vec<ResourceObject>, Vec<ResourceObject>)> {
        require(project_id, "project_id")?;
        require(folder_id, "folder_id")?;
        if name_filter.is_empty() {
            return Err(ForgeError::MissingParameter("name_filter"));
        }
        let project_id = data_project_id(project_id);
        let path = endpoint::render(
            FOLDER_SEARCH,
            &[(":project_id", &project_id), (":folder_id", folder_id)],
        );

        let mut base_query = Vec::new();
        if let Some(pair) = filter_param("name", name_filter) {
            base_query.push(pair);
        }
        if let Some(pair) = filter_param("type", type_filter) {
            base_query.push(pair);
        }

        collect_link_pages(self.client, &path, base_query).await
    }
}
