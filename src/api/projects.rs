//! Projects resource client.
//!
//! Projects are listed through two different upstream APIs with different
//! pagination schemes: the project API pages with a `links.next` cursor,
//! the HQ admin API by limit/offset.

use serde_json::Value;

use crate::api::ListParams;
use crate::client::{ForgeClient, RequestOptions};
use crate::endpoint::{self, data_project_id, list_param, require};
use crate::error::{ForgeError, Result};
use crate::models::ResourceObject;
use crate::pagination::{collect_link_pages, collect_offset_pages};

const HUB_PROJECTS: &str = "project/v1/hubs/:hub_id/projects";
const ACCOUNT_PROJECTS: &str = "hq/v1/accounts/:account_id/projects";

/// Page size sent with the hub-projects cursor walk.
const HUB_PAGE_LIMIT: usize = 100;

/// Thin wrapper over the project listing endpoints.
#[derive(Debug)]
pub struct ProjectsApi<'a> {
    client: &'a ForgeClient,
}

impl<'a> ProjectsApi<'a> {
    pub(crate) fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// List all projects on a hub, following the `links.next` cursor to
    /// the end. The hub id is the `b.`-prefixed form of the account id;
    /// a bare account id is accepted and prefixed.
    pub async fn get_hub_projects(&self, hub_id: &str) -> Result<Vec<ResourceObject>> {
        require(hub_id, "hub_id")?;
        let hub_id = data_project_id(hub_id);
        let path = endpoint::render(HUB_PROJECTS, &[(":hub_id", &hub_id)]);

        let base_query = vec![("page[limit]".to_string(), HUB_PAGE_LIMIT.to_string())];
        let (data, _included) = collect_link_pages(self.client, &path, base_query).await?;
        Ok(data)
    }

    /// List all projects on a BIM360 account through the HQ admin API,
    /// walking limit/offset pages until a short page.
    pub async fn get_account_projects(
        &self,
        account_id: &str,
        params: &ListParams,
    ) -> Result<Vec<Value>> {
        require(account_id, "account_id")?;
        let path = endpoint::render(ACCOUNT_PROJECTS, &[(":account_id", account_id)]);

        let sort = list_param("sort", &params.sort);
        let field = list_param("field", &params.field);

        collect_offset_pages(params.limit, params.offset, |limit, offset| {
            let mut opts = RequestOptions::new()
                .query("limit", limit.to_string())
                .query("offset", offset.to_string());
            if let Some((key, value)) = &sort {
                opts = opts.query(key.clone(), value.clone());
            }
            if let Some((key, value)) = &field {
                opts = opts.query(key.clone(), value.clone());
            }
            let path = path.clone();
            async move {
                let payload = self.client.get_json(&path, opts).await?;
                match payload {
                    Value::Array(items) => Ok(items),
                    other => Err(ForgeError::UnexpectedPayload(format!(
                        "expected a project array, got: {other}"
                    ))),
                }
            }
        })
        .await
    }
}
