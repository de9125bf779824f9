//! Project users resource client.

use serde_json::Value;

use crate::api::DEFAULT_PAGE_LIMIT;
use crate::client::{ForgeClient, RequestOptions};
use crate::endpoint::{self, admin_filter_params, admin_project_id, list_param, require};
use crate::error::{ForgeError, Result};
use crate::pagination::collect_offset_pages;

const PROJECT_USERS: &str = "bim360/admin/v1/projects/:projectId/users";

/// Query surface of the project-users listing.
///
/// Built fresh per call. Filters are (kind, entries) pairs rendered as
/// `filter[<kind>]=<comma-joined>`; each joined value is capped at 255
/// characters by the admin API.
#[derive(Debug, Clone)]
pub struct UserListParams {
    /// BIM360 server region, `US` or `EMEA`.
    pub region: String,
    /// Response language (`Accept-Language` header).
    pub accept_language: String,
    /// Filters as (kind, entries) pairs.
    pub filters: Vec<(String, Vec<String>)>,
    /// Page size requested from the server.
    pub limit: usize,
    /// Starting offset.
    pub offset: usize,
    /// Field names to sort by; prefix with `-` for descending.
    pub sort: Vec<String>,
    /// Field names to include in the response records.
    pub fields: Vec<String>,
}

impl Default for UserListParams {
    fn default() -> Self {
        Self {
            region: "US".to_string(),
            accept_language: "de".to_string(),
            filters: Vec::new(),
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
            sort: Vec::new(),
            fields: Vec::new(),
        }
    }
}

/// Thin wrapper over the `bim360/admin/v1` project-users endpoints.
/// Project ids are normalized to the bare form the admin API requires.
#[derive(Debug)]
pub struct UsersApi<'a> {
    client: &'a ForgeClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// List the users assigned to a project, walking limit/offset pages
    /// until a short page. Items come from the response's `results` array.
    pub async fn get_project_users(
        &self,
        project_id: &str,
        params: &UserListParams,
    ) -> Result<Vec<Value>> {
        require(project_id, "project_id")?;
        let project_id = admin_project_id(project_id);
        let path = endpoint::render(PROJECT_USERS, &[(":projectId", &project_id)]);

        let filters = admin_filter_params(&params.filters)?;
        let sort = list_param("sort", &params.sort);
        let fields = list_param("field", &params.fields);

        collect_offset_pages(params.limit, params.offset, |limit, offset| {
            let mut opts = RequestOptions::new()
                .header("Region", params.region.clone())
                .header("Accept-Language", params.accept_language.clone())
                .query("limit", limit.to_string())
                .query("offset", offset.to_string())
                .queries(filters.clone());
            if let Some((key, value)) = &sort {
                opts = opts.query(key.clone(), value.clone());
            }
            if let Some((key, value)) = &fields {
                opts = opts.query(key.clone(), value.clone());
            }
            let path = path.clone();
            async move {
                let mut payload = self.client.get_json(&path, opts).await?;
                match payload.get_mut("results") {
                    Some(results) => match results.take() {
                        Value::Array(items) => Ok(items),
                        other => Err(ForgeError::UnexpectedPayload(format!(
                            "expected a results array, got: {other}"
                        ))),
                    },
                    None => Err(ForgeError::UnexpectedPayload(format!(
                        "expected a results envelope, got: {payload}"
                    ))),
                }
            }
        })
        .await
    }
}
