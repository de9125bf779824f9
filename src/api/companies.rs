//! Companies resource client.

use serde_json::Value;

use crate::api::ListParams;
use crate::client::{ForgeClient, RequestOptions};
use crate::endpoint::{self, list_param, require};
use crate::error::{ForgeError, Result};
use crate::pagination::collect_offset_pages;

const ACCOUNT_COMPANIES: &str = "hq/v1/accounts/:account_id/companies";

/// Thin wrapper over the `hq/v1` company endpoints. The HQ API addresses
/// accounts by bare id and returns flat JSON arrays, not JSON:API
/// envelopes.
#[derive(Debug)]
pub struct CompaniesApi<'a> {
    client: &'a ForgeClient,
}

impl<'a> CompaniesApi<'a> {
    pub(crate) fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// List all companies on a BIM360 account, walking limit/offset pages
    /// until a short page.
    ///
    /// # Errors
    ///
    /// Fails with [`ForgeError::UnexpectedPayload`] when the server
    /// returns something other than an array.
    pub async fn get_account_companies(
        &self,
        account_id: &str,
        params: &ListParams,
    ) -> Result<Vec<Value>> {
        require(account_id, "account_id")?;
        let path = endpoint::render(ACCOUNT_COMPANIES, &[(":account_id", account_id)]);

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
                        "expected a company array, got: {other}"
                    ))),
                }
            }
        })
        .await
    }
}
