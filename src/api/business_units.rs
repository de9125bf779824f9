//! Business units resource client.

use serde_json::Value;

use crate::client::{ForgeClient, RequestOptions};
use crate::endpoint::{self, require};
use crate::error::{ForgeError, Result};

const BUSINESS_UNITS: &str = "hq/v1/accounts/:account_id/business_units_structure";

/// Thin wrapper over the `hq/v1` business-units endpoint.
#[derive(Debug)]
pub struct BusinessUnitsApi<'a> {
    client: &'a ForgeClient,
}

impl<'a> BusinessUnitsApi<'a> {
    pub(crate) fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// Fetch the business-unit structure of a BIM360 account.
    ///
    /// An account with no units comes back as an empty vec.
    pub async fn get_account_business_units(&self, account_id: &str) -> Result<Vec<Value>> {
        require(account_id, "account_id")?;
        let path = endpoint::render(BUSINESS_UNITS, &[(":account_id", account_id)]);

        let mut payload = self.client.get_json(&path, RequestOptions::new()).await?;
        let is_object = payload.is_object();
        match payload.get_mut("business_units") {
            Some(units) => match units.take() {
                Value::Array(items) => Ok(items),
                other => Err(ForgeError::UnexpectedPayload(format!(
                    "expected a business_units array, got: {other}"
                ))),
            },
            None if is_object => Ok(Vec::new()),
            None => Err(ForgeError::UnexpectedPayload(format!(
                "expected a business_units object, got: {payload}"
            ))),
        }
    }
}
