//! Model derivative resource client.
//!
//! Design-data URNs are base64url-encoded before they go into the path.
//! The object-tree and properties endpoints answer 202 while the upstream
//! extraction is running; those calls poll with the client's
//! [`crate::PollPolicy`] instead of returning the interim status.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use serde_json::Value;

use crate::client::{ForgeClient, RequestOptions};
use crate::endpoint::{self, require};
use crate::error::{ForgeError, Result};

const MANIFEST: &str = "modelderivative/v2/designdata/:urn/manifest";
const DERIVATIVE: &str = "modelderivative/v2/designdata/:urn/manifest/:derivativeUrn";
const METADATA: &str = "modelderivative/v2/designdata/:urn/metadata";
const OBJECT_TREE: &str = "modelderivative/v2/designdata/:urn/metadata/:guid";
const OBJECT_PROPERTIES: &str = "modelderivative/v2/designdata/:urn/metadata/:guid/properties";

/// Response-compression request knob; the API accepts `gzip` or `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptEncoding {
    Gzip,
    Any,
}

impl AcceptEncoding {
    fn header_value(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Any => "*",
        }
    }
}

/// Thin wrapper over the `modelderivative/v2/designdata` endpoints.
#[derive(Debug)]
pub struct ModelDerivativeApi<'a> {
    client: &'a ForgeClient,
}

impl<'a> ModelDerivativeApi<'a> {
    pub(crate) fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    fn encode_urn(urn: &str) -> String {
        URL_SAFE.encode(urn.as_bytes())
    }

    fn data_of(payload: Value, endpoint: &str) -> Result<Value> {
        match payload {
            Value::Object(mut map) => map.remove("data").ok_or_else(|| {
                ForgeError::UnexpectedPayload(format!("no data envelope from {endpoint}"))
            }),
            other => Err(ForgeError::UnexpectedPayload(format!(
                "expected a data envelope from {endpoint}, got: {other}"
            ))),
        }
    }

    /// Fetch the manifest for a source file: derivative URNs and statuses.
    pub async fn get_manifest(
        &self,
        urn: &str,
        accept_encoding: Option<AcceptEncoding>,
    ) -> Result<Value> {
        require(urn, "urn")?;
        let path = endpoint::render(MANIFEST, &[(":urn", &Self::encode_urn(urn))]);

        let mut opts = RequestOptions::new();
        if let Some(encoding) = accept_encoding {
            opts = opts.header("Accept-Encoding", encoding.header_value());
        }
        self.client.get_json(&path, opts).await
    }

    /// Download one derivative, polling while the server reports it is
    /// still being prepared.
    pub async fn get_derivative(&self, urn: &str, derivative_urn: &str) -> Result<Vec<u8>> {
        require(urn, "urn")?;
        require(derivative_urn, "derivative_urn")?;
        let path = endpoint::render(
            DERIVATIVE,
            &[
                (":urn", &Self::encode_urn(urn)),
                (":derivativeUrn", &urlencoding::encode(derivative_urn)),
            ],
        );

        let response = self.client.get_polling(&path, RequestOptions::new()).await?;
        Ok(response.bytes().await.map_err(ForgeError::Http)?.to_vec())
    }

    /// List the metadata ids (model views) available for a model.
    pub async fn get_metadata_ids(
        &self,
        urn: &str,
        accept_encoding: Option<AcceptEncoding>,
    ) -> Result<Value> {
        require(urn, "urn")?;
        let path = endpoint::render(METADATA, &[(":urn", &Self::encode_urn(urn))]);

        let mut opts = RequestOptions::new();
        if let Some(encoding) = accept_encoding {
            opts = opts.header("Accept-Encoding", encoding.header_value());
        }
        let payload = self.client.get_json(&path, opts).await?;
        Self::data_of(payload, &path)
    }

    /// Fetch the object tree of a model view, polling while the extraction
    /// runs. `force` sets `x-ads-force` to retry an extraction that
    /// previously failed or timed out upstream.
    pub async fn get_object_tree(
        &self,
        urn: &str,
        guid: &str,
        accept_encoding: Option<AcceptEncoding>,
        force: bool,
    ) -> Result<Value> {
        require(urn, "urn")?;
        require(guid, "guid")?;
        let path = endpoint::render(
            OBJECT_TREE,
            &[(":urn", &Self::encode_urn(urn)), (":guid", guid)],
        );

        let mut opts = RequestOptions::new().header("x-ads-force", force.to_string());
        if let Some(encoding) = accept_encoding {
            opts = opts.header("Accept-Encoding", encoding.header_value());
        }
        let response = self.client.get_polling(&path, opts).await?;
        let payload: Value = response.json().await.map_err(ForgeError::Http)?;
        Self::data_of(payload, &path)
    }

    /// Fetch object properties for a model view, polling while the
    /// extraction runs. `object_id` narrows the result to one object.
    pub async fn get_object_properties(
        &self,
        urn: &str,
        guid: &str,
        accept_encoding: Option<AcceptEncoding>,
        force: bool,
        object_id: Option<&str>,
    ) -> Result<Value> {
        require(urn, "urn")?;
        require(guid, "guid")?;
        let path = endpoint::render(
            OBJECT_PROPERTIES,
            &[(":urn", &Self::encode_urn(urn)), (":guid", guid)],
        );

        let mut opts = RequestOptions::new().header("x-ads-force", force.to_string());
        if let Some(encoding) = accept_encoding {
            opts = opts.header("Accept-Encoding", encoding.header_value());
        }
        if let Some(object_id) = object_id {
            opts = opts.query("objectid", object_id);
        }
        let response = self.client.get_polling(&path, opts).await?;
        let payload: Value = response.json().await.map_err(ForgeError::Http)?;
        Self::data_of(payload, &path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urn_is_base64url_encoded() {
        // '+' and '/' in the urn must map to the url-safe alphabet
        let encoded = ModelDerivativeApi::encode_urn("urn:adsk.objects:os.object:bucket/model.rvt");
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        let decoded = URL_SAFE.decode(encoded.as_bytes()).unwrap();
        assert_eq!(decoded, b"urn:adsk.objects:os.object:bucket/model.rvt");
    }

    #[test]
    fn data_envelope_is_unwrapped() {
        let payload = serde_json::json!({"data": {"type": "metadata"}});
        let data = ModelDerivativeApi::data_of(payload, "metadata").unwrap();
        assert_eq!(data, serde_json::json!({"type": "metadata"}));

        let missing = serde_json::json!({"result": "ok"});
        assert!(matches!(
            ModelDerivativeApi::data_of(missing, "metadata"),
            Err(ForgeError::UnexpectedPayload(_))
        ));
    }
}
