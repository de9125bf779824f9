//! Endpoint templating, query-parameter builders and id normalization.
//!
//! Forge endpoint templates use `:param` placeholders, filters follow the
//! JSON:API `filter[<type>]=<comma-separated values>` syntax, and project
//! ids come in two flavors that the upstream APIs disagree on (see
//! [`data_project_id`] / [`admin_project_id`]).

use crate::error::{ForgeError, Result};

/// Admin-API filter values are rejected upstream past this length.
const MAX_FILTER_LEN: usize = 255;

/// Substitute `:param` placeholders into an endpoint template.
pub(crate) fn render(template: &str, params: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (name, value) in params {
        rendered = rendered.replace(name, value);
    }
    rendered
}

/// Build a `filter[<kind>]` query pair from one or more entries.
pub(crate) fn filter_param(kind: &str, entries: &[String]) -> Option<(String, String)> {
    if entries.is_empty() {
        return None;
    }
    Some((format!("filter[{kind}]"), entries.join(",")))
}

/// Build admin-API filter pairs from (kind, entries) tuples, enforcing the
/// 255-character cap on each joined value.
pub(crate) fn admin_filter_params(
    filters: &[(String, Vec<String>)],
) -> Result<Vec<(String, String)>> {
    let mut params = Vec::new();
    for (kind, entries) in filters {
        let joined = entries.join(",");
        if joined.len() > MAX_FILTER_LEN {
            return Err(ForgeError::InvalidFilter(format!(
                "filter[{kind}] value is {} characters, max is {MAX_FILTER_LEN}",
                joined.len()
            )));
        }
        if !joined.is_empty() {
            params.push((format!("filter[{kind}]"), joined));
        }
    }
    Ok(params)
}

/// Comma-join a list parameter (`sort`, `field`), omitted when empty.
pub(crate) fn list_param(key: &str, entries: &[String]) -> Option<(String, String)> {
    if entries.is_empty() {
        return None;
    }
    Some((key.to_string(), entries.join(",")))
}

// Project-id normalization table. The data-management and project APIs
// address projects/hubs as "b.<uuid>"; the admin and docs APIs use the
// bare uuid. Each endpoint picks the helper its upstream requires:
//
//   data/v1      folders, versions          -> data_project_id
//   project/v1   hub ids                    -> data_project_id
//   hq/v1        accounts                   -> bare (no prefix handling)
//   bim360/admin project users              -> admin_project_id
//   bim360/docs  folder permissions, attrs  -> admin_project_id

/// Ensure the `b.` prefix required by the data-management and project APIs.
pub(crate) fn data_project_id(id: &str) -> String {
    if id.starts_with("b.") {
        id.to_string()
    } else {
        format!("b.{id}")
    }
}

/// Strip the `b.` prefix for the admin and docs APIs.
pub(crate) fn admin_project_id(id: &str) -> String {
    id.strip_prefix("b.").unwrap_or(id).to_string()
}

/// Reject missing or empty required identifiers.
pub(crate) fn require<'a>(value: &'a str, name: &'static str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(ForgeError::MissingParameter(name));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_placeholders() {
        let rendered = render(
            "data/v1/projects/:project_id/folders/:folder_id/contents",
            &[(":project_id", "b.123"), (":folder_id", "urn:f.456")],
        );
        assert_eq!(rendered, "data/v1/projects/b.123/folders/urn:f.456/contents");
    }

    #[test]
    fn filter_param_joins_entries() {
        let pair = filter_param("type", &["folders".to_string(), "items".to_string()]);
        assert_eq!(
            pair,
            Some(("filter[type]".to_string(), "folders,items".to_string()))
        );
        assert_eq!(filter_param("type", &[]), None);
    }

    #[test]
    fn admin_filters_enforce_length_cap() {
        let long = vec!["x".repeat(300)];
        let err = admin_filter_params(&[("name".to_string(), long)]).unwrap_err();
        assert!(matches!(err, ForgeError::InvalidFilter(_)));

        let ok = admin_filter_params(&[(
            "name".to_string(),
            vec!["alice".to_string(), "bob".to_string()],
        )])
        .unwrap();
        assert_eq!(
            ok,
            vec![("filter[name]".to_string(), "alice,bob".to_string())]
        );
    }

    #[test]
    fn project_id_normalization() {
        assert_eq!(data_project_id("123"), "b.123");
        assert_eq!(data_project_id("b.123"), "b.123");
        assert_eq!(admin_project_id("b.123"), "123");
        assert_eq!(admin_project_id("123"), "123");
    }

    #[test]
    fn require_rejects_empty() {
        assert!(matches!(
            require("", "project_id"),
            Err(ForgeError::MissingParameter("project_id"))
        ));
        assert_eq!(require("abc", "project_id").unwrap(), "abc");
    }
}
