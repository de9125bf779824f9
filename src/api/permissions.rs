//! Folder permissions resource client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{ForgeClient, RequestOptions};
use crate::endpoint::{self, admin_project_id, require};
use crate::error::Result;

const FOLDER_PERMISSIONS: &str =
    "bim360/docs/v1/projects/:project_id/folders/:folder_id/permissions";
const BATCH_CREATE: &str =
    "bim360/docs/v1/projects/:project_id/folders/:folder_id/permissions:batch-create";
const BATCH_UPDATE: &str =
    "bim360/docs/v1/projects/:project_id/folders/:folder_id/permissions:batch-update";
const BATCH_DELETE: &str =
    "bim360/docs/v1/projects/:project_id/folders/:folder_id/permissions:batch-delete";

/// Who a folder permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectType {
    User,
    Company,
    Role,
}

/// One subject entry of a batch permission request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSubject {
    /// Id of the user, role or company.
    pub subject_id: String,
    pub subject_type: SubjectType,
    /// Permitted actions; the six BIM360 permission levels map onto one or
    /// more of these. Ignored by batch-delete.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
}

/// Thin wrapper over the `bim360/docs/v1` folder-permission endpoints.
/// Project ids are normalized to the bare form the docs API requires.
#[derive(Debug)]
pub struct PermissionsApi<'a> {
    client: &'a ForgeClient,
}

impl<'a> PermissionsApi<'a> {
    pub(crate) fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    fn path(template: &str, project_id: &str, folder_id: &str) -> Result<String> {
        require(project_id, "project_id")?;
        require(folder_id, "folder_id")?;
        let project_id = admin_project_id(project_id);
        Ok(endpoint::render(
            template,
            &[(":project_id", &project_id), (":folder_id", folder_id)],
        ))
    }

    /// List the permissions assigned on a folder.
    pub async fn get_folder_permissions(
        &self,
        project_id: &str,
        folder_id: &str,
    ) -> Result<Value> {
        let path = Self::path(FOLDER_PERMISSIONS, project_id, folder_id)?;
        self.client.get_json(&path, RequestOptions::new()).await
    }

    /// Assign permissions to multiple users, roles and companies.
    pub async fn batch_create(
        &self,
        project_id: &str,
        folder_id: &str,
        subjects: &[PermissionSubject],
    ) -> Result<Value> {
        let path = Self::path(BATCH_CREATE, project_id, folder_id)?;
        let body = serde_json::to_value(subjects)?;
        self.client
            .post_json(&path, RequestOptions::new().json(body))
            .await
    }

    /// Replace the permissions previously assigned to the subjects.
    pub async fn batch_update(
        &self,
        project_id: &str,
        folder_id: &str,
        subjects: &[PermissionSubject],
    ) -> Result<Value> {
        let path = Self::path(BATCH_UPDATE, project_id, folder_id)?;
        let body = serde_json::to_value(subjects)?;
        self.client
            .post_json(&path, RequestOptions::new().json(body))
            .await
    }

    /// Delete all permissions of the given subjects. Project admins keep
    /// full permissions upstream regardless. Actions are stripped from the
    /// request body.
    pub async fn batch_delete(
        &self,
        project_id: &str,
        folder_id: &str,
        subjects: &[PermissionSubject],
    ) -> Result<Value> {
        let path = Self::path(BATCH_DELETE, project_id, folder_id)?;
        let body: Vec<Value> = subjects
            .iter()
            .map(|subject| {
                serde_json::json!({
                    "subjectId": subject.subject_id,
                    "subjectType": subject.subject_type,
                })
            })
            .collect();
        self.client
            .post_json(&path, RequestOptions::new().json(Value::Array(body)))
            .await
    }
}
