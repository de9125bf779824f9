//! Resource-family clients.
//!
//! One module per Forge/BIM360 resource family, each an independent thin
//! wrapper over [`ForgeClient`]: URL templating, parameter validation,
//! dispatch, envelope unwrapping. There is no shared dispatch hierarchy;
//! the families only have the transport in common.

mod business_units;
mod companies;
mod custom_attributes;
mod folders;
mod hubs;
mod model_derivative;
mod permissions;
mod projects;
mod users;
mod versions;

pub use business_units::BusinessUnitsApi;
pub use companies::CompaniesApi;
pub use custom_attributes::CustomAttributesApi;
pub use folders::FoldersApi;
pub use hubs::HubsApi;
pub use model_derivative::{AcceptEncoding, ModelDerivativeApi};
pub use permissions::{PermissionSubject, PermissionsApi, SubjectType};
pub use projects::ProjectsApi;
pub use users::{UserListParams, UsersApi};
pub use versions::VersionsApi;

use crate::client::ForgeClient;

/// Default page size for the admin/HQ list endpoints.
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Paging, sort and field selection for the admin/HQ list endpoints.
///
/// Built fresh per call; never share one instance across calls expecting
/// isolated mutation.
#[derive(Debug, Clone)]
pub struct ListParams {
    /// Page size requested from the server.
    pub limit: usize,
    /// Starting offset.
    pub offset: usize,
    /// Field names to sort by; prefix with `-` for descending.
    pub sort: Vec<String>,
    /// Field names to include in the response records.
    pub field: Vec<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
            sort: Vec::new(),
            field: Vec::new(),
        }
    }
}

impl ForgeClient {
    /// Hubs API (`project/v1`).
    pub fn hubs(&self) -> HubsApi<'_> {
        HubsApi::new(self)
    }

    /// Projects API (`project/v1`, `hq/v1`).
    pub fn projects(&self) -> ProjectsApi<'_> {
        ProjectsApi::new(self)
    }

    /// Folders API (`data/v1`).
    pub fn folders(&self) -> FoldersApi<'_> {
        FoldersApi::new(self)
    }

    /// Companies API (`hq/v1`).
    pub fn companies(&self) -> CompaniesApi<'_> {
        CompaniesApi::new(self)
    }

    /// Business units API (`hq/v1`).
    pub fn business_units(&self) -> BusinessUnitsApi<'_> {
        BusinessUnitsApi::new(self)
    }

    /// Project users API (`bim360/admin/v1`).
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    /// Item versions API (`data/v1`).
    pub fn versions(&self) -> VersionsApi<'_> {
        VersionsApi::new(self)
    }

    /// Folder permissions API (`bim360/docs/v1`).
    pub fn permissions(&self) -> PermissionsApi<'_> {
        PermissionsApi::new(self)
    }

    /// Custom attribute definitions API (`bim360/docs/v1`).
    pub fn custom_attributes(&self) -> CustomAttributesApi<'_> {
        CustomAttributesApi::new(self)
    }

    /// Model derivative API (`modelderivative/v2`).
    pub fn model_derivative(&self) -> ModelDerivativeApi<'_> {
        ModelDerivativeApi::new(self)
    }
}
