//! Corporate user roles.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::traits::StatusRecord;
use crate::types::RecordStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpUserRole {
    pub no: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Comma-separated permission names, or `all`.
    #[serde(default)]
    pub permissions: String,
    #[serde(default)]
    pub status: RecordStatus,
}

impl CorpUserRole {
    /// Permission names, with surrounding whitespace trimmed.
    pub fn permission_list(&self) -> Vec<&str> {
        self.permissions
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

impl StatusRecord for CorpUserRole {
    type Id = u64;

    fn record_id(&self) -> u64 {
        self.no
    }

    fn status(&self) -> RecordStatus {
        self.status
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = status;
    }
}

/// Entry of the role picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOption {
    pub no: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCorpUserRole {
    #[validate(length(min = 1, message = "role name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "at least one permission is required"))]
    pub permissions: String,
}

/// Partial update of a role. The API addresses roles by `index`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpUserRoleUpdate {
    #[serde(rename = "index")]
    pub no: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}
