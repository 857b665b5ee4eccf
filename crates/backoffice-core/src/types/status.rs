//! Status codes shared by the corporate, employee and user records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Account status of a corporate, employee, user or role.
///
/// The API speaks four-letter codes; older endpoints and the development
/// datasets use lower-case words, so both are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RecordStatus {
    #[default]
    #[serde(rename = "ACTV", alias = "active", alias = "Active")]
    Active,
    #[serde(rename = "INAC", alias = "inactive", alias = "Inactive")]
    Inactive,
    #[serde(rename = "BLCK", alias = "blocked", alias = "Blocked")]
    Blocked,
}

impl RecordStatus {
    /// The value a status switch flips to.
    ///
    /// Blocked records are unblocked into `Active`.
    pub fn toggled(self) -> Self {
        match self {
            RecordStatus::Active => RecordStatus::Inactive,
            RecordStatus::Inactive | RecordStatus::Blocked => RecordStatus::Active,
        }
    }

    /// Wire code.
    pub fn code(self) -> &'static str {
        match self {
            RecordStatus::Active => "ACTV",
            RecordStatus::Inactive => "INAC",
            RecordStatus::Blocked => "BLCK",
        }
    }

    /// Human label, as the API's `statusLabel` fields carry it.
    pub fn label(self) -> &'static str {
        match self {
            RecordStatus::Active => "Active",
            RecordStatus::Inactive => "Inactive",
            RecordStatus::Blocked => "Blocked",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Processing state of an employee request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProcessStatus {
    #[default]
    #[serde(alias = "pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "approved", alias = "APPROVED")]
    Approved,
    #[serde(alias = "rejected", alias = "REJECTED")]
    Rejected,
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProcessStatus::Pending => "Pending",
            ProcessStatus::Approved => "Approved",
            ProcessStatus::Rejected => "Rejected",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_codes_and_words() {
        let code: RecordStatus = serde_json::from_str("\"INAC\"").unwrap();
        let word: RecordStatus = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(code, RecordStatus::Inactive);
        assert_eq!(word, RecordStatus::Inactive);
        assert_eq!(serde_json::to_string(&word).unwrap(), "\"INAC\"");
    }

    #[test]
    fn toggle_unblocks_into_active() {
        assert_eq!(RecordStatus::Active.toggled(), RecordStatus::Inactive);
        assert_eq!(RecordStatus::Inactive.toggled(), RecordStatus::Active);
        assert_eq!(RecordStatus::Blocked.toggled(), RecordStatus::Active);
    }
}
