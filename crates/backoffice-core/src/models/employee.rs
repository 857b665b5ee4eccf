//! Corporate employees and the platform-wide employee directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::traits::StatusRecord;
use crate::types::RecordStatus;

/// An employee enrolled by a corporate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpEmployee {
    pub no: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    /// Basic salary, as the decimal string the API returns.
    #[serde(default)]
    pub basic_sal_amt: String,
    #[serde(default)]
    pub acc_no: String,
    #[serde(default)]
    pub acc_name: String,
    #[serde(default)]
    pub acc_bank: String,
    #[serde(default)]
    pub acc_branch: String,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(default)]
    pub status_label: String,
    /// Approval state, free-form on the wire (`approved`, `pending`, ...).
    #[serde(default)]
    pub ap_status: String,
    #[serde(default)]
    pub ap_status_label: String,
}

impl StatusRecord for CorpEmployee {
    type Id = u64;

    fn record_id(&self) -> u64 {
        self.no
    }

    fn status(&self) -> RecordStatus {
        self.status
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = status;
        self.status_label = status.label().to_string();
    }
}

/// Enrollment form for a corporate employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCorpEmployee {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 10, message = "please enter a valid mobile number"))]
    pub mobile: String,
    #[validate(range(min = 0.0, message = "salary cannot be negative"))]
    pub basic_sal_amt: f64,
    #[validate(length(min = 1, message = "account number is required"))]
    pub acc_no: String,
    pub acc_name: String,
    pub acc_bank: String,
    pub acc_branch: String,
}

/// Edit form for an enrolled employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CorpEmployeeUpdate {
    pub no: u64,
    #[serde(flatten)]
    #[validate(nested)]
    pub details: NewCorpEmployee,
    #[serde(default)]
    pub status: RecordStatus,
}

/// An employee in the platform-wide directory, keyed by a string id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corporate_id: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn active_by_default() -> bool {
    true
}

/// One movement on an employee's account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeTransaction {
    pub id: String,
    #[serde(default)]
    pub employee_id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Decimal string, as the API returns it.
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Dashboard head counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStats {
    #[serde(default)]
    pub total_employees: u64,
    #[serde(default)]
    pub active_employees: u64,
    #[serde(default)]
    pub verified_employees: u64,
    #[serde(default)]
    pub pending_requests: u64,
}
