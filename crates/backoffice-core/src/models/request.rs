//! Employee requests (advances, leave) awaiting back-office processing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ProcessStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    pub request_id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub requested_date: DateTime<Utc>,
    pub requested_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default)]
    pub process_status: ProcessStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// A decision on an employee request. The service stamps `processedDate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatusUpdate {
    pub process_status: ProcessStatus,
    pub processed_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl RequestStatusUpdate {
    pub fn approve(processed_by: impl Into<String>, remark: Option<String>) -> Self {
        Self {
            process_status: ProcessStatus::Approved,
            processed_by: processed_by.into(),
            remark,
        }
    }

    pub fn reject(processed_by: impl Into<String>, remark: Option<String>) -> Self {
        Self {
            process_status: ProcessStatus::Rejected,
            processed_by: processed_by.into(),
            remark,
        }
    }
}
