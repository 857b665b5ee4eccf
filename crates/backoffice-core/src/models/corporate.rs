//! Corporate accounts.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::traits::StatusRecord;
use crate::types::RecordStatus;

/// A corporate customer as listed on the corporates screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corporate {
    pub no: u64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    /// Number of enrolled employees.
    #[serde(default, alias = "employeeCount")]
    pub employees: u32,
    #[serde(default)]
    pub status: RecordStatus,
}

impl StatusRecord for Corporate {
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

/// Salary bands that bound earned-wage access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryLimits {
    pub minimum: String,
    pub maximum: String,
    pub percentage: String,
    pub cap_amount: String,
}

impl Default for SalaryLimits {
    fn default() -> Self {
        Self {
            minimum: "10000".to_string(),
            maximum: "10000".to_string(),
            percentage: "10000".to_string(),
            cap_amount: "10000".to_string(),
        }
    }
}

/// Earned-wage-access settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EwaConfiguration {
    pub max_ewa_percentage: u8,
    pub ad_hoc_transaction_fee: String,
    pub enable_auto_approval: bool,
}

impl Default for EwaConfiguration {
    fn default() -> Self {
        Self {
            max_ewa_percentage: 51,
            ad_hoc_transaction_fee: "5".to_string(),
            enable_auto_approval: true,
        }
    }
}

/// Withdrawal fees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeStructure {
    pub manual_withdrawal_fee: String,
    pub automated_withdrawal_fee: String,
}

impl Default for FeeStructure {
    fn default() -> Self {
        Self {
            manual_withdrawal_fee: "3".to_string(),
            automated_withdrawal_fee: "2".to_string(),
        }
    }
}

/// Onboarding form for a new corporate and its contact person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCorporate {
    #[validate(length(min = 1, message = "corporation name is required"))]
    pub corporation_name: String,
    #[serde(default)]
    pub registered_address: String,
    #[serde(default)]
    pub registration_id: String,
    #[serde(default = "default_pay_date")]
    pub pay_date: String,
    #[validate(length(min = 1, message = "contact name is required"))]
    pub name: String,
    #[serde(default = "default_job_title")]
    pub job_title: String,
    #[validate(email(message = "please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 10, message = "please enter a valid mobile number"))]
    pub mobile: String,
    #[serde(default)]
    pub salary_limits: SalaryLimits,
    #[serde(default)]
    pub ewa_configuration: EwaConfiguration,
    #[serde(default)]
    pub fee_structure: FeeStructure,
    #[serde(default)]
    pub status: RecordStatus,
}

fn default_pay_date() -> String {
    "1".to_string()
}

fn default_job_title() -> String {
    "Manager".to_string()
}

impl NewCorporate {
    /// A form with every configurable section at its default.
    pub fn new(
        corporation_name: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        mobile: impl Into<String>,
    ) -> Self {
        Self {
            corporation_name: corporation_name.into(),
            registered_address: String::new(),
            registration_id: String::new(),
            pay_date: default_pay_date(),
            name: name.into(),
            job_title: default_job_title(),
            email: email.into(),
            mobile: mobile.into(),
            salary_limits: SalaryLimits::default(),
            ewa_configuration: EwaConfiguration::default(),
            fee_structure: FeeStructure::default(),
            status: RecordStatus::Active,
        }
    }
}

/// Edit form for an existing corporate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CorporateUpdate {
    pub no: u64,
    #[serde(flatten)]
    #[validate(nested)]
    pub details: NewCorporate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_take_defaults() {
        let form: NewCorporate = serde_json::from_value(serde_json::json!({
            "corporationName": "Acme Holdings",
            "name": "Jane Smith",
            "email": "jane@acme.com",
            "mobile": "+1234567891"
        }))
        .unwrap();

        assert_eq!(form.pay_date, "1");
        assert_eq!(form.job_title, "Manager");
        assert_eq!(form.ewa_configuration.max_ewa_percentage, 51);
        assert_eq!(form.fee_structure.automated_withdrawal_fee, "2");
        assert_eq!(form.status, RecordStatus::Active);
    }

    #[test]
    fn update_flattens_details() {
        let update = CorporateUpdate {
            no: 9,
            details: NewCorporate::new("Acme", "Jane", "jane@acme.com", "+1234567891"),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["no"], 9);
        assert_eq!(json["corporationName"], "Acme");
        assert_eq!(json["salaryLimits"]["capAmount"], "10000");
    }

    #[test]
    fn corporate_without_counts_deserializes() {
        let corp: Corporate =
            serde_json::from_str(r#"{"no": 3, "name": "Acme", "status": "INAC"}"#).unwrap();
        assert_eq!(corp.employees, 0);
        assert_eq!(corp.status, RecordStatus::Inactive);
    }
}
