//! Synthetic fallback data.
//!
//! With [`FallbackPolicy::Synthetic`], read operations that fail return the
//! fixed datasets below instead of an error, and create/update operations
//! return an "as-if-saved" record echoing their input. A caller cannot tell
//! a synthetic save from a real one. This mode exists for local development
//! and demos against a missing backend; anything that needs durability must
//! run with [`FallbackPolicy::Propagate`].
//!
//! The read datasets are deterministic: every call returns the same page.

use chrono::{DateTime, Utc};
use tracing::warn;

use backoffice_core::models::{
    AuthSession, CorpEmployee, CorpEmployeeUpdate, CorpUser, CorpUserRole, CorpUserRoleUpdate,
    CorpUserUpdate, Corporate, CorporateUpdate, Employee, EmployeeRequest, EmployeeStats,
    EmployeeTransaction, NewCorpEmployee, NewCorpUser, NewCorpUserRole, NewCorporate, NewUser,
    ProfileUpdate, RoleOption, User, UserUpdate,
};
use backoffice_core::{AccessToken, Error, Page, ProcessStatus, RecordStatus, RefreshToken, Result};

/// First identifier handed out to synthetic records.
pub const SYNTHETIC_ID_BASE: u64 = 100_001;

/// What to do when a fallback-eligible operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Return the error to the caller.
    #[default]
    Propagate,
    /// Substitute synthetic data and log a warning.
    Synthetic,
}

impl FallbackPolicy {
    pub fn from_flag(allow_synthetic: bool) -> Self {
        if allow_synthetic {
            FallbackPolicy::Synthetic
        } else {
            FallbackPolicy::Propagate
        }
    }

    pub fn allows_synthetic(self) -> bool {
        self == FallbackPolicy::Synthetic
    }

    /// Replace a failed read with synthetic data.
    pub(crate) fn recover_read<T>(
        self,
        operation: &'static str,
        result: Result<T>,
        fallback: impl FnOnce() -> T,
    ) -> Result<T> {
        self.recover_read_with(operation, result, || Some(fallback()))
    }

    /// Like [`recover_read`](Self::recover_read), for lookups the synthetic
    /// dataset may not be able to answer.
    pub(crate) fn recover_read_with<T>(
        self,
        operation: &'static str,
        result: Result<T>,
        fallback: impl FnOnce() -> Option<T>,
    ) -> Result<T> {
        match result {
            Err(error) if self.eligible(&error) => match fallback() {
                Some(value) => {
                    warn!(operation, error = %error, "API read failed, using synthetic data");
                    Ok(value)
                }
                None => Err(error),
            },
            other => other,
        }
    }

    /// Replace a failed create/update with an as-if-saved record.
    pub(crate) fn recover_write<T>(
        self,
        operation: &'static str,
        result: Result<T>,
        fallback: impl FnOnce() -> T,
    ) -> Result<T> {
        match result {
            Err(error) if self.eligible(&error) => {
                warn!(
                    operation,
                    error = %error,
                    "API write failed, returning an unsaved synthetic record"
                );
                Ok(fallback())
            }
            other => other,
        }
    }

    fn eligible(self, error: &Error) -> bool {
        self.allows_synthetic() && !error.is_validation()
    }
}

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

// 2024-01-15T09:00:00Z
const EPOCH_DAY: i64 = 1_705_309_200;
const DAY: i64 = 86_400;

// ============================================================================
// Read datasets
// ============================================================================

pub fn corporates() -> Page<Corporate> {
    let items = vec![
        Corporate {
            no: 1,
            name: "Acme Holdings".to_string(),
            email: "hr@acme.example".to_string(),
            mobile: "+1234567800".to_string(),
            employees: 120,
            status: RecordStatus::Active,
        },
        Corporate {
            no: 2,
            name: "Globex Trading".to_string(),
            email: "payroll@globex.example".to_string(),
            mobile: "+1234567801".to_string(),
            employees: 45,
            status: RecordStatus::Inactive,
        },
    ];
    Page::new(items, 2, 1)
}

pub fn corp_employees() -> Page<CorpEmployee> {
    let items = vec![
        CorpEmployee {
            no: 1,
            name: "John Doe".to_string(),
            email: "john.doe@company.com".to_string(),
            mobile: "+1234567890".to_string(),
            basic_sal_amt: "50000".to_string(),
            acc_no: "123456789".to_string(),
            acc_name: "John Doe".to_string(),
            acc_bank: "ABC Bank".to_string(),
            acc_branch: "Main Branch".to_string(),
            status: RecordStatus::Active,
            status_label: "Active".to_string(),
            ap_status: "approved".to_string(),
            ap_status_label: "Approved".to_string(),
        },
        CorpEmployee {
            no: 2,
            name: "Jane Smith".to_string(),
            email: "jane.smith@company.com".to_string(),
            mobile: "+1234567891".to_string(),
            basic_sal_amt: "45000".to_string(),
            acc_no: "123456790".to_string(),
            acc_name: "Jane Smith".to_string(),
            acc_bank: "XYZ Bank".to_string(),
            acc_branch: "Central Branch".to_string(),
            status: RecordStatus::Active,
            status_label: "Active".to_string(),
            ap_status: "pending".to_string(),
            ap_status_label: "Pending".to_string(),
        },
    ];
    Page::new(items, 2, 1)
}

pub fn employee_requests() -> Page<EmployeeRequest> {
    let items = vec![
        EmployeeRequest {
            request_id: "req-001".to_string(),
            employee_id: "emp-001".to_string(),
            employee_name: "John Doe".to_string(),
            requested_date: at(EPOCH_DAY),
            requested_type: "Advance".to_string(),
            amount: Some("5000".to_string()),
            process_status: ProcessStatus::Pending,
            processed_by: None,
            processed_date: None,
            remark: Some("Emergency medical expenses".to_string()),
        },
        EmployeeRequest {
            request_id: "req-002".to_string(),
            employee_id: "emp-002".to_string(),
            employee_name: "Jane Smith".to_string(),
            requested_date: at(EPOCH_DAY - DAY),
            requested_type: "Leave".to_string(),
            amount: None,
            process_status: ProcessStatus::Approved,
            processed_by: Some("admin-001".to_string()),
            processed_date: Some(at(EPOCH_DAY)),
            remark: Some("Personal reasons".to_string()),
        },
    ];
    Page::new(items, 2, 1)
}

pub fn employees() -> Page<Employee> {
    let employee = |id: &str, name: &str, email: &str, is_verified: bool| Employee {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        mobile: String::new(),
        corporate_id: Some("1".to_string()),
        is_active: true,
        is_verified,
        created_at: Some(at(EPOCH_DAY - 30 * DAY)),
    };
    let items = vec![
        employee("emp-001", "John Doe", "john.doe@company.com", true),
        employee("emp-002", "Jane Smith", "jane.smith@company.com", false),
    ];
    Page::new(items, 2, 1)
}

/// Head counts over the synthetic directory and request queue.
pub fn employee_stats() -> EmployeeStats {
    let directory = employees().items;
    let count = |n: usize| u64::try_from(n).unwrap_or(u64::MAX);
    EmployeeStats {
        total_employees: count(directory.len()),
        active_employees: count(directory.iter().filter(|e| e.is_active).count()),
        verified_employees: count(directory.iter().filter(|e| e.is_verified).count()),
        pending_requests: count(
            employee_requests()
                .items
                .iter()
                .filter(|r| r.process_status == ProcessStatus::Pending)
                .count(),
        ),
    }
}

pub fn employee_transactions(employee_id: &str) -> Page<EmployeeTransaction> {
    let tx = |n: i64, kind: &str, amount: &str, status: &str| EmployeeTransaction {
        id: format!("tx-{}-{}", employee_id, n),
        employee_id: employee_id.to_string(),
        kind: kind.to_string(),
        amount: amount.to_string(),
        status: status.to_string(),
        created_at: Some(at(EPOCH_DAY - n * DAY)),
        description: None,
    };
    let items = vec![
        tx(1, "advance", "5000", "completed"),
        tx(2, "repayment", "2500", "completed"),
    ];
    Page::new(items, 2, 1)
}

pub fn user() -> User {
    User {
        id: "dummy-user-1".to_string(),
        name: "Admin User".to_string(),
        email: "admin@advanzpay.com".to_string(),
        role: "Admin".to_string(),
        is_active: true,
        created_at: Some(at(EPOCH_DAY)),
        last_login: Some(at(EPOCH_DAY)),
    }
}

pub fn users() -> Page<User> {
    Page::new(vec![user()], 1, 1)
}

pub fn corp_users() -> Page<CorpUser> {
    let items = vec![
        CorpUser {
            no: 1,
            name: "Admin User".to_string(),
            email: "admin@advanzpay.com".to_string(),
            title: "System Administrator".to_string(),
            mobile: "+1234567890".to_string(),
            status: RecordStatus::Active,
            status_label: "Active".to_string(),
            role: 1,
            role_label: "Super Admin".to_string(),
        },
        CorpUser {
            no: 2,
            name: "Manager User".to_string(),
            email: "manager@advanzpay.com".to_string(),
            title: "Operations Manager".to_string(),
            mobile: "+1234567891".to_string(),
            status: RecordStatus::Active,
            status_label: "Active".to_string(),
            role: 2,
            role_label: "Manager".to_string(),
        },
    ];
    Page::new(items, 2, 1)
}

pub fn corp_user_roles() -> Page<CorpUserRole> {
    let role = |no: u64, name: &str, description: &str, permissions: &str| CorpUserRole {
        no,
        name: name.to_string(),
        description: description.to_string(),
        permissions: permissions.to_string(),
        status: RecordStatus::Active,
    };
    let items = vec![
        role(1, "Super Admin", "Full system access", "all"),
        role(2, "Manager", "Management level access", "read,write"),
        role(3, "Viewer", "Read-only access", "read"),
    ];
    Page::new(items, 3, 1)
}

pub fn role_options() -> Vec<RoleOption> {
    corp_user_roles()
        .items
        .into_iter()
        .map(|r| RoleOption {
            no: r.no,
            name: r.name,
        })
        .collect()
}

/// A development session with freshly stamped dummy tokens.
pub fn auth_session(user: User) -> AuthSession {
    let stamp = Utc::now().timestamp_millis();
    AuthSession {
        token: AccessToken::new(format!("dummy-token-{}", stamp)),
        refresh_token: Some(RefreshToken::new(format!("dummy-refresh-token-{}", stamp))),
        user,
        expiry: None,
    }
}

// ============================================================================
// As-if-saved records
// ============================================================================

pub fn created_corporate(no: u64, form: &NewCorporate) -> Corporate {
    Corporate {
        no,
        name: form.corporation_name.clone(),
        email: form.email.clone(),
        mobile: form.mobile.clone(),
        employees: 0,
        status: form.status,
    }
}

pub fn updated_corporate(update: &CorporateUpdate) -> Corporate {
    created_corporate(update.no, &update.details)
}

pub fn created_corp_employee(no: u64, form: &NewCorpEmployee) -> CorpEmployee {
    CorpEmployee {
        no,
        name: form.name.clone(),
        email: form.email.clone(),
        mobile: form.mobile.clone(),
        basic_sal_amt: form.basic_sal_amt.to_string(),
        acc_no: form.acc_no.clone(),
        acc_name: form.acc_name.clone(),
        acc_bank: form.acc_bank.clone(),
        acc_branch: form.acc_branch.clone(),
        status: RecordStatus::Active,
        status_label: RecordStatus::Active.label().to_string(),
        ap_status: "pending".to_string(),
        ap_status_label: "Pending".to_string(),
    }
}

pub fn updated_corp_employee(update: &CorpEmployeeUpdate) -> CorpEmployee {
    let mut employee = created_corp_employee(update.no, &update.details);
    employee.status = update.status;
    employee.status_label = update.status.label().to_string();
    employee.ap_status = "approved".to_string();
    employee.ap_status_label = "Approved".to_string();
    employee
}

pub fn created_corp_user(no: u64, form: &NewCorpUser) -> CorpUser {
    CorpUser {
        no,
        name: form.name.clone(),
        email: form.email.clone(),
        title: form.title.clone(),
        mobile: form.mobile.clone(),
        status: RecordStatus::Active,
        status_label: RecordStatus::Active.label().to_string(),
        role: form.role,
        role_label: "User Role".to_string(),
    }
}

pub fn updated_corp_user(update: &CorpUserUpdate) -> CorpUser {
    let mut user = CorpUser {
        no: update.no,
        name: String::new(),
        email: String::new(),
        title: String::new(),
        mobile: String::new(),
        status: RecordStatus::Active,
        status_label: RecordStatus::Active.label().to_string(),
        role: 0,
        role_label: "User Role".to_string(),
    };
    update.apply_to(&mut user);
    user
}

pub fn created_corp_user_role(no: u64, form: &NewCorpUserRole) -> CorpUserRole {
    CorpUserRole {
        no,
        name: form.name.clone(),
        description: form.description.clone(),
        permissions: form.permissions.clone(),
        status: RecordStatus::Active,
    }
}

pub fn updated_corp_user_role(update: &CorpUserRoleUpdate) -> CorpUserRole {
    CorpUserRole {
        no: update.no,
        name: update.name.clone().unwrap_or_default(),
        description: update.description.clone().unwrap_or_default(),
        permissions: update.permissions.clone().unwrap_or_default(),
        status: update.status.unwrap_or_default(),
    }
}

pub fn created_user(no: u64, form: &NewUser) -> User {
    User {
        id: format!("user-{}", no),
        name: form.name.clone(),
        email: form.email.clone(),
        role: form.role.clone(),
        is_active: true,
        created_at: None,
        last_login: None,
    }
}

/// The known synthetic user with `update` applied, or a bare record
/// carrying only the updated fields.
pub fn updated_user(id: &str, update: &UserUpdate) -> User {
    let mut user = users()
        .items
        .into_iter()
        .find(|u| u.id == id)
        .unwrap_or_else(|| User {
            id: id.to_string(),
            name: String::new(),
            email: String::new(),
            role: String::new(),
            is_active: true,
            created_at: None,
            last_login: None,
        });
    update.apply_to(&mut user);
    user
}

pub fn updated_profile(update: &ProfileUpdate) -> User {
    let mut profile = user();
    update.apply_to(&mut profile);
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::error::TransportError;
    use backoffice_core::validation;

    fn transport_failure() -> Error {
        Error::Transport(TransportError::Connection {
            message: "refused".into(),
        })
    }

    #[test]
    fn stats_agree_with_synthetic_datasets() {
        let stats = employee_stats();
        assert_eq!(stats.total_employees, employees().total);
        assert_eq!(stats.active_employees, 2);
        assert_eq!(stats.verified_employees, 1);
        assert_eq!(stats.pending_requests, 1);
    }

    #[test]
    fn datasets_are_deterministic() {
        assert_eq!(corp_employees(), corp_employees());
        assert_eq!(employee_requests(), employee_requests());
        assert_eq!(corp_employees().total, 2);
    }

    #[test]
    fn datasets_respect_page_invariants() {
        for (len, total, pages) in [
            (corporates().len(), corporates().total, corporates().total_pages),
            (corp_users().len(), corp_users().total, corp_users().total_pages),
            (corp_user_roles().len(), corp_user_roles().total, corp_user_roles().total_pages),
        ] {
            assert!(len <= 10);
            assert_eq!(pages, Page::<()>::pages_for(total, 10));
        }
    }

    #[test]
    fn propagate_policy_keeps_error() {
        let result: Result<u32> = Err(transport_failure());
        assert!(FallbackPolicy::Propagate.recover_read("op", result, || 1).is_err());
    }

    #[test]
    fn synthetic_policy_substitutes() {
        let result: Result<u32> = Err(transport_failure());
        assert_eq!(FallbackPolicy::Synthetic.recover_read("op", result, || 7).unwrap(), 7);
    }

    #[test]
    fn validation_errors_are_never_masked() {
        let err = validation::require("name", "").unwrap_err();
        let result: Result<u32> = Err(err);
        assert!(FallbackPolicy::Synthetic.recover_write("op", result, || 1).is_err());
    }

    #[test]
    fn lookup_without_synthetic_match_keeps_error() {
        let result: Result<u32> = Err(transport_failure());
        assert!(
            FallbackPolicy::Synthetic
                .recover_read_with("op", result, || None)
                .is_err()
        );
    }

    #[test]
    fn updated_employee_echoes_status() {
        let update = CorpEmployeeUpdate {
            no: 12,
            details: NewCorpEmployee {
                name: "Jane Smith".into(),
                email: "jane.smith@company.com".into(),
                mobile: "+1234567891".into(),
                basic_sal_amt: 45000.0,
                acc_no: "123456790".into(),
                acc_name: "Jane Smith".into(),
                acc_bank: "XYZ Bank".into(),
                acc_branch: "Central Branch".into(),
            },
            status: RecordStatus::Inactive,
        };
        let employee = updated_corp_employee(&update);
        assert_eq!(employee.no, 12);
        assert_eq!(employee.status_label, "Inactive");
        assert_eq!(employee.basic_sal_amt, "45000");
    }
}
