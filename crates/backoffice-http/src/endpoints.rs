//! Endpoint paths and the list field each paginated endpoint uses.

// ============================================================================
// Auth
// ============================================================================

pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_REGISTER: &str = "/auth/register";
pub const AUTH_LOGOUT: &str = "/auth/logout";
pub const AUTH_ME: &str = "/auth/me";
pub const AUTH_REFRESH: &str = "/auth/refresh";
pub const AUTH_FORGOT_PASSWORD: &str = "/auth/forgot-password";
pub const AUTH_RESET_PASSWORD: &str = "/auth/reset-password";
pub const AUTH_VERIFY_EMAIL: &str = "/auth/verify-email";
pub const AUTH_RESEND_VERIFICATION: &str = "/auth/resend-verification";
pub const AUTH_CHANGE_PASSWORD: &str = "/auth/change-password";
pub const AUTH_PROFILE: &str = "/auth/profile";

// ============================================================================
// Corporates
// ============================================================================

pub const CORPORATES: &str = "/corp";
pub const CORPORATES_FIELD: &str = "corporates";

// ============================================================================
// Employees
// ============================================================================

pub const CORP_EMPLOYEES: &str = "/corp-emp";
pub const CORP_EMPLOYEES_FIELD: &str = "employees";

pub const EMPLOYEE_REQUESTS: &str = "/employee-requests";
pub const EMPLOYEE_REQUESTS_FIELD: &str = "requests";

pub fn employee_request(id: &str) -> String {
    format!("{}/{}", EMPLOYEE_REQUESTS, id)
}

pub fn employee_request_status(id: &str) -> String {
    format!("{}/{}/status", EMPLOYEE_REQUESTS, id)
}

pub const EMPLOYEES: &str = "/employees";
pub const EMPLOYEES_FIELD: &str = "employees";
pub const EMPLOYEE_STATS: &str = "/employees/stats";
pub const EMPLOYEE_TRANSACTIONS_FIELD: &str = "transactions";

pub fn employee(id: &str) -> String {
    format!("{}/{}", EMPLOYEES, id)
}

pub fn employee_transactions(id: &str) -> String {
    format!("{}/{}/transactions", EMPLOYEES, id)
}

pub fn employee_verify(id: &str) -> String {
    format!("{}/{}/verify", EMPLOYEES, id)
}

pub fn employee_toggle_status(id: &str) -> String {
    format!("{}/{}/toggle-status", EMPLOYEES, id)
}

// ============================================================================
// Users and roles
// ============================================================================

pub const USERS: &str = "/users";
pub const USERS_FIELD: &str = "users";

pub fn user(id: &str) -> String {
    format!("{}/{}", USERS, id)
}

pub fn user_toggle_status(id: &str) -> String {
    format!("{}/{}/toggle-status", USERS, id)
}

pub fn user_reset_password(id: &str) -> String {
    format!("{}/{}/reset-password", USERS, id)
}

pub const CORP_USERS: &str = "/corp-user";
pub const CORP_USERS_FIELD: &str = "users";

pub const CORP_USER_ROLES: &str = "/corp-user-role";
pub const CORP_USER_ROLES_FIELD: &str = "roles";
pub const CORP_USER_ROLES_DROPDOWN: &str = "/corp-user-role/dd";
