//! Entity records and their write payloads.
//!
//! Field names follow the API's camelCase wire format. Optional fields get
//! their defaults here, at deserialization, and nowhere else.

mod corporate;
mod employee;
mod request;
mod role;
mod user;

pub use corporate::{
    Corporate, CorporateUpdate, EwaConfiguration, FeeStructure, NewCorporate, SalaryLimits,
};
pub use employee::{
    CorpEmployee, CorpEmployeeUpdate, Employee, EmployeeStats, EmployeeTransaction, NewCorpEmployee,
};
pub use request::{EmployeeRequest, RequestStatusUpdate};
pub use role::{CorpUserRole, CorpUserRoleUpdate, NewCorpUserRole, RoleOption};
pub use user::{
    AuthSession, CorpUser, CorpUserUpdate, NewCorpUser, NewUser, ProfileUpdate, User, UserUpdate,
};
