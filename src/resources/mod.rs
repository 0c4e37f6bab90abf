//! Typed resource surface of the Workforce Management API.
//!
//! Each submodule defines a resource's wire model and implements the
//! corresponding domain methods on [`ApiClient`](crate::ApiClient)
//! (`list_companies`, `create_employee`, ...). All methods pass through the
//! client's request interceptor, so callers get credential attachment and
//! transparent session refresh for free.

mod company;
mod department;
mod employee;

pub use company::{Company, CompanyPatch, NewCompany};
pub use department::{Department, DepartmentFilter, DepartmentPatch, NewDepartment};
pub use employee::{
    Employee, EmployeeFilter, EmployeePatch, EmployeeReportRow, EmployeeStatus, NewEmployee,
};
