//! Employee resource.
//!
//! Employees move through a small hiring pipeline
//! ([`EmployeeStatus`]); `hired_on` is only meaningful once an employee
//! reaches [`EmployeeStatus::Hired`], and the backend nulls it otherwise.

use chrono::NaiveDate;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::client::ApiClient;
use crate::error::ApiError;

/// Stage of the hiring pipeline an employee record is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Application received, not yet screened.
    ApplicationReceived,
    /// Interview scheduled.
    InterviewScheduled,
    /// Hired; `hired_on` is set.
    Hired,
    /// Application rejected.
    NotAccepted,
}

impl EmployeeStatus {
    /// Returns the wire representation used in query filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApplicationReceived => "application_received",
            Self::InterviewScheduled => "interview_scheduled",
            Self::Hired => "hired",
            Self::NotAccepted => "not_accepted",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An employee record, as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Server-assigned id.
    pub id: u64,
    /// Owning company id.
    pub company: u64,
    /// Owning company name (read-only).
    #[serde(default)]
    pub company_name: String,
    /// Owning department id.
    pub department: u64,
    /// Owning department name (read-only).
    #[serde(default)]
    pub department_name: String,
    /// Hiring pipeline stage.
    pub employee_status: EmployeeStatus,
    /// Full name.
    pub employee_name: String,
    /// Contact email.
    pub email_address: String,
    /// Contact phone, international format.
    pub mobile_number: String,
    /// Postal address.
    pub address: String,
    /// Position/title.
    pub designation: String,
    /// Hire date; set only for hired employees.
    pub hired_on: Option<NaiveDate>,
    /// Days since `hired_on` (read-only, hired employees only).
    #[serde(default)]
    pub days_employed: Option<i64>,
}

/// Payload for creating or replacing an employee.
///
/// `hired_on` is sent only when `employee_status` is
/// [`EmployeeStatus::Hired`]; for any other status the backend discards it,
/// so the client nulls it up front.
#[derive(Clone, Debug, Serialize)]
pub struct NewEmployee {
    /// Owning company id.
    pub company: u64,
    /// Owning department id.
    pub department: u64,
    /// Hiring pipeline stage.
    pub employee_status: EmployeeStatus,
    /// Full name (at least 2 characters).
    pub employee_name: String,
    /// Contact email.
    pub email_address: String,
    /// Contact phone, `+999999999` format, 9 to 15 digits.
    pub mobile_number: String,
    /// Postal address.
    pub address: String,
    /// Position/title.
    pub designation: String,
    /// Hire date.
    pub hired_on: Option<NaiveDate>,
}

/// Partial update payload for an employee. Unset fields are left unchanged.
#[derive(Clone, Debug, Default, Serialize)]
pub struct EmployeePatch {
    /// Move the employee to another company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<u64>,
    /// Move the employee to another department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<u64>,
    /// Change the pipeline stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_status: Option<EmployeeStatus>,
    /// Change the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    /// Change the contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    /// Change the contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    /// Change the postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Change the position/title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    /// Change the hire date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hired_on: Option<Option<NaiveDate>>,
}

/// Filter for listing employees.
#[derive(Clone, Debug, Default)]
pub struct EmployeeFilter {
    /// Restrict to a department.
    pub department: Option<u64>,
    /// Restrict to a company.
    pub company: Option<u64>,
    /// Restrict to a pipeline stage.
    pub status: Option<EmployeeStatus>,
}

impl EmployeeFilter {
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(department) = self.department {
            query.push(("department", department.to_string()));
        }
        if let Some(company) = self.company {
            query.push(("company", company.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        query
    }
}

/// One row of the employee report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeReportRow {
    /// Employee id.
    pub id: u64,
    /// Full name.
    pub employee_name: String,
    /// Contact email.
    pub email_address: String,
    /// Contact phone.
    pub mobile_number: String,
    /// Position/title.
    pub position: String,
    /// Hire date, for hired employees.
    pub hired_on: Option<NaiveDate>,
    /// Days since hire, for hired employees.
    #[serde(default)]
    pub days_employed: Option<i64>,
    /// Owning company name.
    pub company_name: String,
    /// Owning department name.
    pub department_name: String,
}

fn validate(employee: &NewEmployee) -> Result<(), ApiError> {
    if employee.employee_name.trim().chars().count() < 2 {
        return Err(ApiError::Validation(
            "Employee name must be at least 2 characters long.".to_string(),
        ));
    }
    if !is_plausible_email(employee.email_address.trim()) {
        return Err(ApiError::Validation(
            "Enter a valid email address.".to_string(),
        ));
    }
    if !is_plausible_phone(employee.mobile_number.trim()) {
        return Err(ApiError::Validation(
            "Phone number must be entered in the format: '+999999999'. Up to 15 digits allowed."
                .to_string(),
        ));
    }
    if employee.address.trim().is_empty() {
        return Err(ApiError::Validation("Address is required.".to_string()));
    }
    if employee.designation.trim().is_empty() {
        return Err(ApiError::Validation(
            "Designation cannot be empty.".to_string(),
        ));
    }
    Ok(())
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

fn is_plausible_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    (9..=16).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

/// Serializes the payload, nulling `hired_on` for non-hired statuses the
/// same way the backend does.
fn employee_body(employee: &NewEmployee) -> Result<serde_json::Value, ApiError> {
    let mut body = serde_json::to_value(employee)?;
    if employee.employee_status != EmployeeStatus::Hired {
        body["hired_on"] = serde_json::Value::Null;
    }
    Ok(body)
}

impl ApiClient {
    /// Lists employees, optionally filtered by department, company, or
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn list_employees(
        &self,
        filter: Option<&EmployeeFilter>,
    ) -> Result<Vec<Employee>, ApiError> {
        let query = filter.map(EmployeeFilter::query).unwrap_or_default();
        let value = self
            .send(
                Method::GET,
                "/core/employees/",
                &query,
                None,
                "Failed to fetch employees",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetches a single employee by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn get_employee(&self, id: u64) -> Result<Employee, ApiError> {
        let value = self
            .send(
                Method::GET,
                &format!("/core/employees/{id}/"),
                &[],
                None,
                "Failed to fetch employee",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Creates an employee.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if required fields are missing or
    /// malformed, otherwise [`ApiError`] on transport, session, or server
    /// failure.
    pub async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee, ApiError> {
        validate(employee)?;
        let body = employee_body(employee)?;
        let value = self
            .send(
                Method::POST,
                "/core/employees/",
                &[],
                Some(&body),
                "Failed to create employee",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Replaces an employee.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if required fields are missing or
    /// malformed, otherwise [`ApiError`] on transport, session, or server
    /// failure.
    pub async fn update_employee(
        &self,
        id: u64,
        employee: &NewEmployee,
    ) -> Result<Employee, ApiError> {
        validate(employee)?;
        let body = employee_body(employee)?;
        let value = self
            .send(
                Method::PUT,
                &format!("/core/employees/{id}/"),
                &[],
                Some(&body),
                "Failed to update employee",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Partially updates an employee.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn patch_employee(
        &self,
        id: u64,
        patch: &EmployeePatch,
    ) -> Result<Employee, ApiError> {
        let body = serde_json::to_value(patch)?;
        let value = self
            .send(
                Method::PATCH,
                &format!("/core/employees/{id}/"),
                &[],
                Some(&body),
                "Failed to update employee",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Deletes an employee.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn delete_employee(&self, id: u64) -> Result<(), ApiError> {
        self.send(
            Method::DELETE,
            &format!("/core/employees/{id}/"),
            &[],
            None,
            "Failed to delete employee",
        )
        .await?;
        Ok(())
    }

    /// Fetches the employee report rows.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn employee_report(&self) -> Result<Vec<EmployeeReportRow>, ApiError> {
        let value = self
            .send(
                Method::GET,
                "/core/employees/report/",
                &[],
                None,
                "Failed to fetch employee report",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Lists the employees of a department.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn department_employees(&self, department_id: u64) -> Result<Vec<Employee>, ApiError> {
        let filter = EmployeeFilter {
            department: Some(department_id),
            ..EmployeeFilter::default()
        };
        self.list_employees(Some(&filter)).await
    }

    /// Lists the employees of a company.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn company_employees(&self, company_id: u64) -> Result<Vec<Employee>, ApiError> {
        let filter = EmployeeFilter {
            company: Some(company_id),
            ..EmployeeFilter::default()
        };
        self.list_employees(Some(&filter)).await
    }

    /// Lists employees in a given pipeline stage.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn employees_by_status(
        &self,
        status: EmployeeStatus,
    ) -> Result<Vec<Employee>, ApiError> {
        let filter = EmployeeFilter {
            status: Some(status),
            ..EmployeeFilter::default()
        };
        self.list_employees(Some(&filter)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_employee() -> NewEmployee {
        NewEmployee {
            company: 1,
            department: 2,
            employee_status: EmployeeStatus::Hired,
            employee_name: "Jordan Doe".to_string(),
            email_address: "jordan@example.com".to_string(),
            mobile_number: "+15551234567".to_string(),
            address: "1 Main St".to_string(),
            designation: "Engineer".to_string(),
            hired_on: NaiveDate::from_ymd_opt(2024, 3, 1),
        }
    }

    #[test]
    fn test_status_serde_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&EmployeeStatus::ApplicationReceived).unwrap(),
            r#""application_received""#
        );
        let status: EmployeeStatus = serde_json::from_str(r#""not_accepted""#).unwrap();
        assert_eq!(status, EmployeeStatus::NotAccepted);
    }

    #[test]
    fn test_status_display_matches_wire_format() {
        assert_eq!(EmployeeStatus::InterviewScheduled.to_string(), "interview_scheduled");
    }

    #[test]
    fn test_filter_query_includes_all_set_fields() {
        let filter = EmployeeFilter {
            department: Some(2),
            company: Some(1),
            status: Some(EmployeeStatus::Hired),
        };
        assert_eq!(
            filter.query(),
            vec![
                ("department", "2".to_string()),
                ("company", "1".to_string()),
                ("status", "hired".to_string()),
            ]
        );
    }

    #[test]
    fn test_validate_accepts_complete_employee() {
        assert!(validate(&new_employee()).is_ok());
    }

    #[test]
    fn test_validate_rejects_short_name() {
        let mut employee = new_employee();
        employee.employee_name = "J".to_string();
        assert!(matches!(
            validate(&employee),
            Err(ApiError::Validation(msg)) if msg.contains("at least 2 characters")
        ));
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        for bad in ["", "no-at-sign", "a@b", "a@.com", "a b@c.com"] {
            let mut employee = new_employee();
            employee.email_address = bad.to_string();
            assert!(validate(&employee).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_validate_rejects_bad_phone() {
        for bad in ["", "12345", "not-a-number", "+1234567890123456789"] {
            let mut employee = new_employee();
            employee.mobile_number = bad.to_string();
            assert!(validate(&employee).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_phone_accepts_plus_prefix() {
        assert!(is_plausible_phone("+447911123456"));
        assert!(is_plausible_phone("5551234567"));
    }

    #[test]
    fn test_body_nulls_hire_date_for_non_hired() {
        let mut employee = new_employee();
        employee.employee_status = EmployeeStatus::InterviewScheduled;
        let body = employee_body(&employee).unwrap();
        assert!(body["hired_on"].is_null());
    }

    #[test]
    fn test_body_keeps_hire_date_for_hired() {
        let body = employee_body(&new_employee()).unwrap();
        assert_eq!(body["hired_on"], serde_json::json!("2024-03-01"));
    }

    #[test]
    fn test_patch_serializes_explicit_null_hire_date() {
        let patch = EmployeePatch {
            hired_on: Some(None),
            ..EmployeePatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert!(json["hired_on"].is_null());
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_report_row_deserializes() {
        let row: EmployeeReportRow = serde_json::from_value(serde_json::json!({
            "id": 5,
            "employee_name": "Jordan Doe",
            "email_address": "jordan@example.com",
            "mobile_number": "+15551234567",
            "position": "Engineer",
            "hired_on": "2024-03-01",
            "days_employed": 40,
            "company_name": "Acme",
            "department_name": "Engineering"
        }))
        .unwrap();
        assert_eq!(row.position, "Engineer");
        assert_eq!(row.days_employed, Some(40));
    }
}
