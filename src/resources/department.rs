//! Department resource.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;

/// A department record, as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Server-assigned id.
    pub id: u64,
    /// Owning company id.
    pub company: u64,
    /// Owning company name (read-only).
    #[serde(default)]
    pub company_name: String,
    /// Department name, unique within its company.
    pub department_name: String,
    /// Number of employees in this department (read-only).
    #[serde(default)]
    pub number_of_employees: u64,
}

/// Payload for creating or replacing a department.
#[derive(Clone, Debug, Serialize)]
pub struct NewDepartment {
    /// Owning company id.
    pub company: u64,
    /// Department name, unique within its company.
    pub department_name: String,
}

/// Partial update payload for a department. Unset fields are left unchanged.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DepartmentPatch {
    /// Move the department to another company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<u64>,
    /// New department name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
}

/// Filter for listing departments.
#[derive(Clone, Debug, Default)]
pub struct DepartmentFilter {
    /// Restrict to departments of this company.
    pub company: Option<u64>,
}

impl DepartmentFilter {
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(company) = self.company {
            query.push(("company", company.to_string()));
        }
        query
    }
}

fn validate(department_name: &str) -> Result<(), ApiError> {
    if department_name.trim().is_empty() {
        return Err(ApiError::Validation(
            "Department name cannot be empty.".to_string(),
        ));
    }
    Ok(())
}

impl ApiClient {
    /// Lists departments, optionally filtered by company.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn list_departments(
        &self,
        filter: Option<&DepartmentFilter>,
    ) -> Result<Vec<Department>, ApiError> {
        let query = filter.map(DepartmentFilter::query).unwrap_or_default();
        let value = self
            .send(
                Method::GET,
                "/core/departments/",
                &query,
                None,
                "Failed to fetch departments",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetches a single department by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn get_department(&self, id: u64) -> Result<Department, ApiError> {
        let value = self
            .send(
                Method::GET,
                &format!("/core/departments/{id}/"),
                &[],
                None,
                "Failed to fetch department",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Creates a department.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the name is empty, otherwise
    /// [`ApiError`] on transport, session, or server failure (e.g. a
    /// duplicate name within the company).
    pub async fn create_department(
        &self,
        department: &NewDepartment,
    ) -> Result<Department, ApiError> {
        validate(&department.department_name)?;
        let body = serde_json::to_value(department)?;
        let value = self
            .send(
                Method::POST,
                "/core/departments/",
                &[],
                Some(&body),
                "Failed to create department",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Replaces a department.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the name is empty, otherwise
    /// [`ApiError`] on transport, session, or server failure.
    pub async fn update_department(
        &self,
        id: u64,
        department: &NewDepartment,
    ) -> Result<Department, ApiError> {
        validate(&department.department_name)?;
        let body = serde_json::to_value(department)?;
        let value = self
            .send(
                Method::PUT,
                &format!("/core/departments/{id}/"),
                &[],
                Some(&body),
                "Failed to update department",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Partially updates a department.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn patch_department(
        &self,
        id: u64,
        patch: &DepartmentPatch,
    ) -> Result<Department, ApiError> {
        if let Some(name) = &patch.department_name {
            validate(name)?;
        }
        let body = serde_json::to_value(patch)?;
        let value = self
            .send(
                Method::PATCH,
                &format!("/core/departments/{id}/"),
                &[],
                Some(&body),
                "Failed to update department",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Deletes a department. The backend cascades to its employees.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn delete_department(&self, id: u64) -> Result<(), ApiError> {
        self.send(
            Method::DELETE,
            &format!("/core/departments/{id}/"),
            &[],
            None,
            "Failed to delete department",
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_query_includes_company() {
        let filter = DepartmentFilter { company: Some(4) };
        assert_eq!(filter.query(), vec![("company", "4".to_string())]);
    }

    #[test]
    fn test_empty_filter_has_no_query() {
        assert!(DepartmentFilter::default().query().is_empty());
    }

    #[test]
    fn test_department_deserializes_with_read_only_fields() {
        let department: Department = serde_json::from_value(serde_json::json!({
            "id": 9,
            "company": 4,
            "company_name": "Acme",
            "department_name": "Engineering",
            "number_of_employees": 6
        }))
        .unwrap();
        assert_eq!(department.company_name, "Acme");
        assert_eq!(department.number_of_employees, 6);
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        assert!(validate("  ").is_err());
        assert!(validate("Engineering").is_ok());
    }
}
