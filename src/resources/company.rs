//! Company resource.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::resources::department::Department;

/// A company record, as returned by the backend.
///
/// The counter fields are computed server-side and ignored on write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Server-assigned id.
    pub id: u64,
    /// Unique company name.
    pub company_name: String,
    /// Number of departments in this company (read-only).
    #[serde(default)]
    pub number_of_departments: u64,
    /// Number of employees across the company (read-only).
    #[serde(default)]
    pub number_of_employees: u64,
}

/// Payload for creating or replacing a company.
#[derive(Clone, Debug, Serialize)]
pub struct NewCompany {
    /// Unique company name.
    pub company_name: String,
}

/// Partial update payload for a company. Unset fields are left unchanged.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CompanyPatch {
    /// New company name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

fn validate_name(company_name: &str) -> Result<(), ApiError> {
    if company_name.trim().is_empty() {
        return Err(ApiError::Validation(
            "Company name cannot be empty.".to_string(),
        ));
    }
    Ok(())
}

impl ApiClient {
    /// Lists all companies.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn list_companies(&self) -> Result<Vec<Company>, ApiError> {
        let value = self
            .send(
                Method::GET,
                "/core/companies/",
                &[],
                None,
                "Failed to fetch companies",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetches a single company by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn get_company(&self, id: u64) -> Result<Company, ApiError> {
        let value = self
            .send(
                Method::GET,
                &format!("/core/companies/{id}/"),
                &[],
                None,
                "Failed to fetch company",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Creates a company.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the name is empty, otherwise
    /// [`ApiError`] on transport, session, or server failure (e.g. a
    /// duplicate name, surfaced with the server's message).
    pub async fn create_company(&self, company: &NewCompany) -> Result<Company, ApiError> {
        validate_name(&company.company_name)?;
        let body = serde_json::to_value(company)?;
        let value = self
            .send(
                Method::POST,
                "/core/companies/",
                &[],
                Some(&body),
                "Failed to create company",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Replaces a company.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the name is empty, otherwise
    /// [`ApiError`] on transport, session, or server failure.
    pub async fn update_company(&self, id: u64, company: &NewCompany) -> Result<Company, ApiError> {
        validate_name(&company.company_name)?;
        let body = serde_json::to_value(company)?;
        let value = self
            .send(
                Method::PUT,
                &format!("/core/companies/{id}/"),
                &[],
                Some(&body),
                "Failed to update company",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Partially updates a company.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn patch_company(&self, id: u64, patch: &CompanyPatch) -> Result<Company, ApiError> {
        if let Some(name) = &patch.company_name {
            validate_name(name)?;
        }
        let body = serde_json::to_value(patch)?;
        let value = self
            .send(
                Method::PATCH,
                &format!("/core/companies/{id}/"),
                &[],
                Some(&body),
                "Failed to update company",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Deletes a company. The backend cascades to its departments and
    /// employees.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn delete_company(&self, id: u64) -> Result<(), ApiError> {
        self.send(
            Method::DELETE,
            &format!("/core/companies/{id}/"),
            &[],
            None,
            "Failed to delete company",
        )
        .await?;
        Ok(())
    }

    /// Lists the departments of a company.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, session, or server failure.
    pub async fn company_departments(&self, company_id: u64) -> Result<Vec<Department>, ApiError> {
        let value = self
            .send(
                Method::GET,
                &format!("/core/companies/{company_id}/departments/"),
                &[],
                None,
                "Failed to fetch company departments",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_deserializes_with_counters() {
        let company: Company = serde_json::from_value(serde_json::json!({
            "id": 3,
            "company_name": "Acme",
            "number_of_departments": 2,
            "number_of_employees": 14
        }))
        .unwrap();
        assert_eq!(company.company_name, "Acme");
        assert_eq!(company.number_of_employees, 14);
    }

    #[test]
    fn test_company_deserializes_without_counters() {
        let company: Company =
            serde_json::from_value(serde_json::json!({ "id": 3, "company_name": "Acme" })).unwrap();
        assert_eq!(company.number_of_departments, 0);
    }

    #[test]
    fn test_patch_skips_unset_fields() {
        let json = serde_json::to_string(&CompanyPatch::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_validate_name_rejects_blank() {
        assert!(validate_name("   ").is_err());
        assert!(validate_name("Acme").is_ok());
    }
}
