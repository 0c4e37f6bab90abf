//! # Workforce API Rust SDK
//!
//! A Rust client SDK for the Workforce Management REST API, providing
//! type-safe configuration, session handling with transparent token refresh,
//! and typed CRUD access to companies, departments, and employees.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ApiConfig`] and [`ApiConfigBuilder`]
//! - A validated [`BaseUrl`] newtype
//! - An [`ApiClient`] whose request interceptor attaches bearer credentials
//!   and performs at most one transparent refresh-and-retry per request
//! - An injectable [`SessionStore`](auth::SessionStore) with an in-memory
//!   default, so session handling is deterministic to test
//! - Session lifecycle notifications via [`SessionEvent`]
//! - Typed resource models and domain methods for companies, departments,
//!   and employees
//!
//! ## Quick Start
//!
//! ```rust
//! use workforce_api::{ApiConfig, BaseUrl};
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::new("https://hr.example.com").unwrap())
//!     .user_agent_prefix("MyApp/1.0")
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Authentication
//!
//! ```rust,ignore
//! use workforce_api::{ApiClient, ApiConfig, BaseUrl, SessionEvent};
//!
//! let client = ApiClient::new(config);
//! let mut events = client.subscribe();
//!
//! let user = client.login("admin@example.com", "s3cret-pass").await?;
//! println!("Logged in as {} ({:?})", user.full_name(), user.role);
//!
//! // Somewhere else, react to session changes:
//! while let Ok(event) = events.recv().await {
//!     match event {
//!         SessionEvent::TokenRefreshed { .. } => { /* re-read current user */ }
//!         SessionEvent::TokenExpired => { /* redirect to login */ }
//!     }
//! }
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use workforce_api::{EmployeeFilter, EmployeeStatus};
//!
//! let companies = client.list_companies().await?;
//!
//! let filter = EmployeeFilter {
//!     status: Some(EmployeeStatus::Hired),
//!     ..EmployeeFilter::default()
//! };
//! let hired = client.list_employees(Some(&filter)).await?;
//! ```
//!
//! If a request is rejected with 401, the client refreshes the access token
//! and re-issues the request once; callers only ever see the final result.
//! When the refresh itself is refused, the stored session is cleared, a
//! [`SessionEvent::TokenExpired`] notification fires, and the call returns
//! [`ApiError::SessionExpired`].
//!
//! ## Design Principles
//!
//! - **No global state**: configuration and session storage are
//!   instance-based and passed explicitly
//! - **Fail-fast validation**: newtypes and payloads validate before sending
//! - **Thread-safe**: all types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio async runtime
//! - **Tokens stay opaque**: callers use domain methods and never handle
//!   credentials directly

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod resources;

// Re-export public types at crate root for convenience
pub use auth::{MemorySessionStore, Role, Session, SessionEvent, SessionStore, UserProfile};
pub use client::{ApiClient, NewAccount};
pub use config::{ApiConfig, ApiConfigBuilder, BaseUrl};
pub use error::{ApiError, ConfigError};

// Re-export resource types
pub use resources::{
    Company, CompanyPatch, Department, DepartmentFilter, DepartmentPatch, Employee,
    EmployeeFilter, EmployeePatch, EmployeeReportRow, EmployeeStatus, NewCompany, NewDepartment,
    NewEmployee,
};
