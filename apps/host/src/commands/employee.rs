//! # Staff Registry Operations
//!
//! CRUD over employees, mirroring the renderer's channel names:
//! `add-employee`, `get-employees`, `update-employee`, `delete-employee`.
//!
//! ## Registration Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Employee Registration Flow                           │
//! │                                                                         │
//! │  Staff page form: { name: "Amira Khan", phone: "", email: "a@b.co" }    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST /api/add-employee                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                          │
//! │  │  Blank contact fields become NULL         │                          │
//! │  │  Name/phone/email validated               │──► Invalid? 400          │
//! │  └───────────────────────────────────────────┘                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT (email UNIQUE) ──► Duplicate? 409 Conflict                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  { success: true, data: employee }                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commands::{blank_to_none, Reply};
use crate::error::ApiError;
use crate::state::AppState;
use velvet_core::validation::{validate_email, validate_person_name, validate_phone};
use velvet_core::{Employee, NewEmployee};

// =============================================================================
// DTOs
// =============================================================================

/// Employee as the renderer sees it.
///
/// ## Why DTO?
/// - Decouples the domain model from the bridge contract
/// - Handles serde rename to camelCase for JS consumption
/// - Timestamps cross the bridge as RFC 3339 strings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Employee> for EmployeeDto {
    fn from(e: Employee) -> Self {
        EmployeeDto {
            id: e.id,
            name: e.name,
            phone: e.phone,
            email: e.email,
            created_at: e.created_at.to_rfc3339(),
            updated_at: e.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEmployeeRequest {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEmployeeRequest {
    pub id: i64,
}

/// Normalizes and validates form fields into a `NewEmployee`.
fn to_new_employee(
    name: String,
    phone: Option<String>,
    email: Option<String>,
) -> Result<NewEmployee, ApiError> {
    let phone = blank_to_none(phone);
    let email = blank_to_none(email);

    validate_person_name(&name)?;
    validate_phone(phone.as_deref())?;
    validate_email(email.as_deref())?;

    Ok(NewEmployee {
        name: name.trim().to_string(),
        phone,
        email,
    })
}

// =============================================================================
// Operations
// =============================================================================

/// POST `/api/add-employee`
pub async fn add_employee(
    State(state): State<AppState>,
    Json(req): Json<AddEmployeeRequest>,
) -> Result<Json<Reply<EmployeeDto>>, ApiError> {
    debug!(name = %req.name, "add-employee command");
    let start = Instant::now();

    let new = to_new_employee(req.name, req.phone, req.email)?;
    let employee = state.db.employees().insert(&new).await?;

    info!(
        id = employee.id,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Employee added"
    );

    Ok(Json(Reply::ok(
        "Employee added successfully!",
        EmployeeDto::from(employee),
    )))
}

/// POST `/api/get-employees`
///
/// Returns every employee, newest first.
pub async fn get_employees(
    State(state): State<AppState>,
) -> Result<Json<Reply<Vec<EmployeeDto>>>, ApiError> {
    debug!("get-employees command");

    let employees = state.db.employees().list().await?;
    let dtos: Vec<EmployeeDto> = employees.into_iter().map(EmployeeDto::from).collect();

    Ok(Json(Reply::ok("Employees fetched successfully!", dtos)))
}

/// POST `/api/update-employee`
pub async fn update_employee(
    State(state): State<AppState>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<Reply<EmployeeDto>>, ApiError> {
    debug!(id = req.id, "update-employee command");
    let start = Instant::now();

    let changes = to_new_employee(req.name, req.phone, req.email)?;
    let employee = state.db.employees().update(req.id, &changes).await?;

    info!(
        id = employee.id,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Employee updated"
    );

    Ok(Json(Reply::ok(
        "Employee updated successfully!",
        EmployeeDto::from(employee),
    )))
}

/// POST `/api/delete-employee`
///
/// Bills credited to the employee cascade away with the row.
pub async fn delete_employee(
    State(state): State<AppState>,
    Json(req): Json<DeleteEmployeeRequest>,
) -> Result<Json<Reply<()>>, ApiError> {
    debug!(id = req.id, "delete-employee command");

    state.db.employees().delete(req.id).await?;

    info!(id = req.id, "Employee deleted");

    Ok(Json(Reply::done("Employee deleted successfully!")))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostConfig;
    use crate::error::ErrorCode;
    use velvet_db::{Database, DbConfig};

    async fn state() -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AppState::new(db, HostConfig::default())
    }

    fn request(name: &str) -> AddEmployeeRequest {
        AddEmployeeRequest {
            name: name.to_string(),
            phone: Some("555-0100".to_string()),
            email: Some(format!("{}@velvet.example", name.to_lowercase())),
        }
    }

    #[tokio::test]
    async fn test_add_and_list_employees() {
        let state = state().await;

        let reply = add_employee(State(state.clone()), Json(request("Amira")))
            .await
            .unwrap();
        assert!(reply.0.success);
        let added = reply.0.data.unwrap();
        assert_eq!(added.name, "Amira");
        assert_eq!(added.email.as_deref(), Some("amira@velvet.example"));

        let reply = get_employees(State(state)).await.unwrap();
        let employees = reply.0.data.unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].id, added.id);
    }

    #[tokio::test]
    async fn test_blank_contact_fields_stored_as_null() {
        let state = state().await;

        let req = AddEmployeeRequest {
            name: "Bea Ortiz".to_string(),
            phone: Some("   ".to_string()),
            email: Some(String::new()),
        };
        let added = add_employee(State(state), Json(req))
            .await
            .unwrap()
            .0
            .data
            .unwrap();
        assert_eq!(added.phone, None);
        assert_eq!(added.email, None);
    }

    #[tokio::test]
    async fn test_empty_name_is_validation_error() {
        let state = state().await;

        let req = AddEmployeeRequest {
            name: "   ".to_string(),
            phone: None,
            email: None,
        };
        let err = add_employee(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let state = state().await;

        add_employee(State(state.clone()), Json(request("Amira")))
            .await
            .unwrap();

        let mut second = request("Chet");
        second.email = Some("amira@velvet.example".to_string());
        let err = add_employee(State(state), Json(second)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "email already exists");
    }

    #[tokio::test]
    async fn test_update_employee_changes_fields() {
        let state = state().await;

        let added = add_employee(State(state.clone()), Json(request("Dara")))
            .await
            .unwrap()
            .0
            .data
            .unwrap();

        let req = UpdateEmployeeRequest {
            id: added.id,
            name: "Dara Okafor".to_string(),
            phone: Some("555-0199".to_string()),
            email: added.email.clone(),
        };
        let updated = update_employee(State(state), Json(req))
            .await
            .unwrap()
            .0
            .data
            .unwrap();
        assert_eq!(updated.name, "Dara Okafor");
        assert_eq!(updated.phone.as_deref(), Some("555-0199"));
        assert_eq!(updated.created_at, added.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_employee_is_not_found() {
        let state = state().await;

        let req = UpdateEmployeeRequest {
            id: 999,
            name: "Ghost".to_string(),
            phone: None,
            email: None,
        };
        let err = update_employee(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_employee() {
        let state = state().await;

        let added = add_employee(State(state.clone()), Json(request("Chet")))
            .await
            .unwrap()
            .0
            .data
            .unwrap();

        let reply = delete_employee(
            State(state.clone()),
            Json(DeleteEmployeeRequest { id: added.id }),
        )
        .await
        .unwrap();
        assert!(reply.0.success);

        let employees = get_employees(State(state)).await.unwrap().0.data.unwrap();
        assert!(employees.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_employee_is_not_found() {
        let state = state().await;

        let err = delete_employee(State(state), Json(DeleteEmployeeRequest { id: 42 }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_employee_dto_serializes_camel_case() {
        let dto = EmployeeDto {
            id: 1,
            name: "Amira Khan".to_string(),
            phone: None,
            email: None,
            created_at: "2026-08-01T10:00:00+00:00".to_string(),
            updated_at: "2026-08-01T10:00:00+00:00".to_string(),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
