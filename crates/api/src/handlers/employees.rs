//! Handler for the staff-only employee directory.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use sitedesk_db::models::employee::Employee;
use sitedesk_db::repositories::EmployeeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

/// Response body for `GET /employees`.
#[derive(Debug, Serialize)]
pub struct EmployeesResponse {
    pub employees: Vec<Employee>,
}

/// GET /api/employees
///
/// List every employee, ordered by name. Requires a staff login.
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    let employees = EmployeeRepo::list(&state.pool)
        .await
        .map_err(|e| AppError::database("Failed to fetch employees.", e))?;
    Ok(Json(EmployeesResponse { employees }))
}
