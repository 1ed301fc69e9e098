//! Repository for the `employees` table.

use sqlx::PgPool;

use crate::models::employee::{CreateEmployee, Employee};

const COLUMNS: &str = "id, name, role";

/// Provides read and seed operations for the staff directory.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// List every employee ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees ORDER BY name ASC");
        sqlx::query_as::<_, Employee>(&query).fetch_all(pool).await
    }

    /// Insert a new employee, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees (name, role) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&input.name)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }
}
