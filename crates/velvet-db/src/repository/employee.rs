//! # Employee Repository
//!
//! Database operations for staff records.
//!
//! Employees are referenced by bills (`bills.employee_id`), so deleting an
//! employee cascades to their bills. The bridge warns the renderer about
//! this; the repository just does what it's told.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use velvet_core::{Employee, NewEmployee};

/// Repository for employee database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = EmployeeRepository::new(pool);
///
/// let employee = repo.insert(&new_employee).await?;
/// let all = repo.list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EmployeeRepository { pool }
    }

    /// Lists all employees, newest first.
    pub async fn list(&self) -> DbResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, phone, email, created_at, updated_at
            FROM employees
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    /// Gets an employee by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Employee))` - Employee found
    /// * `Ok(None)` - Employee not found
    pub async fn get(&self, id: i64) -> DbResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, phone, email, created_at, updated_at
            FROM employees
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Inserts a new employee and returns the stored row.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - Email already registered
    pub async fn insert(&self, new: &NewEmployee) -> DbResult<Employee> {
        debug!(name = %new.name, "Inserting employee");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO employees (name, phone, email, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&new.name)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get(id)
            .await?
            .ok_or_else(|| DbError::Internal(format!("employee {id} missing after insert")))
    }

    /// Updates an employee's fields and returns the stored row.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - No employee with this ID (zero rows affected)
    /// * `DbError::UniqueViolation` - Email already registered to someone else
    pub async fn update(&self, id: i64, changes: &NewEmployee) -> DbResult<Employee> {
        debug!(id, "Updating employee");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE employees
            SET name = ?2, phone = ?3, email = ?4, updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.phone)
        .bind(&changes.email)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", id));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::Internal(format!("employee {id} missing after update")))
    }

    /// Deletes an employee. Their bills cascade.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - No employee with this ID
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting employee");

        let result = sqlx::query("DELETE FROM employees WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", id));
        }

        Ok(())
    }

    /// Counts employees (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
