//! # Report Repository
//!
//! Read-only aggregation queries behind the `analytics` bridge operation.
//!
//! All sums go through `COALESCE` so an empty database reports zeros
//! instead of NULLs, and the per-employee query is a LEFT JOIN so staff
//! with no sales still appear on the dashboard.
//!
//! Date math runs in SQLite on the stored UTC timestamps: "today" is the
//! current UTC day and months are `strftime('%Y-%m', ...)` keys.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use velvet_core::{EmployeeMonthlySales, MonthlySales, SalesReport, TodaySales, TopProduct};

/// How many best-sellers the dashboard shows.
const TOP_PRODUCTS_LIMIT: i64 = 5;

/// Repository for analytics aggregation queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Assembles the composite report the dashboard renders.
    pub async fn sales_report(&self) -> DbResult<SalesReport> {
        debug!("Building sales report");

        let monthly_sales = self.monthly_sales().await?;
        let today = self.today().await?;
        let top_products = self.top_products(TOP_PRODUCTS_LIMIT).await?;
        let total_products = self.total_products().await?;
        let employee_month = self.employee_month().await?;

        Ok(SalesReport {
            monthly_sales,
            today,
            top_products,
            total_products,
            employee_month,
        })
    }

    /// Bill count and summed totals per calendar month, trailing twelve
    /// months, oldest first. Months without sales are absent.
    pub async fn monthly_sales(&self) -> DbResult<Vec<MonthlySales>> {
        let rows = sqlx::query_as::<_, MonthlySales>(
            r#"
            SELECT
                strftime('%Y-%m', created_at) AS month,
                COUNT(*) AS bill_count,
                COALESCE(SUM(total_cents), 0) AS total_cents
            FROM bills
            WHERE datetime(created_at) >= datetime('now', '-12 months')
            GROUP BY month
            ORDER BY month
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Bill count and summed totals for the current UTC day.
    ///
    /// Always one row; zeros when nothing sold yet.
    pub async fn today(&self) -> DbResult<TodaySales> {
        let row = sqlx::query_as::<_, TodaySales>(
            r#"
            SELECT
                COUNT(*) AS bill_count,
                COALESCE(SUM(total_cents), 0) AS total_cents
            FROM bills
            WHERE date(created_at) = date('now')
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// The products with the most units sold across all bills.
    pub async fn top_products(&self, limit: i64) -> DbResult<Vec<TopProduct>> {
        let rows = sqlx::query_as::<_, TopProduct>(
            r#"
            SELECT
                p.name AS product_name,
                COUNT(*) AS units_sold
            FROM bill_products bp
            INNER JOIN products p ON p.id = bp.product_id
            GROUP BY p.id, p.name
            ORDER BY units_sold DESC, p.name
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Total number of catalog products.
    pub async fn total_products(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Current-month bill count and totals for every employee, zeros
    /// included, best sellers first.
    pub async fn employee_month(&self) -> DbResult<Vec<EmployeeMonthlySales>> {
        let rows = sqlx::query_as::<_, EmployeeMonthlySales>(
            r#"
            SELECT
                e.name AS employee_name,
                COUNT(b.id) AS bill_count,
                COALESCE(SUM(b.total_cents), 0) AS total_cents
            FROM employees e
            LEFT JOIN bills b
                ON b.employee_id = e.id
               AND strftime('%Y-%m', b.created_at) = strftime('%Y-%m', 'now')
            GROUP BY e.id, e.name
            ORDER BY total_cents DESC, e.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
