//! # Dashboard Analytics
//!
//! One `analytics` operation returning everything the dashboard renders in a
//! single payload: trailing twelve months of sales, today's tally, the top
//! five products, the catalog size, and per-employee totals for the current
//! month. All aggregation happens in SQL (velvet-db); this layer only
//! reshapes field names for the renderer.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::commands::Reply;
use crate::error::ApiError;
use crate::state::AppState;
use velvet_core::{EmployeeMonthlySales, MonthlySales, SalesReport, TodaySales, TopProduct};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySalesDto {
    /// `YYYY-MM` month key.
    pub month: String,
    pub bill_count: i64,
    pub total_cents: i64,
}

impl From<MonthlySales> for MonthlySalesDto {
    fn from(row: MonthlySales) -> Self {
        MonthlySalesDto {
            month: row.month,
            bill_count: row.bill_count,
            total_cents: row.total_cents,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySalesDto {
    pub bill_count: i64,
    pub total_cents: i64,
}

impl From<TodaySales> for TodaySalesDto {
    fn from(row: TodaySales) -> Self {
        TodaySalesDto {
            bill_count: row.bill_count,
            total_cents: row.total_cents,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProductDto {
    pub product_name: String,
    pub units_sold: i64,
}

impl From<TopProduct> for TopProductDto {
    fn from(row: TopProduct) -> Self {
        TopProductDto {
            product_name: row.product_name,
            units_sold: row.units_sold,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeMonthDto {
    pub employee_name: String,
    pub bill_count: i64,
    pub total_cents: i64,
}

impl From<EmployeeMonthlySales> for EmployeeMonthDto {
    fn from(row: EmployeeMonthlySales) -> Self {
        EmployeeMonthDto {
            employee_name: row.employee_name,
            bill_count: row.bill_count,
            total_cents: row.total_cents,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportDto {
    pub monthly_sales: Vec<MonthlySalesDto>,
    pub today: TodaySalesDto,
    pub top_products: Vec<TopProductDto>,
    pub total_products: i64,
    pub employee_month: Vec<EmployeeMonthDto>,
}

impl From<SalesReport> for SalesReportDto {
    fn from(report: SalesReport) -> Self {
        SalesReportDto {
            monthly_sales: report
                .monthly_sales
                .into_iter()
                .map(MonthlySalesDto::from)
                .collect(),
            today: TodaySalesDto::from(report.today),
            top_products: report
                .top_products
                .into_iter()
                .map(TopProductDto::from)
                .collect(),
            total_products: report.total_products,
            employee_month: report
                .employee_month
                .into_iter()
                .map(EmployeeMonthDto::from)
                .collect(),
        }
    }
}

/// POST `/api/analytics`
///
/// Read-only, so the timing stays at debug level.
pub async fn analytics(
    State(state): State<AppState>,
) -> Result<Json<Reply<SalesReportDto>>, ApiError> {
    debug!("analytics command");
    let start = Instant::now();

    let report = state.db.reports().sales_report().await?;

    debug!(
        months = report.monthly_sales.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Analytics assembled"
    );

    Ok(Json(Reply::ok(
        "Analytics fetched successfully!",
        SalesReportDto::from(report),
    )))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostConfig;
    use velvet_core::{BillDraft, NewEmployee, NewProduct};
    use velvet_db::{Database, DbConfig};

    async fn state() -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AppState::new(db, HostConfig::default())
    }

    #[tokio::test]
    async fn test_analytics_on_empty_database() {
        let report = analytics(State(state().await))
            .await
            .unwrap()
            .0
            .data
            .unwrap();

        assert!(report.monthly_sales.is_empty());
        assert_eq!(report.today.bill_count, 0);
        assert_eq!(report.today.total_cents, 0);
        assert!(report.top_products.is_empty());
        assert_eq!(report.total_products, 0);
        assert!(report.employee_month.is_empty());
    }

    #[tokio::test]
    async fn test_analytics_reflects_todays_bills() {
        let state = state().await;

        let amira = state
            .db
            .employees()
            .insert(&NewEmployee {
                name: "Amira Khan".to_string(),
                phone: None,
                email: None,
            })
            .await
            .unwrap();
        let haircut = state
            .db
            .products()
            .insert(&NewProduct {
                name: "Haircut & Style".to_string(),
                price_cents: 2500,
                description: None,
            })
            .await
            .unwrap();

        state
            .db
            .bills()
            .create(&BillDraft {
                employee_id: amira.id,
                product_ids: vec![haircut.id, haircut.id],
                customer_name: None,
                customer_phone: None,
                discount: None,
            })
            .await
            .unwrap();

        let report = analytics(State(state)).await.unwrap().0.data.unwrap();

        assert_eq!(report.today.bill_count, 1);
        assert_eq!(report.today.total_cents, 5000);
        assert_eq!(report.total_products, 1);
        assert_eq!(report.top_products[0].product_name, "Haircut & Style");
        assert_eq!(report.top_products[0].units_sold, 2);
        assert_eq!(report.employee_month[0].employee_name, "Amira Khan");
        assert_eq!(report.employee_month[0].total_cents, 5000);
        assert_eq!(report.monthly_sales.len(), 1);
    }

    #[test]
    fn test_report_dto_serializes_camel_case() {
        let dto = SalesReportDto {
            monthly_sales: vec![MonthlySalesDto {
                month: "2026-08".to_string(),
                bill_count: 4,
                total_cents: 10000,
            }],
            today: TodaySalesDto {
                bill_count: 1,
                total_cents: 2500,
            },
            top_products: vec![],
            total_products: 7,
            employee_month: vec![],
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("monthlySales").is_some());
        assert!(json["monthlySales"][0].get("billCount").is_some());
        assert!(json.get("totalProducts").is_some());
        assert!(json["today"].get("totalCents").is_some());
    }
}
