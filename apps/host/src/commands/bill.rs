//! # Billing Operations
//!
//! `make-bill`, `bill-history`, `update-bill`, `delete-bill`.
//!
//! ## Make Bill Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Make Bill Flow                                   │
//! │                                                                         │
//! │  Bill page submits picker state:                                        │
//! │  { employeeId: 3, productIds: [4, 4, 9],                                │
//! │    customerName: "Dana", discount: 1000, discountType: "percentage" }   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST /api/make-bill                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                          │
//! │  │  Parse discount, normalize blanks         │──► Invalid? 400          │
//! │  │  BillDraft::validate()                    │                          │
//! │  └───────────────────────────────────────────┘                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Atomic bill transaction (velvet-db):                                   │
//! │  totals computed from CATALOG prices, items snapshotted                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  { success: true, data: bill with items and employee name }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The renderer never sends amounts. Quantity is repetition in
//! `productIds`: two haircuts arrive as the haircut id twice.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commands::{blank_to_none, Reply};
use crate::error::ApiError;
use crate::state::AppState;
use velvet_core::{Bill, BillDraft, BillItem, Discount, Money};

/// Page size used when `bill-history` omits `limit`.
const DEFAULT_PAGE_SIZE: i64 = 50;

/// Upper bound on a single history page.
const MAX_PAGE_SIZE: i64 = 200;

// =============================================================================
// DTOs
// =============================================================================

/// One purchased unit on a bill, with the snapshotted name and price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItemDto {
    pub product_id: i64,
    pub name: String,
    pub price_cents: i64,
}

impl From<BillItem> for BillItemDto {
    fn from(item: BillItem) -> Self {
        BillItemDto {
            product_id: item.product_id,
            name: item.name,
            price_cents: item.price_cents,
        }
    }
}

/// Bill as the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDto {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub created_at: String,
    pub items: Vec<BillItemDto>,
}

impl From<Bill> for BillDto {
    fn from(bill: Bill) -> Self {
        BillDto {
            id: bill.id,
            employee_id: bill.employee_id,
            employee_name: bill.employee_name,
            customer_name: bill.customer_name,
            customer_phone: bill.customer_phone,
            subtotal_cents: bill.subtotal_cents,
            discount_cents: bill.discount_cents,
            total_cents: bill.total_cents,
            created_at: bill.created_at.to_rfc3339(),
            items: bill.items.into_iter().map(BillItemDto::from).collect(),
        }
    }
}

/// One page of bill history plus the overall count for pagination.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillHistoryDto {
    pub bills: Vec<BillDto>,
    pub total: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeBillRequest {
    pub employee_id: i64,
    pub product_ids: Vec<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    /// Basis points for `percentage`, cents for `fixed`.
    #[serde(default)]
    pub discount: Option<i64>,
    /// `"percentage"` (the default when a discount is present) or `"fixed"`.
    #[serde(default)]
    pub discount_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBillRequest {
    pub id: i64,
    pub employee_id: i64,
    pub product_ids: Vec<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub discount: Option<i64>,
    #[serde(default)]
    pub discount_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillHistoryRequest {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBillRequest {
    pub id: i64,
}

impl MakeBillRequest {
    /// Builds and validates the draft the repository transaction takes.
    fn into_draft(self) -> Result<BillDraft, ApiError> {
        let draft = BillDraft {
            employee_id: self.employee_id,
            product_ids: self.product_ids,
            customer_name: blank_to_none(self.customer_name),
            customer_phone: blank_to_none(self.customer_phone),
            discount: parse_discount(self.discount, self.discount_type.as_deref())?,
        };
        draft.validate()?;
        Ok(draft)
    }
}

impl UpdateBillRequest {
    fn into_draft(self) -> Result<BillDraft, ApiError> {
        MakeBillRequest {
            employee_id: self.employee_id,
            product_ids: self.product_ids,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            discount: self.discount,
            discount_type: self.discount_type,
        }
        .into_draft()
    }
}

/// Turns the wire pair (`discount`, `discountType`) into a typed discount.
///
/// An absent value means no discount regardless of the type field. A present
/// value with no type is treated as a percentage, matching the bill form's
/// default selection.
fn parse_discount(value: Option<i64>, kind: Option<&str>) -> Result<Option<Discount>, ApiError> {
    let Some(value) = value else {
        return Ok(None);
    };

    match kind.unwrap_or("percentage") {
        "percentage" => {
            let bps = u32::try_from(value)
                .map_err(|_| ApiError::validation("Discount must not be negative"))?;
            Ok(Some(Discount::Percent(bps)))
        }
        "fixed" => Ok(Some(Discount::Fixed(Money::from_cents(value)))),
        other => Err(ApiError::validation(format!(
            "Unknown discount type: {other}"
        ))),
    }
}

// =============================================================================
// Operations
// =============================================================================

/// POST `/api/make-bill`
///
/// Runs the atomic bill transaction. Totals come from catalog prices, never
/// from the renderer; a missing employee or product aborts with nothing
/// written.
pub async fn make_bill(
    State(state): State<AppState>,
    Json(req): Json<MakeBillRequest>,
) -> Result<Json<Reply<BillDto>>, ApiError> {
    debug!(
        employee_id = req.employee_id,
        items = req.product_ids.len(),
        "make-bill command"
    );
    let start = Instant::now();

    let draft = req.into_draft()?;
    let bill = state.db.bills().create(&draft).await?;

    info!(
        id = bill.id,
        total_cents = bill.total_cents,
        items = bill.items.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Bill created"
    );

    Ok(Json(Reply::ok(
        "Bill created successfully!",
        BillDto::from(bill),
    )))
}

/// POST `/api/bill-history`
///
/// Newest bills first. `limit` defaults to 50 and is capped at 200.
pub async fn bill_history(
    State(state): State<AppState>,
    Json(req): Json<BillHistoryRequest>,
) -> Result<Json<Reply<BillHistoryDto>>, ApiError> {
    let limit = req.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = req.offset.unwrap_or(0).max(0);
    debug!(limit, offset, "bill-history command");

    let (bills, total) = state.db.bills().history(limit, offset).await?;

    let dto = BillHistoryDto {
        bills: bills.into_iter().map(BillDto::from).collect(),
        total,
    };

    Ok(Json(Reply::ok("Bill history fetched successfully!", dto)))
}

/// POST `/api/update-bill`
///
/// Replaces the bill's contents wholesale and recomputes totals from the
/// current catalog. The original creation timestamp is preserved.
pub async fn update_bill(
    State(state): State<AppState>,
    Json(req): Json<UpdateBillRequest>,
) -> Result<Json<Reply<BillDto>>, ApiError> {
    debug!(id = req.id, "update-bill command");
    let start = Instant::now();

    let id = req.id;
    let draft = req.into_draft()?;
    let bill = state.db.bills().update(id, &draft).await?;

    info!(
        id = bill.id,
        total_cents = bill.total_cents,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Bill updated"
    );

    Ok(Json(Reply::ok(
        "Bill updated successfully!",
        BillDto::from(bill),
    )))
}

/// POST `/api/delete-bill`
///
/// Line items cascade away with the bill.
pub async fn delete_bill(
    State(state): State<AppState>,
    Json(req): Json<DeleteBillRequest>,
) -> Result<Json<Reply<()>>, ApiError> {
    debug!(id = req.id, "delete-bill command");

    state.db.bills().delete(req.id).await?;

    info!(id = req.id, "Bill deleted");

    Ok(Json(Reply::done("Bill deleted successfully!")))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostConfig;
    use crate::error::ErrorCode;
    use velvet_core::{NewEmployee, NewProduct};
    use velvet_db::{Database, DbConfig};

    /// One employee (Amira) and two products: Haircut $25.00, Beard Trim $15.00.
    async fn seeded() -> (AppState, i64, i64, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let amira = db
            .employees()
            .insert(&NewEmployee {
                name: "Amira Khan".to_string(),
                phone: None,
                email: None,
            })
            .await
            .unwrap();
        let haircut = db
            .products()
            .insert(&NewProduct {
                name: "Haircut & Style".to_string(),
                price_cents: 2500,
                description: None,
            })
            .await
            .unwrap();
        let trim = db
            .products()
            .insert(&NewProduct {
                name: "Beard Trim".to_string(),
                price_cents: 1500,
                description: None,
            })
            .await
            .unwrap();

        let state = AppState::new(db, HostConfig::default());
        (state, amira.id, haircut.id, trim.id)
    }

    fn request(employee_id: i64, product_ids: Vec<i64>) -> MakeBillRequest {
        MakeBillRequest {
            employee_id,
            product_ids,
            customer_name: Some("Dana Reeve".to_string()),
            customer_phone: None,
            discount: None,
            discount_type: None,
        }
    }

    #[tokio::test]
    async fn test_make_bill_computes_totals_from_catalog() {
        let (state, amira, haircut, trim) = seeded().await;

        let mut req = request(amira, vec![haircut, haircut, trim]);
        req.discount = Some(1000);
        req.discount_type = Some("percentage".to_string());

        let bill = make_bill(State(state), Json(req))
            .await
            .unwrap()
            .0
            .data
            .unwrap();

        assert_eq!(bill.subtotal_cents, 6500);
        assert_eq!(bill.discount_cents, 650);
        assert_eq!(bill.total_cents, 5850);
        assert_eq!(bill.employee_name, "Amira Khan");
        assert_eq!(bill.items.len(), 3);
    }

    #[tokio::test]
    async fn test_make_bill_fixed_discount() {
        let (state, amira, haircut, _) = seeded().await;

        let mut req = request(amira, vec![haircut]);
        req.discount = Some(500);
        req.discount_type = Some("fixed".to_string());

        let bill = make_bill(State(state), Json(req))
            .await
            .unwrap()
            .0
            .data
            .unwrap();

        assert_eq!(bill.discount_cents, 500);
        assert_eq!(bill.total_cents, 2000);
    }

    #[tokio::test]
    async fn test_make_bill_rejects_empty_items() {
        let (state, amira, _, _) = seeded().await;

        let err = make_bill(State(state), Json(request(amira, vec![])))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_make_bill_rejects_unknown_discount_type() {
        let (state, amira, haircut, _) = seeded().await;

        let mut req = request(amira, vec![haircut]);
        req.discount = Some(100);
        req.discount_type = Some("coupon".to_string());

        let err = make_bill(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_make_bill_rejects_negative_discount() {
        let (state, amira, haircut, _) = seeded().await;

        let mut req = request(amira, vec![haircut]);
        req.discount = Some(-100);

        let err = make_bill(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_make_bill_missing_product_is_not_found() {
        let (state, amira, _, _) = seeded().await;

        let err = make_bill(State(state), Json(request(amira, vec![9999])))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_discount_without_type_defaults_to_percentage() {
        let (state, amira, haircut, trim) = seeded().await;

        let mut req = request(amira, vec![haircut, trim]);
        req.discount = Some(5000); // 50%

        let bill = make_bill(State(state), Json(req))
            .await
            .unwrap()
            .0
            .data
            .unwrap();
        assert_eq!(bill.discount_cents, 2000);
        assert_eq!(bill.total_cents, 2000);
    }

    #[tokio::test]
    async fn test_bill_history_pages_newest_first() {
        let (state, amira, haircut, trim) = seeded().await;

        for ids in [vec![haircut], vec![trim], vec![haircut, trim]] {
            make_bill(State(state.clone()), Json(request(amira, ids)))
                .await
                .unwrap();
        }

        let page = bill_history(
            State(state.clone()),
            Json(BillHistoryRequest {
                limit: Some(2),
                offset: None,
            }),
        )
        .await
        .unwrap()
        .0
        .data
        .unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.bills.len(), 2);
        assert!(page.bills[0].id > page.bills[1].id);

        let rest = bill_history(
            State(state),
            Json(BillHistoryRequest {
                limit: Some(2),
                offset: Some(2),
            }),
        )
        .await
        .unwrap()
        .0
        .data
        .unwrap();
        assert_eq!(rest.bills.len(), 1);
    }

    #[tokio::test]
    async fn test_history_request_accepts_empty_object() {
        let req: BillHistoryRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(req.limit, None);
        assert_eq!(req.offset, None);
    }

    #[tokio::test]
    async fn test_update_bill_replaces_items() {
        let (state, amira, haircut, trim) = seeded().await;

        let bill = make_bill(State(state.clone()), Json(request(amira, vec![haircut])))
            .await
            .unwrap()
            .0
            .data
            .unwrap();

        let req = UpdateBillRequest {
            id: bill.id,
            employee_id: amira,
            product_ids: vec![trim, trim],
            customer_name: None,
            customer_phone: None,
            discount: None,
            discount_type: None,
        };
        let updated = update_bill(State(state), Json(req))
            .await
            .unwrap()
            .0
            .data
            .unwrap();

        assert_eq!(updated.id, bill.id);
        assert_eq!(updated.items.len(), 2);
        assert_eq!(updated.subtotal_cents, 3000);
        assert_eq!(updated.created_at, bill.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_bill_is_not_found() {
        let (state, amira, haircut, _) = seeded().await;

        let req = UpdateBillRequest {
            id: 999,
            employee_id: amira,
            product_ids: vec![haircut],
            customer_name: None,
            customer_phone: None,
            discount: None,
            discount_type: None,
        };
        let err = update_bill(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_bill() {
        let (state, amira, haircut, _) = seeded().await;

        let bill = make_bill(State(state.clone()), Json(request(amira, vec![haircut])))
            .await
            .unwrap()
            .0
            .data
            .unwrap();

        delete_bill(State(state.clone()), Json(DeleteBillRequest { id: bill.id }))
            .await
            .unwrap();

        let page = bill_history(
            State(state),
            Json(BillHistoryRequest {
                limit: None,
                offset: None,
            }),
        )
        .await
        .unwrap()
        .0
        .data
        .unwrap();
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_bill_dto_serializes_camel_case() {
        let dto = BillDto {
            id: 1,
            employee_id: 3,
            employee_name: "Amira Khan".to_string(),
            customer_name: None,
            customer_phone: None,
            subtotal_cents: 4000,
            discount_cents: 400,
            total_cents: 3600,
            created_at: "2026-08-01T10:00:00+00:00".to_string(),
            items: vec![BillItemDto {
                product_id: 4,
                name: "Haircut & Style".to_string(),
                price_cents: 2500,
            }],
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("employeeName").is_some());
        assert!(json.get("subtotalCents").is_some());
        assert!(json["items"][0].get("productId").is_some());
    }
}
