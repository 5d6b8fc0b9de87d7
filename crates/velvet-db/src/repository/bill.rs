//! # Bill Repository
//!
//! Database operations for bills and their line items.
//!
//! ## The Bill-Creation Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create(&draft): all or nothing                       │
//! │                                                                         │
//! │  BEGIN TRANSACTION                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Employee exists?  ──── no ──► rollback, NotFound                   │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  2. For each product id (one per unit):                                │
//! │     fetch name + current price ── missing ──► rollback, NotFound       │
//! │       │ all found                                                       │
//! │       ▼                                                                 │
//! │  3. Compute totals from the fetched prices                             │
//! │     subtotal = Σ unit prices                                           │
//! │     discount = fixed amount or % of subtotal, clamped                  │
//! │     total    = subtotal - discount                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. INSERT bills header (computed totals, never renderer totals)       │
//! │  5. INSERT one bill_products row per unit (price snapshot)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT ──► re-read the assembled bill                                 │
//! │                                                                         │
//! │  Any early return drops the transaction, which rolls it back.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Snapshot
//! `bill_products.price_cents` stores the unit price at sale time. Editing
//! a product's price later changes future bills only.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use velvet_core::money::bill_totals;
use velvet_core::{Bill, BillDraft, BillItem};

/// Repository for bill database operations.
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

/// Bill header row as stored, with the employee name joined in.
#[derive(Debug, sqlx::FromRow)]
struct BillRow {
    id: i64,
    employee_id: i64,
    employee_name: String,
    customer_name: Option<String>,
    customer_phone: Option<String>,
    subtotal_cents: i64,
    discount_cents: i64,
    total_cents: i64,
    created_at: DateTime<Utc>,
}

impl BillRow {
    fn into_bill(self, items: Vec<BillItem>) -> Bill {
        Bill {
            id: self.id,
            employee_id: self.employee_id,
            employee_name: self.employee_name,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            subtotal_cents: self.subtotal_cents,
            discount_cents: self.discount_cents,
            total_cents: self.total_cents,
            created_at: self.created_at,
            items,
        }
    }
}

/// Line item row with its owning bill id, for grouping a history page.
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    bill_id: i64,
    product_id: i64,
    name: String,
    price_cents: i64,
}

impl BillRepository {
    /// Creates a new BillRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BillRepository { pool }
    }

    /// Creates a bill atomically from a draft.
    ///
    /// Verifies the employee and every product inside one transaction,
    /// computes totals from catalog prices, and writes the header plus one
    /// line row per unit. Nothing is written if any check fails.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - Employee or a product id doesn't exist
    pub async fn create(&self, draft: &BillDraft) -> DbResult<Bill> {
        debug!(
            employee_id = draft.employee_id,
            units = draft.product_ids.len(),
            "Creating bill"
        );

        let mut tx = self.pool.begin().await?;

        ensure_employee(&mut tx, draft.employee_id).await?;
        let items = load_items(&mut tx, &draft.product_ids).await?;

        let unit_prices: Vec<i64> = items.iter().map(|item| item.price_cents).collect();
        let totals = bill_totals(&unit_prices, draft.discount);

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO bills (
                employee_id, customer_name, customer_phone,
                subtotal_cents, discount_cents, total_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(draft.employee_id)
        .bind(&draft.customer_name)
        .bind(&draft.customer_phone)
        .bind(totals.subtotal_cents)
        .bind(totals.discount_cents)
        .bind(totals.total_cents)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let bill_id = result.last_insert_rowid();

        insert_items(&mut tx, bill_id, &items).await?;

        tx.commit().await?;

        debug!(bill_id, total_cents = totals.total_cents, "Bill committed");

        self.get(bill_id)
            .await?
            .ok_or_else(|| DbError::Internal(format!("bill {bill_id} missing after commit")))
    }

    /// Gets a bill with its employee name and line items.
    ///
    /// ## Returns
    /// * `Ok(Some(Bill))` - Bill found
    /// * `Ok(None)` - Bill not found
    pub async fn get(&self, id: i64) -> DbResult<Option<Bill>> {
        let row = sqlx::query_as::<_, BillRow>(
            r#"
            SELECT
                b.id, b.employee_id, e.name AS employee_name,
                b.customer_name, b.customer_phone,
                b.subtotal_cents, b.discount_cents, b.total_cents, b.created_at
            FROM bills b
            INNER JOIN employees e ON e.id = b.employee_id
            WHERE b.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, BillItem>(
            r#"
            SELECT bp.product_id, p.name, bp.price_cents
            FROM bill_products bp
            INNER JOIN products p ON p.id = bp.product_id
            WHERE bp.bill_id = ?1
            ORDER BY bp.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(row.into_bill(items)))
    }

    /// Returns a page of bills, newest first, plus the total bill count.
    ///
    /// Line items for the whole page are fetched in one query and grouped
    /// in memory.
    pub async fn history(&self, limit: i64, offset: i64) -> DbResult<(Vec<Bill>, i64)> {
        debug!(limit, offset, "Fetching bill history");

        let rows = sqlx::query_as::<_, BillRow>(
            r#"
            SELECT
                b.id, b.employee_id, e.name AS employee_name,
                b.customer_name, b.customer_phone,
                b.subtotal_cents, b.discount_cents, b.total_cents, b.created_at
            FROM bills b
            INNER JOIN employees e ON e.id = b.employee_id
            ORDER BY b.id DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bills")
            .fetch_one(&self.pool)
            .await?;

        let item_rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT bp.bill_id, bp.product_id, p.name, bp.price_cents
            FROM bill_products bp
            INNER JOIN products p ON p.id = bp.product_id
            WHERE bp.bill_id IN (
                SELECT id FROM bills ORDER BY id DESC LIMIT ?1 OFFSET ?2
            )
            ORDER BY bp.bill_id, bp.id
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_bill: HashMap<i64, Vec<BillItem>> = HashMap::new();
        for row in item_rows {
            items_by_bill.entry(row.bill_id).or_default().push(BillItem {
                product_id: row.product_id,
                name: row.name,
                price_cents: row.price_cents,
            });
        }

        let bills = rows
            .into_iter()
            .map(|row| {
                let items = items_by_bill.remove(&row.id).unwrap_or_default();
                row.into_bill(items)
            })
            .collect();

        Ok((bills, total))
    }

    /// Transactionally replaces a bill's employee, customer fields, line
    /// items, and discount. Totals are recomputed exactly as `create`
    /// computes them; `created_at` is preserved.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - Bill, employee, or a product id doesn't exist
    pub async fn update(&self, id: i64, draft: &BillDraft) -> DbResult<Bill> {
        debug!(id, units = draft.product_ids.len(), "Updating bill");

        let mut tx = self.pool.begin().await?;

        ensure_employee(&mut tx, draft.employee_id).await?;
        let items = load_items(&mut tx, &draft.product_ids).await?;

        let unit_prices: Vec<i64> = items.iter().map(|item| item.price_cents).collect();
        let totals = bill_totals(&unit_prices, draft.discount);

        let result = sqlx::query(
            r#"
            UPDATE bills SET
                employee_id = ?2,
                customer_name = ?3,
                customer_phone = ?4,
                subtotal_cents = ?5,
                discount_cents = ?6,
                total_cents = ?7
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(draft.employee_id)
        .bind(&draft.customer_name)
        .bind(&draft.customer_phone)
        .bind(totals.subtotal_cents)
        .bind(totals.discount_cents)
        .bind(totals.total_cents)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Bill", id));
        }

        sqlx::query("DELETE FROM bill_products WHERE bill_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_items(&mut tx, id, &items).await?;

        tx.commit().await?;

        self.get(id)
            .await?
            .ok_or_else(|| DbError::Internal(format!("bill {id} missing after update")))
    }

    /// Deletes a bill. Its line rows cascade.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - No bill with this ID
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting bill");

        let result = sqlx::query("DELETE FROM bills WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Bill", id));
        }

        Ok(())
    }
}

// =============================================================================
// Transaction Helpers
// =============================================================================

/// Verifies the employee exists inside the transaction.
async fn ensure_employee(tx: &mut Transaction<'_, Sqlite>, employee_id: i64) -> DbResult<()> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM employees WHERE id = ?1")
        .bind(employee_id)
        .fetch_optional(&mut **tx)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(DbError::not_found("Employee", employee_id)),
    }
}

/// Resolves each product id to a line item with the current catalog price,
/// preserving draft order and repetition (one entry per unit).
async fn load_items(
    tx: &mut Transaction<'_, Sqlite>,
    product_ids: &[i64],
) -> DbResult<Vec<BillItem>> {
    let mut items = Vec::with_capacity(product_ids.len());

    for &product_id in product_ids {
        let item = sqlx::query_as::<_, BillItem>(
            "SELECT id AS product_id, name, price_cents FROM products WHERE id = ?1",
        )
        .bind(product_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| DbError::not_found("Product", product_id))?;

        items.push(item);
    }

    Ok(items)
}

/// Inserts one `bill_products` row per unit.
async fn insert_items(
    tx: &mut Transaction<'_, Sqlite>,
    bill_id: i64,
    items: &[BillItem],
) -> DbResult<()> {
    for item in items {
        sqlx::query(
            "INSERT INTO bill_products (bill_id, product_id, price_cents) VALUES (?1, ?2, ?3)",
        )
        .bind(bill_id)
        .bind(item.product_id)
        .bind(item.price_cents)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
