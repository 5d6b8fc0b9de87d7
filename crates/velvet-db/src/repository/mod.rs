//! # Repository Module
//!
//! Database repository implementations for Velvet POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Bridge Operation                                                      │
//! │       │                                                                 │
//! │       │  db.bills().create(&draft)                                     │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  BillRepository                                                        │
//! │  ├── create(&self, draft)      ← atomic transaction                    │
//! │  ├── get(&self, id)                                                    │
//! │  ├── history(&self, limit, offset)                                     │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Repositories test directly against in-memory SQLite                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`employee::EmployeeRepository`] - Staff CRUD
//! - [`product::ProductRepository`] - Catalog CRUD
//! - [`bill::BillRepository`] - Bill creation, history, update, delete
//! - [`report::ReportRepository`] - Analytics aggregations

pub mod bill;
pub mod employee;
pub mod product;
pub mod report;
