//! grindlog - grinding counters with spreadsheet import/export
//!
//! grindlog tracks how often users repeat a named activity ("grinding" a
//! game). Every increment is stored as an immutable dated record in a SQLite
//! ledger, records are grouped into completion cycles that roll over at a
//! configurable threshold, and the whole ledger can be synchronized in both
//! directions with xlsx spreadsheets used for bulk review and editing.
//!
//! ## Data flow
//!
//! ```text
//! spreadsheet ──> import (calamine) ──> reconciler ──┐
//!                                                    ▼
//! add command ──> registry ──> progress ──────> ledger (SQLite)
//!                                                    │
//! spreadsheet <── export (rust_xlsxwriter) <── renderer
//! ```

pub mod codec;
pub mod config;
pub mod export;
pub mod import;
pub mod ledger;
pub mod progress;
pub mod registry;
