//! Export codecs for Reagent: CSV and a printable HTML report.
//!
//! Both operate on a caller-supplied record list (normally the filtered and
//! sorted view) and have no side effects. Pure synchronous; no HTTP or
//! database dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use reagent_core::seed::seed_records;
//!
//! let records = seed_records();
//! let csv = reagent_export::to_csv(&records)?;
//! let html = reagent_export::to_report(&records, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
//! assert!(csv.starts_with("ID,Name"));
//! assert!(html.contains("<table"));
//! # Ok::<(), reagent_export::Error>(())
//! ```

pub mod error;
mod report;
mod tabular;

pub use error::{Error, Result};
pub use report::{REPORT_TITLE, to_report};
pub use tabular::{CSV_FILENAME, CSV_HEADERS, to_csv};
