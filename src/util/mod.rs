//! Small helpers shared by the generators and the CLI.
//!
//! - **Dates**: timestamp to calendar-date conversion in UTC
//! - **Files**: atomic writes for generated documents
//!
//! # Examples
//!
//! ```
//! use dirmap::util::{format_date, timestamp_to_date};
//!
//! let date = timestamp_to_date(1_700_000_000).unwrap();
//! assert_eq!(format_date(date), "2023-11-14");
//! ```

mod date;
mod fs;

pub use date::{format_date, timestamp_to_date, today};
pub use fs::atomic_write;
