//! Business logic: time windows and the query/report/export services. No
//! terminal I/O, no chat transport, no direct file layout knowledge.

pub mod services;
pub mod time;

pub use services::{ExportRow, ExportService, ReportService, StatsService};
pub use time::{Clock, FixedClock, SystemClock, Window};
