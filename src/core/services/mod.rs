pub mod export_service;
pub mod report_service;
pub mod stats_service;

pub use export_service::{ExportRow, ExportService};
pub use report_service::ReportService;
pub use stats_service::StatsService;
