pub mod attendance_service;
pub use attendance_service::MarkingService;
pub mod query_service;
pub use query_service::QueryService;
pub mod reporting_service;
pub use reporting_service::ReportingService;
