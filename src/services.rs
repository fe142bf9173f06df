pub mod auth;
pub mod dashboard_service;
pub mod inventory_service;
pub mod job_service;
pub mod report_service;

pub use auth::AuthService;
pub use dashboard_service::DashboardService;
pub use inventory_service::InventoryService;
pub use job_service::JobService;
pub use report_service::ReportService;
