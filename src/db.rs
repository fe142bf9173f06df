pub mod fabric_repo;
pub use fabric_repo::FabricRepository;
pub mod job_repo;
pub use job_repo::JobRepository;
pub mod report_repo;
pub use report_repo::ReportRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
