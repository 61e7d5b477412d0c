pub mod user_repo;
pub use user_repo::UserRepository;
pub mod worker_repo;
pub use worker_repo::WorkerRepository;
pub mod activity_repo;
pub use activity_repo::ActivityRepository;
pub mod report_repo;
pub use report_repo::ReportRepository;
