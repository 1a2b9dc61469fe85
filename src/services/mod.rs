pub mod github_service;
pub mod profile_service;

pub use github_service::GithubService;
pub use profile_service::ProfileService;
