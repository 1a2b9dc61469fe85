pub mod profile;

pub use profile::{github_repos_get, profile_by_user_get, profiles_get};
