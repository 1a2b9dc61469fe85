pub mod profile;

pub use profile::{
    education_delete, education_put, experience_delete, experience_put, profile_delete,
    profile_me_get, profile_post,
};
