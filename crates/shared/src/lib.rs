pub mod gallery;
#[cfg(feature = "uuid-support")]
pub mod models;
pub mod resolve;
pub mod sanitize;
pub mod selection;
