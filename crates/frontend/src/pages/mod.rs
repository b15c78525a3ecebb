pub mod home;
pub mod presentation;
