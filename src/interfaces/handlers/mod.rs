pub mod auth;
pub mod generation;
pub mod home;
pub mod media;
pub mod system;
