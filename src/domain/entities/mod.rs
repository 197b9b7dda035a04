pub mod generation;
pub mod model;
pub mod token;
pub mod user;
