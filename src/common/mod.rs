pub mod errors;
pub mod extract;
pub mod models;
pub mod state;
pub mod validation;
pub mod views;
