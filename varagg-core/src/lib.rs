pub mod errors;
pub mod layout;
pub mod models;
pub mod utils;
