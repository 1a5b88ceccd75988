pub mod config;
pub mod errors;
pub mod kernel;
pub mod settings;
pub mod traits;
pub mod types;
