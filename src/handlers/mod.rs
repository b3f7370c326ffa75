// Handler modules
pub mod analyze;
pub mod generate;
pub mod support;
pub mod validate;

// Re-export all handler functions
pub use analyze::handle_analyze;
pub use generate::handle_generate;
pub use support::handle_support;
pub use validate::handle_validate;
