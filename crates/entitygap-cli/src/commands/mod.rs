//! Command implementations.

pub mod analyze;
pub mod extract;
pub mod search;

pub use self::analyze::execute_analyze;
pub use self::extract::execute_extract;
pub use self::search::execute_search;
