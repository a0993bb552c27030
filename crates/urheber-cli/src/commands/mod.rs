//! Command implementations.

pub mod lookup;
pub mod resolve;

pub use self::lookup::execute_lookup;
pub use self::resolve::execute_resolve;
