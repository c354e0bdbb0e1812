pub mod cors;
pub mod rate_limit;
pub mod security;

pub use cors::*;
pub use rate_limit::*;
pub use security::*;
