mod orm;
pub mod panic;
mod signal;
pub mod validation;

pub use orm::*;
pub use signal::*;
