mod json;
mod pagination;

pub use json::*;
pub use pagination::*;
