pub mod macros;
pub mod prelude;
mod request;
mod response;
mod setup;
mod user;

pub use setup::App;
pub use user::*;

use std::sync::atomic::{AtomicU64, Ordering};

static UNIQUE: AtomicU64 = AtomicU64::new(0);

/// A number no other caller in this process has seen.
#[allow(unused)]
pub fn unique() -> u64 {
    UNIQUE.fetch_add(1, Ordering::Relaxed)
}
