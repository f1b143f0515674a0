pub mod extension;
pub mod health;

pub use extension::{describe, execute, not_found};
pub use health::check;
