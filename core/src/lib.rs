pub mod error;
mod irrigation;
mod messaging;
mod report;
mod sensor;

pub use irrigation::*;
pub use messaging::*;
pub use report::*;
pub use sensor::*;

pub static CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
