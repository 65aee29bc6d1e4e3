mod json;
pub use json::*;
mod stats;
pub use stats::*;
