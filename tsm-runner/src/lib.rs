mod experiment;
pub use experiment::*;
mod logging;
pub use logging::*;
mod output;
pub use output::*;
