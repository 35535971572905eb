//! Status aggregation engine.
//!
//! Pure functions that turn the raw backend collections into platform and
//! dashboard summaries. Nothing here performs I/O or keeps state between
//! calls; every summary is rebuilt from its inputs.

mod checks;
mod dashboard;
mod format;
mod messages;
mod models;
mod platforms;
mod staleness;
mod state;

pub use checks::*;
pub use dashboard::*;
pub use format::*;
pub use messages::*;
pub use models::*;
pub use platforms::*;
