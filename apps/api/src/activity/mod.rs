// Append-only activity log: one entry per successful tool use, read back
// newest first by allow-listed admins, with a live SSE feed.

pub mod handlers;
pub mod log;
pub mod policy;
pub mod store;

pub use log::{snippet, ActivityLog, Feature};
