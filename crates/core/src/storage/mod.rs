pub mod format;
pub mod manager;
pub mod snapshot;
pub mod writers;
