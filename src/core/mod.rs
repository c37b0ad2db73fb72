pub mod aggregator;
pub mod buffer;
pub mod flush;
pub mod log;
pub mod session;
pub mod store;
pub mod ticker;
pub mod undo;
