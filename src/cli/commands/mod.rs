pub mod add;
pub mod config;
pub mod db;
pub mod init;
pub mod list;
pub mod log;
pub mod session;
pub mod summary;
pub mod undo;
