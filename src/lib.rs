pub mod config;
pub mod datetime;
pub mod reminder;
pub mod storage;
pub mod task;
pub mod utils;
