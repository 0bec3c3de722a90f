pub mod commands;
pub mod error;
pub mod models;
pub mod operations;
pub mod storage;
