pub mod account;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod favorites;
pub mod interactive;
pub mod storage;
