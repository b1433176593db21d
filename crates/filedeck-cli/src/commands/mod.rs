pub mod config;
pub mod files;
pub mod navigate;
pub mod serve;
pub mod session;
