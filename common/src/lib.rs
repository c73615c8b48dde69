// Shared modules for the shasta monitor
pub mod config;
pub mod shared;
pub mod utils;
