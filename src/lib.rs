pub mod check;
pub mod config;
pub mod manifest;
pub mod version;
