//! Command-line front end for Goalpost, storing each list as a JSON file.
pub mod commands;
pub mod config;
pub mod store;
