//! Command-line front end for the echocardiogram report engine.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod summary;
