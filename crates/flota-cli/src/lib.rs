//! Library components of the fleet export CLI.

pub mod commands;
pub mod logging;
