//! Library side of the VersaBoard CLI: commands, logging and settings.

pub mod commands;
pub mod logging;
pub mod settings;
