//! The command-line surface.

pub mod commands;
