//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the storage and sheet layers.

pub mod compose;
pub mod expense;

pub use compose::{handle_compose_command, ComposeArgs};
pub use expense::{handle_add_command, handle_list_command, AddArgs, ListArgs};
