//! CLI commands

pub mod new;

pub use new::{NewCommand, NewFlags};
