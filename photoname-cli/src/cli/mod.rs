pub mod args;
pub mod types;

pub use args::{Cli, Commands, SelectionArgs};
pub use types::{OutputFormat, PreviewArg};
