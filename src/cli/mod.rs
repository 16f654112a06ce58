pub mod commands;
pub mod leads;
pub mod scan;
pub mod serve;

pub use commands::{Cli, Commands};
