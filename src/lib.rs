pub mod commands;
pub mod context;
pub mod logging;
pub mod repl;
pub mod status;

pub use context::CliContext;
pub use repl::readline;
