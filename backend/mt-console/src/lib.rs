pub mod cli;
pub mod error;
pub mod input;
pub mod logger;
pub mod output;
pub mod repl;


pub use cli::{Cli, OutputFormat};
pub use error::{ConsoleError, Result as ConsoleErrorResult};
pub use output::Printer;
