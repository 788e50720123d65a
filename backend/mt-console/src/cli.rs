use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "mt-console")]
#[command(about = "Vehicle maintenance tracker for the terminal")]
#[command(version)]
pub struct Cli {
    /// How views and notifications are written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output (implies --format json)
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.pretty {
            OutputFormat::PrettyJson
        } else {
            self.format
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    #[value(skip)]
    PrettyJson,
}
