use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Build and inspect query criteria from request parameters
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dry-run request parameters against a declared field set and print
    /// the resulting query plan
    Plan {
        /// Searchable fields with optional operators (e.g. "name;email:like")
        #[arg(short = 'F', long)]
        fields: String,

        /// Search term (e.g. "john" or "name:john;email:doe@x.com")
        #[arg(short, long)]
        search: Option<String>,

        /// Restrict the search to these fields (e.g. "email" or "email:=")
        #[arg(long)]
        search_fields: Option<String>,

        /// Columns to project (e.g. "id;name")
        #[arg(long)]
        filter: Option<String>,

        /// Column to sort by
        #[arg(long)]
        order_by: Option<String>,

        /// Sort direction, passed through verbatim
        #[arg(long)]
        sorted_by: Option<String>,

        /// Relations to eager-load (e.g. "author;comments")
        #[arg(long = "with")]
        with_relations: Option<String>,

        /// TOML config overriding parameter names and accepted operators
        #[arg(short, long, env = "REQUEST_CRITERIA_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Path to write the rendered plan to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate a unique slug for a value
    Slug {
        /// Source text to slugify
        value: String,

        /// Separator between words and before the counter suffix
        #[arg(long, default_value = "-")]
        separator: String,

        /// Maximum base slug length
        #[arg(long, default_value_t = 240)]
        max_length: usize,

        /// Slugs already taken (repeatable)
        #[arg(long)]
        taken: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
