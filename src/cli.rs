use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar rules
    pub file: PathBuf,

    /// The tokens of the sentence to parse
    pub sentence: Vec<String>,

    /// Start symbol (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Print the parse tree as LaTeX qtree markup
    #[arg(short, long)]
    pub latex: bool,

    /// Also print the chart as a LaTeX table
    #[arg(short, long)]
    pub table: bool
}
