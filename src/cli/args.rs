use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the csymtab binary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "csymtab",
    version,
    about = "Build scope-aware symbol tables for C declarations"
)]
pub struct CliArgs {
    /// C source text to process. The built-in sample is used when neither a
    /// source nor `--file` is given.
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    /// Read C source from a file. May be repeated; files are processed in
    /// parallel and reported in the order given.
    #[arg(long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Skip the syntax tree dump.
    #[arg(long = "no-tree")]
    pub no_tree: bool,

    /// Print the tables as single-line JSON.
    #[arg(long)]
    pub compact: bool,
}
