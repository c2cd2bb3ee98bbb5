use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the ets-query binary.
#[derive(Parser, Debug)]
#[command(
    name = "ets-query",
    version,
    about = "Type hierarchies, member relations and code fixes for ets sources"
)]
pub struct CliArgs {
    /// JSON file with format settings (camelCase keys, missing keys default).
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// JSON file with user preferences.
    #[arg(long, global = true)]
    pub preferences: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Super and sub type trees of the class or interface at a position.
    TypeHierarchy(QueryArgs),
    /// Classes and interfaces related to the one at a position, with the
    /// members through which they override or implement each other.
    ClassHierarchy(QueryArgs),
    /// 0-based line and UTF-16 column of an offset.
    Position(QueryArgs),
    /// Code fixes for one diagnostic.
    Fixes(FixArgs),
    /// Combined edits of one fix over every matching diagnostic of a file.
    FixAll(FixAllArgs),
    /// Parse diagnostics of every loaded file.
    Diagnostics(FilesArgs),
    /// Error codes that have at least one code fix.
    Codes,
}

#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Source files loaded into the project, in lookup order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// File to query; defaults to the first of `files`.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub files: FilesArgs,

    /// Byte offset in the queried file.
    #[arg(long)]
    pub pos: u32,
}

#[derive(Args, Debug)]
pub struct FixArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Diagnostic error code.
    #[arg(long)]
    pub code: u32,

    /// Length of the diagnostic span.
    #[arg(long, default_value_t = 0)]
    pub length: u32,
}

#[derive(Args, Debug)]
pub struct FixAllArgs {
    #[command(flatten)]
    pub files: FilesArgs,

    /// Fix identifier, e.g. `unusedIdentifier_delete`.
    #[arg(long = "fix-id")]
    pub fix_id: String,

    /// JSON array of diagnostics; the file's parse diagnostics when absent.
    #[arg(long)]
    pub diagnostics: Option<PathBuf>,
}
