//! Runtime configuration from command-line flags and environment variables.

use std::path::PathBuf;

use clap::Parser;

/// Server-rendered book shelf.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "bookshelf", version, about)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "BOOKSHELF_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: String,

    /// Directory holding add.html, index.html and edit.html.
    #[arg(long = "templates", env = "BOOKSHELF_TEMPLATES", default_value = "templates")]
    pub templates_dir: PathBuf,

    /// Directory served under /public/.
    #[arg(long = "public", env = "BOOKSHELF_PUBLIC", default_value = "public")]
    pub public_dir: PathBuf,
}
