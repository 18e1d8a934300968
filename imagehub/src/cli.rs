use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imagehub", version)]
#[command(about = "Local image gallery with titles, tags and search", long_about = None)]
pub struct Cli {
    /// Directory holding the database, settings and display handles
    #[arg(long, global = true, env = "IMAGEHUB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Store an image file")]
    Add {
        /// Image file to store
        file: PathBuf,

        /// Title (defaults to the file name without extension)
        #[arg(long)]
        title: Option<String>,

        /// Tags separated by commas or spaces, e.g. "pet, orange"
        #[arg(short = 't', long)]
        tags: Option<String>,
    },

    #[command(about = "List stored images, newest first")]
    List {
        /// Only show images whose title or tags contain this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    #[command(about = "Delete a stored image")]
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    #[command(about = "Materialize an image and print its URL")]
    Open { id: i64 },

    #[command(about = "Interactive gallery with live search")]
    Browse,
}
