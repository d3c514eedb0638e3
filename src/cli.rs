// Clap definitions in derive style

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use mucat::{TextTransform, Year};

#[derive(Parser)]
#[command(name = "mucat", version, about)]
pub struct Cli {
    /// Set the level of verbosity
    /// -v for info, -vv for debug, -vvv for trace
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every query answer for a catalog
    Report {
        #[command(flatten)]
        source: CatalogSource,

        /// Print JSON instead of text
        #[arg(long = "json", default_value_t = false)]
        json: bool,
    },

    /// Answer a single query
    Query {
        #[command(flatten)]
        source: CatalogSource,

        #[command(subcommand)]
        query: Query,
    },

    /// Apply a text filter to a file or to stdin
    Transform {
        /// Filter name (see --list)
        #[arg(value_name = "NAME", required_unless_present = "list")]
        name: Option<TextTransform>,

        /// Input file, stdin when omitted
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// List the available filters
        #[arg(short = 'l', long = "list", default_value_t = false)]
        list: bool,
    },
}

#[derive(Args)]
pub struct CatalogSource {
    /// Album CSV (columns: Album Name, Year)
    #[arg(short = 'a', long = "albums", required = true)]
    pub albums: PathBuf,

    /// Song CSV (columns: Track Name, Album Name, Duration)
    #[arg(short = 's', long = "songs", required = true)]
    pub songs: PathBuf,
}

#[derive(Subcommand)]
pub enum Query {
    /// Song names in alphabetical order
    Songs,
    /// Album names
    Albums,
    /// Albums released in a year
    Year { year: Year },
    /// Number of songs in an album
    Count { album: String },
    /// Number of songs without an album
    NoAlbum,
    /// Average song duration of an album
    Average { album: String },
    /// Name of the longest song
    LongestSong,
    /// Album with the greatest total duration
    LongestAlbum,
}
