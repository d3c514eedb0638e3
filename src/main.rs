#![allow(clippy::uninlined_format_args)]

mod cli;

use std::error::Error;
use std::io::{self, Read};
use std::process::ExitCode;

use clap::Parser;
use log::info;
use mucat::SongCatalog;
use mucat::TextTransform;
use mucat::import::load_catalog;

use crate::cli::{CatalogSource, Cli, Commands, Query};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG still wins over -v
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Report { source, json } => {
            let summary = load(&source)?.summary();

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary);
            }
        }
        Commands::Query { source, query } => {
            let catalog = load(&source)?;
            for line in answer(&catalog, &query) {
                println!("{}", line);
            }
        }
        Commands::Transform { name, file, list } => {
            if list {
                for transform in TextTransform::ALL {
                    println!("{:<12} {}", transform.name(), transform.description());
                }
                return Ok(());
            }

            let transform = required_transform(name)?;

            let text = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buffer = String::new();
                    io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };

            info!("Applying {:?} to {} bytes", transform, text.len());
            println!("{}", transform.apply(&text));
        }
    }

    Ok(())
}

fn required_transform(name: Option<TextTransform>) -> Result<TextTransform, Box<dyn Error>> {
    name.ok_or_else(|| "a transform NAME is required unless --list is given".into())
}

fn load(source: &CatalogSource) -> Result<SongCatalog, Box<dyn Error>> {
    Ok(load_catalog(&source.albums, &source.songs)?)
}

/// One output line per value; absent answers print nothing.
fn answer(catalog: &SongCatalog, query: &Query) -> Vec<String> {
    match query {
        Query::Songs => catalog
            .ordered_song_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        Query::Albums => catalog.album_names().map(str::to_string).collect(),
        Query::Year { year } => catalog.albums_in_year(*year).map(str::to_string).collect(),
        Query::Count { album } => vec![catalog.count_songs(album).to_string()],
        Query::NoAlbum => vec![catalog.count_songs_with_no_album().to_string()],
        Query::Average { album } => catalog
            .average_duration(album)
            .map(|average| average.to_string())
            .into_iter()
            .collect(),
        Query::LongestSong => catalog.longest_song().map(str::to_string).into_iter().collect(),
        Query::LongestAlbum => catalog
            .longest_album()
            .map(str::to_string)
            .into_iter()
            .collect(),
    }
}
