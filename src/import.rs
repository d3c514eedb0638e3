use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::{info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::album::Year;
use crate::catalog::SongCatalog;
use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlbumRecord {
    #[serde(rename = "Album Name")]
    pub album_name: String,

    #[serde(rename = "Year")]
    pub year: Year,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SongRecord {
    #[serde(rename = "Track Name")]
    pub track_name: String,

    /// Empty cell means the song belongs to no album.
    #[serde(rename = "Album Name", default)]
    pub album_name: Option<String>,

    /// Seconds.
    #[serde(rename = "Duration")]
    pub duration: f64,
}

const ALBUM_COLUMNS: &[&str] = &["Album Name", "Year"];
const SONG_COLUMNS: &[&str] = &["Track Name", "Duration"];

pub fn read_albums<R: Read>(reader: R) -> Result<Vec<AlbumRecord>, CatalogError> {
    read_records(reader, ALBUM_COLUMNS)
}

pub fn read_songs<R: Read>(reader: R) -> Result<Vec<SongRecord>, CatalogError> {
    read_records(reader, SONG_COLUMNS)
}

/// Reads every well-formed row. Rows that fail to deserialize are logged
/// and skipped; a header without one of `required` columns, or an I/O
/// failure, aborts.
fn read_records<T, R>(reader: R, required: &[&str]) -> Result<Vec<T>, CatalogError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?;
    if let Some(missing) = required
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        return Err(CatalogError::MissingColumn(missing.to_string()));
    }

    let mut records = Vec::new();

    for result in reader.deserialize::<T>() {
        match result {
            Ok(record) => records.push(record),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => warn!("Skipping invalid row: {}", e),
        }
    }

    Ok(records)
}

/// Builds a catalog out of already parsed records: albums first, then
/// songs. Songs the catalog refuses are logged and skipped.
pub fn build_catalog(albums: Vec<AlbumRecord>, songs: Vec<SongRecord>) -> SongCatalog {
    let mut catalog = SongCatalog::new();

    for album in albums {
        catalog.add_album(album.album_name, album.year);
    }

    for song in songs {
        let album = song.album_name.as_deref().filter(|name| !name.is_empty());
        if let Err(e) = catalog.add_song(song.track_name.as_str(), album, song.duration) {
            warn!("Skipping song {:?}: {}", song.track_name, e);
        }
    }

    catalog
}

/// Loads a catalog from an album CSV and a song CSV.
pub fn load_catalog(albums_path: &Path, songs_path: &Path) -> Result<SongCatalog, CatalogError> {
    let albums = read_albums(File::open(albums_path)?)?;
    let songs = read_songs(File::open(songs_path)?)?;

    let catalog = build_catalog(albums, songs);

    info!(
        "Catalog loaded with {} albums and {} songs.",
        catalog.album_count(),
        catalog.song_count()
    );

    Ok(catalog)
}
