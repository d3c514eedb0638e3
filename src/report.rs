use std::fmt;

use serde::Serialize;

use crate::album::Year;

/// Snapshot of every catalog query, ready to print or serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub album_count: usize,
    pub song_count: usize,
    pub songs_without_album: usize,
    pub ordered_song_names: Vec<String>,
    pub longest_song: Option<String>,
    pub longest_album: Option<String>,
    pub albums: Vec<AlbumRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlbumRow {
    pub name: String,
    pub year: Year,
    pub song_count: usize,
    pub average_duration: Option<f64>,
    pub total_duration: Option<f64>,
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} albums, {} songs ({} without album)",
            self.album_count, self.song_count, self.songs_without_album
        )?;
        writeln!(
            f,
            "Longest song: {}",
            self.longest_song.as_deref().unwrap_or("-")
        )?;
        writeln!(
            f,
            "Longest album: {}",
            self.longest_album.as_deref().unwrap_or("-")
        )?;

        if !self.albums.is_empty() {
            writeln!(f)?;
            writeln!(f, "Albums:")?;
            for album in &self.albums {
                writeln!(f, "  {}", album)?;
            }
        }

        if !self.ordered_song_names.is_empty() {
            writeln!(f)?;
            writeln!(f, "Songs:")?;
            for name in &self.ordered_song_names {
                writeln!(f, "  {}", name)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for AlbumRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} songs",
            self.name, self.year, self.song_count
        )?;
        if let (Some(average), Some(total)) = (self.average_duration, self.total_duration) {
            write!(f, ", avg {:.1}s, total {:.1}s", average, total)?;
        }
        Ok(())
    }
}
