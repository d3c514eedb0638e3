use std::collections::HashMap;
use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;

use log::debug;

use crate::album::{Album, Year};
use crate::error::CatalogError;
use crate::report::{AlbumRow, CatalogSummary};
use crate::song::Song;

/// In-memory catalog of albums and songs.
///
/// Albums and songs are kept in first-insertion order, which is also the
/// order every query walks them in. Nothing is ever removed.
#[derive(Debug, Default)]
pub struct SongCatalog {
    albums: Vec<Album>,
    album_index: HashMap<String, usize>,
    songs: Vec<Song>,
    /// Song hash -> positions in `songs` sharing that hash.
    song_index: HashMap<u64, Vec<usize>>,
    hasher: RandomState,
}

impl SongCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an album, or overwrites the year of an existing one.
    pub fn add_album(&mut self, name: impl Into<String>, year: Year) {
        let name = name.into();

        match self.album_index.get(&name) {
            Some(&pos) => {
                debug!(
                    "Album {:?}: year {} -> {}",
                    name, self.albums[pos].year, year
                );
                self.albums[pos].year = year;
            }
            None => {
                debug!("Album added: {:?} ({})", name, year);
                self.album_index.insert(name.clone(), self.albums.len());
                self.albums.push(Album::new(name, year));
            }
        }
    }

    /// Adds a song to the catalog.
    ///
    /// Returns `Ok(false)` when a structurally identical song was already
    /// present. Fails without touching the catalog when `album` names an
    /// album that was never added, or when the duration is not a finite,
    /// non-negative number.
    pub fn add_song(
        &mut self,
        name: impl Into<String>,
        album: Option<&str>,
        duration: f64,
    ) -> Result<bool, CatalogError> {
        if let Some(album) = album
            && !self.album_index.contains_key(album)
        {
            return Err(CatalogError::InvalidReference(album.to_string()));
        }

        let song = Song::new(name, album.map(str::to_string), duration)?;

        let bucket = self
            .song_index
            .entry(self.hasher.hash_one(&song))
            .or_default();

        if bucket.iter().any(|&pos| self.songs[pos] == song) {
            debug!("Duplicate song ignored: {:?}", song);
            return Ok(false);
        }

        debug!("Song added: {:?}", song);
        bucket.push(self.songs.len());
        self.songs.push(song);
        Ok(true)
    }

    /// All song names, sorted by ordinal (case-sensitive) comparison.
    pub fn ordered_song_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.songs.iter().map(Song::name).collect();
        names.sort_unstable();
        names
    }

    pub fn album_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.albums.iter().map(|album| album.name.as_str())
    }

    pub fn albums_in_year(&self, year: Year) -> impl Iterator<Item = &str> + '_ {
        self.albums
            .iter()
            .filter(move |album| album.year == year)
            .map(|album| album.name.as_str())
    }

    pub fn count_songs(&self, album: &str) -> usize {
        self.songs_in(album).count()
    }

    pub fn count_songs_with_no_album(&self) -> usize {
        self.songs
            .iter()
            .filter(|song| song.album().is_none())
            .count()
    }

    /// Mean duration of the album's songs, `None` if it has none.
    pub fn average_duration(&self, album: &str) -> Option<f64> {
        let (count, total) = self.count_and_total(album);
        (count > 0).then(|| total / count as f64)
    }

    /// Sum of the album's song durations, `None` if it has none.
    pub fn total_duration(&self, album: &str) -> Option<f64> {
        let (count, total) = self.count_and_total(album);
        (count > 0).then_some(total)
    }

    /// Name of the longest song. Ties go to the song added first.
    pub fn longest_song(&self) -> Option<&str> {
        self.songs
            .iter()
            .reduce(|best, song| {
                if song.duration() > best.duration() {
                    song
                } else {
                    best
                }
            })
            .map(Song::name)
    }

    /// Album with the greatest total duration among albums that have at
    /// least one song, ranked by average duration times song count. Ties
    /// go to the album added first; `None` when no album has songs.
    pub fn longest_album(&self) -> Option<&str> {
        self.albums
            .iter()
            .filter_map(|album| {
                self.average_duration(&album.name).map(|average| {
                    let count = self.count_songs(&album.name) as f64;
                    (album.name.as_str(), average * count)
                })
            })
            .reduce(|best, candidate| {
                if candidate.1 > best.1 {
                    candidate
                } else {
                    best
                }
            })
            .map(|(name, _)| name)
    }

    pub fn album_year(&self, album: &str) -> Option<Year> {
        self.album_index.get(album).map(|&pos| self.albums[pos].year)
    }

    pub fn albums(&self) -> impl Iterator<Item = &Album> + '_ {
        self.albums.iter()
    }

    pub fn songs(&self) -> impl Iterator<Item = &Song> + '_ {
        self.songs.iter()
    }

    pub fn album_count(&self) -> usize {
        self.albums.len()
    }

    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty() && self.songs.is_empty()
    }

    /// Answers every query at once.
    pub fn summary(&self) -> CatalogSummary {
        let albums = self
            .albums
            .iter()
            .map(|album| AlbumRow {
                name: album.name.clone(),
                year: album.year,
                song_count: self.count_songs(&album.name),
                average_duration: self.average_duration(&album.name),
                total_duration: self.total_duration(&album.name),
            })
            .collect();

        CatalogSummary {
            album_count: self.album_count(),
            song_count: self.song_count(),
            songs_without_album: self.count_songs_with_no_album(),
            ordered_song_names: self
                .ordered_song_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            longest_song: self.longest_song().map(str::to_string),
            longest_album: self.longest_album().map(str::to_string),
            albums,
        }
    }

    fn songs_in<'a>(&'a self, album: &'a str) -> impl Iterator<Item = &'a Song> + 'a {
        self.songs.iter().filter(move |song| song.is_in_album(album))
    }

    fn count_and_total(&self, album: &str) -> (usize, f64) {
        self.songs_in(album)
            .fold((0, 0.0), |(count, total), song| {
                (count + 1, total + song.duration())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with_albums(albums: &[(&str, Year)]) -> SongCatalog {
        let mut catalog = SongCatalog::new();
        for (name, year) in albums {
            catalog.add_album(*name, *year);
        }
        catalog
    }

    #[test]
    fn test_add_album_last_write_wins() {
        let mut catalog = catalog_with_albums(&[("A", 2000), ("B", 1999), ("A", 2005)]);
        catalog.add_album("C", 2005);

        assert_eq!(catalog.album_count(), 3);
        assert_eq!(catalog.album_year("A"), Some(2005));
        assert_eq!(catalog.album_year("B"), Some(1999));
        assert_eq!(catalog.album_year("Z"), None);
        assert_eq!(catalog.album_names().collect::<Vec<_>>(), ["A", "B", "C"]);
    }

    #[test]
    fn test_albums_in_year() {
        let catalog = catalog_with_albums(&[("A", 2000), ("B", 1999), ("C", 2000)]);

        assert_eq!(catalog.albums_in_year(2000).collect::<Vec<_>>(), ["A", "C"]);
        assert_eq!(catalog.albums_in_year(1999).collect::<Vec<_>>(), ["B"]);
        assert_eq!(catalog.albums_in_year(1970).count(), 0);
    }

    #[test]
    fn test_add_song_unknown_album() {
        let mut catalog = catalog_with_albums(&[("A", 2000)]);
        catalog.add_song("s1", Some("A"), 1.0).unwrap();

        let err = catalog.add_song("s2", Some("Nope"), 1.0).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidReference(ref name) if name == "Nope"));
        assert_eq!(catalog.song_count(), 1);
        assert_eq!(catalog.ordered_song_names(), ["s1"]);
    }

    #[test]
    fn test_add_song_bad_duration_leaves_catalog_unchanged() {
        let mut catalog = catalog_with_albums(&[("A", 2000)]);

        let err = catalog.add_song("s1", Some("A"), -3.0).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDuration(_)));
        assert_eq!(catalog.song_count(), 0);
    }

    #[test]
    fn test_add_song_is_idempotent() {
        let mut catalog = catalog_with_albums(&[("A", 2000)]);

        assert!(catalog.add_song("s1", Some("A"), 4.0).unwrap());
        assert!(!catalog.add_song("s1", Some("A"), 4.0).unwrap());
        assert_eq!(catalog.song_count(), 1);

        // same name, different album or duration is a different song
        assert!(catalog.add_song("s1", None, 4.0).unwrap());
        assert!(catalog.add_song("s1", Some("A"), 4.5).unwrap());
        assert_eq!(catalog.song_count(), 3);
    }

    #[test]
    fn test_songs_are_stored_once() {
        let mut catalog = catalog_with_albums(&[("A", 2000)]);
        for round in 0..3 {
            for i in 0..50 {
                let album = (i % 2 == 0).then_some("A");
                let added = catalog.add_song(format!("song {}", i % 10), album, i as f64).unwrap();
                assert_eq!(added, round == 0);
            }
        }

        assert_eq!(catalog.song_count(), 50);
        let indexed: usize = catalog.song_index.values().map(Vec::len).sum();
        assert_eq!(indexed, catalog.songs.len());
    }

    #[test]
    fn test_ordered_song_names() {
        let mut catalog = catalog_with_albums(&[("A", 2000)]);
        for name in ["beta", "Alpha", "alpha", "Beta", "beta"] {
            catalog.add_song(name, Some("A"), 1.0).unwrap();
        }
        catalog.add_song("beta", None, 1.0).unwrap();

        let names = catalog.ordered_song_names();
        assert_eq!(names, ["Alpha", "Beta", "alpha", "beta", "beta"]);
        assert_eq!(names.len(), catalog.song_count());
    }

    #[test]
    fn test_counts() {
        let mut catalog = catalog_with_albums(&[("A", 2000), ("B", 1999)]);
        catalog.add_song("s1", Some("A"), 1.0).unwrap();
        catalog.add_song("s2", Some("A"), 2.0).unwrap();
        catalog.add_song("s3", Some("B"), 3.0).unwrap();
        catalog.add_song("loose", None, 4.0).unwrap();
        catalog.add_song("loose again", None, 5.0).unwrap();

        assert_eq!(catalog.count_songs("A"), 2);
        assert_eq!(catalog.count_songs("B"), 1);
        assert_eq!(catalog.count_songs("NoSuchAlbum"), 0);
        assert_eq!(catalog.count_songs_with_no_album(), 2);
    }

    #[test]
    fn test_average_duration() {
        let mut catalog = catalog_with_albums(&[("A", 2000), ("Empty", 2001)]);
        catalog.add_song("s1", Some("A"), 3.0).unwrap();
        catalog.add_song("s2", Some("A"), 5.0).unwrap();
        catalog.add_song("loose", None, 100.0).unwrap();

        assert_eq!(catalog.average_duration("A"), Some(4.0));
        assert_eq!(catalog.average_duration("Empty"), None);
        assert_eq!(catalog.average_duration("NoSuchAlbum"), None);
        assert_eq!(catalog.total_duration("A"), Some(8.0));
        assert_eq!(catalog.total_duration("Empty"), None);
    }

    #[test]
    fn test_basic_album_example() {
        let mut catalog = catalog_with_albums(&[("A", 2000)]);
        catalog.add_song("s1", Some("A"), 4.0).unwrap();
        catalog.add_song("s2", Some("A"), 6.0).unwrap();

        assert_eq!(catalog.count_songs("A"), 2);
        assert_eq!(catalog.average_duration("A"), Some(5.0));
        assert_eq!(catalog.longest_song(), Some("s2"));
    }

    #[test]
    fn test_longest_song() {
        let mut catalog = SongCatalog::new();
        assert_eq!(catalog.longest_song(), None);

        catalog.add_song("short", None, 1.0).unwrap();
        catalog.add_song("first long", None, 9.0).unwrap();
        catalog.add_song("second long", None, 9.0).unwrap();
        catalog.add_song("medium", None, 5.0).unwrap();

        assert_eq!(catalog.longest_song(), Some("first long"));
    }

    #[test]
    fn test_longest_album() {
        let mut catalog = catalog_with_albums(&[("A", 2000), ("B", 1999), ("Empty", 2010)]);
        catalog.add_song("a1", Some("A"), 30.0).unwrap();
        catalog.add_song("a2", Some("A"), 40.0).unwrap();
        catalog.add_song("b1", Some("B"), 100.0).unwrap();
        catalog.add_song("loose", None, 500.0).unwrap();

        assert_eq!(catalog.longest_album(), Some("B"));
    }

    #[test]
    fn test_longest_album_tie_keeps_first() {
        let mut catalog = catalog_with_albums(&[("First", 2000), ("Second", 2000)]);
        catalog.add_song("x", Some("Second"), 10.0).unwrap();
        catalog.add_song("y", Some("First"), 4.0).unwrap();
        catalog.add_song("z", Some("First"), 6.0).unwrap();

        assert_eq!(catalog.longest_album(), Some("First"));
    }

    #[test]
    fn test_longest_album_ranks_by_average_times_count() {
        let albums = [("Thirds", 2000), ("Tenths", 2000), ("Sevenths", 2000)];
        let mut catalog = catalog_with_albums(&albums);
        for (i, duration) in [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0].into_iter().enumerate() {
            catalog.add_song(format!("t{}", i), Some("Thirds"), duration).unwrap();
        }
        for (i, duration) in [0.1, 0.2, 0.7].into_iter().enumerate() {
            catalog.add_song(format!("d{}", i), Some("Tenths"), duration).unwrap();
        }
        for i in 0..7 {
            catalog.add_song(format!("s{}", i), Some("Sevenths"), 1.0 / 7.0).unwrap();
        }
        catalog.add_song("same", Some("Sevenths"), 1.0 / 7.0).unwrap();

        let expected = albums
            .iter()
            .map(|(name, _)| {
                let key = catalog.average_duration(name).unwrap() * catalog.count_songs(name) as f64;
                (*name, key)
            })
            .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
            .map(|(name, _)| name);

        assert_eq!(catalog.longest_album(), expected);
    }

    #[test]
    fn test_longest_album_without_songs() {
        let mut catalog = SongCatalog::new();
        assert_eq!(catalog.longest_album(), None);

        catalog.add_album("A", 2000);
        catalog.add_song("loose", None, 10.0).unwrap();
        assert_eq!(catalog.longest_album(), None);
    }

    #[test]
    fn test_longest_album_zero_length_songs() {
        let mut catalog = catalog_with_albums(&[("Silent", 2000)]);
        catalog.add_song("nothing", Some("Silent"), 0.0).unwrap();

        assert_eq!(catalog.longest_album(), Some("Silent"));
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let mut catalog = catalog_with_albums(&[("A", 2000), ("B", 2001)]);
        catalog.add_song("a", Some("A"), 50.0).unwrap();
        assert_eq!(catalog.longest_album(), Some("A"));

        // a later, longer album must win on the next call
        catalog.add_song("b", Some("B"), 60.0).unwrap();
        assert_eq!(catalog.longest_album(), Some("B"));
    }

    #[test]
    fn test_summary() {
        let mut catalog = catalog_with_albums(&[("A", 2000), ("B", 1999)]);
        catalog.add_song("s2", Some("A"), 6.0).unwrap();
        catalog.add_song("s1", Some("A"), 4.0).unwrap();
        catalog.add_song("free", None, 2.0).unwrap();

        let summary = catalog.summary();
        assert_eq!(summary.album_count, 2);
        assert_eq!(summary.song_count, 3);
        assert_eq!(summary.songs_without_album, 1);
        assert_eq!(summary.ordered_song_names, ["free", "s1", "s2"]);
        assert_eq!(summary.longest_song.as_deref(), Some("s2"));
        assert_eq!(summary.longest_album.as_deref(), Some("A"));
        assert_eq!(summary.albums[0].song_count, 2);
        assert_eq!(summary.albums[0].average_duration, Some(5.0));
        assert_eq!(summary.albums[1].name, "B");
        assert_eq!(summary.albums[1].total_duration, None);
    }

    #[test]
    fn test_is_empty() {
        let mut catalog = SongCatalog::new();
        assert!(catalog.is_empty());
        catalog.add_song("x", None, 1.0).unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.songs().count(), 1);
        assert_eq!(catalog.albums().count(), 0);
    }
}
