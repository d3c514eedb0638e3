use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::error::CatalogError;

/// A single track of the catalog.
///
/// Two songs are the same entry when name, album and duration all match.
/// Durations are checked on construction, so comparing them bit for bit
/// is a total equality.
#[derive(Debug, Clone, Serialize)]
pub struct Song {
    name: String,
    album: Option<String>,
    duration: f64,
}

impl Song {
    pub fn new(
        name: impl Into<String>,
        album: Option<String>,
        duration: f64,
    ) -> Result<Self, CatalogError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(CatalogError::InvalidDuration(duration));
        }

        Ok(Song {
            name: name.into(),
            album,
            // -0.0 and 0.0 must hash the same
            duration: if duration == 0.0 { 0.0 } else { duration },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn album(&self) -> Option<&str> {
        self.album.as_deref()
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_in_album(&self, album: &str) -> bool {
        self.album.as_deref() == Some(album)
    }
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.album == other.album
            && self.duration.to_bits() == other.duration.to_bits()
    }
}

impl Eq for Song {}

impl Hash for Song {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.album.hash(state);
        self.duration.to_bits().hash(state);
    }
}
