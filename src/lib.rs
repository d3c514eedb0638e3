pub mod album;
pub mod catalog;
pub mod error;
pub mod import;
pub mod report;
pub mod song;
pub mod transform;

pub use album::{Album, Year};
pub use catalog::SongCatalog;
pub use error::CatalogError;
pub use report::{AlbumRow, CatalogSummary};
pub use song::Song;
pub use transform::TextTransform;
