use std::io;
use std::path::PathBuf;

use image::ImageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the frame extractor and the montage assembler.
#[derive(Debug, Error)]
pub enum Error {
    /// A source or input file is missing or cannot be opened.
    #[error("cannot open {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but does not hold a valid image of the expected kind.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    /// A font file exists but does not parse as a font.
    #[error("invalid font {}: {source}", path.display())]
    Font {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },

    /// None of the well-known system fonts could be loaded.
    #[error("no usable title font found, searched: {}", searched.join(", "))]
    NoFont { searched: Vec<String> },

    /// The destination could not be created or written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: WriteSource,
    },
}

/// Underlying cause of a write failure.
#[derive(Debug, Error)]
pub enum WriteSource {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Image(#[from] ImageError),
}

impl Error {
    pub(crate) fn not_found(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::NotFound {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn decode(path: impl Into<PathBuf>, source: ImageError) -> Self {
        Error::Decode {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<WriteSource>) -> Self {
        Error::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}
