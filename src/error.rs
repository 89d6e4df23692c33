use crate::Window;
use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a run.
///
/// None of these are retried. A chunk either meshes and writes completely, or the error is
/// wrapped in [`Error::Chunk`] so the chunk and its window can be diagnosed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or missing configuration. Raised before the raster is touched.
    #[error("configuration error: {0}")]
    Config(String),

    /// The raster could not be decoded, or a window lies outside of it.
    #[error("raster read error ({context}): {message}")]
    RasterRead { context: String, message: String },

    /// A facet without area, a non-finite coordinate, or a grid too small to mesh.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// An output artifact could not be persisted.
    #[error("failed writing '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mesh file could not be parsed.
    #[error("malformed mesh file: {0}")]
    Parse(String),

    /// Failure while processing a single chunk.
    #[error("chunk ({nx}, {ny}) with window {window} failed: {source}")]
    Chunk {
        nx: u32,
        ny: u32,
        window: Window,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn raster(context: impl Into<String>, message: impl ToString) -> Self {
        Error::RasterRead {
            context: context.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn degenerate(message: impl Into<String>) -> Self {
        Error::DegenerateGeometry(message.into())
    }

    /// Wrap the error with the chunk it was raised in.
    pub fn in_chunk(self, nx: u32, ny: u32, window: Window) -> Self {
        Error::Chunk {
            nx,
            ny,
            window,
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_error_names_the_chunk_and_window() {
        let e = Error::degenerate("grid is 1x4").in_chunk(2, 3, Window::new(10, 20, 10, 23));
        assert_eq!(
            e.to_string(),
            "chunk (2, 3) with window [10, 20, 10, 23] failed: degenerate geometry: grid is 1x4"
        );
    }
}
