//! Turn elevation rasters into closed, printable STL solids.
//!
//! A [`HeightGrid`] is meshed into a [`Solid`]: the terrain surface on top, four skirt walls
//! dropping to a flat base level, and a bottom. Large rasters are split into [`Chunk`]s which
//! are meshed and written independently, all sitting on the same base level.
//!
//! The `io` feature adds the raster readers, STL serialisation, configuration and the
//! [`pipeline`] that ties them together.

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

mod base;
#[cfg(feature = "io")]
pub mod config;
mod error;
mod extents;
mod facet;
mod grid;
#[cfg(feature = "io")]
pub mod io;
mod mesher;
#[cfg(feature = "io")]
pub mod pipeline;
mod point;
mod quad;
mod solid;
mod window;

pub use base::*;
pub use error::*;
pub use extents::*;
pub use facet::*;
pub use grid::*;
pub use mesher::*;
pub use point::*;
pub use quad::*;
pub use solid::*;
pub use window::*;

#[cfg(test)]
fn dummy_grid() -> HeightGrid {
    HeightGrid::from_fn(2, 3, |x, y| (y * 2 + x + 1) as f64)
}
