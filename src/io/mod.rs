//! Raster input and mesh output.
//! Readers and writers for the formats a run touches.
use crate::*;
use byteorder::*;
use std::io::{Cursor, Read, Write};

pub mod geokeys;
pub mod geotiff;
pub mod raster;
pub mod stl;

pub use geotiff::GeoTiff;
pub use raster::{GridRaster, Raster};
