use crate::*;
use std::fmt;

/// A rectangle of pixel coordinates within a raster.
///
/// Both ends are **inclusive**, a window `[0, 0, 9, 4]` covers 10 columns and 5 rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Window {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

/// One tile of the area of interest, addressed by its position in the chunk grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub nx: u32,
    pub ny: u32,
    pub window: Window,
}

/// Geographic bounds of interest.
///
/// The `lat` pair addresses the raster x axis and the `lng` pair the y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Window {
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Number of columns covered.
    pub fn width(&self) -> usize {
        (self.max_x as usize + 1).saturating_sub(self.min_x as usize)
    }

    /// Number of rows covered.
    pub fn height(&self) -> usize {
        (self.max_y as usize + 1).saturating_sub(self.min_y as usize)
    }

    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns if `(x, y)` lies inside the window.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    /// Returns if the window fits inside a raster of `width` by `height` pixels.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        !self.is_empty() && self.max_x < width && self.max_y < height
    }

    /// Locate the pixel window of geographic `bounds` within a raster.
    ///
    /// `bbox` is the raster's `[min x, min y, max x, max y]` and `dims` its pixel dimensions.
    /// Edges are rounded to the nearest pixel boundary, the y axis runs north to south.
    ///
    /// # Errors
    /// [`Error::RasterRead`] if the bounds do not resolve to a window inside the raster.
    pub fn from_geo_bounds(bbox: [f64; 4], dims: (u32, u32), bounds: GeoBounds) -> Result<Self> {
        let [bx0, by0, bx1, by1] = bbox;
        let (w, h) = (dims.0 as f64, dims.1 as f64);

        let min_x = ((bounds.min_lat - bx0) / (bx1 - bx0) * w).round();
        let max_x = ((bounds.max_lat - bx0) / (bx1 - bx0) * w).round();
        let max_y = ((by1 - bounds.min_lng) / (by1 - by0) * h).round();
        let min_y = ((by1 - bounds.max_lng) / (by1 - by0) * h).round();

        let edges = [min_x, min_y, max_x, max_y];
        let inside = edges.iter().all(|e| e.is_finite())
            && min_x >= 0.0
            && min_y >= 0.0
            && max_x <= w
            && max_y <= h
            && max_x - min_x >= 1.0
            && max_y - min_y >= 1.0;

        if !inside {
            return Err(Error::raster(
                "locating window",
                format!(
                    "bounds {:?} resolve to pixel edges {:?}, outside of the {}x{} raster",
                    bounds, edges, dims.0, dims.1
                ),
            ));
        }

        // rounded edges are pixel boundaries, the last pixel sits one before the max edge
        Ok(Window::new(
            min_x as u32,
            min_y as u32,
            max_x as u32 - 1,
            max_y as u32 - 1,
        ))
    }

    /// Partition the window into `cx * cy` chunks.
    ///
    /// Each axis is divided into fractional spans with floored boundaries. Every chunk after the
    /// first starts one sample past the previous chunk's end, so no sample is shared.
    /// Chunks are ordered with `nx` outermost.
    ///
    /// # Errors
    /// [`Error::Config`] if a count is zero or the window is too small to give every chunk a
    /// sample.
    pub fn chunks(&self, cx: u32, cy: u32) -> Result<Vec<Chunk>> {
        if cx == 0 || cy == 0 {
            return Err(Error::Config(format!(
                "chunk counts must be at least 1, found {}x{}",
                cx, cy
            )));
        }
        if self.is_empty() {
            return Err(Error::Config(format!("window {} is empty", self)));
        }

        let xs = spans(self.min_x, self.max_x, cx);
        let ys = spans(self.min_y, self.max_y, cy);

        if xs.iter().chain(&ys).any(|(a, b)| a > b) {
            return Err(Error::Config(format!(
                "window {} is too small to split into {}x{} chunks",
                self, cx, cy
            )));
        }

        let chunks = xs
            .iter()
            .enumerate()
            .flat_map(|(nx, &(min_x, max_x))| {
                ys.iter().enumerate().map(move |(ny, &(min_y, max_y))| Chunk {
                    nx: nx as u32,
                    ny: ny as u32,
                    window: Window::new(min_x, min_y, max_x, max_y),
                })
            })
            .collect();

        Ok(chunks)
    }
}

fn spans(min: u32, max: u32, count: u32) -> Vec<(u32, u32)> {
    let size = (max - min) as f64 / count as f64;
    (0..count)
        .map(|n| {
            let start = if n == 0 {
                0
            } else {
                (n as f64 * size).floor() as u32 + 1
            };
            let end = ((n + 1) as f64 * size).floor() as u32;
            (min + start, min + end)
        })
        .collect()
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}
