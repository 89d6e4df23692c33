use super::*;

/// A source of elevation samples with geographic metadata.
///
/// Samples are addressed by pixel column `x` and row `y`, row 0 being the northern edge.
pub trait Raster {
    /// Pixel `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    /// Geographic `[min x, min y, max x, max y]` of the whole raster.
    fn bbox(&self) -> [f64; 4];

    /// Pixel size in geographic units, if the raster declares one.
    fn resolution(&self) -> Option<[f64; 2]>;

    /// The declared no-data sentinel.
    fn no_data(&self) -> Option<f64>;

    /// Human readable projection, for diagnostics.
    fn projection(&self) -> Option<String> {
        None
    }

    /// Read the samples of a closed window.
    ///
    /// # Errors
    /// [`Error::RasterRead`] if the window does not fit the raster or decoding fails.
    fn read_window(&mut self, window: Window) -> Result<HeightGrid>;
}

impl<R: Raster + ?Sized> Raster for &mut R {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }
    fn bbox(&self) -> [f64; 4] {
        (**self).bbox()
    }
    fn resolution(&self) -> Option<[f64; 2]> {
        (**self).resolution()
    }
    fn no_data(&self) -> Option<f64> {
        (**self).no_data()
    }
    fn projection(&self) -> Option<String> {
        (**self).projection()
    }
    fn read_window(&mut self, window: Window) -> Result<HeightGrid> {
        (**self).read_window(window)
    }
}

pub(crate) fn check_window(window: Window, (w, h): (u32, u32)) -> Result<()> {
    if window.fits(w, h) {
        Ok(())
    } else {
        Err(Error::raster(
            "reading window",
            format!("window {} lies outside the {}x{} raster", window, w, h),
        ))
    }
}

/// A raster held entirely in memory.
///
/// Useful for tests and for elevation data produced by other means.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRaster {
    grid: HeightGrid,
    bbox: [f64; 4],
    resolution: Option<[f64; 2]>,
    no_data: Option<f64>,
}

impl GridRaster {
    /// Wrap `grid`, spanning the geographic `bbox`.
    pub fn new(grid: HeightGrid, bbox: [f64; 4]) -> Self {
        Self {
            grid,
            bbox,
            resolution: None,
            no_data: None,
        }
    }

    /// Declare the pixel size rather than deriving it from the bounding box.
    pub fn with_resolution(mut self, resolution: [f64; 2]) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn with_no_data(mut self, no_data: f64) -> Self {
        self.no_data = Some(no_data);
        self
    }

    pub fn grid(&self) -> &HeightGrid {
        &self.grid
    }
}

impl Raster for GridRaster {
    fn dimensions(&self) -> (u32, u32) {
        (self.grid.width() as u32, self.grid.height() as u32)
    }

    fn bbox(&self) -> [f64; 4] {
        self.bbox
    }

    fn resolution(&self) -> Option<[f64; 2]> {
        let (w, h) = self.dimensions();
        if self.resolution.is_some() || w == 0 || h == 0 {
            return self.resolution;
        }
        let [x0, y0, x1, y1] = self.bbox;
        Some([(x1 - x0) / w as f64, (y1 - y0) / h as f64])
    }

    fn no_data(&self) -> Option<f64> {
        self.no_data
    }

    fn read_window(&mut self, window: Window) -> Result<HeightGrid> {
        check_window(window, self.dimensions())?;
        let (x0, y0) = (window.min_x as usize, window.min_y as usize);
        Ok(HeightGrid::from_fn(
            window.width(),
            window.height(),
            |x, y| self.grid.get(x0 + x, y0 + y),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster() -> GridRaster {
        let g = HeightGrid::from_fn(4, 3, |x, y| (y * 10 + x) as f64);
        GridRaster::new(g, [100.0, -10.0, 104.0, -7.0])
    }

    #[test]
    fn metadata() {
        let r = raster();
        assert_eq!(r.dimensions(), (4, 3));
        assert_eq!(r.resolution(), Some([1.0, 1.0]));
        assert_eq!(r.no_data(), None);
        let r = r.with_no_data(-9999.0).with_resolution([0.5, 0.25]);
        assert_eq!(r.no_data(), Some(-9999.0));
        assert_eq!(r.resolution(), Some([0.5, 0.25]));
    }

    #[test]
    fn windows_are_inclusive() {
        let mut r = raster();
        let g = r.read_window(Window::new(1, 1, 3, 2)).unwrap();
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 2);
        assert_eq!(g.zs(), &[11.0, 12.0, 13.0, 21.0, 22.0, 23.0]);

        let g = r.read_window(Window::new(0, 0, 3, 2)).unwrap();
        assert_eq!(&g, r.grid());
    }

    #[test]
    fn window_outside_raster() {
        let mut r = raster();
        let e = r.read_window(Window::new(2, 0, 4, 2));
        assert!(matches!(e, Err(Error::RasterRead { .. })));
        let e = r.read_window(Window::new(0, 2, 3, 3));
        assert!(matches!(e, Err(Error::RasterRead { .. })));
    }

    #[test]
    fn read_through_mut_ref() {
        fn corner<R: Raster>(mut r: R) -> Result<HeightGrid> {
            r.read_window(Window::new(0, 0, 0, 0))
        }
        let mut r = raster();
        let g = corner(&mut r).unwrap();
        assert_eq!(g.zs(), &[0.0]);
    }
}
