use crate::*;

/// A row-major grid of elevation samples.
///
/// Row 0 is the northern-most row of the raster window.
///
/// > `PartialEq` is derived and is _exact_ on the float values.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeightGrid {
    /// The **X** count, such that the zs are stored row-first.
    stride: usize,

    /// The z values.
    zs: Vec<f64>,
}

impl HeightGrid {
    /// Create a grid from row-major samples.
    ///
    /// # Errors
    /// The sample count has to be exactly `width * height`.
    pub fn new(width: usize, height: usize, zs: Vec<f64>) -> Result<Self> {
        if width.checked_mul(height) != Some(zs.len()) {
            return Err(Error::degenerate(format!(
                "a {}x{} grid needs {} samples, found {}",
                width,
                height,
                width.saturating_mul(height),
                zs.len()
            )));
        }

        Ok(Self { stride: width, zs })
    }

    /// Build a grid by evaluating `f(x, y)` for every sample.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let zs = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self { stride: width, zs }
    }

    /// The number of samples in the x-axis.
    pub fn width(&self) -> usize {
        self.stride
    }

    /// The number of samples in the y-axis.
    pub fn height(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.zs.len() / self.stride
        }
    }

    pub fn len(&self) -> usize {
        self.zs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zs.is_empty()
    }

    /// The sample at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics if the location is outside the grid.
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.zs[self.idx(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, z: f64) {
        let idx = self.idx(x, y);
        self.zs[idx] = z;
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        if x >= self.stride {
            panic!("x value '{}' is outside grid bounds", x);
        }
        let a = self.stride * y;
        if a >= self.zs.len() {
            panic!("y value '{}' is outside grid bounds", y);
        }

        a + x
    }

    /// The row-major samples.
    pub fn zs(&self) -> &[f64] {
        &self.zs
    }

    /// Multiply every sample by `k`.
    pub fn scale_heights(mut self, k: f64) -> Self {
        self.zs.iter_mut().for_each(|z| *z *= k);
        self
    }

    /// Count the samples equal to the `no_data` sentinel.
    pub fn count_no_data(&self, no_data: f64) -> usize {
        self.zs.iter().filter(|&&z| is_no_data(z, no_data)).count()
    }

    /// Replace every `no_data` sample with the mean of its valid neighbours.
    ///
    /// Neighbours are the 8 surrounding samples. Filling repeats, so holes wider than one sample
    /// fill in from their edges. Returns the number of samples replaced.
    ///
    /// # Errors
    /// If the grid has no valid sample at all there is nothing to fill from.
    pub fn fill_no_data(&mut self, no_data: f64) -> Result<usize> {
        let (w, h) = (self.width(), self.height());
        let mut holes = (0..self.zs.len())
            .filter(|&i| is_no_data(self.zs[i], no_data))
            .collect::<Vec<_>>();
        let total = holes.len();

        if total == 0 {
            return Ok(0);
        }
        if total == self.zs.len() {
            return Err(Error::raster(
                "no-data fill",
                "every sample in the window is no-data",
            ));
        }

        while !holes.is_empty() {
            // resolve against a snapshot so fills within a pass do not feed each other
            let fills = holes
                .iter()
                .map(|&i| {
                    let (x, y) = (i % w, i / w);
                    let (sum, n) = neighbours(x, y, w, h)
                        .map(|(x, y)| self.zs[y * w + x])
                        .filter(|&z| !is_no_data(z, no_data))
                        .fold((0.0, 0usize), |(s, n), z| (s + z, n + 1));
                    (n > 0).then(|| (i, sum / n as f64))
                })
                .collect::<Vec<_>>();

            let before = holes.len();
            for (i, z) in fills.iter().flatten() {
                self.zs[*i] = *z;
            }
            holes.retain(|&i| is_no_data(self.zs[i], no_data));

            debug_assert!(holes.len() < before, "every pass fills at least one hole");
        }

        Ok(total)
    }
}

fn is_no_data(z: f64, no_data: f64) -> bool {
    // a NaN sentinel never compares equal
    z == no_data || (no_data.is_nan() && z.is_nan())
}

fn neighbours(x: usize, y: usize, w: usize, h: usize) -> impl Iterator<Item = (usize, usize)> {
    let xs = x.saturating_sub(1)..=(x + 1).min(w - 1);
    let ys = y.saturating_sub(1)..=(y + 1).min(h - 1);
    ys.flat_map(move |ny| xs.clone().map(move |nx| (nx, ny)))
        .filter(move |&p| p != (x, y))
}
