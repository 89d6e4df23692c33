//! The flat floor every chunk sits on.

/// Running minimum and maximum of a set of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    /// An accumulator that has seen nothing.
    pub fn empty() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn push(&mut self, z: f64) {
        self.min = self.min.min(z);
        self.max = self.max.max(z);
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// The base level: 10% of the value range below the minimum.
    ///
    /// Returns `None` if no samples were seen.
    pub fn base(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.min - 0.1 * (self.max - self.min))
    }
}

impl Extend<f64> for MinMax {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        for z in iter {
            self.push(z);
        }
    }
}

impl FromIterator<f64> for MinMax {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        let mut mm = Self::empty();
        mm.extend(iter);
        mm
    }
}

/// Compute the base level of `samples`, `min - 0.1 * (max - min)`.
///
/// Every sample counts, including no-data sentinels. Returns `None` for an empty dataset.
///
/// # Example
/// ```rust
/// # use geostl::*;
/// assert_eq!(compute_base(&[10.0, 20.0, 15.0]), Some(9.0));
/// assert_eq!(compute_base(&[3.5; 4]), Some(3.5));
/// assert_eq!(compute_base(&[]), None);
/// ```
pub fn compute_base(samples: &[f64]) -> Option<f64> {
    samples.iter().copied().collect::<MinMax>().base()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;

    #[test]
    fn base_below_minimum() {
        assert_eq!(compute_base(&[0.0, 100.0]), Some(-10.0));
        assert_eq!(compute_base(&[-5.0, 15.0, 3.0]), Some(-7.0));
    }

    #[test]
    fn merge_matches_single_pass() {
        let a = [3.0, 8.0, -1.0].into_iter().collect::<MinMax>();
        let b = [12.0, 4.0].into_iter().collect::<MinMax>();
        let all = [3.0, 8.0, -1.0, 12.0, 4.0].into_iter().collect::<MinMax>();
        assert_eq!(a.merge(b), all);
        assert_eq!(MinMax::empty().merge(a), a);
    }

    #[quickcheck]
    fn base_formula(samples: Vec<i32>) -> TestResult {
        if samples.is_empty() {
            return TestResult::discard();
        }
        let zs = samples.iter().map(|&z| z as f64).collect::<Vec<_>>();
        let m = zs.iter().copied().fold(f64::INFINITY, f64::min);
        let mx = zs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let base = compute_base(&zs);
        TestResult::from_bool(base == Some(m - 0.1 * (mx - m)) && base.unwrap() <= m)
    }

    #[quickcheck]
    fn constant_dataset_base_is_the_value(z: i32, n: u8) -> bool {
        let zs = vec![z as f64; n as usize + 1];
        compute_base(&zs) == Some(z as f64)
    }
}
