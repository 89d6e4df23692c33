use std::ops;

pub trait Point: Copy + Sized + IntoIterator<Item = f64> {
    /// Set all the values to this value.
    fn all(v: f64) -> Self;

    /// Set all values to zero.
    fn zero() -> Self {
        Self::all(0.)
    }

    /// Set all values to one.
    fn one() -> Self {
        Self::all(1.)
    }

    /// Scale point by multiplying all dimensions by `scalar`.
    fn scale(self, scalar: f64) -> Self;

    /// Negate the point and scale it by `scalar`.
    ///
    /// Used to flip a normal with a sign, `neg_scale(-1.0)` leaves the point untouched.
    fn neg_scale(self, scalar: f64) -> Self {
        self.scale(-scalar)
    }

    /// Calculate the magnitude of the vector.
    fn mag(self) -> f64 {
        self.into_iter()
            .zip(self)
            .map(|(a, b)| a * b)
            .sum::<f64>()
            .sqrt()
    }

    /// Normalise the vector by the magnitude.
    ///
    /// A zero length vector produces NaNs, check [`Point::mag`] first.
    fn unit(self) -> Self {
        self.scale(self.mag().recip())
    }

    /// Multiply each dimension with the matching dimension of `b`.
    fn mul_components(self, b: Self) -> Self {
        xfm(self, b, ops::Mul::mul)
    }

    /// Returns if every dimension is a finite number.
    fn is_finite(self) -> bool {
        self.into_iter().all(f64::is_finite)
    }

    /// Return the minimum of each dimension.
    fn min_all(self, b: Self) -> Self {
        xfm(self, b, f64::min)
    }

    /// Return the maximum of each dimension.
    fn max_all(self, b: Self) -> Self {
        xfm(self, b, f64::max)
    }

    /// Perform a transformation on each pair of dimensions.
    fn xfm<F: Fn(f64, f64) -> f64>(self, b: Self, f: F) -> Self;
}

pub trait Add<Rhs = Self> {
    fn add(self, rhs: Rhs) -> Self;
    fn sub(self, rhs: Rhs) -> Self
    where
        Self: Sized + Copy,
        Rhs: Point,
    {
        self.add(rhs.scale(-1.0))
    }
}

/// 3D Point (X,Y,Z).
pub type Point3 = [f64; 3];

impl Add for Point3 {
    fn add(self, rhs: Self) -> Self {
        Self::xfm(self, rhs, ops::Add::add)
    }

    fn sub(self, rhs: Self) -> Self {
        Self::xfm(self, rhs, ops::Sub::sub)
    }
}
impl Point for Point3 {
    fn all(v: f64) -> Self {
        [v; 3]
    }
    fn scale(self, scalar: f64) -> Self {
        self.map(|f| f * scalar)
    }
    fn xfm<F: Fn(f64, f64) -> f64>(self, b: Self, f: F) -> Self {
        let [ax, ay, az] = self;
        let [bx, by, bz] = b;
        [f(ax, bx), f(ay, by), f(az, bz)]
    }
}

pub fn dot_prod(a: Point3, b: Point3) -> f64 {
    a.into_iter().zip(b).map(|(a, b)| a * b).sum()
}

#[allow(clippy::many_single_char_names)]
pub fn xprod(a: Point3, b: Point3) -> Point3 {
    let [ax, ay, az] = a;
    let [bx, by, bz] = b;
    let x = ay * bz - az * by;
    let y = az * bx - ax * bz;
    let z = ax * by - ay * bx;
    [x, y, z]
}

/// Helper function which effectively transforms to [`Point::xfm`].
#[inline(always)]
pub fn xfm<P: Point, F: Fn(f64, f64) -> f64>(a: P, b: P, f: F) -> P {
    P::xfm(a, b, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_adding() {
        let p = [0.0, 1.0, 5.0].add([3.0, 1.0, 5.0]);
        assert_eq!(p, [3.0, 2.0, 10.0]);

        let p = [0.0, 1.0, 5.0].sub([3.0, 1.0, 2.0]);
        assert_eq!(p, [-3.0, 0.0, 3.0]);
    }

    #[test]
    fn point_scaling() {
        let p = [-2.0, 0.5, 3.0].scale(-0.5);
        assert_eq!(p, [1.0, -0.25, -1.5]);

        let p = [-2.0, 0.5, 3.0].neg_scale(2.0);
        assert_eq!(p, [4.0, -1.0, -6.0]);

        let p = [-2.0, 0.5, 3.0].neg_scale(-1.0);
        assert_eq!(p, [-2.0, 0.5, 3.0]);
    }

    #[test]
    fn component_multiplication() {
        let p = [2.0, -3.0, 0.5].mul_components([30.9, 2.0, 4.0]);
        assert_eq!(p, [61.8, -6.0, 2.0]);
    }

    #[test]
    fn xproduct_test() {
        let v = xprod([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(v, [0.0, 0.0, 1.0]);

        let v = xprod([0.0, 1.0, 0.0], [1.0, 0.0, 0.0]);
        assert_eq!(v, [0.0, 0.0, -1.0]);

        let v = xprod([1.0, 1.0, 0.0], [-1.0, 1.0, 0.0]);
        assert_eq!(v, [0.0, -0.0, 2.0]);
    }

    #[test]
    fn dot_product() {
        assert_eq!(dot_prod([1.0, 2.0, 3.0], [4.0, -5.0, 6.0]), 12.0);
        assert_eq!(dot_prod([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), 0.0);
    }

    #[test]
    fn mag_testing() {
        let m = [2.0, 3.0, 6.0].mag() - 7.0;
        assert!(m.abs() < 1e-11);

        let m = [2.0, -3.0, 6.0].mag() - 7.0;
        assert!(m.abs() < 1e-11);

        let m = [-2.0, -3.0, -6.0].mag() - 7.0;
        assert!(m.abs() < 1e-11);
    }

    #[test]
    fn unit_vector() {
        let u = [0.0, 0.0, 2.0].unit();
        assert_eq!(u, [0.0, 0.0, 1.0]);

        let u = [0.0, 0.0, 0.0].unit();
        assert!(!u.is_finite());
    }
}
