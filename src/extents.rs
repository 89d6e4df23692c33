use crate::*;

/// An axis aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Extents3 {
    pub origin: Point3,
    pub size: Point3,
}

impl Extents3 {
    pub fn zero() -> Self {
        Self {
            origin: Point3::zero(),
            size: Point3::zero(),
        }
    }

    pub fn from_min_max(min: Point3, max: Point3) -> Self {
        let size = max.sub(min);

        Self { origin: min, size }
    }

    pub fn max(&self) -> Point3 {
        self.origin.add(self.size)
    }

    pub fn union(self, other: Self) -> Self {
        let origin = self.origin.min_all(other.origin);
        let max = self.max().max_all(other.max());
        let size = max.sub(origin);

        Self { origin, size }
    }
}

impl FromIterator<Point3> for Extents3 {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Point3>,
    {
        let mut iter = iter.into_iter();
        let Some(init) = iter.next() else {
            return Self::zero();
        };

        let (min, max) = iter.fold((init, init), |(min, max), p| {
            (min.min_all(p), max.max_all(p))
        });

        Self::from_min_max(min, max)
    }
}

/// Build the union of an iterator of [`Extents3`].
/// If the iterator is empty, a zero-sized extents about the origin is returned.
impl FromIterator<Self> for Extents3 {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Self>,
    {
        iter.into_iter()
            .reduce(Extents3::union)
            .unwrap_or_else(Extents3::zero)
    }
}

pub trait Aabb {
    fn aabb(&self) -> Extents3;
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;

    type P3 = (f64, f64, f64);

    fn to_p(p: P3) -> Point3 {
        [p.0, p.1, p.2]
    }

    #[quickcheck]
    fn union_starts_at_the_minimum(a: (P3, P3), b: (P3, P3)) -> TestResult {
        let ps = [a.0, a.1, b.0, b.1].map(to_p);
        if !ps.iter().all(|p| p.is_finite()) {
            return TestResult::discard();
        }

        let ea = Extents3::from_iter([ps[0], ps[1]]);
        let eb = Extents3::from_iter([ps[2], ps[3]]);
        let u = ea.union(eb);
        if !u.size.is_finite() {
            return TestResult::discard();
        }

        // compare against the min/max directly since size arithmetic can round
        let min = ps.iter().copied().reduce(Point3::min_all).unwrap();
        TestResult::from_bool(u.origin == min)
    }

    #[test]
    fn extents_of_points() {
        let e = Extents3::from_iter([[1.0, 5.0, -2.0], [3.0, 2.0, 4.0], [2.0, 3.0, 0.0]]);
        assert_eq!(e.origin, [1.0, 2.0, -2.0]);
        assert_eq!(e.max(), [3.0, 5.0, 4.0]);
        assert_eq!(e.size, [2.0, 3.0, 6.0]);

        assert_eq!(Extents3::from_iter(Vec::<Point3>::new()), Extents3::zero());
    }

    #[test]
    fn union_of_extents() {
        let a = Extents3::from_min_max([0.0; 3], [1.0; 3]);
        let b = Extents3::from_min_max([2.0, -1.0, 0.5], [3.0, 0.0, 0.75]);
        let u = [a, b].into_iter().collect::<Extents3>();
        assert_eq!(u.origin, [0.0, -1.0, 0.0]);
        assert_eq!(u.max(), [3.0, 1.0, 1.0]);
    }
}
