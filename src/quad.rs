use crate::*;

/// Metres covered by one degree of latitude.
pub const METRES_PER_DEGREE: f64 = 6_357_000.0 * 2.0 * std::f64::consts::PI / 360.0;

/// Pixel size of a one arc-second raster, in degrees.
pub const ARC_SECOND: f64 = 1.0 / 3600.0;

/// The componentwise scaling from (column, row, height) into output units.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scale(pub Point3);

impl Scale {
    /// Unit scaling, vertices are emitted in grid units.
    pub fn identity() -> Self {
        Scale(Point3::one())
    }

    /// Derive the scale from a geographic pixel size.
    ///
    /// `resolution` is the `[x, y]` pixel size in degrees, `latitude` the centre latitude used to
    /// shrink the x ground distance, and `height_scale` the vertical exaggeration.
    pub fn geographic(resolution: [f64; 2], latitude: f64, height_scale: f64) -> Self {
        let [rx, ry] = resolution.map(f64::abs);
        let y = ry * METRES_PER_DEGREE;
        let x = latitude.to_radians().cos() * rx * METRES_PER_DEGREE;
        Scale([x, y, height_scale])
    }

    /// Every component is finite and positive.
    ///
    /// A negative component mirrors the mesh and turns the facets inward.
    pub fn is_positive(&self) -> bool {
        self.0.iter().all(|&s| s.is_finite() && s > 0.0)
    }

    pub fn apply(&self, p: Point3) -> Point3 {
        p.mul_components(self.0)
    }

    /// Split the quadrilateral `p1 p2 p3 p4` into two facets across the `p1 - p3` diagonal.
    ///
    /// The points are given in grid units and are scaled before the facets are built, both facets
    /// use `outward` as their hint. The points need to be in a consistent winding order.
    pub fn tessellate(
        &self,
        p1: Point3,
        p2: Point3,
        p3: Point3,
        p4: Point3,
        outward: Point3,
    ) -> Result<[Facet; 2]> {
        let [p1, p2, p3, p4] = [p1, p2, p3, p4].map(|p| self.apply(p));
        let f1 = Facet::new(p1, p2, p3, outward)?;
        let f2 = Facet::new(p1, p3, p4, outward)?;
        Ok([f1, f2])
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tessellate_splits_on_first_diagonal() {
        let s = Scale([2.0, 3.0, 0.5]);
        let [a, b] = s
            .tessellate(
                [0.0, 0.0, 4.0],
                [1.0, 0.0, 4.0],
                [1.0, 1.0, 4.0],
                [0.0, 1.0, 4.0],
                [0.0, 0.0, 1.0],
            )
            .unwrap();

        assert_eq!(
            a.vertices(),
            [[0.0, 0.0, 2.0], [2.0, 0.0, 2.0], [2.0, 3.0, 2.0]]
        );
        assert_eq!(
            b.vertices(),
            [[0.0, 0.0, 2.0], [2.0, 3.0, 2.0], [0.0, 3.0, 2.0]]
        );
        assert_eq!(a.normal(), [0.0, 0.0, 1.0]);
        assert_eq!(b.normal(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn tessellate_honours_hint_for_either_winding() {
        let s = Scale::identity();
        let cw = s
            .tessellate(
                [0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0],
                [0.0, 0.0, -1.0],
            )
            .unwrap();
        let ccw = s
            .tessellate(
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, -1.0],
            )
            .unwrap();

        for f in cw.iter().chain(&ccw) {
            assert_eq!(f.normal()[2], -1.0);
            assert!(f.area_vector()[2] < 0.0);
        }
    }

    #[test]
    fn geographic_scale_of_one_arc_second() {
        let s = Scale::geographic([ARC_SECOND, -ARC_SECOND], 0.0, 2.0);
        let [x, y, z] = s.0;
        assert!((y - 30.82).abs() < 0.01);
        assert!((x - y).abs() < 1e-9);
        assert_eq!(z, 2.0);

        let s = Scale::geographic([ARC_SECOND, ARC_SECOND], 60.0, 1.0);
        let [x, y, _] = s.0;
        assert!((x - y * 0.5).abs() < 1e-9);
    }

    #[test]
    fn scale_past_the_pole_is_not_positive() {
        assert!(Scale::geographic([ARC_SECOND; 2], 89.9, 1.0).is_positive());
        // cos is negative beyond 90 degrees
        assert!(!Scale::geographic([ARC_SECOND; 2], 101.5, 1.0).is_positive());
        assert!(!Scale::geographic([ARC_SECOND; 2], 0.0, 0.0).is_positive());
        assert!(!Scale::geographic([f64::MAX; 2], 0.0, 1.0).is_positive());
    }
}
