use crate::*;

/// Triangle represented by 3 points (A, B, C).
pub type Tri = [Point3; 3];

/// A single triangular face of a solid.
///
/// The vertices are ordered counter-clockwise when viewed from the side the normal points to.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Facet {
    normal: Point3,
    vertices: Tri,
}

impl Facet {
    /// Build a facet whose normal points to the same side as `outward`.
    ///
    /// The raw normal follows the right-hand rule over `p1 -> p2 -> p3`. If it points away from
    /// `outward` it is flipped, and `p2`/`p3` are swapped so the winding still matches the normal.
    /// When `outward` is exactly perpendicular to the face, the raw normal is kept.
    ///
    /// # Errors
    /// [`Error::DegenerateGeometry`] if any coordinate is non-finite or the points are collinear.
    pub fn new(p1: Point3, p2: Point3, p3: Point3, outward: Point3) -> Result<Self> {
        if ![p1, p2, p3].into_iter().all(Point::is_finite) {
            return Err(Error::degenerate(format!(
                "non-finite vertex in triangle {:?}",
                [p1, p2, p3]
            )));
        }

        let cross = xprod(p2.sub(p1), p3.sub(p1));
        let mag = cross.mag();
        if mag == 0.0 || !mag.is_finite() {
            return Err(Error::degenerate(format!(
                "triangle {:?} has no area",
                [p1, p2, p3]
            )));
        }

        // divide rather than scale by the reciprocal, axis aligned normals stay exact
        let n = cross.map(|c| c / mag);
        let d = dot_prod(n, outward);

        let facet = if d < 0.0 {
            Self {
                normal: n.neg_scale(1.0),
                vertices: [p1, p3, p2],
            }
        } else {
            Self {
                normal: n,
                vertices: [p1, p2, p3],
            }
        };

        Ok(facet)
    }

    /// Build a facet from parts that are already consistent, such as those read from a file.
    pub fn from_raw(normal: Point3, vertices: Tri) -> Self {
        Self { normal, vertices }
    }

    pub fn normal(&self) -> Point3 {
        self.normal
    }

    pub fn vertices(&self) -> Tri {
        self.vertices
    }

    /// Half the cross product of the edges, pointing along the winding.
    pub fn area_vector(&self) -> Point3 {
        let [a, b, c] = self.vertices;
        xprod(b.sub(a), c.sub(a)).scale(0.5)
    }

    pub fn area(&self) -> f64 {
        self.area_vector().mag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_agrees_with_hint() {
        let f = Facet::new(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        )
        .unwrap();
        assert_eq!(f.normal(), [0.0, 0.0, 1.0]);
        assert_eq!(
            f.vertices(),
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
        );
    }

    #[test]
    fn flipped_normal_reorders_vertices() {
        let f = Facet::new(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, -1.0],
        )
        .unwrap();
        assert_eq!(f.normal(), [0.0, 0.0, -1.0]);
        assert_eq!(
            f.vertices(),
            [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]
        );
        // winding agrees with the flipped normal
        let a = f.area_vector();
        assert!(dot_prod(a, f.normal()) > 0.0);
    }

    #[test]
    fn perpendicular_hint_keeps_raw_normal() {
        let f = Facet::new(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
        )
        .unwrap();
        assert_eq!(f.normal(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn unit_normal_for_sloped_triangle() {
        let f = Facet::new(
            [0.0, 0.0, 0.0],
            [3.0, 0.0, 4.0],
            [0.0, 2.0, 0.0],
            [0.0, 0.0, 1.0],
        )
        .unwrap();
        let [x, y, z] = f.normal();
        assert!((x - -0.8).abs() < 1e-12);
        assert!(y.abs() < 1e-12);
        assert!((z - 0.6).abs() < 1e-12);
        assert!((f.area() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let e = Facet::new(
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0],
            [2.0, 2.0, 2.0],
            [0.0, 0.0, 1.0],
        );
        assert!(matches!(e, Err(Error::DegenerateGeometry(_))));

        let e = Facet::new(
            [0.0, 0.0, 5.0],
            [1.0, 0.0, 5.0],
            [1.0, 0.0, 5.0],
            [0.0, 1.0, 0.0],
        );
        assert!(matches!(e, Err(Error::DegenerateGeometry(_))));
    }

    #[test]
    fn non_finite_points_are_degenerate() {
        let e = Facet::new(
            [0.0, 0.0, f64::NAN],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        );
        assert!(matches!(e, Err(Error::DegenerateGeometry(_))));

        let e = Facet::new(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, f64::INFINITY],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        );
        assert!(matches!(e, Err(Error::DegenerateGeometry(_))));
    }
}
