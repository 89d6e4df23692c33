use crate::*;

/// A named, ordered collection of facets that together bound a volume.
#[derive(Debug, PartialEq, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Solid {
    name: String,
    facets: Vec<Facet>,
}

impl Solid {
    pub fn new(name: impl Into<String>, facets: Vec<Facet>) -> Self {
        Self {
            name: name.into(),
            facets,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn facet_len(&self) -> usize {
        self.facets.len()
    }

    pub fn tris(&self) -> impl ExactSizeIterator<Item = Tri> + '_ {
        self.facets.iter().map(Facet::vertices)
    }

    /// Signed volume enclosed by the facets.
    ///
    /// Positive when the solid is closed and its facets wind outward.
    /// Sums the tetrahedra formed by each facet and the first vertex of the solid.
    pub fn volume(&self) -> f64 {
        let Some(o) = self.facets.first().map(|f| f.vertices()[0]) else {
            return 0.0;
        };

        self.tris()
            .map(|[a, b, c]| dot_prod(a.sub(o), xprod(b.sub(o), c.sub(o))))
            .sum::<f64>()
            / 6.0
    }

    /// Sum of every facet's area vector. A closed surface sums to zero.
    pub fn area_vector_sum(&self) -> Point3 {
        self.facets
            .iter()
            .map(Facet::area_vector)
            .fold(Point3::zero(), Point3::add)
    }

    /// Surface area of all facets.
    pub fn area(&self) -> f64 {
        self.facets.iter().map(Facet::area).sum()
    }

    /// Returns if the facets bound a volume with outward facing normals.
    ///
    /// The check is tolerant of T-junctions: it tests that the area vectors cancel out and the
    /// enclosed volume is positive, `tolerance` being relative to the surface area.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        let area = self.area();
        area > 0.0
            && self.area_vector_sum().mag() <= tolerance * area
            && self.volume() > 0.0
    }
}

impl Aabb for Solid {
    fn aabb(&self) -> Extents3 {
        self.tris().flatten().collect()
    }
}

impl FromIterator<Facet> for Solid {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Facet>,
    {
        Self {
            name: String::new(),
            facets: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetrahedron() -> Solid {
        let o = [0.0, 0.0, 0.0];
        let x = [1.0, 0.0, 0.0];
        let y = [0.0, 1.0, 0.0];
        let z = [0.0, 0.0, 1.0];
        let c = [0.25; 3];
        // outward is away from the centroid
        let out = |a: Point3, b: Point3, d: Point3| a.add(b).add(d).scale(1.0 / 3.0).sub(c);
        let facets = [[o, x, y], [o, y, z], [o, z, x], [x, y, z]]
            .into_iter()
            .map(|[a, b, d]| Facet::new(a, b, d, out(a, b, d)).unwrap())
            .collect();
        Solid::new("tet", facets)
    }

    #[test]
    fn tetrahedron_volume() {
        let t = tetrahedron();
        assert_eq!(t.facet_len(), 4);
        assert!((t.volume() - 1.0 / 6.0).abs() < 1e-12);
        assert!(t.area_vector_sum().mag() < 1e-12);
        assert!(t.is_closed(1e-9));
    }

    #[test]
    fn open_surface_is_not_closed() {
        let mut facets = tetrahedron().facets().to_vec();
        facets.pop();
        let s = Solid::new("open", facets);
        assert!(!s.is_closed(1e-9));
    }

    #[test]
    fn inverted_solid_is_not_closed() {
        let facets = tetrahedron()
            .facets()
            .iter()
            .map(|f| {
                let [a, b, c] = f.vertices();
                Facet::from_raw(f.normal().neg_scale(1.0), [a, c, b])
            })
            .collect::<Solid>();
        assert!(facets.volume() < 0.0);
        assert!(!facets.is_closed(1e-9));
    }

    #[test]
    fn solid_aabb() {
        let t = tetrahedron();
        let e = t.aabb();
        assert_eq!(e.origin, [0.0; 3]);
        assert_eq!(e.max(), [1.0; 3]);
        assert_eq!(Solid::default().aabb(), Extents3::zero());
    }
}
