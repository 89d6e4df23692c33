//! Turn a height grid into a closed solid.
//!
//! # Coordinate convention
//!
//! Mesh coordinates are in grid units until the [`Scale`] is applied:
//! - x is the grid column, `0 ..= width - 1`,
//! - y is `height - row`, so row 0 sits at `y = height` and the last row at `y = 1`,
//! - z is the sample, or the base level for floor vertices.
//!
//! The solid therefore spans `[0, width - 1] x [1, height]` in plan. Each wall's outward
//! direction points away from that rectangle: north is `+y` (row 0), south is `-y`
//! (last row), west is `-x` (column 0) and east is `+x` (last column).
use crate::*;

const UP: Point3 = [0.0, 0.0, 1.0];
const DOWN: Point3 = [0.0, 0.0, -1.0];
const NORTH: Point3 = [0.0, 1.0, 0.0];
const SOUTH: Point3 = [0.0, -1.0, 0.0];
const WEST: Point3 = [-1.0, 0.0, 0.0];
const EAST: Point3 = [1.0, 0.0, 0.0];

/// Read-only state shared by every chunk of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshContext {
    pub scale: Scale,
    /// The floor elevation, in height units (before scaling).
    pub base: f64,
}

/// The number of facets [`mesh`] emits for a `width` by `height` grid.
pub fn facet_count(width: usize, height: usize) -> usize {
    let (w, h) = (width.saturating_sub(1), height.saturating_sub(1));
    2 * (w * h + 2 * w + 2 * h + 1)
}

/// Mesh `grid` into a closed solid named `name`.
///
/// Facets are emitted as the top surface, the north, south, west and east skirts, and then the
/// bottom. Skirts drop from the grid's edge samples to the base level, the bottom is a single
/// quad at the base level.
///
/// # Errors
/// [`Error::DegenerateGeometry`] if the grid is smaller than 2x2, or a facet has no area (such as
/// a skirt where an edge sample sits exactly on the base level) or non-finite coordinates.
pub fn mesh(grid: &HeightGrid, ctx: &MeshContext, name: impl Into<String>) -> Result<Solid> {
    let (xdim, ydim) = (grid.width(), grid.height());
    if xdim < 2 || ydim < 2 {
        return Err(Error::degenerate(format!(
            "a {}x{} grid cannot be meshed, at least 2x2 samples are needed",
            xdim, ydim
        )));
    }

    let mut facets = Vec::with_capacity(facet_count(xdim, ydim));
    let mut quad = |p1, p2, p3, p4, outward| -> Result<()> {
        facets.extend(ctx.scale.tessellate(p1, p2, p3, p4, outward)?);
        Ok(())
    };

    let base = ctx.base;
    let top = ydim as f64;
    // grid location to mesh point
    let pt = |x: usize, row: usize| [x as f64, (ydim - row) as f64, grid.get(x, row)];
    let floor = |x: usize, y: f64| [x as f64, y, base];

    // top surface
    for x in 0..xdim - 1 {
        for y in 0..ydim - 1 {
            quad(pt(x, y), pt(x + 1, y), pt(x + 1, y + 1), pt(x, y + 1), UP)?;
        }
    }

    // north skirt, first row
    for x in 0..xdim - 1 {
        quad(
            pt(x, 0),
            pt(x + 1, 0),
            floor(x + 1, top),
            floor(x, top),
            NORTH,
        )?;
    }

    // south skirt, last row
    let last = ydim - 1;
    for x in 0..xdim - 1 {
        quad(
            pt(x, last),
            pt(x + 1, last),
            floor(x + 1, 1.0),
            floor(x, 1.0),
            SOUTH,
        )?;
    }

    // west and east skirts, walked from the southern row up
    let east = xdim - 1;
    for (col, outward) in [(0, WEST), (east, EAST)] {
        for row in (1..ydim).rev() {
            let (lo, hi) = (pt(col, row), pt(col, row - 1));
            quad(lo, hi, floor(col, hi[1]), floor(col, lo[1]), outward)?;
        }
    }

    // bottom
    quad(
        floor(0, 1.0),
        floor(east, 1.0),
        floor(east, top),
        floor(0, top),
        DOWN,
    )?;

    debug_assert_eq!(facets.len(), facet_count(xdim, ydim));

    Ok(Solid::new(name, facets))
}
