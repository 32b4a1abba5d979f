use super::core::{Vec2, lerp};
use super::grid::Grid;

/// One node of the control lattice.
///
/// `location` is the node's position in the normalized [-1,1]² editing
/// square; `u_tangent` and `v_tangent` are the directional derivatives of
/// position with respect to the two parametric axes; `color` is linear RGB.
/// The mesh generator only ever reads control points — authoring them
/// (including tangent derivation) happens outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlPoint {
    pub location: Vec2,
    pub u_tangent: Vec2,
    pub v_tangent: Vec2,
    pub color: [f64; 3],
}

impl ControlPoint {
    #[must_use]
    pub const fn new(location: Vec2, u_tangent: Vec2, v_tangent: Vec2, color: [f64; 3]) -> Self {
        Self {
            location,
            u_tangent,
            v_tangent,
            color,
        }
    }

    /// A node at `location` with zero tangents and the given color.
    #[must_use]
    pub const fn at(location: Vec2, color: [f64; 3]) -> Self {
        Self::new(location, Vec2::ZERO, Vec2::ZERO, color)
    }
}

/// The control lattice: a grid of W × H control points whose adjacent
/// cells bound (W-1) × (H-1) bicubic patches. Interior nodes are shared by
/// up to four patches; that sharing is what makes seams positionally
/// continuous without any stitching step.
pub type ControlLattice = Grid<ControlPoint>;

/// Build an evenly spaced `width` × `height` lattice spanning [-1,1]² with
/// zero tangents and black nodes. This is the seed state an editor starts
/// from; callers then move handles and assign colors per node.
#[must_use]
pub fn uniform_lattice(width: usize, height: usize) -> ControlLattice {
    let mut lattice = Grid::new(width, height);
    lattice_positions(width, height, |x, y, location| {
        lattice.set(x, y, ControlPoint::at(location, [0.0, 0.0, 0.0]));
    });
    lattice
}

fn lattice_positions(width: usize, height: usize, mut block: impl FnMut(usize, usize, Vec2)) {
    for x in 0..width {
        for y in 0..height {
            let fx = if width > 1 {
                x as f64 / (width - 1) as f64
            } else {
                0.0
            };
            let fy = if height > 1 {
                y as f64 / (height - 1) as f64
            } else {
                0.0
            };
            block(x, y, Vec2::new(lerp(fx, -1.0, 1.0), lerp(fy, -1.0, 1.0)));
        }
    }
}

/// The number of patches a lattice defines per axis: (W-1) × (H-1),
/// saturating to zero for degenerate lattices (W < 2 or H < 2 is a valid
/// input that simply yields no patches).
#[must_use]
pub fn patch_counts(lattice: &ControlLattice) -> (usize, usize) {
    (
        lattice.width().saturating_sub(1),
        lattice.height().saturating_sub(1),
    )
}

/// The four control points bounding patch (x, y), in the patch's local
/// (u, v) frame: (p00, p01, p10, p11) where the first index runs along u
/// and the second along v.
#[must_use]
pub fn patch_corners(
    lattice: &ControlLattice,
    x: usize,
    y: usize,
) -> (&ControlPoint, &ControlPoint, &ControlPoint, &ControlPoint) {
    (
        lattice.get(x, y),
        lattice.get(x, y + 1),
        lattice.get(x + 1, y),
        lattice.get(x + 1, y + 1),
    )
}
