//! Dense sampling of the control lattice.
//!
//! Every patch is sampled on a uniform S × S parametric grid and the
//! results land in two dense grids (positions and colors) of
//! (W-1)·S × (H-1)·S samples. Patch (x, y) owns the dense column range
//! [x·S, (x+1)·S) and row range [y·S, (y+1)·S); no two patches write the
//! same cell, which is also what makes the per-patch fan-out under the
//! `parallel` feature safe without locking.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use thiserror::Error;

use super::core::Mat4;
use super::grid::Grid;
use super::hermite::{
    ColorChannel, GeomChannel, color_coefficients, color_point, geometry_coefficients,
    surface_point,
};
use super::lattice::{ControlLattice, patch_corners, patch_counts};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TessellationError {
    /// The per-patch sample count must be at least 2: parametric steps are
    /// `1 / (subdivisions - 1)`, so 1 would divide by zero and 0 produces
    /// nothing. Rejected before any arithmetic happens.
    #[error("subdivision count must be at least 2, got {0}")]
    InvalidSubdivision(usize),
}

/// Dense grid dimensions for a lattice at a given subdivision count:
/// ((W-1)·S, (H-1)·S), zero when the lattice has no patches.
#[must_use]
pub fn dense_dimensions(lattice: &ControlLattice, subdivisions: usize) -> (usize, usize) {
    let (patches_x, patches_y) = patch_counts(lattice);
    (patches_x * subdivisions, patches_y * subdivisions)
}

/// Sample every patch of `lattice` on a uniform `subdivisions` ×
/// `subdivisions` parametric grid.
///
/// Returns the dense position grid and the parallel dense color grid. A
/// lattice with fewer than 2 nodes on either axis has no patches and
/// yields empty grids, which is a valid result rather than an error.
///
/// # Errors
/// [`TessellationError::InvalidSubdivision`] when `subdivisions < 2`.
pub fn sample_lattice(
    lattice: &ControlLattice,
    subdivisions: usize,
) -> Result<(Grid<[f64; 3]>, Grid<[f64; 3]>), TessellationError> {
    if subdivisions < 2 {
        return Err(TessellationError::InvalidSubdivision(subdivisions));
    }

    let (patches_x, patches_y) = patch_counts(lattice);
    let (dense_w, dense_h) = dense_dimensions(lattice, subdivisions);

    let mut points: Grid<[f64; 3]> = Grid::new(dense_w, dense_h);
    let mut colors: Grid<[f64; 3]> = Grid::new(dense_w, dense_h);

    if patches_x == 0 || patches_y == 0 {
        return Ok((points, colors));
    }

    let mut coords = Vec::with_capacity(patches_x * patches_y);
    for x in 0..patches_x {
        for y in 0..patches_y {
            coords.push((x, y));
        }
    }

    for block in sample_patch_blocks(lattice, subdivisions, &coords) {
        block.write_into(subdivisions, &mut points, &mut colors);
    }

    Ok((points, colors))
}

/// One patch's worth of samples, u-major: sample (u_idx, v_idx) lives at
/// `u_idx * subdivisions + v_idx`.
struct PatchBlock {
    patch_x: usize,
    patch_y: usize,
    points: Vec<[f64; 3]>,
    colors: Vec<[f64; 3]>,
}

impl PatchBlock {
    fn write_into(
        &self,
        subdivisions: usize,
        points: &mut Grid<[f64; 3]>,
        colors: &mut Grid<[f64; 3]>,
    ) {
        for u_idx in 0..subdivisions {
            for v_idx in 0..subdivisions {
                let sample = u_idx * subdivisions + v_idx;
                let dense_x = self.patch_x * subdivisions + u_idx;
                let dense_y = self.patch_y * subdivisions + v_idx;
                points.set(dense_x, dense_y, self.points[sample]);
                colors.set(dense_x, dense_y, self.colors[sample]);
            }
        }
    }
}

#[cfg(feature = "parallel")]
fn sample_patch_blocks(
    lattice: &ControlLattice,
    subdivisions: usize,
    coords: &[(usize, usize)],
) -> Vec<PatchBlock> {
    coords
        .par_iter()
        .map(|&(x, y)| sample_patch(lattice, subdivisions, x, y))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn sample_patch_blocks(
    lattice: &ControlLattice,
    subdivisions: usize,
    coords: &[(usize, usize)],
) -> Vec<PatchBlock> {
    coords
        .iter()
        .map(|&(x, y)| sample_patch(lattice, subdivisions, x, y))
        .collect()
}

fn sample_patch(
    lattice: &ControlLattice,
    subdivisions: usize,
    patch_x: usize,
    patch_y: usize,
) -> PatchBlock {
    let (p00, p01, p10, p11) = patch_corners(lattice, patch_x, patch_y);

    let cx = geometry_coefficients(p00, p01, p10, p11, GeomChannel::X);
    let cy = geometry_coefficients(p00, p01, p10, p11, GeomChannel::Y);

    let cr = color_coefficients(p00, p01, p10, p11, ColorChannel::R);
    let cg = color_coefficients(p00, p01, p10, p11, ColorChannel::G);
    let cb = color_coefficients(p00, p01, p10, p11, ColorChannel::B);

    sample_coefficients(subdivisions, patch_x, patch_y, &cx, &cy, &cr, &cg, &cb)
}

#[allow(clippy::too_many_arguments)]
fn sample_coefficients(
    subdivisions: usize,
    patch_x: usize,
    patch_y: usize,
    cx: &Mat4,
    cy: &Mat4,
    cr: &Mat4,
    cg: &Mat4,
    cb: &Mat4,
) -> PatchBlock {
    let step = (subdivisions - 1) as f64;
    let mut points = Vec::with_capacity(subdivisions * subdivisions);
    let mut colors = Vec::with_capacity(subdivisions * subdivisions);

    for u_idx in 0..subdivisions {
        let u = u_idx as f64 / step;
        for v_idx in 0..subdivisions {
            let v = v_idx as f64 / step;
            points.push(surface_point(u, v, cx, cy));
            colors.push(color_point(u, v, cr, cg, cb));
        }
    }

    PatchBlock {
        patch_x,
        patch_y,
        points,
        colors,
    }
}
