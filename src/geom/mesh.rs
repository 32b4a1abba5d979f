use super::grid::Grid;
use super::lattice::ControlLattice;
use super::tessellation::{TessellationError, sample_lattice};
use super::triangulation::triangle_list;

/// A finished gradient mesh: a non-indexed triangle list with interleaved
/// per-vertex color, ready to hand to a rendering sink.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GradientMesh {
    pub positions: Vec<[f64; 3]>,
    pub colors: Vec<[f64; 3]>,
}

impl GradientMesh {
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, colors: Vec<[f64; 3]>) -> Self {
        Self { positions, colors }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns true if any vertex position or color contains NaN or Inf.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .chain(self.colors.iter())
            .any(|v| !v[0].is_finite() || !v[1].is_finite() || !v[2].is_finite())
    }

    /// Returns true if the vertex list is a whole number of triangles.
    #[must_use]
    pub fn has_triangle_vertices(&self) -> bool {
        self.positions.len() % 3 == 0
    }

    /// Returns true if the color buffer is absent or parallel to positions.
    #[must_use]
    pub fn has_matching_colors(&self) -> bool {
        self.colors.is_empty() || self.colors.len() == self.positions.len()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.has_triangle_vertices() {
            return Err("mesh vertices are not a triangle list (len % 3 != 0)".to_string());
        }
        if !self.has_matching_colors() {
            return Err("mesh color buffer does not match vertex count".to_string());
        }
        if self.has_invalid_vertices() {
            return Err("mesh has invalid vertex data (NaN/Inf)".to_string());
        }
        Ok(())
    }

    /// Returns the position buffer as a flat slice: `[x0, y0, z0, x1, ...]`.
    ///
    /// This is a zero-copy view over `positions`, useful for wasm/JS
    /// adapters that expect packed numeric buffers.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<3>(&self.positions)
    }

    /// Returns the color buffer as a flat slice: `[r0, g0, b0, r1, ...]`.
    #[must_use]
    pub fn colors_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<3>(&self.colors)
    }
}

fn flatten_f64_array_slice<const N: usize>(data: &[[f64; N]]) -> &[f64] {
    let count = data.len().checked_mul(N).unwrap_or(0);
    let ptr = data.as_ptr().cast::<f64>();
    // SAFETY: `[[f64; N]]` is stored contiguously, and we compute the element count as `len * N`.
    unsafe { std::slice::from_raw_parts(ptr, count) }
}

/// Tessellate a control lattice into a drawable gradient mesh.
///
/// This is the crate's core operation: sample every patch on a uniform
/// `subdivisions` × `subdivisions` grid, then triangulate the dense samples
/// into a non-indexed triangle list with per-vertex color. All-or-nothing:
/// on error no partial mesh is produced.
///
/// # Errors
/// [`TessellationError::InvalidSubdivision`] when `subdivisions < 2`.
pub fn tessellate(
    lattice: &ControlLattice,
    subdivisions: usize,
) -> Result<GradientMesh, TessellationError> {
    let (points, colors) = sample_lattice(lattice, subdivisions)?;
    Ok(mesh_from_dense_grids(&points, Some(&colors)))
}

/// Triangulate already-sampled dense grids. Split out from [`tessellate`]
/// so callers that keep dense grids around (or sample them differently)
/// can still produce a mesh.
#[must_use]
pub fn mesh_from_dense_grids(
    points: &Grid<[f64; 3]>,
    colors: Option<&Grid<[f64; 3]>>,
) -> GradientMesh {
    let (positions, vertex_colors) = triangle_list(points, colors);
    GradientMesh::new(positions, vertex_colors)
}
