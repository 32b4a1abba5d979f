mod core;
mod grid;
mod hermite;
mod lattice;
mod mesh;
mod tessellation;
mod triangulation;

pub use self::core::{Mat4, Tolerance, Vec2, dot4, lerp};
pub use grid::Grid;
pub use hermite::{
    ColorChannel, GeomChannel, HERMITE_BASIS, HERMITE_BASIS_T, color_coefficients, color_point,
    evaluate_channel, geometry_coefficients, power_basis, surface_point,
};
pub use lattice::{ControlLattice, ControlPoint, patch_corners, patch_counts, uniform_lattice};
pub use mesh::{GradientMesh, mesh_from_dense_grids, tessellate};
pub use tessellation::{TessellationError, dense_dimensions, sample_lattice};
pub use triangulation::{triangle_count_for, triangle_list};

#[cfg(test)]
mod tests;
