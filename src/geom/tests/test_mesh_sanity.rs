use crate::geom::{
    GradientMesh, Grid, mesh_from_dense_grids, sample_lattice, tessellate, uniform_lattice,
};

#[test]
fn tessellated_mesh_validates() {
    let mesh = tessellate(&uniform_lattice(3, 3), 4).unwrap();

    assert!(mesh.validate().is_ok());
    assert!(mesh.has_triangle_vertices());
    assert!(mesh.has_matching_colors());
    assert_eq!(mesh.vertex_count(), mesh.triangle_count() * 3);
}

#[test]
fn flat_views_are_packed_triples() {
    let mesh = tessellate(&uniform_lattice(2, 2), 2).unwrap();

    let flat = mesh.positions_flat();
    assert_eq!(flat.len(), mesh.vertex_count() * 3);
    assert_eq!(flat[0], mesh.positions[0][0]);
    assert_eq!(flat[1], mesh.positions[0][1]);
    assert_eq!(flat[2], mesh.positions[0][2]);
    assert_eq!(flat[3], mesh.positions[1][0]);

    assert_eq!(mesh.colors_flat().len(), mesh.vertex_count() * 3);
}

#[test]
fn mesh_without_colors_still_validates() {
    let (points, _colors) = sample_lattice(&uniform_lattice(2, 2), 3).unwrap();
    let mesh = mesh_from_dense_grids(&points, None);

    assert!(mesh.colors.is_empty());
    assert!(mesh.validate().is_ok());
    assert_eq!(mesh.triangle_count(), 8);
}

#[test]
fn validation_flags_broken_buffers() {
    let ragged = GradientMesh::new(vec![[0.0; 3]; 4], Vec::new());
    assert!(ragged.validate().unwrap_err().contains("triangle list"));

    let mismatched = GradientMesh::new(vec![[0.0; 3]; 3], vec![[0.0; 3]; 2]);
    assert!(mismatched.validate().unwrap_err().contains("color buffer"));

    let poisoned = GradientMesh::new(vec![[f64::NAN; 3]; 3], vec![[0.0; 3]; 3]);
    assert!(poisoned.has_invalid_vertices());
    assert!(poisoned.validate().is_err());
}

#[test]
fn empty_mesh_is_valid() {
    let mesh = mesh_from_dense_grids(&Grid::new(0, 0), None);
    assert!(mesh.validate().is_ok());
    assert_eq!(mesh.triangle_count(), 0);
}
