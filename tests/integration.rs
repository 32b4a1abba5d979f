use gradient_mesh_engine::Engine;
use gradient_mesh_engine::geom::{Tolerance, tessellate, uniform_lattice};

#[test]
fn engine_initializes_with_a_seeded_lattice() {
    let engine = Engine::new(3, 3, 4).expect("engine");

    assert_eq!(engine.lattice_width(), 3);
    assert_eq!(engine.lattice_height(), 3);
    assert_eq!(engine.subdivisions(), 4);
    assert!(!engine.wireframe());
}

#[test]
fn constructor_rejects_degenerate_subdivisions() {
    assert!(Engine::new(3, 3, 1).is_err());
    assert!(Engine::new(3, 3, 0).is_err());
}

#[test]
fn buffers_are_only_available_after_evaluation() {
    let mut engine = Engine::new(3, 3, 4).expect("engine");
    assert!(engine.position_buffer().is_err());

    engine.evaluate().expect("evaluate");

    // W=H=3, S=4: dense grid 8x8, 49 cells, 98 triangles, 294 vertices.
    let positions = engine.position_buffer().expect("positions");
    let colors = engine.color_buffer().expect("colors");
    assert_eq!(positions.len(), 294 * 3);
    assert_eq!(colors.len(), positions.len());
}

#[test]
fn edits_invalidate_the_cached_mesh() {
    let mut engine = Engine::new(2, 2, 3).expect("engine");
    engine.evaluate().expect("evaluate");
    assert!(engine.position_buffer().is_ok());

    engine.move_handle(0, 0, 0.5, 0.5).expect("move");
    assert!(engine.position_buffer().is_err());

    engine.evaluate().expect("re-evaluate");
    assert!(engine.position_buffer().is_ok());
}

#[test]
fn subdivision_changes_resize_the_mesh() {
    let mut engine = Engine::new(2, 2, 2).expect("engine");
    engine.evaluate().expect("evaluate");
    let coarse = engine.position_buffer().expect("coarse").len();

    engine.set_subdivisions(5).expect("set subdivisions");
    engine.evaluate().expect("re-evaluate");
    let fine = engine.position_buffer().expect("fine").len();

    assert!(fine > coarse);
    assert!(engine.set_subdivisions(1).is_err());
}

#[test]
fn handle_edits_validate_their_node() {
    let mut engine = Engine::new(2, 2, 2).expect("engine");

    assert!(engine.move_handle(5, 0, 0.5, 0.5).is_err());
    assert!(engine.set_node_tangents(0, 4, 0.0, 0.0, 0.0, 0.0).is_err());
    assert!(
        engine
            .set_node_tangents(0, 0, f64::NAN, 0.0, 0.0, 0.0)
            .is_err()
    );
}

#[test]
fn node_colors_round_trip_through_hex() {
    let mut engine = Engine::new(2, 2, 2).expect("engine");

    engine.set_node_color(0, 0, "#ff0000").expect("set color");
    assert_eq!(engine.node_color_hex(0, 0).expect("hex"), "#ff0000");
    assert!(engine.set_node_color(0, 0, "#zzz").is_err());

    engine.evaluate().expect("evaluate");
    let colors = engine.color_buffer().expect("colors");
    // The (0,0) corner vertex carries the red node's color in linear space.
    assert!((f64::from(colors[0]) - 1.0).abs() < 1e-6);
    assert!(f64::from(colors[1]).abs() < 1e-6);
}

#[test]
fn handle_fractions_reflect_node_locations() {
    let mut engine = Engine::new(2, 2, 2).expect("engine");

    let corner = engine.handle_fraction(0, 0).expect("fraction");
    assert!((corner[0] - 0.0).abs() < 1e-12);
    assert!((corner[1] - 0.0).abs() < 1e-12);

    engine.move_handle(1, 1, 0.25, 0.75).expect("move");
    let moved = engine.handle_fraction(1, 1).expect("fraction");
    assert!((moved[0] - 0.25).abs() < 1e-12);
    assert!((moved[1] - 0.75).abs() < 1e-12);
}

#[test]
fn wireframe_flag_is_caller_owned_state() {
    let mut engine = Engine::new(2, 2, 2).expect("engine");
    engine.evaluate().expect("evaluate");
    let before = engine.position_buffer().expect("positions");

    engine.set_wireframe(true);
    assert!(engine.wireframe());

    // Toggling display state never touches the mesh.
    assert!(engine.position_buffer().is_ok());
    assert_eq!(engine.position_buffer().expect("positions"), before);
}

#[test]
fn engine_buffers_match_direct_tessellation() {
    let mut engine = Engine::new(3, 2, 3).expect("engine");
    engine.evaluate().expect("evaluate");
    let positions = engine.position_buffer().expect("positions");

    let mesh = tessellate(&uniform_lattice(3, 2), 3).expect("tessellate");
    let flat = mesh.positions_flat();
    assert_eq!(positions.len(), flat.len());

    let tol = Tolerance::LOOSE;
    for (engine_value, direct_value) in positions.iter().zip(flat.iter()) {
        assert!(tol.approx_eq_f64(f64::from(*engine_value), *direct_value));
    }
}
