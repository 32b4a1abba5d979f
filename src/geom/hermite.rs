//! Bicubic Hermite patch evaluation.
//!
//! One patch of the control lattice is a bicubic Hermite surface defined by
//! its four corner control points. Per scalar channel (x, y for geometry;
//! r, g, b for color) the corners contribute a 4×4 coefficient matrix `C`
//! holding boundary values and cross-tangents; the fixed basis-change
//! product `M_h · Cᵗ · M_hᵗ` converts it into power-basis coefficients, and
//! a sample at (u, v) is the bilinear form `V · A · U` with
//! `U = [u³, u², u, 1]` and `V = [v³, v², v, 1]`.
//!
//! Parameters outside [0,1] extrapolate the polynomial; the evaluator never
//! clamps. Evaluation at the four parametric corners reproduces the stored
//! corner values exactly, which is what makes adjacent patches meet
//! seamlessly when they share corner nodes.

use super::core::{Mat4, dot4};
use super::lattice::ControlPoint;

/// The Hermite basis-change matrix.
pub const HERMITE_BASIS: Mat4 = Mat4::from_rows([
    [2.0, -2.0, 1.0, 1.0],
    [-3.0, 3.0, -2.0, -1.0],
    [0.0, 0.0, 1.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
]);

/// Transpose of [`HERMITE_BASIS`].
pub const HERMITE_BASIS_T: Mat4 = HERMITE_BASIS.transposed();

/// Scalar channel selector for geometry coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeomChannel {
    X,
    Y,
}

impl GeomChannel {
    const fn axis(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }
}

/// Scalar channel selector for color coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    R,
    G,
    B,
}

impl ColorChannel {
    const fn index(self) -> usize {
        match self {
            Self::R => 0,
            Self::G => 1,
            Self::B => 2,
        }
    }
}

/// Build the geometry coefficient matrix for one patch and one channel.
///
/// Rows/columns 0–1 hold the four corner values of the selected location
/// component; rows 2–3 and columns 2–3 hold the matching u- and v-tangent
/// components. The corner arguments follow the patch's local frame: `p00`
/// at (u,v) = (0,0), `p01` at (0,1), `p10` at (1,0), `p11` at (1,1).
#[must_use]
pub fn geometry_coefficients(
    p00: &ControlPoint,
    p01: &ControlPoint,
    p10: &ControlPoint,
    p11: &ControlPoint,
    channel: GeomChannel,
) -> Mat4 {
    let axis = channel.axis();
    let l = |p: &ControlPoint| p.location.component(axis);
    let u = |p: &ControlPoint| p.u_tangent.component(axis);
    let v = |p: &ControlPoint| p.v_tangent.component(axis);

    Mat4::from_rows([
        [l(p00), l(p01), v(p00), v(p01)],
        [l(p10), l(p11), v(p10), v(p11)],
        [u(p00), u(p01), 0.0, 0.0],
        [u(p10), u(p11), 0.0, 0.0],
    ])
}

/// Build the color coefficient matrix for one patch and one channel.
///
/// Colors carry corner values only; every tangent entry is zero, so color
/// blends smoothly through values but not through derivatives. This
/// asymmetry with [`geometry_coefficients`] is deliberate observed
/// behavior and is pinned by tests.
#[must_use]
pub fn color_coefficients(
    p00: &ControlPoint,
    p01: &ControlPoint,
    p10: &ControlPoint,
    p11: &ControlPoint,
    channel: ColorChannel,
) -> Mat4 {
    let idx = channel.index();
    let c = |p: &ControlPoint| p.color[idx];

    Mat4::from_rows([
        [c(p00), c(p01), 0.0, 0.0],
        [c(p10), c(p11), 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0],
    ])
}

/// The cubic power-basis row vector `[t³, t², t, 1]`.
#[must_use]
pub fn power_basis(t: f64) -> [f64; 4] {
    [t * t * t, t * t, t, 1.0]
}

/// Evaluate one scalar channel at (u, v) against its coefficient matrix.
#[must_use]
pub fn evaluate_channel(u: f64, v: f64, coefficients: &Mat4) -> f64 {
    let a = HERMITE_BASIS
        .mul_mat(coefficients.transposed())
        .mul_mat(HERMITE_BASIS_T);
    dot4(power_basis(v), a.mul_vec4(power_basis(u)))
}

/// Surface position at (u, v). The surface is planar in depth, so the
/// third component is always zero.
#[must_use]
pub fn surface_point(u: f64, v: f64, cx: &Mat4, cy: &Mat4) -> [f64; 3] {
    [
        evaluate_channel(u, v, cx),
        evaluate_channel(u, v, cy),
        0.0,
    ]
}

/// Surface color at (u, v), one independent Hermite evaluation per channel.
#[must_use]
pub fn color_point(u: f64, v: f64, cr: &Mat4, cg: &Mat4, cb: &Mat4) -> [f64; 3] {
    [
        evaluate_channel(u, v, cr),
        evaluate_channel(u, v, cg),
        evaluate_channel(u, v, cb),
    ]
}
