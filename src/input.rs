//! Message boundary for the drag-handle collaborator.
//!
//! The interactive handle widget lives outside this crate; all it owes the
//! core is a stream of `(node, x, y)` events with normalized coordinates.
//! A single consumer applies a batch of events to the control lattice
//! between tessellation passes, so the core never sees a half-applied drag.

use thiserror::Error;

use crate::geom::{ControlLattice, ControlPoint, Vec2, lerp};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandleError {
    #[error("handle event addresses node ({x}, {y}) outside the {width}x{height} lattice")]
    UnknownNode {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

/// One reported handle position for one lattice node.
///
/// `x` and `y` are fractions of the editing area in [0,1]; construction
/// clamps them, mirroring what the drag widget itself does at the edges of
/// its container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleEvent {
    pub node_x: usize,
    pub node_y: usize,
    pub x: f64,
    pub y: f64,
}

impl HandleEvent {
    #[must_use]
    pub fn new(node_x: usize, node_y: usize, x: f64, y: f64) -> Self {
        Self {
            node_x,
            node_y,
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }

    /// The lattice location this event maps to: [0,1] fractions stretched
    /// over the [-1,1]² editing square.
    #[must_use]
    pub fn location(&self) -> Vec2 {
        Vec2::new(lerp(self.x, -1.0, 1.0), lerp(self.y, -1.0, 1.0))
    }
}

/// Apply a batch of handle events to the lattice, last write per node wins.
///
/// # Errors
/// [`HandleError::UnknownNode`] on the first event addressing a node
/// outside the lattice; earlier events in the batch stay applied, matching
/// the all-events-independent contract (each event is one node's state).
pub fn apply_handle_events(
    lattice: &mut ControlLattice,
    events: impl IntoIterator<Item = HandleEvent>,
) -> Result<(), HandleError> {
    for event in events {
        if event.node_x >= lattice.width() || event.node_y >= lattice.height() {
            return Err(HandleError::UnknownNode {
                x: event.node_x,
                y: event.node_y,
                width: lattice.width(),
                height: lattice.height(),
            });
        }
        lattice.get_mut(event.node_x, event.node_y).location = event.location();
    }
    Ok(())
}

/// The handle fraction a control point corresponds to: the inverse of
/// [`HandleEvent::location`], used to re-seed handle widgets from the
/// lattice after a resize or reset.
#[must_use]
pub fn handle_fraction(point: &ControlPoint) -> [f64; 2] {
    [
        (point.location.x + 1.0) / 2.0,
        (point.location.y + 1.0) / 2.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::uniform_lattice;

    #[test]
    fn events_clamp_to_unit_square() {
        let event = HandleEvent::new(0, 0, -0.5, 1.5);
        assert_eq!(event.x, 0.0);
        assert_eq!(event.y, 1.0);
        assert_eq!(event.location(), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn apply_moves_the_addressed_node_only() {
        let mut lattice = uniform_lattice(3, 3);
        let before = *lattice.get(0, 0);

        apply_handle_events(&mut lattice, [HandleEvent::new(1, 1, 0.75, 0.25)]).unwrap();

        assert_eq!(lattice.get(1, 1).location, Vec2::new(0.5, -0.5));
        assert_eq!(*lattice.get(0, 0), before);
        // Tangents and color are untouched by a drag.
        assert_eq!(lattice.get(1, 1).u_tangent, Vec2::ZERO);
    }

    #[test]
    fn last_event_per_node_wins() {
        let mut lattice = uniform_lattice(2, 2);
        apply_handle_events(
            &mut lattice,
            [
                HandleEvent::new(0, 0, 0.1, 0.1),
                HandleEvent::new(0, 0, 0.5, 0.5),
            ],
        )
        .unwrap();

        assert_eq!(lattice.get(0, 0).location, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn unknown_node_is_rejected() {
        let mut lattice = uniform_lattice(2, 2);
        let result = apply_handle_events(&mut lattice, [HandleEvent::new(2, 0, 0.5, 0.5)]);
        assert!(matches!(
            result,
            Err(HandleError::UnknownNode { x: 2, y: 0, .. })
        ));
    }

    #[test]
    fn handle_fraction_inverts_event_location() {
        let mut lattice = uniform_lattice(2, 2);
        apply_handle_events(&mut lattice, [HandleEvent::new(1, 0, 0.25, 0.8)]).unwrap();

        let fraction = handle_fraction(lattice.get(1, 0));
        assert!((fraction[0] - 0.25).abs() < 1e-12);
        assert!((fraction[1] - 0.8).abs() < 1e-12);
    }
}
