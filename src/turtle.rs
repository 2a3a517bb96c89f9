//! Turtle cursor state and the operations symbols can map to.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The state of the drawing turtle.
///
/// Tracks the cursor's position and orientation in world space. Orientation
/// is a persistent quaternion composed one local-axis rotation at a time,
/// so multi-axis turns combine correctly in 3D. Branching (`[` / `]`) saves
/// and restores whole `TurtleState` values.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current world-space position of the cursor.
    pub position: Vec3,
    /// Current world-space orientation.
    pub rotation: Quat,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl TurtleState {
    /// Returns the turtle's heading (local Y-axis) in world space.
    pub fn heading(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Rotates the turtle around its local X axis by `angle` radians (Pitch).
    pub fn rotate_local_x(&mut self, angle: f32) {
        self.rotation *= Quat::from_axis_angle(Vec3::X, angle);
    }

    /// Rotates the turtle around its local Y axis by `angle` radians (Roll).
    pub fn rotate_local_y(&mut self, angle: f32) {
        self.rotation *= Quat::from_axis_angle(Vec3::Y, angle);
    }

    /// Rotates the turtle around its local Z axis by `angle` radians (Yaw).
    pub fn rotate_local_z(&mut self, angle: f32) {
        self.rotation *= Quat::from_axis_angle(Vec3::Z, angle);
    }

    /// Advances the cursor `step` units along the heading, returning the
    /// positions before and after the move.
    pub fn advance(&mut self, step: f32) -> (Vec3, Vec3) {
        let from = self.position;
        self.position += self.heading() * step;
        (from, self.position)
    }
}

/// Operations that can be performed by the drawing turtle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TurtleOp {
    /// Advance one step and emit a line segment (`F`, `f`, `G`, `g`).
    Draw,
    /// Advance one step without emitting (`s`, `S`).
    Move,
    /// Rotate around local Z (`+` / `-`).
    Yaw(f32),
    /// Rotate around local X (`&` / `^`).
    Pitch(f32),
    /// Rotate around local Y (`\` / `/`).
    Roll(f32),
    /// Turn 180 degrees (`|`).
    TurnAround,
    /// Save the turtle state onto the branch stack (`[`).
    Push,
    /// Restore the most recently pushed turtle state (`]`).
    Pop,
    /// No-op — symbol has no registered meaning.
    Ignore,
}
