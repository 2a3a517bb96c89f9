//! Interpreter that converts an L-System symbol string into line geometry.
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with an
//! [`InterpreterConfig`], register symbol-to-operation mappings via
//! [`TurtleInterpreter::set_op`] or
//! [`TurtleInterpreter::populate_standard_symbols`], then call
//! [`TurtleInterpreter::interpret`] with a symbol string and a rotation
//! angle.

use crate::error::{LsysError, Result};
use crate::turtle::{TurtleOp, TurtleState};
use glam::Vec3;
use std::collections::HashMap;
use std::f32::consts::PI;

/// Configuration for turtle interpretation.
#[derive(Clone, Debug)]
pub struct InterpreterConfig {
    /// Maximum depth of the `[` / `]` branch stack.
    pub max_stack_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_stack_depth: 1024,
        }
    }
}

/// Interprets L-System strings as turtle-graphics line segments.
#[derive(Clone, Debug)]
pub struct TurtleInterpreter {
    op_map: HashMap<char, TurtleOp>,
    config: InterpreterConfig,
}

impl TurtleInterpreter {
    /// Distance covered by one `Draw` or `Move` step.
    pub const STEP: f32 = 1.0;

    /// Creates a new interpreter with the given configuration and an empty
    /// symbol map.
    ///
    /// Register operations with [`set_op`](Self::set_op) or
    /// [`populate_standard_symbols`](Self::populate_standard_symbols)
    /// before calling [`interpret`](Self::interpret).
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            op_map: HashMap::new(),
            config,
        }
    }

    /// Creates an interpreter with the standard symbol alphabet already
    /// registered.
    pub fn with_standard_symbols(config: InterpreterConfig) -> Self {
        let mut interpreter = Self::new(config);
        interpreter.populate_standard_symbols();
        interpreter
    }

    /// Assigns a single [`TurtleOp`] to a symbol, replacing any previous
    /// mapping.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.op_map.insert(symbol, op);
    }

    /// Registers the conventional symbol-to-operation mappings.
    ///
    /// `F f G g` draw, `s S` move without drawing, `+ - & ^ \ /` turn
    /// around the three local axes, `|` turns around, `[` / `]` branch.
    pub fn populate_standard_symbols(&mut self) {
        let mappings = [
            // Pen
            ('F', TurtleOp::Draw),
            ('f', TurtleOp::Draw),
            ('G', TurtleOp::Draw),
            ('g', TurtleOp::Draw),
            ('s', TurtleOp::Move),
            ('S', TurtleOp::Move),
            // Orientation
            ('+', TurtleOp::Yaw(1.0)),
            ('-', TurtleOp::Yaw(-1.0)),
            ('&', TurtleOp::Pitch(1.0)),
            ('^', TurtleOp::Pitch(-1.0)),
            ('\\', TurtleOp::Roll(1.0)),
            ('/', TurtleOp::Roll(-1.0)),
            ('|', TurtleOp::TurnAround),
            // Flow
            ('[', TurtleOp::Push),
            (']', TurtleOp::Pop),
        ];

        for (symbol, op) in mappings {
            self.set_op(symbol, op);
        }
    }

    /// Interprets `symbols` and returns the generated line geometry as a
    /// flat point list; every two consecutive points form one segment, so
    /// the result length is always even.
    ///
    /// The turtle starts at the world origin facing `+Y`. Symbols with no
    /// registered mapping are silently ignored; they exist only to drive
    /// rule expansion.
    ///
    /// # Errors
    ///
    /// Fails with [`LsysError::UnbalancedBracket`] when `]` occurs with no
    /// matching `[`, with [`LsysError::UnclosedBranch`] when the string
    /// ends with open branches, and with
    /// [`LsysError::BranchStackOverflow`] when nesting exceeds the
    /// configured depth.
    pub fn interpret(&self, symbols: &str, angle_degrees: f32) -> Result<Vec<Vec3>> {
        let angle = angle_degrees.to_radians();
        let mut turtle = TurtleState::default();
        let mut stack: Vec<TurtleState> = Vec::new();
        let mut points = Vec::new();

        for (index, symbol) in symbols.chars().enumerate() {
            let op = self
                .op_map
                .get(&symbol)
                .copied()
                .unwrap_or(TurtleOp::Ignore);

            match op {
                TurtleOp::Draw => {
                    let (from, to) = turtle.advance(Self::STEP);
                    points.push(from);
                    points.push(to);
                }
                TurtleOp::Move => {
                    turtle.advance(Self::STEP);
                }
                TurtleOp::Yaw(sign) => turtle.rotate_local_z(angle * sign),
                TurtleOp::Pitch(sign) => turtle.rotate_local_x(angle * sign),
                TurtleOp::Roll(sign) => turtle.rotate_local_y(angle * sign),
                TurtleOp::TurnAround => turtle.rotate_local_z(PI),
                TurtleOp::Push => {
                    if stack.len() >= self.config.max_stack_depth {
                        return Err(LsysError::BranchStackOverflow {
                            max: self.config.max_stack_depth,
                        });
                    }
                    stack.push(turtle);
                }
                TurtleOp::Pop => {
                    turtle = stack.pop().ok_or(LsysError::UnbalancedBracket { index })?;
                }
                TurtleOp::Ignore => {}
            }
        }

        if !stack.is_empty() {
            return Err(LsysError::UnclosedBranch { depth: stack.len() });
        }
        Ok(points)
    }
}

impl Default for TurtleInterpreter {
    fn default() -> Self {
        Self::with_standard_symbols(InterpreterConfig::default())
    }
}
