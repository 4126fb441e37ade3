use serde::{Deserialize, Serialize};

use crate::*;

/// What occupies a grid cell. The boundary edge an endpoint faces lives
/// inside its variant, so only endpoints can carry one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Obstacle,
    Source { edge: Direction },
    Destination { edge: Direction },
    Straight,
    Corner,
}

impl CellKind {
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Source { .. } | Self::Destination { .. })
    }

    pub const fn is_pipe(self) -> bool {
        matches!(self, Self::Straight | Self::Corner)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    pub rotation: Rotation,
    /// Fixed cells never accept a player rotation.
    pub fixed: bool,
    /// Rotation that puts this cell on the validated solution route.
    /// Generation metadata, absent on distractors.
    pub solution_rotation: Option<Rotation>,
}

impl Cell {
    pub const fn empty(fixed: bool) -> Self {
        Self {
            kind: CellKind::Empty,
            rotation: 0,
            fixed,
            solution_rotation: None,
        }
    }

    pub const fn obstacle() -> Self {
        Self {
            kind: CellKind::Obstacle,
            rotation: 0,
            fixed: true,
            solution_rotation: None,
        }
    }

    pub const fn source(edge: Direction) -> Self {
        Self {
            kind: CellKind::Source { edge },
            rotation: 0,
            fixed: true,
            solution_rotation: None,
        }
    }

    pub const fn destination(edge: Direction) -> Self {
        Self {
            kind: CellKind::Destination { edge },
            rotation: 0,
            fixed: true,
            solution_rotation: None,
        }
    }

    pub const fn pipe(kind: CellKind, rotation: Rotation) -> Self {
        Self {
            kind,
            rotation,
            fixed: false,
            solution_rotation: None,
        }
    }

    pub const fn solution_pipe(kind: CellKind, rotation: Rotation) -> Self {
        Self {
            kind,
            rotation,
            fixed: false,
            solution_rotation: Some(rotation),
        }
    }

    /// Open ports of this cell, a pure function of `(kind, rotation, edge)`.
    ///
    /// Endpoints expose the single port opposite their boundary edge (flow
    /// exits into the grid, not out through the boundary); a straight pipe
    /// alternates horizontal/vertical with rotation parity; a corner walks
    /// its quadrant clockwise.
    pub fn connections(&self) -> &'static [Direction] {
        use Direction::*;

        match self.kind {
            CellKind::Empty | CellKind::Obstacle => &[],
            CellKind::Source { edge } | CellKind::Destination { edge } => match edge {
                Up => &[Down],
                Right => &[Left],
                Down => &[Up],
                Left => &[Right],
            },
            CellKind::Straight => {
                if self.rotation % 2 == 0 {
                    &[Right, Left]
                } else {
                    &[Up, Down]
                }
            }
            CellKind::Corner => match self.rotation % 4 {
                0 => &[Up, Right],
                1 => &[Right, Down],
                2 => &[Down, Left],
                _ => &[Left, Up],
            },
        }
    }

    pub fn has_port(&self, dir: Direction) -> bool {
        self.connections().contains(&dir)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty(true)
    }
}
