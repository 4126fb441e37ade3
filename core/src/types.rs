use serde_repr::{Deserialize_repr, Serialize_repr};

/// Single coordinate axis used for the grid size and cell positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(x, y)`, `(0, 0)` being the top-left cell.
pub type Coord2 = (Coord, Coord);

/// Quarter-turn count in `0..4`.
pub type Rotation = u8;

/// Compass direction, also used for the boundary edge an endpoint sits on.
///
/// Serialized as its bare integer to match the puzzle data files.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Coordinate delta of a single step in this direction.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    pub const fn from_rotation(rotation: Rotation) -> Self {
        match rotation % 4 {
            0 => Self::Up,
            1 => Self::Right,
            2 => Self::Down,
            _ => Self::Left,
        }
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Applies a single step in `dir`, returning a value only when it remains in bounds.
pub fn step(coords: Coord2, dir: Direction, grid_size: Coord) -> Option<Coord2> {
    let (dx, dy) = dir.delta();
    let x = coords.0.checked_add_signed(dx)?;
    let y = coords.1.checked_add_signed(dy)?;
    (x < grid_size && y < grid_size).then_some((x, y))
}

/// Which grid boundary a cell sits on, or `None` for interior cells.
///
/// Corner cells belong to several boundaries; ties resolve top, right,
/// bottom, left in that order.
pub fn boundary_edge(grid_size: Coord, (x, y): Coord2) -> Option<Direction> {
    if y == 0 {
        Some(Direction::Up)
    } else if x == grid_size - 1 {
        Some(Direction::Right)
    } else if y == grid_size - 1 {
        Some(Direction::Down)
    } else if x == 0 {
        Some(Direction::Left)
    } else {
        None
    }
}
