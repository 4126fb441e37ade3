#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use catalog::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod catalog;
mod cell;
mod engine;
mod error;
mod generator;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub grid_size: Coord,
    /// Seconds; 0 means unlimited.
    pub time_limit: u16,
}

impl PuzzleConfig {
    pub const fn new_unchecked(grid_size: Coord, time_limit: u16) -> Self {
        Self {
            grid_size,
            time_limit,
        }
    }

    pub fn new(grid_size: Coord, time_limit: u16) -> Self {
        Self::new_unchecked(grid_size.max(2), time_limit)
    }

    pub const fn total_cells(&self) -> u16 {
        (self.grid_size as u16) * (self.grid_size as u16)
    }
}

/// Decorative marker consumed by the presentation layer; carried through
/// generation and the catalog untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightingEffect {
    pub x: Coord,
    pub y: Coord,
    #[serde(rename = "type")]
    pub kind: LightKind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightKind {
    Fire,
    Ice,
    Electric,
    Poison,
    Arcane,
}

/// A fully populated square grid of cells with one source and one
/// destination on the boundary.
///
/// Constructed once by the generator or the catalog loader; after that only
/// `rotation` fields of non-fixed cells change, through [`PlayEngine`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub(crate) grid_size: Coord,
    pub(crate) time_limit: u16,
    pub(crate) source: Coord2,
    pub(crate) destination: Coord2,
    pub(crate) grid: Array2<Cell>,
    pub(crate) lighting: Vec<LightingEffect>,
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
}

impl Puzzle {
    /// Blank puzzle holding only its two endpoints, every other cell a
    /// rotatable empty. Endpoint edges are auto-derived from the boundary
    /// position unless supplied.
    pub fn from_points(
        config: PuzzleConfig,
        source: Coord2,
        source_edge: Option<Direction>,
        destination: Coord2,
        destination_edge: Option<Direction>,
    ) -> Result<Self> {
        let n = config.grid_size;
        if source.0 >= n || source.1 >= n || destination.0 >= n || destination.1 >= n {
            return Err(PuzzleError::InvalidCoords);
        }

        let source_edge = source_edge
            .or_else(|| boundary_edge(n, source))
            .ok_or(PuzzleError::EndpointNotOnBoundary)?;
        let destination_edge = destination_edge
            .or_else(|| boundary_edge(n, destination))
            .ok_or(PuzzleError::EndpointNotOnBoundary)?;

        Ok(Self::blank(config, source, source_edge, destination, destination_edge))
    }

    pub(crate) fn blank(
        config: PuzzleConfig,
        source: Coord2,
        source_edge: Direction,
        destination: Coord2,
        destination_edge: Direction,
    ) -> Self {
        let n = usize::from(config.grid_size);
        let mut grid = Array2::from_elem((n, n), Cell::empty(false));
        grid[source.to_nd_index()] = Cell::source(source_edge);
        grid[destination.to_nd_index()] = Cell::destination(destination_edge);

        Self {
            grid_size: config.grid_size,
            time_limit: config.time_limit,
            source,
            destination,
            grid,
            lighting: Vec::new(),
            name: None,
            description: None,
        }
    }

    pub fn grid_size(&self) -> Coord {
        self.grid_size
    }

    pub fn time_limit(&self) -> u16 {
        self.time_limit
    }

    pub fn source(&self) -> Coord2 {
        self.source
    }

    pub fn destination(&self) -> Coord2 {
        self.destination
    }

    pub fn lighting(&self) -> &[LightingEffect] {
        &self.lighting
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.grid_size && coords.1 < self.grid_size {
            Ok(coords)
        } else {
            Err(PuzzleError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords.to_nd_index()]
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.grid[coords.to_nd_index()]
    }

    /// Open ports of the cell at `coords`.
    pub fn connections_at(&self, coords: Coord2) -> &'static [Direction] {
        self[coords].connections()
    }

    /// All cells with their coordinates, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.grid
            .indexed_iter()
            .map(|((x, y), cell)| ((x as Coord, y as Coord), cell))
    }

    /// Copy with every solution-bearing cell turned to its recorded solution
    /// rotation; scratch input for the solvability check.
    pub fn with_solution_applied(&self) -> Self {
        let mut scratch = self.clone();
        for cell in scratch.grid.iter_mut() {
            if let Some(solution) = cell.solution_rotation {
                cell.rotation = solution;
            }
        }
        scratch
    }
}

impl Index<Coord2> for Puzzle {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.grid[coords.to_nd_index()]
    }
}
