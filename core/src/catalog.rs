use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Catalog of named puzzle definitions, deserialized once at startup from
/// the external JSON data file and owned by whoever performs lookups.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PuzzleCatalog {
    puzzles: BTreeMap<String, PuzzleDef>,
}

impl PuzzleCatalog {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let catalog: Self = serde_json::from_str(text)?;
        log::info!("loaded {} puzzle definitions", catalog.puzzles.len());
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&PuzzleDef> {
        self.puzzles.get(id)
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.puzzles.keys().map(String::as_str)
    }

    /// Builds the puzzle registered under `id`, or `None` (with the reason
    /// logged) when the id is unknown or its definition cannot be realized.
    /// `seed` drives generation for definitions without an explicit grid.
    pub fn load(&self, id: &str, seed: u64) -> Option<Puzzle> {
        let Some(def) = self.puzzles.get(id) else {
            log::error!("puzzle {id:?} not found in the catalog");
            return None;
        };

        match def.build(seed) {
            Ok(mut puzzle) => {
                puzzle.lighting = def.lighting.clone();
                puzzle.name = Some(def.name.clone().unwrap_or_else(|| String::from(id)));
                puzzle.description = def.description.clone();
                Some(puzzle)
            }
            Err(err) => {
                log::error!("puzzle {id:?} has an invalid definition: {err}");
                None
            }
        }
    }
}

/// One definition record from the data file. Either a generated puzzle
/// (endpoints only) or a manual one with an explicit `grid` layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub grid_size: Coord,
    #[serde(default)]
    pub time_limit: u16,
    pub source: EndpointDef,
    pub destination: EndpointDef,
    #[serde(default)]
    pub lighting: Vec<LightingEffect>,
    #[serde(default)]
    pub grid: Option<Vec<Vec<CellDef>>>,
    /// Presentation-layer style overrides, carried through untouched.
    #[serde(default)]
    pub visual: Option<serde_json::Value>,
}

impl PuzzleDef {
    fn config(&self) -> PuzzleConfig {
        PuzzleConfig::new(self.grid_size, self.time_limit)
    }

    fn build(&self, seed: u64) -> Result<Puzzle> {
        match &self.grid {
            Some(rows) => self.build_manual(rows),
            None => PuzzleGenerator::new(seed).generate_from_points(
                self.config(),
                self.source.coords(),
                self.source.edge,
                self.destination.coords(),
                self.destination.edge,
            ),
        }
    }

    /// Normalizes a manual layout: every cell starts as a fixed empty, the
    /// provided rows/columns overlay up to the declared grid size, then the
    /// declared endpoints overwrite their cells with their declared edge
    /// (defaulting to the top).
    fn build_manual(&self, rows: &[Vec<CellDef>]) -> Result<Puzzle> {
        let config = self.config();
        let n = config.grid_size;
        let source = self.source.coords();
        let destination = self.destination.coords();
        if source.0 >= n || source.1 >= n || destination.0 >= n || destination.1 >= n {
            return Err(PuzzleError::InvalidCoords);
        }

        let size = usize::from(n);
        if rows.len() > size || rows.iter().any(|row| row.len() > size) {
            log::warn!("manual grid larger than {n}x{n}, extra cells ignored");
        }

        let mut grid = Array2::from_elem((size, size), Cell::empty(true));
        for (y, row) in rows.iter().take(size).enumerate() {
            for (x, def) in row.iter().take(size).enumerate() {
                grid[[x, y]] = def.to_cell(n, (x as Coord, y as Coord));
            }
        }

        grid[source.to_nd_index()] = Cell::source(self.source.edge.unwrap_or(Direction::Up));
        grid[destination.to_nd_index()] =
            Cell::destination(self.destination.edge.unwrap_or(Direction::Up));

        Ok(Puzzle {
            grid_size: n,
            time_limit: config.time_limit,
            source,
            destination,
            grid,
            lighting: Vec::new(),
            name: None,
            description: None,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndpointDef {
    pub x: Coord,
    pub y: Coord,
    #[serde(default)]
    pub edge: Option<Direction>,
}

impl EndpointDef {
    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }
}

/// One manual grid cell, either the bare type-name shorthand (`"straight"`)
/// or the full `{type, rotation, fixed}` form. Never leaves the loader.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellDef {
    Name(CellTypeName),
    Full {
        #[serde(rename = "type")]
        kind: CellTypeName,
        #[serde(default)]
        rotation: Rotation,
        #[serde(default)]
        fixed: Option<bool>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellTypeName {
    Empty,
    Obstacle,
    Source,
    Destination,
    Straight,
    Corner,
}

impl CellDef {
    fn to_cell(self, grid_size: Coord, coords: Coord2) -> Cell {
        let (name, rotation, fixed) = match self {
            Self::Name(name) => (name, 0, None),
            Self::Full {
                kind,
                rotation,
                fixed,
            } => (kind, rotation, fixed),
        };

        let kind = match name {
            CellTypeName::Empty => CellKind::Empty,
            CellTypeName::Obstacle => CellKind::Obstacle,
            // stray endpoints in the overlay get a boundary-derived edge;
            // the declared endpoints overwrite their own cells afterwards
            CellTypeName::Source => CellKind::Source {
                edge: boundary_edge(grid_size, coords).unwrap_or(Direction::Up),
            },
            CellTypeName::Destination => CellKind::Destination {
                edge: boundary_edge(grid_size, coords).unwrap_or(Direction::Up),
            },
            CellTypeName::Straight => CellKind::Straight,
            CellTypeName::Corner => CellKind::Corner,
        };

        let fixed_by_default = !kind.is_pipe();
        Cell {
            kind,
            rotation: rotation % 4,
            fixed: fixed.unwrap_or(fixed_by_default),
            solution_rotation: None,
        }
    }
}
