use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Neighbors reachable from `coords` through mutually open ports, with the
/// direction taken to reach each. The port equal to `entered_from` is
/// excluded so flow never turns straight back through its entry edge.
pub(crate) fn open_neighbors(
    puzzle: &Puzzle,
    coords: Coord2,
    entered_from: Option<Direction>,
) -> impl Iterator<Item = (Coord2, Direction)> {
    let grid_size = puzzle.grid_size();
    puzzle[coords]
        .connections()
        .iter()
        .copied()
        .filter(move |&dir| Some(dir) != entered_from)
        .filter_map(move |dir| {
            let next = step(coords, dir, grid_size)?;
            puzzle[next].has_port(dir.opposite()).then_some((next, dir))
        })
}

/// Whether the source currently reaches the destination through open,
/// mutually matching ports.
///
/// Depth-first over the port graph, recomputed from scratch on every call.
/// Cells are marked visited by coordinate alone, which is only safe while
/// every cell type has at most two ports; a junction cell type would need
/// visited-by-(coordinate, port) tracking instead.
pub fn is_solved(puzzle: &Puzzle) -> bool {
    let mut visited: BTreeSet<Coord2> = BTreeSet::new();
    let mut stack: Vec<(Coord2, Option<Direction>)> = Vec::new();
    stack.push((puzzle.source(), None));

    while let Some((coords, entered_from)) = stack.pop() {
        if !visited.insert(coords) {
            continue;
        }
        if coords == puzzle.destination() {
            return true;
        }
        for (next, dir) in open_neighbors(puzzle, coords, entered_from) {
            stack.push((next, Some(dir.opposite())));
        }
    }

    false
}

/// Whether some rotation assignment connects the endpoints: the solved check
/// run on a scratch copy with every recorded solution rotation applied.
pub fn is_solvable(puzzle: &Puzzle) -> bool {
    is_solved(&puzzle.with_solution_applied())
}

/// Everything the current rotations energize, for flow visualization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowTrace {
    /// Cells reached from the source.
    pub reached: BTreeSet<Coord2>,
    /// Cell-to-cell edges carrying energy, as (cell, exit direction).
    pub edges: Vec<(Coord2, Direction)>,
    /// Whether the destination is among the reached cells.
    pub connected: bool,
}

/// Full traversal from the source using the same edge discovery as
/// [`is_solved`], without the early exit, recording every energized edge.
pub fn trace_flow(puzzle: &Puzzle) -> FlowTrace {
    let mut reached: BTreeSet<Coord2> = BTreeSet::new();
    let mut edges: Vec<(Coord2, Direction)> = Vec::new();
    let mut stack: Vec<(Coord2, Option<Direction>)> = Vec::new();
    stack.push((puzzle.source(), None));

    while let Some((coords, entered_from)) = stack.pop() {
        if !reached.insert(coords) {
            continue;
        }
        for (next, dir) in open_neighbors(puzzle, coords, entered_from) {
            edges.push((coords, dir));
            stack.push((next, Some(dir.opposite())));
        }
    }

    let connected = reached.contains(&puzzle.destination());
    FlowTrace {
        reached,
        edges,
        connected,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Solved,
    Failed,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Solved | Self::Failed)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RotateOutcome {
    NoChange,
    Rotated,
    Solved,
}

impl RotateOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Rotated => true,
            Self::Solved => true,
        }
    }
}

/// Play-time wrapper around a generated or loaded puzzle: the single mutator
/// of cell rotations, with move counting and solved-state detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    puzzle: Puzzle,
    move_count: u32,
    state: EngineState,
}

impl PlayEngine {
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            move_count: 0,
            state: Default::default(),
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Quarter-turn clockwise on the cell at `coords`. Fixed and portless
    /// cells are ignored; every accepted turn reruns the solved check.
    pub fn rotate(&mut self, coords: Coord2) -> Result<RotateOutcome> {
        let coords = self.puzzle.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = self.puzzle.cell_mut(coords);
        if cell.fixed || !cell.kind.is_pipe() {
            return Ok(RotateOutcome::NoChange);
        }

        cell.rotation = (cell.rotation + 1) % 4;
        self.move_count += 1;
        self.mark_started();

        Ok(if is_solved(&self.puzzle) {
            self.state = EngineState::Solved;
            RotateOutcome::Solved
        } else {
            RotateOutcome::Rotated
        })
    }

    /// Ends the session unsolved; the caller decides when (timeout or the
    /// player giving up). No-op once finished.
    pub fn fail(&mut self) {
        if !self.state.is_finished() {
            self.state = EngineState::Failed;
        }
    }

    fn mark_started(&mut self) {
        if matches!(self.state, EngineState::Ready) {
            self.state = EngineState::Active;
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(PuzzleError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
