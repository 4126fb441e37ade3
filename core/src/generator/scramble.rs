use alloc::collections::BTreeSet;
use rand::prelude::*;

use crate::*;

/// Fills every cell off the carved route with either a permanent gap
/// (`empty_chance` percent) or a rotatable distractor pipe at a uniform
/// random rotation. Endpoints and path cells are left alone.
pub fn fill_distractors(
    rng: &mut impl Rng,
    puzzle: &mut Puzzle,
    path: &[Coord2],
    empty_chance: u8,
) {
    let on_path: BTreeSet<Coord2> = path.iter().copied().collect();

    for y in 0..puzzle.grid_size() {
        for x in 0..puzzle.grid_size() {
            let coords = (x, y);
            if on_path.contains(&coords) || puzzle[coords].kind.is_endpoint() {
                continue;
            }

            *puzzle.cell_mut(coords) = if rng.random_range(0..100u8) < empty_chance {
                Cell::empty(true)
            } else {
                let kind = if rng.random_bool(0.5) {
                    CellKind::Straight
                } else {
                    CellKind::Corner
                };
                Cell::pipe(kind, rng.random_range(0..4))
            };
        }
    }
}

/// Turns every interior path cell away from its recorded solution, drawing
/// uniformly from the three other rotation values. The draw treats all four
/// rotations as distinct, so a straight pipe can land on the functionally
/// equivalent rotation two steps away and start out coincidentally open.
pub fn scramble_solution(rng: &mut impl Rng, puzzle: &mut Puzzle, path: &[Coord2]) {
    for &coords in path.iter().skip(1).take(path.len().saturating_sub(2)) {
        let cell = puzzle.cell_mut(coords);
        if cell.fixed {
            continue;
        }
        let Some(solution) = cell.solution_rotation else {
            continue;
        };

        let draw = rng.random_range(0..3);
        cell.rotation = if draw >= solution { draw + 1 } else { draw };
    }
}
