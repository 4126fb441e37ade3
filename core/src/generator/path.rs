use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use rand::prelude::*;

use crate::*;

/// Carve an ordered route of adjacent coordinates from `start` to `end`.
///
/// Biased random walk: only moves that close the gap on an axis are ever
/// candidates, picked uniformly among those landing on unvisited in-bounds
/// cells. Dead ends backtrack one cell at a time. The walk is capped at
/// `2 * N^2` steps; if the budget runs out (or backtracking reaches the
/// start again), a direct axis-by-axis correction is appended, which ignores
/// the visited set and may self-intersect.
pub fn generate_path(rng: &mut impl Rng, grid_size: Coord, start: Coord2, end: Coord2) -> Vec<Coord2> {
    let mut path = vec![start];
    let mut visited = BTreeSet::from([start]);
    let mut current = start;

    let max_steps = 2 * u32::from(grid_size) * u32::from(grid_size);
    let mut steps = 0;

    while current != end && steps < max_steps {
        steps += 1;

        let mut moves: Vec<Coord2> = Vec::with_capacity(2);
        for dir in forward_directions(current, end) {
            if let Some(next) = step(current, dir, grid_size) {
                if !visited.contains(&next) {
                    moves.push(next);
                }
            }
        }

        match moves.choose(rng) {
            Some(&next) => {
                visited.insert(next);
                path.push(next);
                current = next;
            }
            None => {
                // dead end: walk back one cell, give up once only the start remains
                if path.len() == 1 {
                    break;
                }
                path.pop();
                current = path[path.len() - 1];
            }
        }
    }

    if current != end {
        let (mut x, mut y) = current;
        while x != end.0 {
            x = if end.0 > x { x + 1 } else { x - 1 };
            path.push((x, y));
        }
        while y != end.1 {
            y = if end.1 > y { y + 1 } else { y - 1 };
            path.push((x, y));
        }
    }

    path
}

/// The 1-2 axis moves that bring `current` closer to `end`.
fn forward_directions(current: Coord2, end: Coord2) -> impl Iterator<Item = Direction> {
    let horizontal = match end.0.cmp(&current.0) {
        Ordering::Greater => Some(Direction::Right),
        Ordering::Less => Some(Direction::Left),
        Ordering::Equal => None,
    };
    let vertical = match end.1.cmp(&current.1) {
        Ordering::Greater => Some(Direction::Down),
        Ordering::Less => Some(Direction::Up),
        Ordering::Equal => None,
    };
    horizontal.into_iter().chain(vertical)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_adjacent_steps(path: &[Coord2]) {
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let dist = a.0.abs_diff(b.0) + a.1.abs_diff(b.1);
            assert_eq!(dist, 1, "{a:?} -> {b:?} is not one axis step");
        }
    }

    #[test]
    fn corner_to_corner_on_a_small_grid() {
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let path = generate_path(&mut rng, 3, (0, 0), (2, 2));

            assert_eq!(path[0], (0, 0));
            assert_eq!(path[path.len() - 1], (2, 2));
            assert_adjacent_steps(&path);
            // forward-only moves from a corner never backtrack, so the walk
            // stays within the step budget with plenty of margin
            assert!(path.len() <= 19, "len {}", path.len());
        }
    }

    #[test]
    fn side_to_side_across_a_larger_grid() {
        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let path = generate_path(&mut rng, 7, (0, 3), (6, 3));

            assert_eq!(path[0], (0, 3));
            assert_eq!(path[path.len() - 1], (6, 3));
            assert_adjacent_steps(&path);
        }
    }

    #[test]
    fn degenerate_walk_returns_just_the_start() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(generate_path(&mut rng, 5, (2, 0), (2, 0)), [(2, 0)]);
    }
}
