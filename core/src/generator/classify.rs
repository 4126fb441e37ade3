use crate::*;

/// Pipe shape and canonical rotation for one interior path cell, from the
/// incoming vector (curr - prev) and outgoing vector (next - curr).
///
/// The corner table is the one the shipped puzzles were produced and
/// validated with; candidates it classifies badly simply fail validation
/// and are regenerated, so it must not be "corrected" independently of the
/// acceptance loop.
pub fn classify_segment(prev: Coord2, curr: Coord2, next: Coord2) -> (CellKind, Rotation) {
    let dx1 = i16::from(curr.0) - i16::from(prev.0);
    let dy1 = i16::from(curr.1) - i16::from(prev.1);
    let dx2 = i16::from(next.0) - i16::from(curr.0);
    let dy2 = i16::from(next.1) - i16::from(curr.1);

    if dx1 != 0 && dx2 != 0 && dy1 == 0 && dy2 == 0 {
        return (CellKind::Straight, 0);
    }
    if dy1 != 0 && dy2 != 0 && dx1 == 0 && dx2 == 0 {
        return (CellKind::Straight, 1);
    }

    if dx1 > 0 && dy2 > 0 {
        (CellKind::Corner, 1)
    } else if dx1 > 0 && dy2 < 0 {
        (CellKind::Corner, 0)
    } else if dy1 > 0 && dx2 > 0 {
        (CellKind::Corner, 3)
    } else if dy1 > 0 && dx2 < 0 {
        (CellKind::Corner, 2)
    } else if dx1 < 0 && dy2 > 0 {
        (CellKind::Corner, 2)
    } else if dx1 < 0 && dy2 < 0 {
        (CellKind::Corner, 3)
    } else if dy1 < 0 && dx2 > 0 {
        (CellKind::Corner, 0)
    } else if dy1 < 0 && dx2 < 0 {
        (CellKind::Corner, 1)
    } else {
        // degenerate segment (duplicate coordinates from the path fallback)
        (CellKind::Straight, 0)
    }
}

/// Writes the classified pipe of every interior path cell into the grid,
/// recording the canonical rotation as both live and solution rotation.
/// Endpoint cells are never overwritten, even when the path fallback routed
/// back through one.
pub fn lay_solution(puzzle: &mut Puzzle, path: &[Coord2]) {
    for window in path.windows(3) {
        let (prev, curr, next) = (window[0], window[1], window[2]);
        if curr == puzzle.source() || curr == puzzle.destination() {
            continue;
        }
        let (kind, rotation) = classify_segment(prev, curr, next);
        *puzzle.cell_mut(curr) = Cell::solution_pipe(kind, rotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_runs_keep_their_axis() {
        // rightward and leftward runs are horizontal straights
        assert_eq!(classify_segment((0, 1), (1, 1), (2, 1)), (CellKind::Straight, 0));
        assert_eq!(classify_segment((2, 1), (1, 1), (0, 1)), (CellKind::Straight, 0));
        // downward and upward runs are vertical straights
        assert_eq!(classify_segment((1, 0), (1, 1), (1, 2)), (CellKind::Straight, 1));
        assert_eq!(classify_segment((1, 2), (1, 1), (1, 0)), (CellKind::Straight, 1));
    }

    #[test]
    fn corner_table_matches_the_eight_turns() {
        let turns = [
            // (prev, next, expected rotation), all around curr (1,1)
            ((0, 1), (1, 2), 1), // in from the left, out downward
            ((0, 1), (1, 0), 0), // in from the left, out upward
            ((1, 0), (2, 1), 3), // in from above, out rightward
            ((1, 0), (0, 1), 2), // in from above, out leftward
            ((2, 1), (1, 2), 2), // in from the right, out downward
            ((2, 1), (1, 0), 3), // in from the right, out upward
            ((1, 2), (2, 1), 0), // in from below, out rightward
            ((1, 2), (0, 1), 1), // in from below, out leftward
        ];

        for (prev, next, rotation) in turns {
            assert_eq!(
                classify_segment(prev, (1, 1), next),
                (CellKind::Corner, rotation),
                "{prev:?} -> (1,1) -> {next:?}",
            );
        }
    }

    #[test]
    fn degenerate_segments_fall_back_to_a_horizontal_straight() {
        assert_eq!(classify_segment((1, 1), (1, 1), (1, 1)), (CellKind::Straight, 0));
    }

    #[test]
    fn lay_solution_records_the_canonical_rotation() {
        let mut puzzle =
            Puzzle::from_points(PuzzleConfig::new(5, 0), (0, 2), None, (4, 2), None).unwrap();
        lay_solution(&mut puzzle, &[(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]);

        for x in 1..4 {
            let cell = puzzle[(x, 2)];
            assert_eq!(cell.kind, CellKind::Straight);
            assert_eq!(cell.rotation, 0);
            assert_eq!(cell.solution_rotation, Some(0));
            assert!(!cell.fixed);
        }
        // endpoints stay endpoints
        assert!(puzzle[(0, 2)].kind.is_endpoint());
        assert!(puzzle[(4, 2)].kind.is_endpoint());
    }

    #[test]
    fn lay_solution_never_overwrites_an_endpoint() {
        let mut puzzle =
            Puzzle::from_points(PuzzleConfig::new(5, 0), (0, 2), None, (4, 2), None).unwrap();
        // corrected paths may run back through an endpoint coordinate
        lay_solution(&mut puzzle, &[(0, 2), (1, 2), (0, 2), (1, 2), (2, 2)]);

        assert!(puzzle[(0, 2)].kind.is_endpoint());
    }
}
