// Hunt/target firing logic for AI players.
// Random search until something is hit, then probing along the struck ship.

use alloc::vec::Vec;
use log::trace;
use rand::Rng;

use crate::{board::Gameboard, common::Coord, config::MAX_TARGET_SAMPLES, ship::Orientation};

/// Follow-up shots for a run of unresolved hits, clipped to a `size`×`size` board.
///
/// A single hit yields its four orthogonal neighbours (left, right, up, down).
/// Two or more hits take their axis from the first two and yield the cell
/// just before the lowest hit and just after the highest one. Hits that share
/// neither row nor column yield nothing.
pub fn follow_up_targets(hits: &[Coord], size: usize) -> Vec<Coord> {
    let step = |(x, y): Coord, dx: isize, dy: isize| -> Option<Coord> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < size && ny < size).then_some((nx, ny))
    };

    match hits {
        [] => Vec::new(),
        [only] => [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(|(dx, dy)| step(*only, dx, dy))
            .collect(),
        [first, second, ..] => {
            let axis = if first.1 == second.1 {
                Orientation::Horizontal
            } else if first.0 == second.0 {
                Orientation::Vertical
            } else {
                return Vec::new();
            };
            let along = |coord: &&Coord| match axis {
                Orientation::Horizontal => coord.0,
                Orientation::Vertical => coord.1,
            };
            let (Some(&start), Some(&end)) =
                (hits.iter().min_by_key(along), hits.iter().max_by_key(along))
            else {
                return Vec::new();
            };
            let (before, after) = match axis {
                Orientation::Horizontal => (step(start, -1, 0), step(end, 1, 0)),
                Orientation::Vertical => (step(start, 0, -1), step(end, 0, 1)),
            };
            before.into_iter().chain(after).collect()
        }
    }
}

/// Pick the next cell to fire at on `target`.
///
/// Follow-ups around `hit_stack` come first; otherwise a uniformly random
/// untried cell. Returns `None` once every cell has been attacked.
pub fn next_target<R: Rng + ?Sized>(
    hit_stack: &[Coord],
    target: &Gameboard,
    rng: &mut R,
) -> Option<Coord> {
    let follow_up = follow_up_targets(hit_stack, target.size())
        .into_iter()
        .find(|&coord| !target.is_attacked(coord));
    if let Some(coord) = follow_up {
        trace!("following up hits {:?} at {:?}", hit_stack, coord);
        return Some(coord);
    }
    random_untried(target, rng)
}

fn random_untried<R: Rng + ?Sized>(target: &Gameboard, rng: &mut R) -> Option<Coord> {
    let size = target.size();
    for _ in 0..MAX_TARGET_SAMPLES {
        let coord = (rng.random_range(0..size), rng.random_range(0..size));
        if !target.is_attacked(coord) {
            return Some(coord);
        }
    }

    // Nearly exhausted board: choose among what is left instead of sampling blind.
    let untried: Vec<Coord> = target
        .coords()
        .filter(|&coord| !target.is_attacked(coord))
        .collect();
    if untried.is_empty() {
        None
    } else {
        Some(untried[rng.random_range(0..untried.len())])
    }
}
