use broadside::{follow_up_targets, next_target, Gameboard};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_no_hits_no_follow_ups() {
    assert!(follow_up_targets(&[], 10).is_empty());
}

#[test]
fn test_single_hit_yields_orthogonal_neighbours() {
    assert_eq!(
        follow_up_targets(&[(5, 5)], 10),
        vec![(4, 5), (6, 5), (5, 4), (5, 6)]
    );
}

#[test]
fn test_single_hit_in_corner_is_clipped() {
    assert_eq!(follow_up_targets(&[(0, 0)], 10), vec![(1, 0), (0, 1)]);
    assert_eq!(follow_up_targets(&[(9, 9)], 10), vec![(8, 9), (9, 8)]);
}

#[test]
fn test_same_column_extends_vertically() {
    assert_eq!(
        follow_up_targets(&[(3, 3), (3, 5)], 10),
        vec![(3, 2), (3, 6)]
    );
}

#[test]
fn test_same_row_extends_horizontally() {
    assert_eq!(
        follow_up_targets(&[(6, 2), (4, 2)], 10),
        vec![(3, 2), (7, 2)]
    );
}

#[test]
fn test_run_of_hits_extends_from_both_ends() {
    assert_eq!(
        follow_up_targets(&[(5, 5), (5, 3), (5, 4)], 10),
        vec![(5, 2), (5, 6)]
    );
}

#[test]
fn test_run_against_edge_keeps_open_end() {
    assert_eq!(follow_up_targets(&[(0, 1), (0, 0)], 10), vec![(0, 2)]);
    assert_eq!(follow_up_targets(&[(8, 4), (9, 4)], 10), vec![(7, 4)]);
}

#[test]
fn test_unaligned_hits_yield_nothing() {
    assert!(follow_up_targets(&[(1, 1), (2, 2)], 10).is_empty());
}

#[test]
fn test_next_target_skips_attacked_candidates() {
    let mut board = Gameboard::standard();
    board.receive_attack((4, 5)).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(next_target(&[(5, 5)], &board, &mut rng), Some((6, 5)));
}

#[test]
fn test_next_target_falls_back_to_random_untried() {
    let mut board = Gameboard::standard();
    for coord in [(4, 5), (6, 5), (5, 4), (5, 6)] {
        board.receive_attack(coord).unwrap();
    }
    let mut rng = SmallRng::seed_from_u64(2);
    for _ in 0..50 {
        let coord = next_target(&[(5, 5)], &board, &mut rng).unwrap();
        assert!(board.in_bounds(coord));
        assert!(!board.is_attacked(coord));
    }
}

#[test]
fn test_next_target_finds_last_untried_cell() {
    let mut board = Gameboard::new(3, &[1]).unwrap();
    for coord in board.coords().collect::<Vec<_>>() {
        if coord != (2, 1) {
            board.receive_attack(coord).unwrap();
        }
    }
    let mut rng = SmallRng::seed_from_u64(3);
    assert_eq!(next_target(&[], &board, &mut rng), Some((2, 1)));

    board.receive_attack((2, 1)).unwrap();
    assert_eq!(next_target(&[], &board, &mut rng), None);
}
