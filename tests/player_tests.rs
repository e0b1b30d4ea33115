use std::collections::BTreeSet;

use broadside::{AttackResult, BoardError, Gameboard, Orientation, Player};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn target_with(ships: &[((usize, usize), Orientation, usize)]) -> Gameboard {
    let mut board = Gameboard::standard();
    for &(origin, orientation, id) in ships {
        board.place_ship(origin, orientation, id).unwrap();
    }
    board.activate();
    board
}

#[test]
fn test_new_player_defaults() {
    let player = Player::new(Gameboard::standard(), false, false);
    assert!(!player.is_ai());
    assert!(!player.repeat_on_hit());
    assert!(player.hit_stack().is_empty());
    assert_eq!(player.board(), &Gameboard::standard());

    let ai = Player::new(Gameboard::standard(), true, true);
    assert!(ai.is_ai());
    assert!(ai.repeat_on_hit());
}

#[test]
fn test_attack_tracks_hits_until_sunk() {
    let mut target = target_with(&[((2, 2), Orientation::Horizontal, 4)]);
    let mut player = Player::new(Gameboard::standard(), false, false);

    let miss = player.attack(&mut target, (5, 5)).unwrap();
    assert_eq!(miss.coord, (5, 5));
    assert_eq!(miss.result, AttackResult::Miss);
    assert!(player.hit_stack().is_empty());

    let hit = player.attack(&mut target, (2, 2)).unwrap();
    assert_eq!(hit.result, AttackResult::Hit(4));
    assert_eq!(player.hit_stack(), &[(2, 2)]);

    let repeat = player.attack(&mut target, (2, 2)).unwrap();
    assert_eq!(repeat.result, AttackResult::Repeated);
    assert_eq!(player.hit_stack(), &[(2, 2)]);

    let sunk = player.attack(&mut target, (3, 2)).unwrap();
    assert_eq!(sunk.result, AttackResult::Sunk(4));
    assert!(player.hit_stack().is_empty());
}

#[test]
fn test_attack_out_of_bounds_propagates_error() {
    let mut target = target_with(&[]);
    let mut player = Player::new(Gameboard::standard(), true, false);
    assert_eq!(
        player.attack(&mut target, (3, 10)).unwrap_err(),
        BoardError::OutOfBounds((3, 10))
    );
    assert!(player.hit_stack().is_empty());
}

#[test]
fn test_decide_attack_human_returns_none() {
    let mut target = target_with(&[((0, 0), Orientation::Vertical, 0)]);
    let before = target.clone();
    let mut rng = SmallRng::seed_from_u64(1);
    let mut player = Player::new(Gameboard::standard(), false, true);

    assert_eq!(player.decide_attack(&mut target, &mut rng).unwrap(), None);
    assert_eq!(target, before);
}

#[test]
fn test_decide_attack_probes_neighbours_of_single_hit() {
    let mut target = target_with(&[((5, 4), Orientation::Vertical, 1)]);
    let mut rng = SmallRng::seed_from_u64(9);
    let mut ai = Player::new(Gameboard::standard(), true, true);
    ai.attack(&mut target, (5, 5)).unwrap();
    assert_eq!(ai.hit_stack(), &[(5, 5)]);

    let attack = ai.decide_attack(&mut target, &mut rng).unwrap().unwrap();
    let neighbours: BTreeSet<_> = [(4, 5), (6, 5), (5, 4), (5, 6)].into_iter().collect();
    assert!(neighbours.contains(&attack.coord));
    assert_eq!(attack.coord, (4, 5));
    assert_eq!(attack.result, AttackResult::Miss);
}

#[test]
fn test_decide_attack_extends_along_inferred_axis() {
    let mut target = target_with(&[((3, 2), Orientation::Vertical, 0)]);
    let mut rng = SmallRng::seed_from_u64(11);
    let mut ai = Player::new(Gameboard::standard(), true, true);
    ai.attack(&mut target, (3, 3)).unwrap();
    ai.attack(&mut target, (3, 5)).unwrap();
    assert_eq!(ai.hit_stack(), &[(3, 3), (3, 5)]);

    let attack = ai.decide_attack(&mut target, &mut rng).unwrap().unwrap();
    assert_eq!(attack.coord, (3, 2));
    assert_eq!(attack.result, AttackResult::Hit(0));
    assert_eq!(ai.hit_stack(), &[(3, 3), (3, 5), (3, 2)]);
}

#[test]
fn test_decide_attack_skips_tried_extension() {
    let mut target = target_with(&[((3, 3), Orientation::Vertical, 1)]);
    target.receive_attack((3, 2)).unwrap();
    let mut rng = SmallRng::seed_from_u64(5);
    let mut ai = Player::new(Gameboard::standard(), true, true);
    ai.attack(&mut target, (3, 3)).unwrap();
    ai.attack(&mut target, (3, 4)).unwrap();

    let attack = ai.decide_attack(&mut target, &mut rng).unwrap().unwrap();
    assert_eq!(attack.coord, (3, 5));
    assert_eq!(attack.result, AttackResult::Sunk(1));
    assert!(ai.hit_stack().is_empty());
}

#[test]
fn test_ai_clears_a_whole_board() {
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut target = Gameboard::standard();
    target.auto_place_ships(&mut rng).unwrap();
    target.activate();
    let mut ai = Player::new(Gameboard::standard(), true, true);

    let mut shots = 0;
    while !target.all_ships_sunk() {
        let attack = ai.decide_attack(&mut target, &mut rng).unwrap().unwrap();
        assert_ne!(attack.result, AttackResult::Repeated);
        shots += 1;
        assert!(shots <= 100, "AI fired more shots than there are cells");
    }
    assert!(ai.hit_stack().is_empty());
}

#[test]
fn test_decide_attack_on_exhausted_board() {
    let mut target = Gameboard::new(2, &[1]).unwrap();
    target.place_ship((0, 0), Orientation::Vertical, 0).unwrap();
    target.activate();
    let mut rng = SmallRng::seed_from_u64(0);
    let mut ai = Player::new(Gameboard::standard(), true, false);

    let attack = ai.attack(&mut target, (0, 0)).unwrap();
    assert_eq!(attack.result, AttackResult::Sunk(0));
    assert_eq!(
        ai.decide_attack(&mut target, &mut rng).unwrap_err(),
        BoardError::NoTargetsLeft
    );
}

#[test]
fn test_replace_board_only_during_setup() {
    let mut rng = SmallRng::seed_from_u64(8);
    let mut player = Player::new(Gameboard::standard(), false, true);
    player.board_mut().place_ship((0, 0), Orientation::Vertical, 0).unwrap();

    let mut fresh = Gameboard::standard();
    fresh.auto_place_ships(&mut rng).unwrap();
    let old = player.replace_board(fresh.clone()).unwrap();
    assert_eq!(old.placed_ships().len(), 1);
    assert_eq!(player.board(), &fresh);

    player.board_mut().activate();
    assert_eq!(
        player.replace_board(Gameboard::standard()).unwrap_err(),
        BoardError::BoardActive
    );
}
