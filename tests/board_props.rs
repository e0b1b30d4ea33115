use broadside::{AttackResult, Gameboard, Ship, BOARD_SIZE, FLEET};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn random_board(seed: u64) -> Gameboard {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Gameboard::standard();
    board.auto_place_ships(&mut rng).unwrap();
    board
}

fn touching(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn auto_placement_never_overlaps_or_touches(seed in any::<u64>()) {
        let board = random_board(seed);
        prop_assert!(board.all_ships_placed());

        let ships: Vec<_> = board.placed_ships().iter().collect();
        for (i, (id_a, a)) in ships.iter().enumerate() {
            prop_assert_eq!(a.coords().len(), FLEET[**id_a]);
            for &coord in a.coords() {
                prop_assert_eq!(board.ship_at(coord), Some(**id_a));
            }
            for (_, b) in ships.iter().skip(i + 1) {
                for &ca in a.coords() {
                    for &cb in b.coords() {
                        prop_assert!(!touching(ca, cb), "{:?} touches {:?}", ca, cb);
                    }
                }
            }
        }
    }

    #[test]
    fn attack_is_idempotent(seed in any::<u64>(), x in 0..BOARD_SIZE, y in 0..BOARD_SIZE) {
        let mut board = random_board(seed);
        board.activate();
        let before = board.clone();
        board.receive_attack((x, y)).unwrap();
        let after_first = board.clone();
        prop_assert_ne!(&before, &after_first);

        let second = board.receive_attack((x, y)).unwrap();
        prop_assert_eq!(second, AttackResult::Repeated);
        prop_assert_eq!(&board, &after_first);
    }

    #[test]
    fn ship_hits_saturate(length in 1usize..6, calls in 0usize..12) {
        let mut ship = Ship::new(length);
        for _ in 0..calls {
            ship.hit();
        }
        prop_assert_eq!(ship.hits(), length.min(calls));
        prop_assert_eq!(ship.is_sunk(), ship.hits() == length);
    }

    #[test]
    fn sinking_reveals_every_empty_neighbour(seed in any::<u64>(), ship_id in 0..FLEET.len()) {
        let mut board = random_board(seed);
        let coords = board.placed_ship(ship_id).unwrap().coords().to_vec();

        let mut last = AttackResult::Miss;
        for &coord in &coords {
            last = board.receive_attack(coord).unwrap();
        }
        prop_assert_eq!(last, AttackResult::Sunk(ship_id));

        for cell in board.coords() {
            let in_halo = coords.iter().any(|&c| touching(c, cell));
            let is_ship_cell = coords.contains(&cell);
            prop_assert_eq!(board.is_missed(cell), in_halo && !is_ship_cell);
        }
    }

    #[test]
    fn all_placed_iff_every_id_placed(seed in any::<u64>(), removed in 0usize..4) {
        let mut board = random_board(seed);
        for ship_id in 0..removed {
            board.remove_ship(ship_id).unwrap();
        }
        prop_assert_eq!(board.placed_ships().len(), FLEET.len() - removed);
        prop_assert_eq!(board.all_ships_placed(), removed == 0);
    }
}
