use battleships::{place_fleet, Board, BoardError, Cell, ShipType, DEFAULT_FLEET};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

#[test]
fn test_fleet_placement_covers_expected_cells() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut board = Board::new(10, 10).unwrap();
    place_fleet(&mut board, &DEFAULT_FLEET, &mut rng).unwrap();

    assert_eq!(board.ships().len(), DEFAULT_FLEET.len());
    assert_eq!(board.ship_cell_count(), 17);

    // every ship cell is in bounds and claimed by exactly one ship: if
    // two ships shared a cell the occupied count would come up short
    let mut occupied = 0;
    for r in 0..10 {
        for c in 0..10 {
            if matches!(board.cell(r, c).unwrap(), Cell::ShipUnhit(_)) {
                occupied += 1;
            }
        }
    }
    assert_eq!(occupied, 17);

    for ship in board.ships() {
        for (r, c) in ship.cells() {
            assert!(board.in_bounds(r, c));
        }
    }
}

#[test]
fn test_placement_reproducible_under_fixed_seed() {
    let build = || {
        let mut rng = SmallRng::seed_from_u64(12345);
        let mut board = Board::new(10, 10).unwrap();
        place_fleet(&mut board, &DEFAULT_FLEET, &mut rng).unwrap();
        board
    };
    assert_eq!(build(), build());
}

#[test]
fn test_fleet_exceeding_cell_count_fails_fast() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut board = Board::new(1, 1).unwrap();
    let fleet = [ShipType::new("Destroyer", 2)];
    assert_eq!(
        place_fleet(&mut board, &fleet, &mut rng).unwrap_err(),
        BoardError::BoardTooSmall
    );

    let mut board = Board::new(3, 3).unwrap();
    let fleet = [
        ShipType::new("Cruiser", 3),
        ShipType::new("Cruiser", 3),
        ShipType::new("Cruiser", 3),
        ShipType::new("Destroyer", 2),
    ];
    assert_eq!(
        place_fleet(&mut board, &fleet, &mut rng).unwrap_err(),
        BoardError::BoardTooSmall
    );
}

#[test]
fn test_unplaceable_ship_terminates_with_board_too_small() {
    // 5 cells of room but no row or column of length 5: the retry cap
    // must fire rather than looping forever
    let mut rng = SmallRng::seed_from_u64(7);
    let mut board = Board::new(3, 3).unwrap();
    let fleet = [ShipType::new("Carrier", 5)];
    assert_eq!(
        place_fleet(&mut board, &fleet, &mut rng).unwrap_err(),
        BoardError::BoardTooSmall
    );
}

#[test]
fn test_single_file_board_places_exact_fit() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut board = Board::new(1, 5).unwrap();
    let fleet = [ShipType::new("Carrier", 5)];
    place_fleet(&mut board, &fleet, &mut rng).unwrap();
    assert_eq!(board.ships()[0].origin(), (0, 0));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placed_fleets_never_overlap(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(10, 10).unwrap();
        place_fleet(&mut board, &DEFAULT_FLEET, &mut rng).unwrap();

        let expected: usize = DEFAULT_FLEET.iter().map(|s| s.length()).sum();
        let mut occupied = 0;
        for r in 0..10 {
            for c in 0..10 {
                if matches!(board.cell(r, c).unwrap(), Cell::ShipUnhit(_)) {
                    occupied += 1;
                }
            }
        }
        prop_assert_eq!(occupied, expected);
    }
}
