use crate::ship::ShipType;

/// Inclusive bounds on board dimensions.
pub const MIN_DIMENSION: usize = 1;
pub const MAX_DIMENSION: usize = 999;

/// Board size used when the player does not pick one.
pub const DEFAULT_BOARD_SIZE: usize = 10;

/// Classic fleet, placed in order on every new game.
pub const DEFAULT_FLEET: [ShipType; 5] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

/// Per-ship retry cap during random placement. Exceeding it means the
/// board cannot reasonably fit the fleet.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;
