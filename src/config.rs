use alloc::vec::Vec;

use crate::common::BoardError;

pub const BOARD_SIZE: usize = 10;
/// Largest board whose columns can still be lettered `A..=Z`.
pub const MAX_BOARD_SIZE: usize = 26;
pub const NUM_SHIPS: usize = 10;
pub const FLEET: [usize; NUM_SHIPS] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Random origins tried for a single ship before the layout round is abandoned.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1_000;
/// Full layout rounds `auto_place_ships` attempts before giving up.
pub const MAX_LAYOUT_ROUNDS: usize = 100;
/// Random samples the AI draws before choosing among the remaining cells directly.
pub const MAX_TARGET_SAMPLES: usize = 1_000;

/// Class name for a hull of the given length.
pub fn ship_class(length: usize) -> &'static str {
    match length {
        1 => "Submarine",
        2 => "Destroyer",
        3 => "Cruiser",
        4 => "Battleship",
        _ => "Carrier",
    }
}

/// Runtime game settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub fleet: Vec<usize>,
    /// A hit grants the shooter another shot.
    pub repeat_on_hit: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            fleet: FLEET.to_vec(),
            repeat_on_hit: true,
        }
    }
}

impl GameConfig {
    /// Check the board size and every hull length.
    pub fn validate(&self) -> Result<(), BoardError> {
        check_dimensions(self.board_size, &self.fleet)
    }
}

pub(crate) fn check_dimensions(size: usize, fleet: &[usize]) -> Result<(), BoardError> {
    if size == 0 || size > MAX_BOARD_SIZE {
        return Err(BoardError::InvalidBoardSize(size));
    }
    if let Some(&len) = fleet.iter().find(|&&len| len == 0 || len > size) {
        return Err(BoardError::InvalidShipLength(len));
    }
    Ok(())
}
