//! Common types for the engine: coordinates, attack results and board errors.

/// Board coordinate `(x, y)`. Vertical ships extend along `y`, horizontal ships along `x`.
pub type Coord = (usize, usize);

/// Index of a ship in the fleet definition.
pub type ShipId = usize;

/// Outcome of a single attack against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackResult {
    /// No ship at the coordinate.
    Miss,
    /// Struck a ship that is still afloat.
    Hit(ShipId),
    /// Struck the last intact segment of a ship.
    Sunk(ShipId),
    /// The coordinate had already been attacked; nothing changed.
    Repeated,
}

impl AttackResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, AttackResult::Hit(_) | AttackResult::Sunk(_))
    }

    pub fn is_sunk(&self) -> bool {
        matches!(self, AttackResult::Sunk(_))
    }

    /// Ship struck by the attack, if any.
    pub fn ship_id(&self) -> Option<ShipId> {
        match self {
            AttackResult::Hit(id) | AttackResult::Sunk(id) => Some(*id),
            AttackResult::Miss | AttackResult::Repeated => None,
        }
    }
}

/// An attack together with where it landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Attack {
    pub coord: Coord,
    pub result: AttackResult,
}

/// Errors returned by `Gameboard` and `Player` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The board has left the placement phase.
    BoardActive,
    /// Ship id has no entry in the fleet.
    UnknownShip(ShipId),
    /// Attempted to place a ship that is already placed.
    ShipAlreadyPlaced(ShipId),
    /// The ship is not on the board.
    ShipNotPlaced(ShipId),
    /// Part of the ship would fall outside the grid.
    ShipOutOfBounds,
    /// The ship would overlap or touch another ship.
    ShipTooClose,
    /// Random placement gave up.
    UnableToPlaceShip(ShipId),
    /// Coordinate is outside the grid.
    OutOfBounds(Coord),
    /// Every cell has already been attacked.
    NoTargetsLeft,
    InvalidBoardSize(usize),
    InvalidShipLength(usize),
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::BoardActive => write!(f, "Board is active; placement is locked"),
            BoardError::UnknownShip(id) => write!(f, "Ship {} is not part of the fleet", id),
            BoardError::ShipAlreadyPlaced(id) => write!(f, "Ship {} is already placed", id),
            BoardError::ShipNotPlaced(id) => write!(f, "Ship {} is not placed", id),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipTooClose => {
                write!(f, "Ship placement overlaps or touches another ship")
            }
            BoardError::UnableToPlaceShip(id) => write!(f, "Unable to place ship {}", id),
            BoardError::OutOfBounds((x, y)) => {
                write!(f, "Coordinate ({}, {}) is outside the board", x, y)
            }
            BoardError::NoTargetsLeft => write!(f, "Every cell has already been attacked"),
            BoardError::InvalidBoardSize(size) => write!(f, "Invalid board size {}", size),
            BoardError::InvalidShipLength(len) => write!(f, "Invalid ship length {}", len),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
