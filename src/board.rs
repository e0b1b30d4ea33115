//! Gameboard: grid, fleet, placement rules and attack resolution.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use log::{debug, trace};
use rand::Rng;

use crate::common::{AttackResult, BoardError, Coord, ShipId};
use crate::config::{
    check_dimensions, GameConfig, BOARD_SIZE, FLEET, MAX_LAYOUT_ROUNDS, MAX_PLACEMENT_ATTEMPTS,
};
use crate::ship::{Orientation, Ship};

/// Grid cell occupied by a ship segment. The ship itself lives in `placed_ships`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ship_id: ShipId,
    hit: bool,
}

/// A ship on the board along with the cells it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedShip {
    origin: Coord,
    orientation: Orientation,
    coords: Vec<Coord>,
    ship: Ship,
}

impl PlacedShip {
    /// Head cell the ship was placed from.
    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Covered cells, starting at the origin.
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gameboard {
    size: usize,
    fleet: Vec<usize>,
    grid: Vec<Option<Cell>>,
    placed_ships: BTreeMap<ShipId, PlacedShip>,
    missed_hits: BTreeSet<Coord>,
    active: bool,
}

impl Default for Gameboard {
    fn default() -> Self {
        Self::standard()
    }
}

impl Gameboard {
    /// Create an empty board of `size`×`size` for the given fleet.
    pub fn new(size: usize, fleet: &[usize]) -> Result<Self, BoardError> {
        check_dimensions(size, fleet)?;
        Ok(Self::empty(size, fleet.to_vec()))
    }

    /// Empty 10×10 board with the standard ten-ship fleet.
    pub fn standard() -> Self {
        Self::empty(BOARD_SIZE, FLEET.to_vec())
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, BoardError> {
        Self::new(config.board_size, &config.fleet)
    }

    fn empty(size: usize, fleet: Vec<usize>) -> Self {
        Gameboard {
            size,
            fleet,
            grid: vec![None; size * size],
            placed_ships: BTreeMap::new(),
            missed_hits: BTreeSet::new(),
            active: false,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Hull lengths indexed by ship id.
    pub fn fleet(&self) -> &[usize] {
        &self.fleet
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Leave the placement phase. Placement mutators fail from now on.
    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn placed_ships(&self) -> &BTreeMap<ShipId, PlacedShip> {
        &self.placed_ships
    }

    pub fn placed_ship(&self, ship_id: ShipId) -> Option<&PlacedShip> {
        self.placed_ships.get(&ship_id)
    }

    /// Attacked or revealed cells known to hold no ship.
    pub fn missed_hits(&self) -> &BTreeSet<Coord> {
        &self.missed_hits
    }

    pub fn in_bounds(&self, (x, y): Coord) -> bool {
        x < self.size && y < self.size
    }

    /// Every cell of the grid, row by row.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
    }

    /// Ship occupying `coord`, if any.
    pub fn ship_at(&self, coord: Coord) -> Option<ShipId> {
        self.cell(coord).map(|cell| cell.ship_id)
    }

    pub fn is_hit(&self, coord: Coord) -> bool {
        self.cell(coord).is_some_and(|cell| cell.hit)
    }

    pub fn is_missed(&self, coord: Coord) -> bool {
        self.missed_hits.contains(&coord)
    }

    /// Whether `coord` has already been fired at (or revealed as empty).
    pub fn is_attacked(&self, coord: Coord) -> bool {
        self.is_hit(coord) || self.is_missed(coord)
    }

    pub fn all_ships_placed(&self) -> bool {
        self.placed_ships.len() == self.fleet.len()
    }

    /// Returns `true` when every placed ship is sunk. Vacuously true on an empty board.
    pub fn all_ships_sunk(&self) -> bool {
        self.placed_ships.values().all(|placed| placed.ship.is_sunk())
    }

    pub fn ships_afloat(&self) -> usize {
        self.placed_ships
            .values()
            .filter(|placed| !placed.ship.is_sunk())
            .count()
    }

    /// Place ship `ship_id` from `origin` with `orientation`.
    ///
    /// Fails without touching the board when the board is active, the ship is
    /// unknown or already placed, any segment leaves the grid, or any segment
    /// lies on or next to (diagonals included) another ship.
    pub fn place_ship(
        &mut self,
        origin: Coord,
        orientation: Orientation,
        ship_id: ShipId,
    ) -> Result<(), BoardError> {
        self.ensure_editable()?;
        if self.placed_ships.contains_key(&ship_id) {
            return Err(BoardError::ShipAlreadyPlaced(ship_id));
        }
        let length = *self
            .fleet
            .get(ship_id)
            .ok_or(BoardError::UnknownShip(ship_id))?;
        let coords = self
            .footprint(origin, orientation, length)
            .ok_or(BoardError::ShipOutOfBounds)?;
        let crowded = coords.iter().any(|&coord| {
            neighborhood(coord, self.size).any(|near| self.cell(near).is_some())
        });
        if crowded {
            return Err(BoardError::ShipTooClose);
        }

        for &coord in &coords {
            let idx = self.index(coord);
            self.grid[idx] = Some(Cell {
                ship_id,
                hit: false,
            });
        }
        trace!(
            "placed ship {} (length {}) at {:?} {:?}",
            ship_id,
            length,
            origin,
            orientation
        );
        self.placed_ships.insert(
            ship_id,
            PlacedShip {
                origin,
                orientation,
                coords,
                ship: Ship::new(length),
            },
        );
        Ok(())
    }

    /// Take ship `ship_id` off the board, returning its former placement.
    pub fn remove_ship(&mut self, ship_id: ShipId) -> Result<PlacedShip, BoardError> {
        self.ensure_editable()?;
        let placed = self
            .placed_ships
            .remove(&ship_id)
            .ok_or(BoardError::ShipNotPlaced(ship_id))?;
        for &coord in &placed.coords {
            let idx = self.index(coord);
            self.grid[idx] = None;
        }
        trace!("removed ship {}", ship_id);
        Ok(placed)
    }

    /// Turn a ship about its head cell. If the turned ship does not fit, the
    /// original placement is restored and the placement error returned.
    pub fn rotate_ship(&mut self, ship_id: ShipId) -> Result<(), BoardError> {
        self.ensure_editable()?;
        let placed = self
            .placed_ships
            .get(&ship_id)
            .ok_or(BoardError::ShipNotPlaced(ship_id))?;
        let (origin, orientation) = (placed.origin, placed.orientation);

        self.remove_ship(ship_id)?;
        match self.place_ship(origin, orientation.flipped(), ship_id) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.place_ship(origin, orientation, ship_id)?;
                Err(err)
            }
        }
    }

    /// Place every ship not yet on the board at a random origin and orientation.
    ///
    /// Each ship gets `MAX_PLACEMENT_ATTEMPTS` random tries. When one runs out,
    /// the ships placed by this call are lifted and the layout starts over.
    pub fn auto_place_ships<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        self.ensure_editable()?;
        let mut last_err = BoardError::UnableToPlaceShip(0);
        for round in 0..MAX_LAYOUT_ROUNDS {
            let pending: Vec<ShipId> = (0..self.fleet.len())
                .filter(|id| !self.placed_ships.contains_key(id))
                .collect();
            let mut placed_now = Vec::with_capacity(pending.len());
            let mut stuck = None;
            for ship_id in pending {
                match self.place_randomly(rng, ship_id) {
                    Ok(()) => placed_now.push(ship_id),
                    Err(err) => {
                        stuck = Some(err);
                        break;
                    }
                }
            }
            let Some(err) = stuck else {
                return Ok(());
            };
            debug!("layout round {} stuck: {}", round, err);
            for ship_id in placed_now {
                self.remove_ship(ship_id)?;
            }
            last_err = err;
        }
        Err(last_err)
    }

    fn place_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        ship_id: ShipId,
    ) -> Result<(), BoardError> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let origin = (
                rng.random_range(0..self.size),
                rng.random_range(0..self.size),
            );
            let orientation = if rng.random_bool(0.5) {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            };
            match self.place_ship(origin, orientation, ship_id) {
                Ok(()) => return Ok(()),
                Err(BoardError::ShipOutOfBounds | BoardError::ShipTooClose) => continue,
                Err(err) => return Err(err),
            }
        }
        Err(BoardError::UnableToPlaceShip(ship_id))
    }

    /// Resolve an attack at `coord`.
    ///
    /// Repeated attacks on a cell return `Repeated` and change nothing. Sinking
    /// a ship marks every empty cell around it as missed.
    pub fn receive_attack(&mut self, coord: Coord) -> Result<AttackResult, BoardError> {
        if !self.in_bounds(coord) {
            return Err(BoardError::OutOfBounds(coord));
        }
        if self.is_attacked(coord) {
            return Ok(AttackResult::Repeated);
        }

        let idx = self.index(coord);
        let Some(cell) = self.grid[idx].as_mut() else {
            self.missed_hits.insert(coord);
            trace!("miss at {:?}", coord);
            return Ok(AttackResult::Miss);
        };
        cell.hit = true;
        let ship_id = cell.ship_id;
        let placed = self
            .placed_ships
            .get_mut(&ship_id)
            .ok_or(BoardError::ShipNotPlaced(ship_id))?;
        placed.ship.hit();

        if placed.ship.is_sunk() {
            let coords = placed.coords.clone();
            self.reveal_around(&coords);
            debug!("ship {} sunk at {:?}", ship_id, coord);
            Ok(AttackResult::Sunk(ship_id))
        } else {
            trace!("hit ship {} at {:?}", ship_id, coord);
            Ok(AttackResult::Hit(ship_id))
        }
    }

    /// Text rendering of the grid; ships are drawn only when `reveal_ships` is set.
    pub fn view(&self, reveal_ships: bool) -> BoardView<'_> {
        BoardView {
            board: self,
            reveal_ships,
        }
    }

    fn reveal_around(&mut self, coords: &[Coord]) {
        let before = self.missed_hits.len();
        for &coord in coords {
            for near in neighborhood(coord, self.size) {
                if self.grid[self.index(near)].is_none() {
                    self.missed_hits.insert(near);
                }
            }
        }
        trace!("revealed {} cells", self.missed_hits.len() - before);
    }

    fn footprint(&self, origin: Coord, orientation: Orientation, length: usize) -> Option<Vec<Coord>> {
        (0..length)
            .map(|i| {
                orientation
                    .offset(origin, i)
                    .filter(|&coord| self.in_bounds(coord))
            })
            .collect()
    }

    fn ensure_editable(&self) -> Result<(), BoardError> {
        if self.active {
            Err(BoardError::BoardActive)
        } else {
            Ok(())
        }
    }

    fn cell(&self, coord: Coord) -> Option<&Cell> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.grid[self.index(coord)].as_ref()
    }

    #[inline]
    fn index(&self, (x, y): Coord) -> usize {
        y * self.size + x
    }
}

/// Cells within one step of `coord`, itself included, clipped to a `size`×`size` grid.
pub(crate) fn neighborhood((x, y): Coord, size: usize) -> impl Iterator<Item = Coord> {
    (-1isize..=1)
        .flat_map(|dx| (-1isize..=1).map(move |dy| (dx, dy)))
        .filter_map(move |(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            (nx < size && ny < size).then_some((nx, ny))
        })
}

/// `Display` adapter returned by [`Gameboard::view`].
///
/// `#` ship, `X` hit, `o` miss, `.` water. Columns are lettered by `x`, rows numbered by `y + 1`.
pub struct BoardView<'a> {
    board: &'a Gameboard,
    reveal_ships: bool,
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.board.size;
        write!(f, "   ")?;
        for x in 0..size {
            write!(f, " {}", (b'A' + x as u8) as char)?;
        }
        writeln!(f)?;
        for y in 0..size {
            write!(f, "{:2} ", y + 1)?;
            for x in 0..size {
                let ch = match self.board.cell((x, y)) {
                    Some(cell) if cell.hit => 'X',
                    Some(_) if self.reveal_ships => '#',
                    _ if self.board.is_missed((x, y)) => 'o',
                    _ => '.',
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
