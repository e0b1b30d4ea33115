use alloc::vec::Vec;
use log::debug;
use rand::Rng;

use crate::{
    ai,
    board::Gameboard,
    common::{Attack, BoardError, Coord},
};

/// A participant: its own board plus the memory it needs to attack.
///
/// Human and AI players share this type; only AI players pick their own
/// targets through [`Player::decide_attack`].
#[derive(Debug, Clone)]
pub struct Player {
    board: Gameboard,
    is_ai: bool,
    repeat_on_hit: bool,
    hit_stack: Vec<Coord>,
}

impl Player {
    pub fn new(board: Gameboard, is_ai: bool, repeat_on_hit: bool) -> Self {
        Self {
            board,
            is_ai,
            repeat_on_hit,
            hit_stack: Vec::new(),
        }
    }

    /// The player's own board.
    pub fn board(&self) -> &Gameboard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Gameboard {
        &mut self.board
    }

    /// Swap in a fresh board during setup, returning the old one.
    pub fn replace_board(&mut self, board: Gameboard) -> Result<Gameboard, BoardError> {
        if self.board.is_active() {
            return Err(BoardError::BoardActive);
        }
        Ok(core::mem::replace(&mut self.board, board))
    }

    pub fn is_ai(&self) -> bool {
        self.is_ai
    }

    /// Whether a hit earns this player another shot.
    pub fn repeat_on_hit(&self) -> bool {
        self.repeat_on_hit
    }

    /// Hits on the ship currently being hunted, in the order they landed.
    pub fn hit_stack(&self) -> &[Coord] {
        &self.hit_stack
    }

    /// Fire at `coord` on `target` and remember the outcome.
    pub fn attack(&mut self, target: &mut Gameboard, coord: Coord) -> Result<Attack, BoardError> {
        let result = target.receive_attack(coord)?;
        if result.is_hit() {
            self.hit_stack.push(coord);
        }
        if result.is_sunk() {
            self.hit_stack.clear();
        }
        Ok(Attack { coord, result })
    }

    /// Let the AI choose a cell on `target` and fire at it.
    /// Returns `Ok(None)` for human players.
    pub fn decide_attack<R: Rng + ?Sized>(
        &mut self,
        target: &mut Gameboard,
        rng: &mut R,
    ) -> Result<Option<Attack>, BoardError> {
        if !self.is_ai {
            return Ok(None);
        }
        let coord = ai::next_target(&self.hit_stack, target, rng).ok_or(BoardError::NoTargetsLeft)?;
        let attack = self.attack(target, coord)?;
        debug!("AI fired at {:?}: {:?}", attack.coord, attack.result);
        Ok(Some(attack))
    }
}
