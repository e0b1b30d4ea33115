use alloc::vec::Vec;
use log::{debug, info};
use rand::Rng;

use crate::{
    board::Gameboard,
    common::{Attack, BoardError, Coord},
    config::GameConfig,
    player::Player,
};

/// One of the two seats at the table. `First` moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    /// Ships are still being placed.
    Setup,
    InProgress,
    Won(Side),
}

/// Errors returned by `Game` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    Board(BoardError),
    /// `start` was called after the game left setup.
    AlreadyStarted,
    /// The side still has ships to place.
    FleetIncomplete(Side),
    /// Shots are only accepted while the game is in progress.
    NotInProgress,
    /// The cell was fired at before; the turn is not consumed.
    AlreadyFired(Coord),
    /// The side to move is not AI controlled.
    NotAi(Side),
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::Board(e) => write!(f, "Board error: {}", e),
            GameError::AlreadyStarted => write!(f, "Game has already started"),
            GameError::FleetIncomplete(side) => {
                write!(f, "{:?} player has not placed every ship", side)
            }
            GameError::NotInProgress => write!(f, "Game is not in progress"),
            GameError::AlreadyFired((x, y)) => {
                write!(f, "Already fired at ({}, {})", x, y)
            }
            GameError::NotAi(side) => write!(f, "{:?} player is not AI controlled", side),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// What happened on a single shot and who moves next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOutcome {
    pub attacker: Side,
    pub attack: Attack,
    /// The attacker shoots again.
    pub repeat: bool,
    pub status: GameStatus,
}

/// A two-player session: turn order, repeat-on-hit and win detection.
#[derive(Debug, Clone)]
pub struct Game {
    players: [Player; 2],
    turn: Side,
    status: GameStatus,
    history: Vec<(Side, Attack)>,
}

impl Game {
    pub fn new(first: Player, second: Player) -> Self {
        Self {
            players: [first, second],
            turn: Side::First,
            status: GameStatus::Setup,
            history: Vec::new(),
        }
    }

    /// Fresh session with empty boards built from `config`.
    pub fn with_config(
        config: &GameConfig,
        first_is_ai: bool,
        second_is_ai: bool,
    ) -> Result<Self, BoardError> {
        config.validate()?;
        let first = Player::new(Gameboard::from_config(config)?, first_is_ai, config.repeat_on_hit);
        let second = Player::new(Gameboard::from_config(config)?, second_is_ai, config.repeat_on_hit);
        Ok(Self::new(first, second))
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::First => &self.players[0],
            Side::Second => &self.players[1],
        }
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::First => &mut self.players[0],
            Side::Second => &mut self.players[1],
        }
    }

    /// Side to move.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Every shot so far, in order.
    pub fn history(&self) -> &[(Side, Attack)] {
        &self.history
    }

    /// Number of shots fired by `side`.
    pub fn shots(&self, side: Side) -> usize {
        self.history.iter().filter(|(s, _)| *s == side).count()
    }

    /// Lock both boards and begin play. Both fleets must be fully placed.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.status != GameStatus::Setup {
            return Err(GameError::AlreadyStarted);
        }
        for side in [Side::First, Side::Second] {
            if !self.player(side).board().all_ships_placed() {
                return Err(GameError::FleetIncomplete(side));
            }
        }
        for player in self.players.iter_mut() {
            player.board_mut().activate();
        }
        self.status = GameStatus::InProgress;
        info!("game started");
        Ok(())
    }

    /// The side to move fires at `coord` on the opponent's board.
    pub fn fire(&mut self, coord: Coord) -> Result<TurnOutcome, GameError> {
        self.ensure_in_progress()?;
        let attacker = self.turn;
        let (shooter, defender) = self.split_mut(attacker);
        if defender.board().is_attacked(coord) {
            return Err(GameError::AlreadyFired(coord));
        }
        let attack = shooter.attack(defender.board_mut(), coord)?;
        Ok(self.resolve(attacker, attack))
    }

    /// One AI shot for the side to move.
    pub fn ai_fire<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TurnOutcome, GameError> {
        self.ensure_in_progress()?;
        let attacker = self.turn;
        let (shooter, defender) = self.split_mut(attacker);
        let attack = shooter
            .decide_attack(defender.board_mut(), rng)?
            .ok_or(GameError::NotAi(attacker))?;
        Ok(self.resolve(attacker, attack))
    }

    /// AI shots for the side to move until it loses the turn or wins.
    pub fn play_ai_turn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Vec<TurnOutcome>, GameError> {
        let mut outcomes = Vec::new();
        loop {
            let outcome = self.ai_fire(rng)?;
            outcomes.push(outcome);
            if !outcome.repeat {
                return Ok(outcomes);
            }
        }
    }

    fn resolve(&mut self, attacker: Side, attack: Attack) -> TurnOutcome {
        self.history.push((attacker, attack));
        let mut repeat = false;
        if self.player(attacker.opponent()).board().all_ships_sunk() {
            self.status = GameStatus::Won(attacker);
            info!(
                "{:?} player wins after {} shots",
                attacker,
                self.shots(attacker)
            );
        } else if attack.result.is_hit() && self.player(attacker).repeat_on_hit() {
            repeat = true;
        } else {
            self.turn = attacker.opponent();
        }
        debug!("{:?} fired at {:?}: {:?}", attacker, attack.coord, attack.result);
        TurnOutcome {
            attacker,
            attack,
            repeat,
            status: self.status,
        }
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        match self.status {
            GameStatus::InProgress => Ok(()),
            _ => Err(GameError::NotInProgress),
        }
    }

    fn split_mut(&mut self, attacker: Side) -> (&mut Player, &mut Player) {
        let [first, second] = &mut self.players;
        match attacker {
            Side::First => (first, second),
            Side::Second => (second, first),
        }
    }
}
