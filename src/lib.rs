#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod ai;
mod board;
mod common;
mod config;
mod game;
mod player;
mod ship;
#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
mod logging;

pub use ai::{follow_up_targets, next_target};
pub use board::{BoardView, Gameboard, PlacedShip};
pub use common::*;
pub use config::*;
pub use game::*;
pub use player::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, resolve_level, LOG_ENV};
