//! Text commands for the terminal front end.

#![cfg(feature = "std")]

use crate::common::{Coord, ShipId};
use crate::ship::Orientation;

/// A parsed line of terminal input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Randomly place every remaining ship.
    Auto,
    Place {
        ship_id: ShipId,
        origin: Coord,
        orientation: Orientation,
    },
    Rotate(ShipId),
    Remove(ShipId),
    /// Show the player's own board.
    Board,
    Start,
    Fire(Coord),
    Help,
    Quit,
}

/// Format a coordinate the way the player types it, e.g. `(1, 6)` as `B7`.
pub fn format_coord((x, y): Coord) -> String {
    let col = (b'A' + x as u8) as char;
    format!("{}{}", col, y + 1)
}

/// Parse a column letter followed by a 1-based row number, e.g. `B7`.
pub fn parse_coord(input: &str, size: usize) -> Result<Coord, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return Err(format!("Invalid column '{}' - must be a letter", col_ch));
    }
    let x = (col_ch as u8 - b'A') as usize;
    if x >= size {
        return Err(format!("Column '{}' is off the board", col_ch));
    }
    let row_str = chars.as_str();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-{}", row_str, size))?;
    if row == 0 || row > size {
        return Err(format!("Row {} is off the board - must be 1-{}", row, size));
    }
    Ok((x, row - 1))
}

fn parse_ship_id(token: Option<&str>) -> Result<ShipId, String> {
    let token = token.ok_or("Missing ship number")?;
    token
        .parse()
        .map_err(|_| format!("Invalid ship number '{}'", token))
}

fn parse_orientation(token: Option<&str>) -> Result<Orientation, String> {
    match token.map(|t| t.to_ascii_lowercase()).as_deref() {
        Some("v") | Some("vertical") => Ok(Orientation::Vertical),
        Some("h") | Some("horizontal") => Ok(Orientation::Horizontal),
        Some(other) => Err(format!("Invalid orientation '{}' - use v or h", other)),
        None => Err("Missing orientation (v or h)".to_string()),
    }
}

/// Parse one line of input. A bare coordinate is a shot.
pub fn parse_command(line: &str, size: usize) -> Result<Command, String> {
    let mut tokens = line.split_whitespace();
    let head = tokens.next().ok_or("Empty input")?;
    let command = match head.to_ascii_lowercase().as_str() {
        "auto" => Command::Auto,
        "place" => {
            let ship_id = parse_ship_id(tokens.next())?;
            let origin = parse_coord(tokens.next().ok_or("Missing coordinate")?, size)?;
            let orientation = parse_orientation(tokens.next())?;
            Command::Place {
                ship_id,
                origin,
                orientation,
            }
        }
        "rotate" => Command::Rotate(parse_ship_id(tokens.next())?),
        "remove" => Command::Remove(parse_ship_id(tokens.next())?),
        "board" => Command::Board,
        "start" => Command::Start,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Fire(parse_coord(head, size)?),
    };
    if let Some(extra) = tokens.next() {
        return Err(format!("Unexpected '{}'", extra));
    }
    Ok(command)
}

/// Read a yes/no reply. An empty reply means no; anything unrecognised is `None`.
pub fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "" | "n" | "no" | "q" | "quit" => Some(false),
        _ => None,
    }
}
