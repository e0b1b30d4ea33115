use std::io::{self, BufRead, Write};

use broadside::{
    cli::{format_coord, parse_answer, parse_command, Command},
    init_logging, ship_class, AttackResult, Game, GameConfig, GameStatus, Gameboard, Side,
    TurnOutcome,
};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;
use tokio::time::{sleep, Duration};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Log level (off, error, warn, info, debug, trace); overrides BROADSIDE_LOG"
    )]
    log_level: Option<LevelFilter>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the AI in the terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 400, help = "Pause between consecutive AI shots")]
        delay_ms: u64,
        #[arg(long, help = "A hit does not grant another shot")]
        no_repeat: bool,
    },
    /// Let two AI players fight and print a JSON summary.
    Sim {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 0, help = "Pause between consecutive AI shots")]
        delay_ms: u64,
        #[arg(long, help = "A hit does not grant another shot")]
        no_repeat: bool,
        #[arg(long, help = "Include every shot in the summary")]
        history: bool,
    },
    /// Print a randomly placed standard fleet.
    Layout {
        #[arg(long, help = "Fix RNG seed for a reproducible layout")]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.command {
        Commands::Play {
            seed,
            delay_ms,
            no_repeat,
        } => {
            let config = GameConfig {
                repeat_on_hit: !no_repeat,
                ..GameConfig::default()
            };
            run_play(config, make_rng(seed), Duration::from_millis(delay_ms)).await?;
        }
        Commands::Sim {
            seed,
            delay_ms,
            no_repeat,
            history,
        } => {
            let config = GameConfig {
                repeat_on_hit: !no_repeat,
                ..GameConfig::default()
            };
            run_sim(config, make_rng(seed), Duration::from_millis(delay_ms), history).await?;
        }
        Commands::Layout { seed } => {
            let mut rng = make_rng(seed);
            let mut board = Gameboard::standard();
            board.auto_place_ships(&mut rng)?;
            print_fleet(&board);
        }
    }
    Ok(())
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

async fn run_sim(
    config: GameConfig,
    mut rng: SmallRng,
    delay: Duration,
    history: bool,
) -> anyhow::Result<()> {
    let mut game = Game::with_config(&config, true, true)?;
    for side in [Side::First, Side::Second] {
        game.player_mut(side).board_mut().auto_place_ships(&mut rng)?;
    }
    game.start()?;

    while game.status() == GameStatus::InProgress {
        let outcome = game.ai_fire(&mut rng)?;
        if outcome.repeat && !delay.is_zero() {
            sleep(delay).await;
        }
    }

    let winner = match game.status() {
        GameStatus::Won(side) => Some(side),
        _ => None,
    };
    let mut summary = json!({
        "status": game.status(),
        "winner": winner,
        "shots": {
            "first": game.shots(Side::First),
            "second": game.shots(Side::Second),
        },
    });
    if history {
        summary["history"] = serde_json::to_value(game.history())?;
    }
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

/// How a round of `play` ended.
enum RoundEnd {
    Finished,
    Quit,
}

async fn run_play(config: GameConfig, mut rng: SmallRng, delay: Duration) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if let RoundEnd::Quit = play_round(&config, &mut rng, delay, &mut lines).await? {
            return Ok(());
        }
        loop {
            let Some(line) = prompt(&mut lines, "Play again? [y/N] ")? else {
                return Ok(());
            };
            match parse_answer(&line) {
                Some(true) => break,
                Some(false) => return Ok(()),
                None => println!("Answer y or n."),
            }
        }
    }
}

async fn play_round<I>(
    config: &GameConfig,
    rng: &mut SmallRng,
    delay: Duration,
    lines: &mut I,
) -> anyhow::Result<RoundEnd>
where
    I: Iterator<Item = io::Result<String>>,
{
    let size = config.board_size;
    let mut game = Game::with_config(config, false, true)?;
    game.player_mut(Side::Second).board_mut().auto_place_ships(rng)?;

    println!("Place your fleet. Type `help` for commands.");
    print_fleet(game.player(Side::First).board());
    loop {
        let Some(line) = prompt(lines, "setup> ")? else {
            return Ok(RoundEnd::Quit);
        };
        let command = match parse_command(&line, size) {
            Ok(command) => command,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };
        let result = match command {
            Command::Auto => {
                let mut fresh = Gameboard::from_config(config)?;
                fresh.auto_place_ships(rng)?;
                game.player_mut(Side::First)
                    .replace_board(fresh)
                    .map(|_| ())
            }
            Command::Place {
                ship_id,
                origin,
                orientation,
            } => own_board(&mut game).place_ship(origin, orientation, ship_id),
            Command::Rotate(ship_id) => own_board(&mut game).rotate_ship(ship_id),
            Command::Remove(ship_id) => own_board(&mut game).remove_ship(ship_id).map(|_| ()),
            Command::Board => Ok(()),
            Command::Start => match game.start() {
                Ok(()) => break,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            },
            Command::Help => {
                print_help();
                continue;
            }
            Command::Quit => return Ok(RoundEnd::Quit),
            Command::Fire(_) => {
                println!("Place your fleet and `start` before firing.");
                continue;
            }
        };
        match result {
            Ok(()) => print_fleet(game.player(Side::First).board()),
            Err(e) => println!("{}", e),
        }
    }

    println!("Game started! Your turn.");
    loop {
        if let GameStatus::Won(side) = game.status() {
            print_boards(&game);
            match side {
                Side::First => println!("\nYou win! Every enemy ship is sunk."),
                Side::Second => println!("\nComputer wins! Your fleet is gone."),
            }
            return Ok(RoundEnd::Finished);
        }

        if game.turn() == Side::First {
            print_boards(&game);
            let Some(line) = prompt(lines, "fire> ")? else {
                return Ok(RoundEnd::Quit);
            };
            match parse_command(&line, size) {
                Ok(Command::Fire(coord)) => match game.fire(coord) {
                    Ok(outcome) => println!("{}", describe(&outcome, &config.fleet)),
                    Err(e) => println!("{}", e),
                },
                Ok(Command::Board) => {}
                Ok(Command::Help) => print_help(),
                Ok(Command::Quit) => return Ok(RoundEnd::Quit),
                Ok(_) => println!("The fleet is locked; fire at a coordinate like B7."),
                Err(msg) => println!("{}", msg),
            }
        } else {
            loop {
                let outcome = game.ai_fire(rng)?;
                println!("{}", describe(&outcome, &config.fleet));
                if !outcome.repeat {
                    break;
                }
                sleep(delay).await;
            }
        }
    }
}

fn own_board(game: &mut Game) -> &mut Gameboard {
    game.player_mut(Side::First).board_mut()
}

fn prompt<I>(lines: &mut I, label: &str) -> anyhow::Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{}", label);
    io::stdout().flush()?;
    Ok(lines.next().transpose()?)
}

fn describe(outcome: &TurnOutcome, fleet: &[usize]) -> String {
    let who = match outcome.attacker {
        Side::First => "You",
        Side::Second => "Computer",
    };
    let at = format_coord(outcome.attack.coord);
    match outcome.attack.result {
        AttackResult::Miss => format!("{} fired at {}: miss.", who, at),
        AttackResult::Hit(_) => format!("{} fired at {}: hit!", who, at),
        AttackResult::Sunk(id) => {
            let class = fleet.get(id).map_or("ship", |&len| ship_class(len));
            format!("{} fired at {}: sank a {}!", who, at, class)
        }
        AttackResult::Repeated => format!("{} fired at {} again.", who, at),
    }
}

fn print_fleet(board: &Gameboard) {
    println!("{}", board.view(true));
    for (id, &len) in board.fleet().iter().enumerate() {
        match board.placed_ship(id) {
            Some(placed) => println!(
                "  [{}] {} ({}) at {} {:?}",
                id,
                ship_class(len),
                len,
                format_coord(placed.origin()),
                placed.orientation()
            ),
            None => println!("  [{}] {} ({}) not placed", id, ship_class(len), len),
        }
    }
}

fn print_boards(game: &Game) {
    let enemy = game.player(Side::Second).board();
    println!("\nEnemy waters ({} ships afloat):", enemy.ships_afloat());
    println!("{}", enemy.view(false));
    println!("Your fleet:");
    println!("{}", game.player(Side::First).board().view(true));
}

fn print_help() {
    println!("Setup:");
    println!("  auto                 place (or re-place) the whole fleet randomly");
    println!("  place ID COORD v|h   place ship ID with its head at COORD, e.g. place 0 B2 v");
    println!("  rotate ID            turn a placed ship about its head");
    println!("  remove ID            take a ship off the board");
    println!("  board                show your fleet");
    println!("  start                lock the fleet and begin");
    println!("Play:");
    println!("  COORD                fire, e.g. B7");
    println!("After a game you can start another one.");
    println!("  quit                 leave the game");
}
