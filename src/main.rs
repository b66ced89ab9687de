use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::anyhow;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use battleships::{
    default_data_dir, init_logging, ui, FireOutcome, GameSession, GameStatus, SaveStore,
    ScoreStore, StoreError, DEFAULT_BOARD_SIZE, DEFAULT_FLEET, MAX_DIMENSION, MIN_DIMENSION,
};

#[derive(Parser)]
#[command(author, version, about = "A one sided game of battleships", long_about = None)]
struct Cli {
    #[arg(long, help = "Fix RNG seed for reproducible ship placement (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "Data directory for saves and scores (defaults to the platform one)")]
    data_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let saves = SaveStore::open(&data_dir).map_err(|e| anyhow!(e))?;
    let scores = ScoreStore::open(&data_dir).map_err(|e| anyhow!(e))?;
    let mut rng = match cli.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    };

    let mut session: Option<GameSession> = None;
    println!("Welcome to Battle Ships");
    loop {
        println!();
        println!("[1] Play");
        println!("[2] Start a new game");
        println!("[3] Load a saved game");
        println!("[4] Delete a saved game");
        println!("[5] View saved games");
        println!("[6] View scores");
        println!("[7] Help");
        println!("[8] Quit");
        let choice = match prompt("Please choose an option [1-8]: ") {
            Some(line) => line,
            None => break,
        };
        match choice.trim() {
            "1" => {
                if session.is_none() {
                    session = Some(create_new(&mut rng)?);
                }
                if let Some(current) = session.as_mut() {
                    if !play(current, &saves, &scores)? {
                        session = None;
                    }
                }
            }
            "2" => session = Some(create_new(&mut rng)?),
            "3" => {
                if let Some(loaded) = load_game(&saves)? {
                    session = Some(loaded);
                }
            }
            "4" => delete_game(&saves)?,
            "5" => view_saves(&saves)?,
            "6" => view_scores(&scores)?,
            "7" => show_help(),
            "8" => {
                if confirm("Are you sure you want to quit? [y/N]: ")? {
                    println!("Bye");
                    break;
                }
            }
            _ => println!("Please choose an option between 1 and 8"),
        }
    }
    Ok(())
}

/// The main game loop. Returns `true` when the session should be kept
/// for another visit to the menu, `false` once it is finished or dropped.
fn play(session: &mut GameSession, saves: &SaveStore, scores: &ScoreStore) -> anyhow::Result<bool> {
    println!("Type 'menu' at the coordinate prompt for save and exit options");
    loop {
        println!("\nShots fired: {}", session.shots());
        println!("{}", ui::render_view(session.board()));
        let line = match prompt(
            "Please enter the X and Y coordinates you wish to engage separated by a comma: ",
        ) {
            Some(line) => line,
            // End of input routes to the options menu, same as 'menu'.
            None => return game_options(session, saves),
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("menu") {
            if game_options(session, saves)? {
                continue;
            }
            return Ok(false);
        }
        let (row, col) = match parse_coordinates(line, session.board().width(), session.board().height()) {
            Some(coord) => coord,
            None => {
                println!("Invalid coordinates");
                continue;
            }
        };
        let report = session.fire_at(row, col).map_err(|e| anyhow!(e))?;
        match report.outcome {
            FireOutcome::Hit => println!("Hit!"),
            FireOutcome::Miss => println!("Miss"),
            FireOutcome::AlreadyFired => println!("You already fired at that position"),
        }
        if let Some(name) = &report.sunk_ship {
            println!("You sank the {}!", name);
        }
        if report.status == GameStatus::Won {
            println!("\n{}", ui::render_view(session.board()));
            println!("You won! All ships sunk in {} shots.", session.shots());
            if confirm("Record this score? [y/N]: ")? {
                scores.record(session.shots()).map_err(|e| anyhow!(e))?;
                println!("Score recorded");
            }
            return Ok(false);
        }
        // brief pause so the result is readable before the next prompt
        thread::sleep(Duration::from_millis(750));
    }
}

/// In-game options menu: save and exit, exit without saving, or return.
/// Returns `true` to resume play, `false` to leave the session.
fn game_options(session: &GameSession, saves: &SaveStore) -> anyhow::Result<bool> {
    println!("\n[1] Save and exit");
    println!("[2] Exit without saving");
    println!("[3] Return to game");
    loop {
        let choice = match prompt("Please enter an option [1-3]: ") {
            Some(line) => line,
            None => return Ok(false),
        };
        match choice.trim() {
            "1" => {
                let name = match prompt("Please enter a name for this game: ") {
                    Some(line) => line.trim().to_string(),
                    None => return Ok(false),
                };
                match saves.save_game(session, &name) {
                    Ok(()) => {
                        println!("Game saved");
                        return Ok(false);
                    }
                    Err(e @ StoreError::NameConflict(_)) | Err(e @ StoreError::InvalidName) => {
                        println!("{}", e);
                    }
                    Err(e) => return Err(anyhow!(e)),
                }
            }
            "2" => {
                if confirm("Are you sure? [y/N]: ")? {
                    return Ok(false);
                }
                return Ok(true);
            }
            "3" => return Ok(true),
            _ => {}
        }
    }
}

fn create_new(rng: &mut SmallRng) -> anyhow::Result<GameSession> {
    loop {
        let width = prompt_dimension("width")?;
        let height = prompt_dimension("height")?;
        match GameSession::new(height, width, &DEFAULT_FLEET, rng) {
            Ok(session) => {
                println!("Game created");
                return Ok(session);
            }
            Err(e) => {
                println!("{}", e);
                println!("Please choose a larger board");
            }
        }
    }
}

fn prompt_dimension(label: &str) -> anyhow::Result<usize> {
    loop {
        let line = match prompt(&format!(
            "Please enter the board {} [{}-{}, default {}]: ",
            label, MIN_DIMENSION, MAX_DIMENSION, DEFAULT_BOARD_SIZE
        )) {
            Some(line) => line,
            None => return Ok(DEFAULT_BOARD_SIZE),
        };
        let line = line.trim();
        if line.is_empty() {
            return Ok(DEFAULT_BOARD_SIZE);
        }
        match line.parse::<usize>() {
            Ok(value) if (MIN_DIMENSION..=MAX_DIMENSION).contains(&value) => return Ok(value),
            Ok(_) => println!(
                "The board {} must be between {} and {}",
                label, MIN_DIMENSION, MAX_DIMENSION
            ),
            Err(_) => println!("Please enter a valid number!"),
        }
    }
}

fn load_game(saves: &SaveStore) -> anyhow::Result<Option<GameSession>> {
    list_saves(saves)?;
    let name = match prompt("Please enter the name of the game you wish to load: ") {
        Some(line) => line.trim().to_string(),
        None => return Ok(None),
    };
    if name.is_empty() {
        return Ok(None);
    }
    match saves.load_game(&name) {
        Ok(session) => {
            println!("Loaded game files");
            Ok(Some(session))
        }
        Err(e @ StoreError::NotFound(_))
        | Err(e @ StoreError::IntegrityCheckFailed)
        | Err(e @ StoreError::InvalidName) => {
            println!("{}", e);
            Ok(None)
        }
        Err(e) => Err(anyhow!(e)),
    }
}

fn delete_game(saves: &SaveStore) -> anyhow::Result<()> {
    list_saves(saves)?;
    let name = match prompt("Please enter the name of the game you wish to delete: ") {
        Some(line) => line.trim().to_string(),
        None => return Ok(()),
    };
    if name.is_empty() {
        return Ok(());
    }
    if !confirm(&format!("Are you sure you want to delete {}? [y/N]: ", name))? {
        return Ok(());
    }
    match saves.delete_game(&name) {
        Ok(()) => println!("Game deleted"),
        Err(e @ StoreError::NotFound(_)) | Err(e @ StoreError::InvalidName) => println!("{}", e),
        Err(e) => return Err(anyhow!(e)),
    }
    Ok(())
}

fn view_saves(saves: &SaveStore) -> anyhow::Result<()> {
    list_saves(saves)
}

fn list_saves(saves: &SaveStore) -> anyhow::Result<()> {
    let names = saves.list_games().map_err(|e| anyhow!(e))?;
    println!("Saved games:");
    if names.is_empty() {
        println!("  (none)");
    }
    for (i, name) in names.iter().enumerate() {
        println!("[{}] {}", i + 1, name);
    }
    Ok(())
}

fn view_scores(scores: &ScoreStore) -> anyhow::Result<()> {
    let best = scores.best(10).map_err(|e| anyhow!(e))?;
    println!("Best scores (fewest shots):");
    if best.is_empty() {
        println!("  (none yet)");
    }
    for (i, record) in best.iter().enumerate() {
        println!("[{}] {} shots", i + 1, record.shots);
    }
    Ok(())
}

fn show_help() {
    println!("Battle Ships");
    println!("------------");
    println!("The computer hides a fleet of ships on the board. Fire at");
    println!("coordinates (X,Y with 1,1 in the top left) until every ship");
    println!("is sunk. Hits show as H, misses as M. Your score is the");
    println!("number of shots taken, so fewer is better.");
}

/// Parse "x,y" 1-based player input into 0-based (row, col).
fn parse_coordinates(input: &str, width: usize, height: usize) -> Option<(usize, usize)> {
    let mut parts = input.split(',').map(str::trim);
    let x: usize = parts.next()?.parse().ok()?;
    let y: usize = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if x < 1 || x > width || y < 1 || y > height {
        return None;
    }
    Some((y - 1, x - 1))
}

/// Print a prompt and read one line. `None` means end of input.
fn prompt(message: &str) -> Option<String> {
    print!("{}", message);
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

fn confirm(message: &str) -> anyhow::Result<bool> {
    match prompt(message) {
        Some(line) => Ok(line.trim().eq_ignore_ascii_case("y")),
        None => Ok(false),
    }
}
