// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::{
    fmt,
    io::{self, BufRead, Write},
    process,
};

use clap::{value_t, values_t, App, Arg, ArgMatches};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use shipgrid::{
    board::{
        random_board_on, BoardController, Cell, Coordinate, Dimensions, Geometry, Grid,
        GridError, HitOutcome, Palette, PlacementRules, SetupError, DEFAULT_CELL_SIZE,
    },
    ships::{Orientation, Ship, ShipId, STANDARD_FLEET},
};

mod logging;

fn main() -> io::Result<()> {
    logging::init();
    let matches = App::new("Salvo")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Hunt down a randomly placed fleet from the command line.")
        .arg(
            Arg::with_name("width")
                .long("width")
                .value_name("CELLS")
                .help("width of the board")
                .takes_value(true)
                .default_value("10")
                .validator(positive),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .value_name("CELLS")
                .help("height of the board")
                .takes_value(true)
                .default_value("10")
                .validator(positive),
        )
        .arg(
            Arg::with_name("ships")
                .short("s")
                .long("ships")
                .value_name("LENGTHS")
                .help("comma separated ship lengths [default: 5,4,3,3,2]")
                .takes_value(true)
                .use_delimiter(true)
                .validator(positive),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("seed for ship placement, random if not given")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("touching")
                .long("touching")
                .help("allow ships to be placed next to each other"),
        )
        .arg(
            Arg::with_name("orientations")
                .long("orientations")
                .value_name("ORIENTATIONS")
                .help("directions ships may be placed in")
                .takes_value(true)
                .possible_values(&["both", "horizontal", "vertical"])
                .default_value("both")
                .case_insensitive(true),
        )
        .arg(
            Arg::with_name("max_attempts")
                .long("max-attempts")
                .value_name("N")
                .help("random positions tried per ship before restarting the layout")
                .takes_value(true)
                .validator(positive),
        )
        .arg(
            Arg::with_name("cell_size")
                .long("cell-size")
                .value_name("PIXELS")
                .help("pixel size of a cell, used by the pixel command")
                .takes_value(true)
                .validator(positive),
        )
        .arg(
            Arg::with_name("autoplay")
                .long("autoplay")
                .help("fire at every cell in order until the fleet is sunk"),
        )
        .get_matches();

    let config = Config::from_matches(&matches);
    let mut board = match build_board(&config) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(2);
        }
    };
    println!(
        "{}x{} board with {} ships, seed {}",
        config.width,
        config.height,
        config.ships.len(),
        config.seed
    );

    if config.autoplay {
        let shots = autoplay(&mut board);
        println!("Fleet sunk after {} shots.", shots);
        show_revealed_board(&board);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());
    play(&mut board, &mut input)
}

/// Validator for numeric arguments that must be at least 1.
fn positive(value: String) -> Result<(), String> {
    match value.parse::<u64>() {
        Ok(0) => Err(String::from("must be at least 1")),
        Ok(_) => Ok(()),
        Err(err) => Err(format!("{}: {}", value, err)),
    }
}

/// Game options collected from the command line.
struct Config {
    width: usize,
    height: usize,
    ships: Vec<usize>,
    rules: PlacementRules,
    seed: u64,
    cell_size: u32,
    autoplay: bool,
}

impl Config {
    fn from_matches(matches: &ArgMatches) -> Self {
        let ships = if matches.is_present("ships") {
            values_t!(matches, "ships", usize).unwrap_or_else(|e| e.exit())
        } else {
            STANDARD_FLEET.to_vec()
        };
        let seed = if matches.is_present("seed") {
            value_t!(matches, "seed", u64).unwrap_or_else(|e| e.exit())
        } else {
            let seed = rand::random();
            info!("no seed given, using {}", seed);
            seed
        };
        let orientations = match matches.value_of("orientations") {
            Some(o) if o.eq_ignore_ascii_case("horizontal") => Orientation::Horizontal.into(),
            Some(o) if o.eq_ignore_ascii_case("vertical") => Orientation::Vertical.into(),
            _ => Orientation::Horizontal | Orientation::Vertical,
        };
        let mut rules = PlacementRules::default()
            .with_touching(matches.is_present("touching"))
            .with_orientations(orientations);
        if matches.is_present("max_attempts") {
            rules = rules.with_max_attempts(
                value_t!(matches, "max_attempts", usize).unwrap_or_else(|e| e.exit()),
            );
        }
        let cell_size = if matches.is_present("cell_size") {
            value_t!(matches, "cell_size", u32).unwrap_or_else(|e| e.exit())
        } else {
            DEFAULT_CELL_SIZE
        };
        Self {
            width: value_t!(matches, "width", usize).unwrap_or_else(|e| e.exit()),
            height: value_t!(matches, "height", usize).unwrap_or_else(|e| e.exit()),
            ships,
            rules,
            seed,
            cell_size,
            autoplay: matches.is_present("autoplay"),
        }
    }
}

/// Create the grid and place the whole fleet at random.
fn build_board(config: &Config) -> Result<BoardController, SetupError> {
    let dim = Dimensions::try_new(config.width, config.height).ok_or(
        GridError::InvalidDimension {
            width: config.width,
            height: config.height,
        },
    )?;
    let grid = Grid::with_layout(dim, Geometry::new(config.cell_size)?, Palette::default())?;
    random_board_on(grid, config.ships.iter().copied(), config.rules, Some(config.seed))
}

/// Fire at every cell row by row until the game is over. Returns the number of shots.
fn autoplay(board: &mut BoardController) -> usize {
    let coords: Vec<Coordinate> = board.dimensions().iter_coordinates().flatten().collect();
    let mut shots = 0;
    for coord in coords {
        if board.is_game_over() {
            break;
        }
        shots += 1;
        match board.hit_coord(coord) {
            Ok(outcome) => debug!("{} -> {:?}", coord, outcome),
            Err(err) => warn!("{}", err),
        }
    }
    shots
}

/// Interactive loop. Returns when the fleet is sunk, the player quits, or input ends.
fn play<B: BufRead>(board: &mut BoardController, input: &mut InputReader<B>) -> io::Result<()> {
    println!("Type help or ? for commands.");
    while !board.is_game_over() {
        println!();
        show_hidden_board(board);
        let cmd = match input.read_input_lower(">", parse_command)? {
            Some(cmd) => cmd,
            None => return Ok(()),
        };
        match cmd {
            Command::Fire(coord) => fire(board, coord),
            Command::Pixel(px, py) => match board.grid().coordinate_at_pixel(px, py) {
                Some(coord) => fire(board, coord),
                None => println!("Pixel ({}, {}) is not on the board.", px, py),
            },
            Command::Reveal => show_revealed_board(board),
            Command::Status => print_status(board),
            Command::Quit => return Ok(()),
            Command::Help => {
                println!(
                    "Available Commands:
    <x>,<y>             fire at the cell in column x, row y. \"fire\" may be prefixed.
    pixel <px>,<py>     fire at the cell under the given pixel.
    status              show how many ships are left.
    reveal              show the whole board, including unhit ships.
    quit                give up."
                );
            }
        }
    }
    println!();
    println!("You sank the whole fleet!");
    show_revealed_board(board);
    Ok(())
}

/// Commands accepted by the interactive loop.
enum Command {
    Fire(Coordinate),
    Pixel(u64, u64),
    Reveal,
    Status,
    Help,
    Quit,
}

/// Parse one line of input. Prints a message and returns `None` if it isn't valid.
fn parse_command(input: &str) -> Option<Command> {
    /// Matchers for commands with args.
    static FIRE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)(?:(?:fire|shoot|f)\s+)?
        (?:at\s+)?
        (?P<x>[0-9]+)(?:\s*,\s*|\s+)(?P<y>[0-9]+)$",
        )
        .unwrap()
    });
    static PIXEL: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)(?:pixel|px)\s+
        (?P<x>[0-9]+)(?:\s*,\s*|\s+)(?P<y>[0-9]+)$",
        )
        .unwrap()
    });

    match input {
        "?" | "help" | "h" => Some(Command::Help),
        "reveal" | "show" => Some(Command::Reveal),
        "status" | "s" => Some(Command::Status),
        "quit" | "exit" | "q" => Some(Command::Quit),
        other => {
            if let Some(captures) = FIRE.captures(other) {
                match (captures["x"].parse::<usize>(), captures["y"].parse::<usize>()) {
                    (Ok(x), Ok(y)) => Some(Command::Fire(Coordinate::new(x, y))),
                    _ => {
                        println!("Coordinates are too large.");
                        None
                    }
                }
            } else if let Some(captures) = PIXEL.captures(other) {
                match (captures["x"].parse::<u64>(), captures["y"].parse::<u64>()) {
                    (Ok(x), Ok(y)) => Some(Command::Pixel(x, y)),
                    _ => {
                        println!("Pixel position is too large.");
                        None
                    }
                }
            } else {
                println!("Invalid command \"{}\". Use '?' for help", other);
                None
            }
        }
    }
}

/// Fire at a cell and describe the outcome.
fn fire(board: &mut BoardController, coord: Coordinate) {
    match board.hit_coord(coord) {
        Ok(HitOutcome::Miss) => println!("Miss."),
        Ok(HitOutcome::Hit(_)) => println!("Hit!"),
        Ok(HitOutcome::Sunk(id)) => println!("You sank a ship of length {}!", ship_len(board, id)),
        Ok(HitOutcome::Defeated(id)) => {
            println!("You sank the last ship, length {}!", ship_len(board, id))
        }
        Err(err) if err.is_recoverable() => println!("You already fired at {}.", coord),
        Err(err) => println!("Invalid shot: {}", err),
    }
}

fn ship_len(board: &BoardController, id: ShipId) -> usize {
    board.ship(id).map_or(0, Ship::len)
}

fn print_status(board: &BoardController) {
    println!(
        "{} of {} ships afloat, {} ship cells left to hit.",
        board.ships_afloat(),
        board.ships().count(),
        board.remaining_cells()
    );
}

/// Print out the obfuscated board.
fn show_hidden_board(board: &BoardController) {
    enum HiddenCell {
        NotShot,
        Miss,
        Hit,
        Sunk,
    }
    impl fmt::Display for HiddenCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                HiddenCell::NotShot => f.pad("~~"),
                HiddenCell::Miss => f.pad("o"),
                HiddenCell::Hit => f.pad("x"),
                HiddenCell::Sunk => f.pad("X"),
            }
        }
    }
    show_board(board.grid(), |cell| match cell.ship() {
        _ if !cell.hit() => HiddenCell::NotShot,
        None => HiddenCell::Miss,
        Some(id) if board.is_ship_sunk(id) => HiddenCell::Sunk,
        Some(_) => HiddenCell::Hit,
    })
}

/// Print out the fully-revealed board.
fn show_revealed_board(board: &BoardController) {
    enum RevealedCell {
        Empty,
        Shot,
        NotShot(ShipId),
        Hit(ShipId),
        Sunk(ShipId),
    }
    impl fmt::Display for RevealedCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                RevealedCell::Empty => f.pad("~~"),
                RevealedCell::Shot => f.pad("o"),
                RevealedCell::NotShot(id) => f.pad(&id.index().to_string()),
                RevealedCell::Hit(id) => f.pad(&format!("x{}", id.index())),
                RevealedCell::Sunk(id) => f.pad(&format!("X{}", id.index())),
            }
        }
    }
    show_board(board.grid(), |cell| match cell.ship() {
        None if cell.hit() => RevealedCell::Shot,
        None => RevealedCell::Empty,
        Some(id) if board.is_ship_sunk(id) => RevealedCell::Sunk(id),
        Some(id) if cell.hit() => RevealedCell::Hit(id),
        Some(id) => RevealedCell::NotShot(id),
    })
}

/// Show the board by printing the grid, rendering each cell with the given function.
fn show_board<T: fmt::Display>(grid: &Grid, render: impl Fn(&Cell) -> T) {
    print!("   ");
    for x in 0..grid.width() {
        print!("{:^4}", x);
    }
    println!();
    for (y, row) in grid.rows().enumerate() {
        print!("{:>2} ", y);
        for cell in row {
            print!("{:^4}", render(cell));
        }
        println!();
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker. Returns `None` at end of input.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<Option<T>>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            if !self.read_input_inner(prompt)? {
                return Ok(None);
            }
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(Some(val));
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line. Returns
    /// false at end of input.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<bool> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            return Ok(false);
        }
        Ok(true)
    }
}
