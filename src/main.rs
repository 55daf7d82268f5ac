//! Terminal front end.
//!
//! Reads the config and last settings, validates a game, then plays it on
//! stdin: a card number flips that card, `s` toggles sound, `l <code>`
//! switches language, `q` quits.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

use memory_match::core::config::DEFAULT_LANGUAGE;
use memory_match::core::logging;
use memory_match::layout::GridSize;
use memory_match::session::Events;
use memory_match::{
    AvatarCatalog, CardSizer, Catalog, Command, Event, GameConfig, GameRng, GameSetup,
    JsonFileStore, MemoryError, Session, SettingsSnapshot, SettingsStore, SetupRequest,
    ThumbnailLoader, Translator, Viewport,
};

/// Nominal screen used to size card thumbnails.
const SCREEN: (u32, u32) = (1920, 1080);
const SIDEBAR_WIDTH: u32 = 300;

#[derive(Parser)]
#[command(author, version, about = "Play a picture memory game in the terminal", long_about = None)]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
    /// Last-settings record (JSON)
    #[arg(long, default_value = "last_settings.json")]
    settings: PathBuf,
    /// Directory of locale catalogs
    #[arg(long, default_value = "locale")]
    locales: PathBuf,
    /// Picture folder; defaults to the last one used
    #[arg(long)]
    folder: Option<PathBuf>,
    #[arg(long)]
    players: Option<usize>,
    #[arg(long)]
    pairs: Option<usize>,
    /// Player names, in seat order
    #[arg(long = "name")]
    names: Vec<String>,
    #[arg(long)]
    language: Option<String>,
    #[arg(long)]
    mute: bool,
    /// Seed for a reproducible deal
    #[arg(long)]
    seed: Option<u64>,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    logging::init(level).context("installing logger")?;

    let config = GameConfig::load(&args.config);
    let mut catalog = Catalog::load(&args.locales, DEFAULT_LANGUAGE);
    let mut store = JsonFileStore::new(&args.settings);
    let snapshot = store.read_or(&SettingsSnapshot::from_config(&config), config.game.max_players);

    let mut request = SetupRequest::from_snapshot(&snapshot);
    if let Some(folder) = args.folder {
        request.folder = folder;
    }
    if let Some(players) = args.players {
        request.players = players;
    }
    if let Some(pairs) = args.pairs {
        request.pairs = pairs;
    }
    if !args.names.is_empty() {
        request.names = args.names;
    }
    if let Some(language) = args.language {
        request.language = language;
    }
    if args.mute {
        request.sound_enabled = false;
    }
    catalog.set_language(&request.language);
    request.language = catalog.language().to_string();

    println!("{}", config.title.text);

    let avatars = AvatarCatalog::scan(&config.media.avatars);
    let setup = match GameSetup::validate(&request, &config, &avatars, &catalog) {
        Ok(setup) => setup,
        Err(err) => return fail(&catalog, err),
    };
    store.write(&setup.snapshot()).context("saving settings")?;

    let sizer = CardSizer::new(&config.layout);
    let viewport = Viewport::new(SCREEN.0, SCREEN.1).with_sidebar(SIDEBAR_WIDTH);
    let card_size = setup.card_size(&sizer, &viewport);
    let grid = setup.grid();

    let mut rng = args.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    log::info!("seed {}", rng.seed());
    let mut loader = ThumbnailLoader::new();
    let mut session = match Session::start(setup, &mut loader, &mut rng, card_size) {
        Ok(session) => session,
        Err(err) => return fail(&catalog, err),
    };

    play(&mut session, &mut catalog, grid)?;
    store.write(session.settings()).context("saving settings")?;
    Ok(())
}

/// Print a localized setup error and exit non-zero.
fn fail(catalog: &Catalog, err: MemoryError) -> anyhow::Result<()> {
    match err.dialog_key() {
        Some(key) => {
            eprintln!("{}: {}", catalog.t("dialogs.error_title"), catalog.translate(key, &err.dialog_params()));
            std::process::exit(1);
        }
        None => Err(err.into()),
    }
}

fn play(session: &mut Session, catalog: &mut Catalog, grid: GridSize) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !session.is_over() {
        print_board(session, grid);
        print_scores(session, catalog);
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let command = match parse_command(line.trim()) {
            Some(Input::Quit) => break,
            Some(Input::Command(command)) => command,
            None => {
                println!("enter a card number, s, l <code> or q");
                continue;
            }
        };

        let mut pending = session.handle(command);
        while !pending.is_empty() {
            pending = report(session, catalog, grid, pending);
        }
    }
    Ok(())
}

enum Input {
    Command(Command),
    Quit,
}

fn parse_command(line: &str) -> Option<Input> {
    match line {
        "q" => Some(Input::Quit),
        "s" => Some(Input::Command(Command::ToggleSound)),
        _ => {
            if let Some(code) = line.strip_prefix("l ") {
                return Some(Input::Command(Command::SetLanguage(code.to_string())));
            }
            let number: usize = line.parse().ok()?;
            number
                .checked_sub(1)
                .map(|index| Input::Command(Command::Flip(index)))
        }
    }
}

/// Print events; returns the events of a follow-up `Resolve`, if any.
fn report(session: &mut Session, catalog: &mut Catalog, grid: GridSize, events: Events) -> Events {
    let mut follow_up = Events::new();
    for event in events {
        match event {
            Event::Flipped { .. } => {}
            Event::Rejected { index, reason } => println!("card {}: {}", index + 1, reason),
            Event::EvaluationScheduled { delay } => {
                print_board(session, grid);
                std::thread::sleep(delay);
                follow_up = session.handle(Command::Resolve);
            }
            Event::Matched { player, .. } => {
                let name = session.player(player).map_or("", |p| p.name.as_str());
                println!("{name} found a pair");
            }
            Event::Mismatched { .. } => println!("no match"),
            Event::TurnChanged { player } => {
                let name = session.player(player).map_or("", |p| p.name.as_str());
                println!("{name}'s turn");
            }
            Event::GalleryRecorded { .. } => {}
            Event::MatchSound { path } => log::info!("would play {}", path.display()),
            Event::GameOver(summary) => {
                print_board(session, grid);
                let text = summary.render(&*catalog);
                println!("\n{}\n{}\n", text.title, text.body);
                print_gallery(session, catalog);
            }
            Event::LanguageChanged { code } => {
                catalog.set_language(&code);
                println!("{}: {}", catalog.t("menu.language_label"), catalog.language_label(&code));
            }
            Event::SoundToggled { enabled } => {
                let key = if enabled {
                    "menu.sound_toggle_on"
                } else {
                    "menu.sound_toggle_off"
                };
                println!("{}", catalog.t(key));
            }
        }
    }
    follow_up
}

fn print_board(session: &Session, grid: GridSize) {
    let state = session.state();
    let mut rows: Vec<Vec<String>> = vec![Vec::new(); grid.rows];
    for (index, card) in state.board().iter().enumerate() {
        let (row, _) = grid.position(index);
        let cell = if let Some(owner) = card.owner() {
            format!("[{:>3}:{}]", card.face().raw(), owner.number())
        } else if state.is_face_up(index) {
            format!("[{:>3}  ]", card.face().raw())
        } else {
            format!("({:>3}  )", index + 1)
        };
        if let Some(cells) = rows.get_mut(row) {
            cells.push(cell);
        }
    }
    for cells in rows {
        println!("{}", cells.join(" "));
    }
}

fn print_scores(session: &Session, catalog: &Catalog) {
    let current = session.state().current_player();
    for (player, line) in session.players().iter().zip(session.scoreboard(catalog)) {
        let marker = if player.id == current { '*' } else { ' ' };
        println!("{marker} {line}");
    }
}

fn print_gallery(session: &Session, catalog: &Catalog) {
    let entries = session.gallery();
    if entries.is_empty() {
        println!("{}", catalog.t("gallery.no_unique_paths"));
        return;
    }
    println!("{}", catalog.t("gallery.heading"));
    for entry in entries {
        let path = entry.path.strip_prefix(session.folder()).unwrap_or(&entry.path);
        let name = session.player(entry.player).map_or_else(String::new, |p| p.name.clone());
        println!(
            "  {}  {}",
            path.display(),
            catalog.translate("gallery.found_by", &[("player", name)])
        );
    }
}
