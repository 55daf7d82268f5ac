//! End-to-end tests: config and catalogs from disk, real picture files,
//! setup validation, a full session and the settings record.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::{Rgba, RgbaImage};

use memory_match::core::MemoryError;
use memory_match::settings::{JsonFileStore, SettingsStore};
use memory_match::{
    AvatarCatalog, CardSizer, Catalog, Command, Event, GameConfig, GameRng, GameSetup,
    PlayerId, Session, SettingsSnapshot, SetupRequest, ThumbnailLoader, Translator, Viewport,
};

fn shipped_catalog(language: &str) -> Catalog {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("locale");
    let mut catalog = Catalog::load(&dir, "de");
    catalog.set_language(language);
    catalog
}

fn write_pictures(dir: &Path, count: usize) {
    for i in 0..count {
        let color = Rgba([(i * 40) as u8, 100, 200, 255]);
        RgbaImage::from_pixel(40, 30, color)
            .save(dir.join(format!("pic{i}.png")))
            .unwrap();
    }
}

fn request(folder: &Path, players: usize, pairs: usize) -> SetupRequest {
    SetupRequest {
        folder: folder.to_path_buf(),
        players,
        pairs,
        names: Vec::new(),
        avatars: Vec::new(),
        sound_enabled: false,
        language: "en".into(),
    }
}

fn config() -> GameConfig {
    GameConfig::default().with_reveal_delay(Duration::from_millis(5))
}

/// Flip both cards of every pair in turn and resolve.
fn play_out(session: &mut Session) -> Vec<Event> {
    let mut all = Vec::new();
    for face in session.faces().to_vec() {
        let cards: Vec<usize> = session
            .state()
            .board()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.face() == face.id)
            .map(|(i, _)| i)
            .collect();
        all.extend(session.handle(Command::Flip(cards[0])));
        all.extend(session.handle(Command::Flip(cards[1])));
        all.extend(session.handle(Command::Resolve));
    }
    all
}

#[test]
fn test_shipped_config_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml");
    let config = GameConfig::try_load(&path).unwrap().unwrap();
    assert_eq!(config.language, "de");
    assert_eq!(config.game.reveal_delay_ms, 1000);
    assert!(config.media.images.folder.ends_with("data/images"));
}

#[test]
fn test_shipped_locales_agree_on_keys() {
    let de = shipped_catalog("de");
    let en = shipped_catalog("en");
    assert_eq!(de.language(), "de");
    assert_eq!(en.language(), "en");

    for key in [
        "dialogs.invalid_folder",
        "dialogs.no_images",
        "dialogs.congrats_title",
        "gallery.found_by",
        "menu.sound_toggle_on",
    ] {
        assert_ne!(de.t(key), key);
        assert_ne!(en.t(key), key);
        assert_ne!(de.t(key), en.t(key), "{key} is not translated");
    }
    assert_eq!(en.language_label("de"), "Deutsch");
    assert_eq!(
        en.translate("players.default_name", &[("index", "3".into())]),
        "Player 3"
    );
}

#[test]
fn test_setup_errors_are_localized() {
    let catalog = shipped_catalog("en");
    let dir = tempfile::tempdir().unwrap();
    write_pictures(dir.path(), 2);

    let err = GameSetup::validate(
        &request(dir.path(), 1, 5),
        &config(),
        &AvatarCatalog::default(),
        &catalog,
    )
    .unwrap_err();
    let key = err.dialog_key().unwrap();
    assert_eq!(
        catalog.translate(key, &err.dialog_params()),
        "The number of pairs must be between 1 and 2."
    );
}

#[test]
fn test_full_game_with_real_pictures() {
    let catalog = shipped_catalog("en");
    let dir = tempfile::tempdir().unwrap();
    write_pictures(dir.path(), 6);
    fs::write(dir.path().join("broken.png"), b"not a picture").unwrap();

    let mut req = request(dir.path(), 2, 4);
    req.names = vec!["Ada".into()];
    let setup =
        GameSetup::validate(&req, &config(), &AvatarCatalog::default(), &catalog).unwrap();
    assert_eq!(setup.players[1].name, "Player 2");

    let sizer = CardSizer::new(&config().layout);
    let card_size = setup.card_size(&sizer, &Viewport::new(1920, 1080).with_sidebar(300));
    // A 3x3 grid would allow 276px; the configured cap wins.
    assert_eq!(card_size, 240);

    let mut loader = ThumbnailLoader::new();
    let mut session =
        Session::start(setup, &mut loader, &mut GameRng::new(11), card_size).unwrap();
    assert_eq!(session.state().board().len(), 8);
    for face in session.faces() {
        let bitmap = session.bitmap(face.id).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (240, 240));
        assert_ne!(face.path.file_name().unwrap(), "broken.png");
    }

    let events = play_out(&mut session);
    assert!(session.is_over());
    assert!(!events.iter().any(|e| matches!(e, Event::MatchSound { .. })));

    let Some(Event::GameOver(summary)) = events.last() else {
        panic!("game did not end: {events:?}");
    };
    let text = summary.render(&catalog);
    assert_eq!(text.title, "Congratulations!");
    assert!(text.body.starts_with("Ada wins with 4 pairs!"));
    assert!(text.body.ends_with("Player 2: 0 pairs"));

    let gallery = session.gallery();
    assert_eq!(gallery.len(), 4);
    assert!(gallery.iter().all(|e| e.player == PlayerId::new(0)));
    assert!(gallery.windows(2).all(|w| w[0].path <= w[1].path));
}

#[test]
fn test_settings_persist_between_runs() {
    let catalog = shipped_catalog("en");
    let pictures = tempfile::tempdir().unwrap();
    write_pictures(pictures.path(), 3);
    let state_dir = tempfile::tempdir().unwrap();
    let path = state_dir.path().join("last_settings.json");

    let config = config();
    let defaults = SettingsSnapshot::from_config(&config);
    let mut store = JsonFileStore::new(&path);
    assert_eq!(store.read_or(&defaults, 6), defaults);

    let mut req = request(pictures.path(), 3, 3);
    req.names = vec!["Ada".into(), "Grace".into(), "Linus".into()];
    let setup = GameSetup::validate(&req, &config, &AvatarCatalog::default(), &catalog).unwrap();
    store.write(&setup.snapshot()).unwrap();

    let mut session =
        Session::start(setup, &mut ThumbnailLoader::new(), &mut GameRng::new(2), 64).unwrap();
    session.handle(Command::ToggleSound);
    session.handle(Command::SetLanguage("de".into()));
    store.write(session.settings()).unwrap();

    let restored = JsonFileStore::new(&path).read_or(&defaults, 6);
    assert_eq!(restored.players, 3);
    assert_eq!(restored.pairs, 3);
    assert_eq!(restored.folder, PathBuf::from(pictures.path()));
    assert_eq!(restored.names, vec!["Ada", "Grace", "Linus"]);
    assert!(restored.sound_enabled);
    assert_eq!(restored.language, "de");

    let again = SetupRequest::from_snapshot(&restored);
    assert!(GameSetup::validate(&again, &config, &AvatarCatalog::default(), &catalog).is_ok());
}

#[test]
fn test_missing_folder_is_rejected() {
    let err = GameSetup::validate(
        &request(Path::new("/definitely/not/here"), 1, 1),
        &config(),
        &AvatarCatalog::default(),
        &shipped_catalog("de"),
    )
    .unwrap_err();
    assert!(matches!(err, MemoryError::InvalidFolder(_)));
}

#[test]
fn test_zero_card_size_in_config_still_deals() {
    let catalog = shipped_catalog("en");
    let dir = tempfile::tempdir().unwrap();
    write_pictures(dir.path(), 2);

    let config = GameConfig::from_toml_str(
        "[layout]\nmax_card_size = 0\nfallback_card_size = 0\n",
        dir.path(),
    )
    .unwrap();
    let setup =
        GameSetup::validate(&request(dir.path(), 1, 2), &config, &AvatarCatalog::default(), &catalog)
            .unwrap();
    let card_size = setup.card_size(&CardSizer::new(&config.layout), &Viewport::new(1920, 1080));
    assert_eq!(card_size, 240);

    let mut session =
        Session::start(setup, &mut ThumbnailLoader::new(), &mut GameRng::new(4), card_size).unwrap();
    assert_eq!(session.state().board().len(), 4);
    play_out(&mut session);
    assert!(session.is_over());
}
