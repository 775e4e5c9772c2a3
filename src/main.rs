mod build_info;
mod catalog;
mod constants;
mod derived_stats;
mod fight;
mod game_state;
mod save_manager;
mod settings;
mod shop;
mod store;
mod ui;
mod view;

use chrono::Utc;
use constants::*;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use game_state::GameState;
use ratatui::{backend::CrosstermBackend, Terminal};
use save_manager::SaveManager;
use settings::ListingPolicy;
use std::io;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "skirmish {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Skirmish - Terminal Coin-Clicker\n");
                println!("Usage: skirmish\n");
                println!("Options:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'skirmish --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let mut save = SaveManager::new()?;
    let mut game_settings = settings::load();

    let mut state = GameState::load(&mut save);
    // The store is authoritative, but gates may be due on an imported or
    // hand-edited save (e.g. coins already past the shop threshold).
    shop::refresh_unlocks(&mut state, &mut save);
    shop::refresh_reveals(&mut state, &mut save);
    state.add_log("Press [Space] to pick a fight.", false);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_game(&mut terminal, &mut state, &mut save, &mut game_settings);

    // Restore terminal before reporting any error
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    save.flush()?;
    result
}

fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut GameState,
    save: &mut SaveManager,
    game_settings: &mut settings::Settings,
) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut last_tick = Instant::now();
    let mut last_autosave = Instant::now();
    let mut selected_shop_row: usize = 0;

    loop {
        let now_ms = Utc::now().timestamp_millis();
        let snapshot = view::build_snapshot(state, game_settings.listing_policy, now_ms);

        // Keep the selection on a real row as the listing changes
        selected_shop_row = selected_shop_row.min(snapshot.shop.len().saturating_sub(1));

        terminal.draw(|frame| {
            ui::draw_ui(frame, &snapshot, selected_shop_row);
        })?;

        // Poll for input (non-blocking)
        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            if let Event::Key(key_event) = event::read()? {
                match key_event.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        break;
                    }
                    KeyCode::Char(' ') => {
                        // Guarded internally: ignored while a fight runs
                        fight::start_fight(state, Utc::now().timestamp_millis());
                    }
                    KeyCode::Up => {
                        selected_shop_row = selected_shop_row.saturating_sub(1);
                    }
                    KeyCode::Down => {
                        if selected_shop_row + 1 < snapshot.shop.len() {
                            selected_shop_row += 1;
                        }
                    }
                    KeyCode::Enter | KeyCode::Char('b') => {
                        if let Some(entry) = snapshot.shop.get(selected_shop_row) {
                            shop::buy_item(state, save, entry.def.id, Utc::now().timestamp());
                        }
                    }
                    KeyCode::Char('p') | KeyCode::Char('P') => {
                        game_settings.listing_policy = match game_settings.listing_policy {
                            ListingPolicy::Sticky => ListingPolicy::HideUnaffordable,
                            ListingPolicy::HideUnaffordable => ListingPolicy::Sticky,
                        };
                        let _ = settings::save(game_settings);
                    }
                    _ => {}
                }
            }
        }

        // Logic tick
        if last_tick.elapsed() >= Duration::from_millis(TICK_INTERVAL_MS) {
            fight::fight_tick(state, save, &mut rng, Utc::now().timestamp_millis());
            last_tick = Instant::now();
        }

        // Autosave
        if last_autosave.elapsed() >= Duration::from_secs(AUTOSAVE_INTERVAL_SECONDS) {
            save.flush()?;
            last_autosave = Instant::now();
        }
    }

    Ok(())
}
