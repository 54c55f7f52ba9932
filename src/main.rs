mod app;
mod ui;

use anyhow::{Context, Result, bail};
use app::App;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use farmstead::config::{CONFIG_FILE, SimConfig};
use farmstead::sim::market::{self, MARKET_ITEMS};
use farmstead::sim::{DayReport, FarmControl};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ron::ser::PrettyConfig;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

const INPUT_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Default)]
struct Options {
    headless: bool,
    days: Option<u32>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut options = Options::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--headless" => options.headless = true,
                "--days" => {
                    let value = args.next().context("--days needs a value")?;
                    options.days = Some(value.parse().context("--days must be a number")?);
                }
                "--seed" => {
                    let value = args.next().context("--seed needs a value")?;
                    options.seed = Some(value.parse().context("--seed must be a number")?);
                }
                "--config" => {
                    let value = args.next().context("--config needs a path")?;
                    options.config_path = Some(PathBuf::from(value));
                }
                other => bail!("unknown argument: {other}"),
            }
        }
        Ok(options)
    }
}

fn main() -> Result<()> {
    let options = Options::parse(std::env::args().skip(1))?;
    let path = options
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let mut config = SimConfig::load(&path)
        .with_context(|| format!("reading {}", path.display()))?
        .unwrap_or_default();
    if options.seed.is_some() {
        config.seed = options.seed;
    }

    if options.headless {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
        return run_headless(config, options.days);
    }

    let mut control = FarmControl::from_config(config);
    control.add_message("Welcome to the farm. Press N to start the first day.");

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut control);
    restore_terminal(&mut terminal)?;
    result
}

#[derive(Debug, Serialize)]
struct RunSummary {
    days: u32,
    outcome: String,
    money: i64,
    acreage: f64,
    living_assets: usize,
    perished_assets: usize,
    farmers: usize,
    last_day: Option<DayReport>,
}

fn run_headless(config: SimConfig, days: Option<u32>) -> Result<()> {
    let mut control = FarmControl::from_config(config);
    let limit = days.unwrap_or(control.config().max_days);
    info!(
        limit,
        money = control.farm().money(),
        assets = control.farm().assets().len(),
        farmers = control.farm().farmer_count(),
        "headless run starting"
    );

    let mut last_day = None;
    let outcome = loop {
        if control.day() >= limit {
            break format!("stopped after {limit} days");
        }
        match control.run_day() {
            Ok(report) => {
                let perished = report.newly_dead > 0;
                last_day = Some(report);
                if perished {
                    control.restock_perished();
                }
                invest_surplus(&mut control);
            }
            Err(err) => break err.to_string(),
        }
    };

    let farm = control.farm();
    let summary = RunSummary {
        days: control.day(),
        outcome,
        money: farm.money(),
        acreage: farm.acreage(),
        living_assets: farm.living_count(),
        perished_assets: farm.assets().len() - farm.living_count(),
        farmers: farm.farmer_count(),
        last_day,
    };
    println!("{}", ron::ser::to_string_pretty(&summary, PrettyConfig::new())?);
    Ok(())
}

/// Keeps a reserve of two acres' worth of money and spends the rest on stock,
/// land once the farm is full.
fn invest_surplus(control: &mut FarmControl) {
    let reserve = control.config().acre_cost * 2;
    while control.farm().money() > reserve {
        let bought = if control.farm().has_room() {
            control.purchase_random_asset().map(|_| ())
        } else {
            control.buy_acre().map(|_| ())
        };
        if bought.is_err() {
            break;
        }
    }
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    control: &mut FarmControl,
) -> Result<()> {
    let mut app = App::new();
    loop {
        app.clamp_asset_selection(control.farm().assets().len());
        app.clamp_farmer_selection(control.farm().farmer_count());
        terminal.draw(|f| ui::render(f, &app, control))?;

        if !event::poll(INPUT_POLL)? {
            continue;
        }
        if handle_event(event::read()?, &mut app, control) {
            break;
        }
    }
    Ok(())
}

fn handle_event(event: Event, app: &mut App, control: &mut FarmControl) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(key, app, control),
        _ => false,
    }
}

fn handle_key_event(key: KeyEvent, app: &mut App, control: &mut FarmControl) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.market_open {
        handle_market_key(key, app, control);
        return false;
    }

    let assets = control.farm().assets().len();
    let farmers = control.farm().farmer_count();
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char(' ') => play_day(app, control),
        KeyCode::Char('m') | KeyCode::Char('M') => app.toggle_market(),
        KeyCode::Char('r') | KeyCode::Char('R') => {
            control.reorder_all_perished();
            control.add_message("Perished assets moved to the back of the list.");
        }
        KeyCode::Tab | KeyCode::BackTab => app.next_focus(),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            app.move_selection(-1, assets, farmers)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            app.move_selection(1, assets, farmers)
        }
        _ => {}
    }
    false
}

fn play_day(app: &mut App, control: &mut FarmControl) {
    if app.is_finished() {
        control.add_message("The run is over. Press Q to leave.");
        return;
    }
    match control.run_day() {
        Ok(report) => app.last_report = Some(report),
        Err(err) if err.is_terminal() => {
            control.add_message(format!("Run ended: {err}"));
            app.outcome = Some(err);
        }
        Err(err) => control.add_message(format!("Day failed: {err}")),
    }
}

fn handle_market_key(key: KeyEvent, app: &mut App, control: &mut FarmControl) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('M') => app.toggle_market(),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            app.selected_market_item = app.selected_market_item.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            if app.selected_market_item + 1 < MARKET_ITEMS.len() {
                app.selected_market_item += 1;
            }
        }
        KeyCode::Enter => {
            if app.is_finished() {
                control.add_message("The market is closed; the run is over.");
                return;
            }
            let Some(item) = MARKET_ITEMS.get(app.selected_market_item) else {
                return;
            };
            match market::execute(control, item.action) {
                Ok(summary) => control.add_message(summary),
                Err(err) => control.add_message(format!("Purchase failed: {err}")),
            }
        }
        _ => {}
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
