use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc, time::Duration};
use tracing::{info, warn};

use grainview::data::ViewMode;
use grainview::services::DEFAULT_API_URL;
use grainview::{logging, ui, update, App, Cache, Command, HttpProjectSource, Message};

/// A terminal dashboard for open-source project issues and pull requests
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: (),

    /// Project id to open (defaults to the most recently viewed project)
    project: Option<String>,

    /// Project id to open
    #[arg(long = "project", env = "GRAINVIEW_PROJECT")]
    project_flag: Option<String>,

    /// Base URL of the public projects API
    #[arg(long, env = "GRAINVIEW_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// List recently viewed projects and exit
    #[arg(long)]
    recent: bool,

    /// Clear the local cache and exit
    #[arg(long)]
    clear_cache: bool,
}

impl Cli {
    /// Project given on the command line, else from the environment.
    fn requested_project(&self) -> Option<String> {
        self.project.clone().or_else(|| self.project_flag.clone())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.clear_cache {
        let cache_path = grainview::get_cache_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache path"))?;
        if cache_path.exists() {
            std::fs::remove_file(&cache_path)?;
            eprintln!("Cache cleared: {}", cache_path.display());
        } else {
            eprintln!("No cache file found at: {}", cache_path.display());
        }
        return Ok(());
    }

    // Logging is best effort
    let _ = logging::init_logging();

    let cache = match Cache::open_default() {
        Ok(cache) => Some(cache),
        Err(e) => {
            warn!(error = %format!("{:#}", e), "cache unavailable");
            None
        }
    };

    if cli.recent {
        let cache = cache.context("Cache is unavailable")?;
        for project in cache.recent_projects(20)? {
            println!(
                "{}\t{}\t{}",
                project.project_id, project.full_name, project.viewed_at
            );
        }
        return Ok(());
    }

    let project_id = match cli.requested_project() {
        Some(id) => id,
        None => cache
            .as_ref()
            .and_then(|c| c.recent_projects(1).ok())
            .and_then(|mut recent| recent.pop())
            .map(|p| p.project_id)
            .context("No project given and no recently viewed project")?,
    };

    let source = HttpProjectSource::new(&cli.api_url)?;
    info!(project_id = %project_id, api_url = %cli.api_url, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(project_id.clone(), Arc::new(source), cache);
    app.start_load(project_id);

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Check for async load results
        if let Some(result) = app.check_load_result() {
            if let Some(cmd) = update(app, Message::LoadComplete(result)) {
                if handle_command(app, cmd) {
                    return Ok(());
                }
            }
        }

        // Update spinner
        if let Some(cmd) = update(app, Message::Tick) {
            if handle_command(app, cmd) {
                return Ok(());
            }
        }

        // Draw UI
        terminal.draw(|f| ui(f, app))?;

        // Handle input
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(msg) = key_to_message(app, key.code, key.modifiers) {
                        if let Some(cmd) = update(app, msg) {
                            if handle_command(app, cmd) {
                                return Ok(());
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Handle a command returned from update. Returns true to quit.
fn handle_command(app: &mut App, cmd: Command) -> bool {
    match cmd {
        Command::Quit => true,
        Command::StartLoad(project_id) => {
            app.start_load(project_id);
            false
        }
    }
}

/// Convert a key press to a message based on current app state
fn key_to_message(app: &App, key: KeyCode, modifiers: KeyModifiers) -> Option<Message> {
    if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    // Help popup - any key dismisses
    if app.show_help_popup {
        return Some(Message::DismissHelp);
    }

    // Error popup
    if app.show_error_popup {
        return match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Message::DismissError),
            KeyCode::Char('r') => Some(Message::Refresh),
            KeyCode::Char('p') => Some(Message::OpenProjectPrompt),
            _ => None,
        };
    }

    // Project prompt
    if app.show_project_prompt {
        return match key {
            KeyCode::Esc => Some(Message::CloseProjectPrompt),
            KeyCode::Enter => Some(Message::ConfirmProject),
            KeyCode::Backspace => Some(Message::ProjectBackspace),
            KeyCode::Char(c) => Some(Message::ProjectInput(c)),
            _ => None,
        };
    }

    // Issue preview
    if app.show_issue_preview {
        return match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
                Some(Message::CloseIssuePreview)
            }
            KeyCode::Char('j') | KeyCode::Down => Some(Message::PreviewScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::PreviewScrollUp),
            KeyCode::Char('o') => Some(Message::OpenSelected),
            _ => None,
        };
    }

    // Search mode
    if app.search_mode {
        return match key {
            KeyCode::Esc => Some(Message::ExitSearchMode { clear: true }),
            KeyCode::Enter => Some(Message::ExitSearchMode { clear: false }),
            KeyCode::Backspace => Some(Message::SearchBackspace),
            KeyCode::Char(c) => Some(Message::SearchInput(c)),
            KeyCode::Down => Some(Message::NextItem),
            KeyCode::Up => Some(Message::PreviousItem),
            _ => None,
        };
    }

    // Normal mode
    match key {
        KeyCode::Char('q') => Some(Message::Quit),
        KeyCode::Char('/') => Some(Message::EnterSearchMode),
        KeyCode::Esc => {
            if !app.search_query.is_empty() {
                Some(Message::ExitSearchMode { clear: true })
            } else {
                None
            }
        }
        KeyCode::Char('j') | KeyCode::Down => Some(Message::NextItem),
        KeyCode::Char('k') | KeyCode::Up => Some(Message::PreviousItem),
        KeyCode::Char('g') => Some(Message::GoToTop),
        KeyCode::Char('G') => Some(Message::GoToBottom),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => Some(Message::NextIssueTab),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => Some(Message::PreviousIssueTab),
        KeyCode::Char('1') => Some(Message::SwitchView(ViewMode::Issues)),
        KeyCode::Char('2') => Some(Message::SwitchView(ViewMode::PullRequests)),
        KeyCode::Enter => Some(Message::OpenIssuePreview),
        KeyCode::Char('o') => Some(Message::OpenSelected),
        KeyCode::Char('O') => Some(Message::OpenRepository),
        KeyCode::Char('w') => Some(Message::OpenWebsite),
        KeyCode::Char('p') => Some(Message::OpenProjectPrompt),
        KeyCode::Char('r') => Some(Message::Refresh),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Parsed in one test so the environment is not shared across threads
    #[test]
    fn project_resolution() {
        std::env::remove_var("GRAINVIEW_PROJECT");

        let cli = Cli::try_parse_from(["grainview"]).unwrap();
        assert_eq!(cli.requested_project(), None);

        let cli = Cli::try_parse_from(["grainview", "p1"]).unwrap();
        assert_eq!(cli.requested_project().as_deref(), Some("p1"));

        let cli = Cli::try_parse_from(["grainview", "--project", "p2"]).unwrap();
        assert_eq!(cli.requested_project().as_deref(), Some("p2"));

        std::env::set_var("GRAINVIEW_PROJECT", "from-env");

        let cli = Cli::try_parse_from(["grainview"]).unwrap();
        assert_eq!(cli.requested_project().as_deref(), Some("from-env"));

        let cli = Cli::try_parse_from(["grainview", "--project", "from-flag"]).unwrap();
        assert_eq!(cli.requested_project().as_deref(), Some("from-flag"));

        let cli = Cli::try_parse_from(["grainview", "positional"]).unwrap();
        assert_eq!(cli.requested_project().as_deref(), Some("positional"));

        std::env::remove_var("GRAINVIEW_PROJECT");
    }
}
