use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use crossterm::style::Stylize;
use std::{path::PathBuf, sync::Arc};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_style;

use cli_style::{box_chars, colors, get_styles, print_box, print_error, print_notice, print_success};
use readlist::catalog::{Book, Catalog};
use readlist::config::{AppConfig, CliConfig, FileConfig};
use readlist::local_storage::{InMemoryLocalStorage, LocalStorage, SqliteLocalStorage};
use readlist::session::{AppSession, SessionSettings};
use readlist::sync::BroadcastHub;

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Path to the JSON catalog ({"library": [{"book": ...}]}).
    #[clap(value_parser = parse_path)]
    pub catalog: Option<PathBuf>,

    /// Path to the SQLite file holding the reading list. Without it the list
    /// only lives as long as the process.
    #[clap(long, value_parser = parse_path)]
    pub db_path: Option<PathBuf>,

    /// Path to a TOML config file. Its values override the CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Number of tabs to open at startup.
    #[clap(long, default_value_t = 1)]
    pub tabs: usize,
}

#[derive(Parser)]
#[command(styles=get_styles(),name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Shows the open tabs.
    Tabs,

    /// Opens a new tab and switches to it.
    NewTab,

    /// Switches to the given tab.
    Switch { tab: usize },

    /// Closes the given tab.
    CloseTab { tab: usize },

    /// Shows the genres of the catalog.
    Genres,

    /// Filters by genre, no name means all genres.
    Genre { name: Option<String> },

    /// Sets the maximum number of pages.
    Pages { max_pages: u32 },

    /// Shows the books matching the current filters.
    Matches,

    /// Shows the reading list.
    List,

    /// Shows the counters and the current filters.
    Status,

    /// Shows all the details of a book.
    Show { isbn: String },

    /// Adds a book to the reading list.
    Add { isbn: String },

    /// Removes a book from the reading list.
    Remove { isbn: String },

    /// Shows where the reading list is stored.
    Where,

    /// Close this program.
    Exit,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

const PROMPT: &str = ">> ";

/// Every open tab of this process. They share the catalog, the durable
/// storage and the broadcast hub, exactly like browser tabs of one profile.
struct Browser {
    catalog: Arc<Catalog>,
    storage: Arc<dyn LocalStorage>,
    storage_location: String,
    hub: Arc<BroadcastHub>,
    settings: SessionSettings,
    tabs: Vec<AppSession>,
    current: usize,
}

impl Browser {
    fn open_tab(&mut self) -> usize {
        let session = AppSession::open(
            self.catalog.clone(),
            self.storage.clone(),
            &self.hub,
            &self.settings,
        );
        self.tabs.push(session);
        self.current = self.tabs.len() - 1;
        self.tabs.len()
    }

    fn tab_index(&self, tab: usize) -> Result<usize, String> {
        if tab == 0 || tab > self.tabs.len() {
            return Err(format!(
                "Tab {} does not exist, there are {} tabs open.",
                tab,
                self.tabs.len()
            ));
        }
        Ok(tab - 1)
    }

    fn close_tab(&mut self, tab: usize) -> Result<(), String> {
        let index = self.tab_index(tab)?;
        if self.tabs.len() == 1 {
            return Err("Cannot close the last tab, use exit instead.".to_string());
        }
        let mut session = self.tabs.remove(index);
        session.close();
        if self.current >= self.tabs.len() || self.current > index {
            self.current = self.current.saturating_sub(1);
        }
        Ok(())
    }

    fn current(&self) -> &AppSession {
        &self.tabs[self.current]
    }

    fn current_mut(&mut self) -> &mut AppSession {
        &mut self.tabs[self.current]
    }

    /// Delivers pending sibling updates to every tab, one tab at a time.
    fn pump_remote_updates(&mut self) {
        for (index, session) in self.tabs.iter_mut().enumerate() {
            if session.process_remote_updates() > 0 && index != self.current {
                print_notice(&format!(
                    "tab {} synced its reading list ({} books)",
                    index + 1,
                    session.reading_list().len()
                ));
            }
        }
    }

    fn close_all(&mut self) {
        for session in self.tabs.iter_mut() {
            session.close();
        }
    }
}

fn book_line(book: &Book, in_list: bool) -> String {
    let marker = if in_list {
        box_chars::BULLET
    } else {
        box_chars::BULLET_EMPTY
    };
    format!(
        "{} {}  {} ({} pages, {})",
        marker, book.isbn, book.title, book.pages, book.genre
    )
}

fn print_status(session: &AppSession) {
    let index = session.index();
    let selection = session.selection();
    let mut lines = vec![format!("{} books available", session.available())];
    if !session.reading_list().is_empty() {
        lines.push(format!(
            "{} in the reading list",
            session.reading_list().len()
        ));
    }
    lines.push(format!(
        "pages: {} [{}] {}",
        index.min_pages(),
        selection.max_pages,
        index.max_pages()
    ));
    lines.push(format!(
        "genre: {}",
        selection.genre.as_deref().unwrap_or("all genres")
    ));
    print_box(&format!("instance {}", session.instance_id()), &lines);
}

fn print_book(book: &Book, in_list: bool) {
    let mut lines = vec![
        format!("{} ({})", book.title, book.year),
        format!("by {}", book.author.name),
        format!("{} pages, {}", book.pages, book.genre),
        format!("ISBN {}", book.isbn),
        format!("cover: {}", book.cover),
        String::new(),
    ];
    lines.extend(book.synopsis.lines().map(String::from));
    if !book.author.other_books.is_empty() {
        lines.push(String::new());
        lines.push(format!("Also by {}:", book.author.name));
        lines.extend(book.author.other_books.iter().map(|t| format!("  - {}", t)));
    }
    lines.push(String::new());
    lines.push(if in_list {
        "In your reading list.".to_string()
    } else {
        "Not in your reading list.".to_string()
    });
    print_box(&book.title, &lines);
}

fn execute_command(line: String, browser: &mut Browser) -> CommandExecutionResult {
    if line.is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(&line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    match cli {
        Ok(cli) => match cli.command {
            InnerCommand::Tabs => {
                let lines = browser
                    .tabs
                    .iter()
                    .enumerate()
                    .map(|(index, session)| {
                        let marker = if index == browser.current {
                            box_chars::ARROW_RIGHT
                        } else {
                            " "
                        };
                        format!(
                            "{} tab {}: {} in the reading list, {} available",
                            marker,
                            index + 1,
                            session.reading_list().len(),
                            session.available()
                        )
                    })
                    .collect::<Vec<_>>();
                print_box("tabs", &lines);
            }
            InnerCommand::NewTab => {
                let tab = browser.open_tab();
                print_success(&format!("Opened tab {}", tab));
            }
            InnerCommand::Switch { tab } => match browser.tab_index(tab) {
                Ok(index) => {
                    browser.current = index;
                    print_status(browser.current());
                }
                Err(err) => return CommandExecutionResult::Error(err),
            },
            InnerCommand::CloseTab { tab } => {
                if let Err(err) = browser.close_tab(tab) {
                    return CommandExecutionResult::Error(err);
                }
                print_success(&format!("Closed tab {}", tab));
            }
            InnerCommand::Genres => {
                let lines = browser
                    .current()
                    .index()
                    .genre_options()
                    .iter()
                    .map(|option| option.label().to_string())
                    .collect::<Vec<_>>();
                print_box("genres", &lines);
            }
            InnerCommand::Genre { name } => {
                let session = browser.current_mut();
                if let Some(name) = name.as_deref().filter(|n| !n.is_empty()) {
                    if !session.index().genres().iter().any(|g| g == name) {
                        return CommandExecutionResult::Error(format!(
                            "Unknown genre '{}', see `genres`.",
                            name
                        ));
                    }
                }
                session.set_genre(name);
                print_status(session);
            }
            InnerCommand::Pages { max_pages } => {
                let session = browser.current_mut();
                session.set_max_pages(max_pages);
                print_status(session);
            }
            InnerCommand::Matches => {
                let session = browser.current();
                let lines = session
                    .matches()
                    .iter()
                    .map(|b| book_line(b, session.is_in_reading_list(&b.isbn)))
                    .collect::<Vec<_>>();
                print_box(&format!("{} matches", lines.len()), &lines);
            }
            InnerCommand::List => {
                let session = browser.current();
                if session.reading_list().is_empty() {
                    println!("{}", "The reading list is empty.".with(colors::DIM));
                } else {
                    let lines = session
                        .reading_list()
                        .iter()
                        .map(|b| book_line(b, true))
                        .collect::<Vec<_>>();
                    print_box("reading list", &lines);
                }
            }
            InnerCommand::Status => print_status(browser.current()),
            InnerCommand::Show { isbn } => {
                let session = browser.current();
                match session.catalog().get_book(&isbn) {
                    Some(book) => print_book(book, session.is_in_reading_list(&isbn)),
                    None => {
                        return CommandExecutionResult::Error(format!(
                            "No book with ISBN {} in the catalog.",
                            isbn
                        ))
                    }
                }
            }
            InnerCommand::Add { isbn } => {
                let session = browser.current_mut();
                if let Err(err) = session.add(&isbn) {
                    return CommandExecutionResult::Error(format!("{}", err));
                }
                print_status(session);
            }
            InnerCommand::Remove { isbn } => {
                let session = browser.current_mut();
                session.remove(&isbn);
                print_status(session);
            }
            InnerCommand::Where => {
                println!("{}", browser.storage_location);
            }
            InnerCommand::Exit => return CommandExecutionResult::Exit,
        },

        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
        }
    }
    CommandExecutionResult::Ok
}

#[derive(rustyline_derive::Hinter)]
struct MyHelper {
    commands_names: Vec<String>,
}

impl MyHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        MyHelper { commands_names }
    }
}

impl Completer for MyHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .map(|c| c.to_string())
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for MyHelper {}
impl Validator for MyHelper {}
impl Helper for MyHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        catalog_path: cli_args.catalog.clone(),
        db_path: cli_args.db_path.clone(),
        initial_tabs: cli_args.tabs,
        ..CliConfig::default()
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(config.logging_level.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let catalog = Arc::new(readlist::catalog::load_catalog(&config.catalog_path)?);

    let (storage, storage_location): (Arc<dyn LocalStorage>, String) = match &config.db_path {
        Some(path) => {
            info!("Opening SQLite local storage at {:?}...", path);
            let storage = SqliteLocalStorage::new(path)
                .with_context(|| format!("Could not open local storage at {:?}", path))?;
            let location = storage.path().display().to_string();
            (Arc::new(storage), location)
        }
        None => {
            info!("No database path given, the reading list will not outlive this process.");
            (
                Arc::new(InMemoryLocalStorage::new()),
                "(in memory)".to_string(),
            )
        }
    };

    let mut browser = Browser {
        catalog,
        storage,
        storage_location,
        hub: Arc::new(BroadcastHub::new()),
        settings: config.session.clone(),
        tabs: Vec::with_capacity(config.initial_tabs),
        current: 0,
    };
    for _ in 0..config.initial_tabs {
        browser.open_tab();
    }
    browser.current = 0;

    InnerCli::command().print_long_help()?;
    print_status(browser.current());

    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<MyHelper, FileHistory>::with_config(rl_config)?;
    rl.set_helper(Some(MyHelper::new()));

    loop {
        let prompt = format!("tab {} {}", browser.current + 1, PROMPT);
        match rl.readline(&prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                let result = execute_command(line, &mut browser);
                browser.pump_remote_updates();
                match result {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => {
                        print_error(&err);
                        continue;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                println!("Error: {:?}", e);
                break;
            }
        }
    }

    browser.close_all();
    Ok(())
}
