//! catview - Catalog Viewer CLI

use std::error::Error;
use std::io::{BufRead, IsTerminal, Write};

use clap::{Parser, Subcommand};
use catview::terminal::{render, Rendered, TerminalStyle};
use catview::{
    catalog_page, error_notice, get_config_value, load_catalog, pack_detail, server_detail,
    set_config_value, Action, CatalogStore, Clipboard, Event, Node, Paths, Session, Settings,
    SystemClipboard,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "catview")]
#[command(about = "Catalog viewer - search and inspect agentic packs and MCP servers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog URL or path (overrides CATVIEW_CATALOG and the config)
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search packs and MCP servers (omit QUERY to list everything)
    Search {
        /// Case-insensitive substring to look for
        query: Option<String>,

        /// Output the render tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details for a pack
    Pack {
        /// Pack name (e.g. ocp-admin)
        name: String,

        /// Output the render tree as JSON
        #[arg(long)]
        json: bool,

        /// Copy the install snippet to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Show details for an MCP server
    Server {
        /// Server name
        name: String,

        /// Pack the server belongs to (names are only unique per pack)
        #[arg(long)]
        pack: String,

        /// Output the render tree as JSON
        #[arg(long)]
        json: bool,

        /// Copy the command (or endpoint URL) to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Browse interactively (type to search, :N to activate, :esc, :q)
    Browse,

    /// Get or set viewer configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show resolved paths (for debugging)
    Paths,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get config value(s)
    Get {
        /// Specific key (omit for all)
        key: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a config value
    Set {
        /// Config key
        key: String,

        /// Config value
        value: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let paths = Paths::resolve();

    match cli.command {
        Commands::Paths => {
            println!("Config file:     {}", paths.config_file().display());
            println!("Config exists:   {}", paths.config_file().exists());
            let settings = match Settings::load(&paths) {
                Ok(s) => s,
                Err(e) => {
                    println!("Config error:    {}", e);
                    Settings::default()
                }
            };
            println!(
                "Catalog source:  {}",
                paths.catalog_source(cli.catalog.as_deref(), &settings)
            );
        }
        Commands::Config { action } => match action {
            ConfigAction::Set { key, value } => match set_config_value(&paths, &key, &value) {
                Ok(()) => println!("Set {} = {}", key, value),
                Err(e) => {
                    report(&e);
                    std::process::exit(1);
                }
            },
            ConfigAction::Get { key, json } => {
                let settings = load_settings_or_exit(&paths);
                if let Some(k) = key {
                    match get_config_value(&settings, &k) {
                        Some(v) if json => print_json(&v),
                        Some(v) => println!("{}", display_value(&v)),
                        None => {
                            eprintln!("Config key not found: {}", k);
                            std::process::exit(1);
                        }
                    }
                } else if json {
                    print_json(&settings);
                } else {
                    for k in catview::config::KEYS {
                        if let Some(v) = get_config_value(&settings, k) {
                            println!("{} = {}", k, display_value(&v));
                        }
                    }
                }
            }
        },
        Commands::Search { query, json } => {
            let settings = load_settings_or_exit(&paths);
            let store = load_or_exit(&paths, cli.catalog.as_deref(), &settings);
            let page = catalog_page(&store, query.as_deref().unwrap_or(""), &Default::default());
            emit(&page, json);
        }
        Commands::Pack { name, json, copy } => {
            let settings = load_settings_or_exit(&paths);
            let store = load_or_exit(&paths, cli.catalog.as_deref(), &settings);
            let Some(detail) = pack_detail(&store, &settings, &name) else {
                std::process::exit(1);
            };
            emit(&detail, json);
            if copy {
                copy_first_snippet(&detail);
            }
        }
        Commands::Server {
            name,
            pack,
            json,
            copy,
        } => {
            let settings = load_settings_or_exit(&paths);
            let store = load_or_exit(&paths, cli.catalog.as_deref(), &settings);
            let Some(detail) = server_detail(&store, &settings, &name, &pack) else {
                std::process::exit(1);
            };
            emit(&detail, json);
            if copy {
                copy_first_snippet(&detail);
            }
        }
        Commands::Browse => {
            let settings = load_settings_or_exit(&paths);
            let store = load_or_exit(&paths, cli.catalog.as_deref(), &settings);
            if let Err(e) = browse(&store, &settings) {
                report(&e);
                std::process::exit(1);
            }
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("catview=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print an error and its cause chain.
fn report(err: &dyn Error) {
    eprintln!("Error: {}", err);
    let mut source = err.source();
    while let Some(s) = source {
        eprintln!("  Caused by: {}", s);
        source = s.source();
    }
}

fn load_settings_or_exit(paths: &Paths) -> Settings {
    match Settings::load(paths) {
        Ok(s) => s,
        Err(e) => {
            report(&e);
            eprintln!("  Fix it with `catview config set KEY VALUE` or edit the file directly");
            std::process::exit(1);
        }
    }
}

fn load_or_exit(paths: &Paths, cli_catalog: Option<&str>, settings: &Settings) -> CatalogStore {
    let source = paths.catalog_source(cli_catalog, settings);
    match load_catalog(&source) {
        Ok(store) => store,
        Err(e) => {
            let notice = error_notice(&format!(
                "Failed to load catalog data from {}. Check the source and try again.",
                source
            ));
            eprint!("{}", render(&notice, &Default::default(), stderr_style()).text);
            let mut source = e.source();
            while let Some(s) = source {
                tracing::debug!("caused by: {}", s);
                source = s.source();
            }
            tracing::debug!("{}", e);
            std::process::exit(1);
        }
    }
}

fn stdout_style() -> TerminalStyle {
    TerminalStyle {
        color: std::io::stdout().is_terminal(),
        numbered: false,
    }
}

fn stderr_style() -> TerminalStyle {
    TerminalStyle {
        color: std::io::stderr().is_terminal(),
        numbered: false,
    }
}

fn emit(node: &Node, json: bool) {
    if json {
        print_json(node);
    } else {
        print!("{}", render(node, &Default::default(), stdout_style()).text);
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    }
}

fn display_value(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::Null => "(unset)".to_string(),
        other => catview::models::value_text(other),
    }
}

fn copy_first_snippet(detail: &Node) {
    let Some(text) = detail.actions().into_iter().find_map(|a| match a {
        Action::Copy { text } => Some(text.clone()),
        _ => None,
    }) else {
        return;
    };
    match SystemClipboard.write_text(&text) {
        Ok(()) => eprintln!("Copied!"),
        Err(e) => {
            tracing::warn!(error = %e, "copy failed");
            eprintln!("Failed");
        }
    }
}

fn browse(store: &CatalogStore, settings: &Settings) -> std::io::Result<()> {
    let mut session = Session::new(store, settings);
    let mut clipboard = SystemClipboard;
    let style = TerminalStyle {
        color: std::io::stdout().is_terminal(),
        numbered: true,
    };
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    let mut screen = show(&session, style, &mut stdout)?;
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();

        let event = match input {
            ":q" | ":quit" => break,
            ":esc" => Event::Escape,
            _ => match input.strip_prefix(':').map(str::parse::<usize>) {
                Some(Ok(n)) => match screen.action(n) {
                    Some(action) => Event::Activate(action.clone()),
                    None => {
                        writeln!(stdout, "No action [{}]", n)?;
                        continue;
                    }
                },
                Some(Err(_)) => {
                    writeln!(stdout, "Commands: text to search, :N to activate, :esc, :q")?;
                    continue;
                }
                None => Event::Input(line.clone()),
            },
        };

        session.handle(event, &mut clipboard);
        screen = show(&session, style, &mut stdout)?;
    }
    Ok(())
}

fn show(
    session: &Session<'_>,
    style: TerminalStyle,
    stdout: &mut std::io::Stdout,
) -> std::io::Result<Rendered> {
    let screen = render(&session.view(), session.expanded(), style);
    write!(stdout, "{}", screen.text)?;
    if session.modal().is_none() {
        write!(stdout, "search [{}]> ", session.query())?;
    } else {
        write!(stdout, "> ")?;
    }
    stdout.flush()?;
    Ok(screen)
}
