// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use bookscan_config::{Config, ConfigManager};
use bookscan_library::LibraryConfig;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

mod commands;

fn build_cli() -> Command {
    Command::new("bookscan")
        .version("0.1.0")
        .author("Bookscan Team")
        .about("Personal book catalog backed by JSON documents")
        .arg(
            Arg::new("data-dir")
                .short('d')
                .long("data-dir")
                .value_name("DIR")
                .help("Directory holding books.json and settings.json (overrides the config file)")
                .global(true),
        )
        .subcommand(Command::new("init").about("Create the books and settings documents"))
        .subcommand(Command::new("list").about("List every book as 'title | author'"))
        .subcommand(
            Command::new("add")
                .about("Add a book from manually entered fields")
                .arg(Arg::new("type").long("type").value_name("TYPE").help("Record type (default: book)"))
                .arg(Arg::new("title").short('t').long("title").value_name("TITLE").help("Book title"))
                .arg(Arg::new("author").short('a').long("author").value_name("AUTHOR").help("Author name"))
                .arg(Arg::new("year").short('y').long("year").value_name("YEAR").help("Publication year"))
                .arg(Arg::new("isbn").short('i').long("isbn").value_name("ISBN").help("ISBN, hyphens allowed"))
                .arg(Arg::new("publisher").short('p').long("publisher").value_name("PUBLISHER").help("Publisher")),
        )
        .subcommand(
            Command::new("import")
                .about("Add a book from a resolver output file")
                .arg(Arg::new("file").required(true).value_name("FILE").help("JSON bibliographic record")),
        )
        .subcommand(
            Command::new("scan")
                .about("Look up an ISBN in a catalog file and add the book")
                .arg(Arg::new("isbn").required(true).value_name("ISBN").help("ISBN to look up"))
                .arg(
                    Arg::new("catalog")
                        .short('c')
                        .long("catalog")
                        .required(true)
                        .value_name("FILE")
                        .help("JSON object mapping ISBNs to bibliographic records"),
                )
                .arg(
                    Arg::new("preview")
                        .long("preview")
                        .help("Show the resolved record without adding it")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show a book matching 'title fragment | author'")
                .arg(Arg::new("query").required(true).value_name("QUERY").help("Query such as 'Dune | Frank Herbert'"))
                .arg(Arg::new("delete").long("delete").help("Delete the matching book").action(ArgAction::SetTrue))
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .help("Skip confirmation prompt")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Show or change settings")
                .subcommand(
                    Command::new("set")
                        .about("Change an existing setting")
                        .arg(Arg::new("name").required(true).value_name("NAME"))
                        .arg(Arg::new("value").required(true).value_name("VALUE")),
                ),
        )
        .subcommand(Command::new("prefill").about("Print the initial content of the ISBN field"))
        .subcommand(
            Command::new("config")
                .about("Show or change the bookscan.toml config file")
                .subcommand(
                    Command::new("log-level")
                        .about("Set the default log level")
                        .arg(
                            Arg::new("level")
                                .required(true)
                                .value_name("LEVEL")
                                .help("One of: error, warn, info, debug, trace"),
                        ),
                )
                .subcommand(Command::new("reset").about("Restore the default config, keeping a backup")),
        )
}

fn load_config() -> (Option<ConfigManager>, Config) {
    match ConfigManager::new() {
        Ok(manager) => {
            let config = manager
                .load_with_env_overrides()
                .unwrap_or_else(|_| manager.load_or_default());
            (Some(manager), config)
        }
        Err(_) => (None, Config::default()),
    }
}

fn library_config(
    matches: &ArgMatches,
    manager: Option<&ConfigManager>,
    config: &Config,
) -> Result<LibraryConfig> {
    if let Some(dir) = matches.get_one::<String>("data-dir") {
        return Ok(LibraryConfig::in_directory(PathBuf::from(dir)));
    }

    let manager = manager.context("Could not determine the config directory; pass --data-dir")?;
    Ok(LibraryConfig::from_config(manager, config))
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let (manager, config) = load_config();

    env_logger::Builder::new()
        .filter_level(config.app.log_level.into())
        .parse_default_env()
        .init();

    let library = library_config(&matches, manager.as_ref(), &config)?;
    log::debug!("Using books document {}", library.books_path.display());

    match matches.subcommand() {
        Some(("init", _)) => {
            if let (Some(manager), None) = (&manager, matches.get_one::<String>("data-dir")) {
                commands::init_config(manager)?;
            }
            commands::init_library(&library)
        }
        Some(("list", _)) => commands::list_books(&library),
        Some(("add", sub_matches)) => commands::add_book(&library, sub_matches),
        Some(("import", sub_matches)) => commands::import_book(&library, sub_matches),
        Some(("scan", sub_matches)) => commands::scan_isbn(&library, sub_matches),
        Some(("inspect", sub_matches)) => commands::inspect_book(&library, sub_matches),
        Some(("settings", sub_matches)) => match sub_matches.subcommand() {
            Some(("set", set_matches)) => commands::set_setting(&library, set_matches),
            _ => commands::show_settings(&library),
        },
        Some(("prefill", _)) => commands::show_prefill(&library),
        Some(("config", sub_matches)) => {
            let manager = manager
                .as_ref()
                .context("Could not determine the config directory")?;
            match sub_matches.subcommand() {
                Some(("log-level", level_matches)) => commands::set_log_level(manager, level_matches),
                Some(("reset", _)) => commands::reset_config(manager),
                _ => commands::show_config(manager),
            }
        }
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
