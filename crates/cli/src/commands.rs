// FILE: crates/cli/src/commands.rs

use anyhow::{anyhow, bail, Context, Result};
use bookscan_config::{ConfigManager, JsonFile, LogLevel};
use bookscan_core::{BookRecord, ManualEntry};
use bookscan_library::{parse_resolver_output, LibraryConfig, LibraryManager, StaticResolver};
use clap::ArgMatches;
use console::style;
use std::fs;
use std::path::Path;

type Library = LibraryManager<JsonFile, StaticResolver>;

fn open_library(config: &LibraryConfig) -> Library {
    LibraryManager::open(config, StaticResolver::new())
}

/// Create the books and settings documents
pub fn init_library(config: &LibraryConfig) -> Result<()> {
    for dir in config.directories() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
    }

    let (books, settings) = open_library(config)
        .initialize()
        .context("Failed to initialize library")?;

    report_document("Books", &config.books_path, books);
    report_document("Settings", &config.settings_path, settings);
    Ok(())
}

fn report_document(name: &str, path: &Path, created: bool) {
    if created {
        println!("{} {} created at {}", style("✓").green().bold(), name, path.display());
    } else {
        println!("{} already present at {}", name, path.display());
    }
}

/// List all books in the library
pub fn list_books(config: &LibraryConfig) -> Result<()> {
    let entries = open_library(config)
        .list()
        .context("Failed to list books")?;

    if entries.is_empty() {
        println!("No books in library. Use 'add', 'import' or 'scan' to catalog one.");
        return Ok(());
    }

    println!("\n{} Books in Library", style(entries.len()).bold().cyan());
    println!("{}", "=".repeat(80));

    for entry in entries {
        println!("{}", entry);
    }

    Ok(())
}

/// Collects the manual entry form from command-line arguments
///
/// Fields that were not given keep their placeholder.
pub(crate) fn manual_entry(matches: &ArgMatches) -> ManualEntry {
    let mut entry = ManualEntry::new();
    let fields = [
        ("type", &mut entry.kind),
        ("title", &mut entry.title),
        ("author", &mut entry.author),
        ("year", &mut entry.year),
        ("isbn", &mut entry.isbn),
        ("publisher", &mut entry.publisher),
    ];

    for (arg, field) in fields {
        if let Some(value) = matches.get_one::<String>(arg) {
            *field = value.trim().to_string();
        }
    }

    entry
}

/// Add a book from manually entered fields
pub fn add_book(config: &LibraryConfig, matches: &ArgMatches) -> Result<()> {
    let entry = manual_entry(matches);
    let record = open_library(config)
        .add_manual(entry)
        .map_err(|e| anyhow!(e.user_message()))
        .context("Failed to add book")?;

    print_added(&record);
    Ok(())
}

/// Add a book from a resolver output file
pub fn import_book(config: &LibraryConfig, matches: &ArgMatches) -> Result<()> {
    let file = matches
        .get_one::<String>("file")
        .ok_or_else(|| anyhow!("Input file is required"))?;

    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))?;
    let record = parse_resolver_output(&content)
        .with_context(|| format!("Failed to parse {}", file))?;

    open_library(config)
        .add_record(record.clone())
        .context("Failed to add book")?;

    print_added(&record);
    Ok(())
}

/// Builds a resolver from a catalog file mapping ISBNs to records
pub(crate) fn load_catalog(path: &Path) -> Result<StaticResolver> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("Catalog {} is not a JSON object", path.display()))?;

    Ok(catalog
        .into_iter()
        .fold(StaticResolver::new(), |resolver, (isbn, record)| {
            resolver.with_output(&isbn, record.to_string())
        }))
}

/// Look up an ISBN and add the book, or only preview it
pub fn scan_isbn(config: &LibraryConfig, matches: &ArgMatches) -> Result<()> {
    let isbn = matches
        .get_one::<String>("isbn")
        .ok_or_else(|| anyhow!("ISBN is required"))?;
    let catalog = matches
        .get_one::<String>("catalog")
        .ok_or_else(|| anyhow!("Catalog file is required"))?;

    let resolver = load_catalog(Path::new(catalog))?;
    let library = LibraryManager::open(config, resolver);

    if matches.get_flag("preview") {
        println!("{}", library.preview(isbn));
        return Ok(());
    }

    let record = library
        .add_by_isbn(isbn)
        .map_err(|e| anyhow!(e.user_message()))?;

    print_added(&record);
    Ok(())
}

/// Show a book matching a query, optionally deleting it
pub fn inspect_book(config: &LibraryConfig, matches: &ArgMatches) -> Result<()> {
    let query = matches
        .get_one::<String>("query")
        .ok_or_else(|| anyhow!("Query is required"))?;

    let mut library = open_library(config);
    let inspection = library
        .inspect(query)
        .context("Failed to inspect book")?;

    println!("{}", inspection.message());
    let title = match inspection.record() {
        Some(record) if matches.get_flag("delete") => record.title.clone(),
        _ => return Ok(()),
    };

    if !matches.get_flag("force") {
        println!("Are you sure you want to delete '{}'? (y/N)", title);
        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read input")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    match library
        .delete_inspected()
        .context("Failed to delete book")?
    {
        Some(record) => println!("{} Book deleted: {}", style("✓").green().bold(), record.title),
        None => bail!("'{}' is no longer in the library", title),
    }

    Ok(())
}

/// Show every setting
pub fn show_settings(config: &LibraryConfig) -> Result<()> {
    let settings = open_library(config)
        .all_settings()
        .context("Failed to read settings")?;

    println!("\n{}", style("Settings").bold().cyan());
    println!("{}", "=".repeat(80));
    for (name, value) in settings {
        println!("{} = {}", name, value);
    }

    Ok(())
}

/// Change an existing setting
pub fn set_setting(config: &LibraryConfig, matches: &ArgMatches) -> Result<()> {
    let name = matches
        .get_one::<String>("name")
        .ok_or_else(|| anyhow!("Setting name is required"))?;
    let value = matches
        .get_one::<String>("value")
        .ok_or_else(|| anyhow!("Setting value is required"))?;

    let written = open_library(config)
        .set_setting(name, value)
        .context("Failed to update settings")?;

    if written {
        println!("{} {} = {}", style("✓").green().bold(), name, value);
    } else {
        println!("No change: '{}' is unknown or already '{}'", name, value);
    }

    Ok(())
}

/// Print the initial content of the ISBN field
pub fn show_prefill(config: &LibraryConfig) -> Result<()> {
    let prefill = open_library(config)
        .isbn_prefill()
        .context("Failed to read settings")?;
    println!("{}", prefill);
    Ok(())
}

/// Write the default config file unless one exists
pub fn init_config(manager: &ConfigManager) -> Result<()> {
    let created = manager
        .initialize()
        .context("Failed to write config file")?;
    report_document("Config", &manager.config_path(), created);
    Ok(())
}

/// Show the config file location and its values
pub fn show_config(manager: &ConfigManager) -> Result<()> {
    let config = manager.load().context("Failed to load config")?;

    println!("\n{} {}", style("Config").bold().cyan(), manager.config_path().display());
    println!("{}", "=".repeat(80));
    println!("app.log_level = {}", config.app.log_level);
    println!("storage.data_dir = {}", config.storage.data_dir.display());
    println!("storage.books_file = {}", config.storage.books_file);
    println!("storage.settings_file = {}", config.storage.settings_file);
    Ok(())
}

/// Change the log level stored in the config file
pub fn set_log_level(manager: &ConfigManager, matches: &ArgMatches) -> Result<()> {
    let level: LogLevel = matches
        .get_one::<String>("level")
        .ok_or_else(|| anyhow!("Log level is required"))?
        .parse()
        .map_err(|e| anyhow!("{}", e))?;

    manager
        .update(|config| config.app.log_level = level)
        .context("Failed to update config")?;

    println!("{} app.log_level = {}", style("✓").green().bold(), level);
    Ok(())
}

/// Overwrite the config file with defaults
pub fn reset_config(manager: &ConfigManager) -> Result<()> {
    manager.reset().context("Failed to reset config")?;
    println!(
        "{} Config reset to defaults at {}",
        style("✓").green().bold(),
        manager.config_path().display()
    );
    Ok(())
}

fn print_added(record: &BookRecord) {
    println!("{} Book added successfully!", style("✓").green().bold());
    println!("{}", record.summary());
}
