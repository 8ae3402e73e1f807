//! Command-line interface for folio.
//!
//! The admin surface: create, edit, list and delete portfolio records,
//! generate the sitemap, and inspect configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config;
use crate::library::Library;
use crate::sitemap;

pub mod posts;
pub mod records;

/// folio - portfolio content backend
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides configuration)
    #[arg(long, global = true, env = "FOLIO_DATABASE")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage blog posts
    Post {
        #[command(subcommand)]
        command: posts::PostCommands,
    },

    /// Manage courses
    Course {
        #[command(subcommand)]
        command: records::CourseCommands,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        command: records::ProjectCommands,
    },

    /// Manage notes
    Note {
        #[command(subcommand)]
        command: records::NoteCommands,
    },

    /// Write the XML sitemap
    Sitemap {
        /// Output file (prints to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Site root (defaults to the configured site URL)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Post { command } => {
                let library = open_library(self.database)?;
                posts::execute(&library, command).await
            }
            Commands::Course { command } => {
                records::execute_course(&open_library(self.database)?, command)
            }
            Commands::Project { command } => {
                records::execute_project(&open_library(self.database)?, command)
            }
            Commands::Note { command } => {
                records::execute_note(&open_library(self.database)?, command)
            }
            Commands::Sitemap { output, base_url } => {
                write_sitemap(&open_library(self.database)?, output, base_url)
            }
            Commands::Config => show_config(),
        }
    }
}

fn open_library(database: Option<PathBuf>) -> Result<Library> {
    let path = match database {
        Some(path) => path,
        None => config::database_path()?,
    };

    Library::open(&path).with_context(|| format!("Failed to open database: {}", path.display()))
}

/// Read text from `--content` or `--content-file`
pub(crate) fn read_content(text: Option<String>, file: Option<PathBuf>) -> Result<Option<String>> {
    match (text, file) {
        (Some(text), _) => Ok(Some(text)),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("Failed to read content file: {}", path.display())),
        (None, None) => Ok(None),
    }
}

/// Shorten to `max` characters for table output
pub(crate) fn truncate_cell(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Pretty-printed JSON for `show --json`
pub(crate) fn print_json<T: serde::Serialize>(record: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

fn write_sitemap(library: &Library, output: Option<PathBuf>, base_url: Option<String>) -> Result<()> {
    let base_url = match base_url {
        Some(url) => url,
        None => config::config()?.site_url.clone(),
    };

    let entries = sitemap::collect(library, &base_url)?;
    let xml = sitemap::render(&entries)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &xml)
                .with_context(|| format!("Failed to write sitemap: {}", path.display()))?;
            info!(path = %path.display(), urls = entries.len(), "Wrote sitemap");
            println!("Wrote {} URLs to {}", entries.len(), path.display());
        }
        None => println!("{}", xml),
    }

    Ok(())
}

fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("folio configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:     {}", cfg.home.display());
    println!("  Database: {}", cfg.database.display());
    println!();
    println!("Site URL: {}", cfg.site_url);
    println!();
    println!("Article fetch:");
    println!("  Timeout:    {}s", cfg.fetch.timeout_seconds);
    println!("  User agent: {}", cfg.fetch.user_agent);

    Ok(())
}
