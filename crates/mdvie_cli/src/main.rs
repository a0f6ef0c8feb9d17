//! Command-line access to the MDVie document store.

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use mdvie_core::loader::{load_document, LoadedDocument};
use mdvie_core::templates::template_source;
use mdvie_core::{open_store, Config, DocumentStore, FileRegistry, Settings, SharedStore};
use serde_json::json;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "mdvie", about = "MDVie document CLI", version)]
struct Cli {
    /// Database directory (defaults to DB_PATH or ~/.cache/mdvie/db)
    #[arg(short, long)]
    db: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// List files in sidebar order
    List,
    /// Create the next Untitled-N.md file
    New,
    /// Print a file, seeding default content if it was never saved
    Show { name: String },
    /// Store content for a file from --file or stdin
    Save {
        name: String,
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Rename a file, moving its stored content
    Rename { old: String, new: String },
    /// Delete a file and its content
    Delete { name: String },
    /// Write a file as markdown into a directory
    Download {
        name: String,
        /// Target directory (defaults to MDVIE_DOWNLOAD_DIR or ~/Downloads)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show or change persisted settings
    Settings {
        #[arg(long)]
        font_size: Option<i64>,
        #[arg(long, requires = "git_email")]
        git_username: Option<String>,
        #[arg(long, requires = "git_username")]
        git_email: Option<String>,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mdvie_core=warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

fn format_list_output(files: &[String], json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(files)?);
    }
    if files.is_empty() {
        return Ok("No files.".to_string());
    }
    Ok(files.join("\n"))
}

fn format_show_output(loaded: &LoadedDocument, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(loaded)?);
    }
    Ok(loaded.content.clone())
}

fn format_settings_output(settings: &Settings, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(settings)?);
    }
    let unset = |value: &str| {
        if value.is_empty() {
            "(unset)".to_string()
        } else {
            value.to_string()
        }
    };
    Ok(format!(
        "font size:    {}px\ngit username: {}\ngit email:    {}",
        settings.font_size,
        unset(&settings.git_username),
        unset(&settings.git_email)
    ))
}

fn format_action_output(action: &str, name: &str, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(
            &json!({ "action": action, "name": name }),
        )?);
    }
    Ok(format!("{} {}", action, name))
}

fn read_content(file: Option<&Path>, stdin: &mut dyn Read) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            stdin
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Run one non-completion command against `store` and return its output.
fn execute(
    command: Commands,
    json: bool,
    store: SharedStore,
    config: &Config,
    stdin: &mut dyn Read,
) -> anyhow::Result<String> {
    let docs = DocumentStore::new(store.clone());
    match command {
        Commands::Completions { .. } => bail!("completions are generated before opening storage"),
        Commands::List => {
            let registry = FileRegistry::load(docs)?;
            format_list_output(registry.files(), json)
        }
        Commands::New => {
            let mut registry = FileRegistry::load(docs)?;
            let name = registry.create()?;
            format_action_output("created", &name, json)
        }
        Commands::Show { name } => {
            let templates = template_source(config.template_path.clone());
            let loaded = load_document(&docs, templates.as_ref(), &name)?;
            format_show_output(&loaded, json)
        }
        Commands::Save { name, file } => {
            let registry = FileRegistry::load(docs.clone())?;
            let content = read_content(file.as_deref(), stdin)?;
            docs.set(&name, &content)?;
            if !registry.contains(&name) {
                warn!("{} is stored but not listed in the sidebar", name);
            }
            format_action_output("saved", &name, json)
        }
        Commands::Rename { old, new } => {
            let mut registry = FileRegistry::load(docs)?;
            if !registry.contains(&old) {
                bail!("no file named {}", old);
            }
            let renamed = registry.rename(&old, &new)?;
            format_action_output("renamed", &renamed, json)
        }
        Commands::Delete { name } => {
            let mut registry = FileRegistry::load(docs)?;
            if !registry.contains(&name) {
                bail!("no file named {}", name);
            }
            registry.delete(&name)?;
            format_action_output("deleted", &name, json)
        }
        Commands::Download { name, out } => {
            let mut registry = FileRegistry::load(docs)?;
            if !registry.contains(&name) {
                bail!("no file named {}", name);
            }
            let download = registry.download(&name)?;
            let dir = out.unwrap_or_else(|| config.download_dir.clone());
            let path = download.write_into(&dir)?;
            format_action_output("downloaded", &path.to_string_lossy(), json)
        }
        Commands::Settings {
            font_size,
            git_username,
            git_email,
        } => {
            let mut settings = Settings::load(&store)?;
            if let Some(size) = font_size {
                settings.set_font_size(&store, size)?;
            }
            if let (Some(username), Some(email)) = (git_username, git_email) {
                settings.submit_git_identity(&store, &username, &email)?;
            }
            format_settings_output(&settings, json)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let Cli { db, json, command } = Cli::parse();

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    init_tracing();
    let mut config = Config::from_env();
    if let Some(db) = db {
        config.db_path = db;
    }
    if config.ephemeral {
        warn!("MDVIE_EPHEMERAL is set; changes made by this command will not persist");
    }
    let store = open_store(&config)
        .with_context(|| format!("failed to open database at {}", config.db_path))?;
    let output = execute(command, json, store, &config, &mut io::stdin())?;
    println!("{}", output);
    Ok(())
}
