//! Command-line front end: local snippet management and sharing.

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use snipshare_client::ShareClient;
use snipshare_core::models::share::{ShareReceipt, SharedSnippetContent};
use snipshare_core::models::snippet::{Snippet, SnippetSummary};
use snipshare_core::{Config, SnippetStore};
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "snip", about = "SnipShare CLI", version)]
struct Cli {
    /// Local snippet database (can also be set via SNIPPETS_DB_PATH)
    #[arg(long, env = "SNIPPETS_DB_PATH", global = true)]
    db: Option<String>,

    /// Share server URL (can also be set via SHARE_SERVER)
    #[arg(short, long, env = "SHARE_SERVER", global = true)]
    server: Option<String>,

    /// Share request timeout in seconds
    #[arg(short = 't', long, env = "SHARE_TIMEOUT_SECS", global = true)]
    timeout: Option<u64>,

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
    /// Save a new snippet (content from --file or stdin)
    New {
        #[arg(short = 'T', long)]
        title: String,
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(short, long)]
        language: Option<String>,
    },
    /// List snippets, most recently updated first
    List,
    /// Print a snippet's content
    Show { id: u64 },
    /// Replace fields of an existing snippet; omitted fields are kept
    Edit {
        id: u64,
        #[arg(short = 'T', long)]
        title: Option<String>,
        /// Read new content from this file
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Delete a snippet (no-op when it does not exist)
    Delete { id: u64 },
    /// Publish a local snippet to the share server and print its URL
    Share {
        id: u64,
        /// Days until the link expires; omit for a permanent link
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// Download a shared snippet by id
    Fetch { share_id: String },
}

fn render_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("response encoding error: {}", err))
}

fn format_list_output(snippets: &[SnippetSummary], json: bool) -> Result<String, String> {
    if json {
        return render_json(snippets);
    }

    let rows: Vec<String> = snippets
        .iter()
        .map(|s| {
            format!(
                "{:>6}  {:<12} {:<30} {}",
                s.id,
                s.language,
                s.title,
                s.updated_at.format("%Y-%m-%d %H:%M")
            )
        })
        .collect();
    Ok(rows.join("\n"))
}

fn format_show_output(snippet: &Snippet, json: bool) -> Result<String, String> {
    if json {
        return render_json(snippet);
    }
    Ok(snippet.content.clone())
}

fn format_created_output(id: u64, json: bool) -> Result<String, String> {
    if json {
        return render_json(&serde_json::json!({ "id": id }));
    }
    Ok(format!("Created snippet {}", id))
}

fn format_updated_output(snippet: &Snippet, json: bool) -> Result<String, String> {
    if json {
        return render_json(snippet);
    }
    Ok(format!("Updated snippet {}: {}", snippet.id, snippet.title))
}

fn format_delete_output(id: u64, removed: bool, json: bool) -> Result<String, String> {
    if json {
        return render_json(&serde_json::json!({ "id": id, "deleted": removed }));
    }
    if removed {
        Ok(format!("Deleted snippet {}", id))
    } else {
        Ok(format!("No snippet {} to delete", id))
    }
}

fn format_share_output(receipt: &ShareReceipt, json: bool) -> Result<String, String> {
    if json {
        return render_json(receipt);
    }
    match receipt.expires_at {
        Some(expires_at) => Ok(format!(
            "{}\n(expires {})",
            receipt.url,
            expires_at.format("%Y-%m-%d %H:%M UTC")
        )),
        None => Ok(receipt.url.clone()),
    }
}

fn format_fetch_output(shared: &SharedSnippetContent, json: bool) -> Result<String, String> {
    if json {
        return render_json(shared);
    }
    Ok(shared.content.clone())
}

fn read_content(file: Option<PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read '{}'", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn emit(output: Result<String, String>, action: &str) -> anyhow::Result<()> {
    let output = output.map_err(|message| anyhow::anyhow!("{} failed: {}", action, message))?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn open_store(db: Option<String>, config: &Config) -> anyhow::Result<SnippetStore> {
    let path = non_blank(db).unwrap_or_else(|| config.snippets_db_path.clone());
    SnippetStore::open(&path).with_context(|| format!("failed to open snippet store '{}'", path))
}

fn share_client(
    server: Option<String>,
    timeout: Option<u64>,
    config: &Config,
) -> anyhow::Result<ShareClient> {
    let server = non_blank(server).unwrap_or_else(|| config.share_server.clone());
    let timeout = timeout
        .filter(|secs| *secs > 0)
        .unwrap_or(config.share_timeout_secs);
    Ok(ShareClient::new(&server, Duration::from_secs(timeout))?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snipshare=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let Cli {
        db,
        server,
        timeout,
        json,
        command,
    } = Cli::parse();

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let config = Config::from_env();

    match command {
        Commands::Completions { .. } => {}
        Commands::New {
            title,
            file,
            language,
        } => {
            let content = read_content(file)?;
            let store = open_store(db, &config)?;
            let id = store.create(&title, &content, language.as_deref())?;
            emit(format_created_output(id, json), "New")?;
        }
        Commands::List => {
            let store = open_store(db, &config)?;
            let snippets = store.list()?;
            emit(format_list_output(&snippets, json), "List")?;
        }
        Commands::Show { id } => {
            let store = open_store(db, &config)?;
            let Some(snippet) = store.get(id)? else {
                anyhow::bail!("Snippet {} not found", id);
            };
            emit(format_show_output(&snippet, json), "Show")?;
        }
        Commands::Edit {
            id,
            title,
            file,
            language,
        } => {
            let store = open_store(db, &config)?;
            let Some(current) = store.get(id)? else {
                anyhow::bail!("Snippet {} not found", id);
            };
            let content = match file {
                Some(path) => read_content(Some(path))?,
                None => current.content,
            };
            let title = title.unwrap_or(current.title);
            let language = language.unwrap_or(current.language);
            let updated = store.update(id, &title, &content, Some(language.as_str()))?;
            emit(format_updated_output(&updated, json), "Edit")?;
        }
        Commands::Delete { id } => {
            let store = open_store(db, &config)?;
            let removed = store.delete(id)?;
            emit(format_delete_output(id, removed, json), "Delete")?;
        }
        Commands::Share { id, days } => {
            let store = open_store(db, &config)?;
            let Some(snippet) = store.get(id)? else {
                anyhow::bail!("Snippet {} not found", id);
            };
            // Release the database file before the network round trip.
            drop(store);
            let client = share_client(server, timeout, &config)?;
            let receipt = client
                .publish(&snippet.content, Some(snippet.language.as_str()), days)
                .await
                .context("Share failed")?;
            emit(format_share_output(&receipt, json), "Share")?;
        }
        Commands::Fetch { share_id } => {
            let client = share_client(server, timeout, &config)?;
            let Some(shared) = client.fetch(&share_id).await.context("Fetch failed")? else {
                anyhow::bail!("Share {} not found or expired", share_id);
            };
            emit(format_fetch_output(&shared, json), "Fetch")?;
        }
    }

    Ok(())
}
