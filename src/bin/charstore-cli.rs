//! Terminal client for the catalog server.
//!
//!   charstore-cli list --status alive --page 2
//!   charstore-cli add --name Rick --species Human --status Alive
//!   charstore-cli remove 3
//!   charstore-cli init seed.json
//!   charstore-cli browse

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use charstore::client::{render, CatalogClient, ViewState};
use charstore::model::NewCharacter;

const DEFAULT_IMAGE: &str = "https://rickandmortyapi.com/api/character/avatar/3.jpeg";

#[derive(Debug, Parser)]
#[command(name = "charstore-cli", version, about = "Browse and edit the character catalog")]
struct Cli {
    /// Root URL of the catalog server.
    #[arg(long, env = "CHARSTORE_URL", default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show one page of characters.
    List {
        #[arg(short, long, default_value = "")]
        name: String,
        #[arg(short, long, default_value = "")]
        status: String,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show a single character.
    Show { id: u64 },
    /// Add a character, then show the first page.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        species: String,
        #[arg(long, default_value = "unknown")]
        status: String,
        #[arg(long, default_value = DEFAULT_IMAGE)]
        image: String,
    },
    /// Remove a character, then show the first page.
    Remove { id: u64 },
    /// Replace the whole catalog with the array in FILE (at most 20 entries).
    Init { file: PathBuf },
    /// Page through the catalog interactively.
    Browse,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charstore=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = CatalogClient::new(&cli.url)?;

    match cli.command {
        Command::List { name, status, page } => {
            let mut view = ViewState::default();
            view.set_name(&name);
            view.set_status(&status);
            view.set_page(page);
            refresh(&client, &mut view).await;
        }
        Command::Show { id } => {
            let character = client.get(id).await.with_context(|| format!("failed to fetch character {id}"))?;
            print!("{}", render::card(&character));
        }
        Command::Add { name, species, status, image } => {
            let created = client
                .create(&NewCharacter { name, species, status, image })
                .await
                .context("failed to add character")?;
            println!("added #{}", created.id);
            refresh(&client, &mut ViewState::default()).await;
        }
        Command::Remove { id } => {
            client.delete(id).await.with_context(|| format!("failed to remove character {id}"))?;
            println!("removed #{id}");
            refresh(&client, &mut ViewState::default()).await;
        }
        Command::Init { file } => {
            let raw = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let records: Vec<NewCharacter> = serde_json::from_slice(&raw)
                .with_context(|| format!("{} is not an array of characters", file.display()))?;
            let characters = client.init(&records).await.context("failed to initialize catalog")?;
            println!("initialized {} characters", characters.len());
        }
        Command::Browse => browse(&client).await?,
    }
    Ok(())
}

/// Fetches the page `view` points at and prints it. Superseded replies are
/// dropped silently.
async fn refresh(client: &CatalogClient, view: &mut ViewState) {
    if let Some(listing) = client.load(&view.query()).await {
        listing.apply_to(view);
        print!("{}", render::listing(&listing));
        println!("{}", render::footer(view));
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Next,
    Previous,
    Name(String),
    Status(String),
    Add(NewCharacter),
    Remove(u64),
    Help,
    Quit,
}

const HELP: &str = "\
n              next page
p              previous page
/TEXT          filter by name (\"/\" clears)
s STATUS       filter by status (\"s\" clears)
a NAME;SPECIES;STATUS
               add a character
d ID           remove a character
q              quit";

fn parse_action(line: &str) -> Option<Action> {
    let line = line.trim();
    if let Some(name) = line.strip_prefix('/') {
        return Some(Action::Name(name.to_owned()));
    }
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    match verb {
        "n" => Some(Action::Next),
        "p" => Some(Action::Previous),
        "s" => Some(Action::Status(rest.to_owned())),
        "d" => rest.parse().ok().map(Action::Remove),
        "a" => {
            let mut parts = rest.split(';').map(str::trim);
            let name = parts.next().filter(|s| !s.is_empty())?;
            let species = parts.next().filter(|s| !s.is_empty())?;
            let status = parts.next().filter(|s| !s.is_empty()).unwrap_or("unknown");
            Some(Action::Add(NewCharacter {
                name: name.to_owned(),
                species: species.to_owned(),
                status: status.to_owned(),
                image: DEFAULT_IMAGE.to_owned(),
            }))
        }
        "?" | "h" | "help" => Some(Action::Help),
        "q" | "quit" => Some(Action::Quit),
        _ => None,
    }
}

async fn browse(client: &CatalogClient) -> anyhow::Result<()> {
    let mut view = ViewState::default();
    println!("{HELP}\n");
    refresh(client, &mut view).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_action(&line) {
            Some(Action::Next) => view.next_page(),
            Some(Action::Previous) => view.previous_page(),
            Some(Action::Name(name)) => view.set_name(&name),
            Some(Action::Status(status)) => view.set_status(&status),
            Some(Action::Add(new)) => {
                if let Err(e) = client.create(&new).await {
                    eprintln!("Adding the character failed: {e}");
                    continue;
                }
            }
            Some(Action::Remove(id)) => {
                if let Err(e) = client.delete(id).await {
                    eprintln!("Removing the character failed: {e}");
                    continue;
                }
            }
            Some(Action::Help) => {
                println!("{HELP}");
                continue;
            }
            Some(Action::Quit) => break,
            None => {
                eprintln!("unknown command, ? for help");
                continue;
            }
        }
        refresh(client, &mut view).await;
    }
    Ok(())
}
