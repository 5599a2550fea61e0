use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use tournament_preview::client::{GraphQlClient, StartggClient};
use tournament_preview::config::{ClientConfig, Credentials, RetryPolicy, DEFAULT_API_URL};
use tournament_preview::discriminators::load_allow_list;
use tournament_preview::fetch::fetch_all_entrants;
use tournament_preview::link;
use tournament_preview::preview::{build_preview, render_preview};
use tournament_preview::resolve::events_for_link;
use tournament_preview::{Entrant, EventInfo, PlayerMap, ENTRANT_FIELDS};

#[derive(Parser)]
#[command(name = "tournament-preview")]
#[command(about = "Generate tournament previews of start.gg events", long_about = None)]
struct Cli {
    /// Link to a start.gg tournament or event
    link: String,

    /// File with one player discriminator per line; these players are shown regardless of seed
    discriminator_file: Option<PathBuf>,

    /// Number of top seeds to display
    #[arg(short = 'n', long, default_value = "16")]
    seeds: u32,

    /// start.gg API token. Takes precedence over --auth-file.
    #[arg(long, env = "STARTGG_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// File containing the start.gg API token
    #[arg(long, default_value = "auth.txt")]
    auth_file: PathBuf,

    /// GraphQL endpoint
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Entrants requested per page before any shrinking
    #[arg(long, default_value = "100")]
    page_size: u32,

    /// Full passes over an event's entrants before giving up on it
    #[arg(long, default_value = "5")]
    attempts: u32,

    /// Seconds to wait before re-sending a request the server failed
    #[arg(long, default_value = "4")]
    backoff_secs: u64,

    /// Re-sends of a single failing request before the pass is abandoned
    #[arg(long, default_value = "10")]
    transient_retries: u32,

    /// Stop at the first event whose entrants cannot be fetched instead of skipping it
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.attempts,
            initial_page_size: self.page_size,
            transient_backoff: Duration::from_secs(self.backoff_secs),
            max_transient_retries: self.transient_retries,
            ..RetryPolicy::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let policy = cli.retry_policy();
    policy.validate().context("Invalid retry settings")?;

    let credentials =
        Credentials::resolve(cli.token.as_deref(), &cli.auth_file).context("Failed to load API token")?;
    let config = ClientConfig::new(&cli.api_url, credentials)?;
    let client = StartggClient::new(config).context("Failed to create HTTP client")?;

    let allow_list = load_allow_list(cli.discriminator_file.as_deref())
        .context("Failed to read discriminator file")?;

    let link = link::classify(&cli.link);
    log::info!("Looking up {}", link);

    let events = events_for_link(&client, &link).with_context(|| format!("Failed to resolve {}", link))?;
    if events.is_empty() {
        log::warn!("{} has no events", link);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for event in &events {
        if let Err(e) = write_event_preview(&mut out, &client, event, &allow_list, cli.seeds, &policy) {
            if cli.strict {
                return Err(e).with_context(|| format!("Failed to preview {}", event));
            }
            log::error!("Skipping {}: {:#}", event, e);
        }
    }

    Ok(())
}

/// Print the game heading, then the preview line.
///
/// The heading goes out before any entrant is fetched, so an event whose
/// fetch fails still shows up, followed by an empty preview line.
fn write_event_preview<W: Write>(
    out: &mut W,
    client: &dyn GraphQlClient,
    event: &EventInfo,
    allow_list: &HashSet<String>,
    seeds: u32,
    policy: &RetryPolicy,
) -> Result<()> {
    writeln!(out, "{}", event.game)?;
    out.flush()?;

    let entrants: Vec<Entrant> = match fetch_all_entrants(client, event.id, ENTRANT_FIELDS, policy) {
        Ok(entrants) => entrants,
        Err(e) => {
            writeln!(out)?;
            return Err(e.into());
        }
    };
    let players = PlayerMap::from_entrants(&entrants);
    let preview = build_preview(&players, allow_list, seeds);

    writeln!(out, "{}", render_preview(&preview))?;
    Ok(())
}
