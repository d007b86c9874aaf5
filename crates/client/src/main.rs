//! Interactive console editor for timetable preferences.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use timetabler_client::application::ports::PeriodPort;
use timetabler_client::application::services::{PeriodService, PreferenceService};
use timetabler_client::config::{load_dotenv_from, ClientConfig};
use timetabler_client::infrastructure::HttpApiClient;
use timetabler_client::ports::outbound::RawApiPort;
use timetabler_client::ui::{parse_command, Console, Flow};
use timetabler_client::EditingSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(cwd) = std::env::current_dir() {
        load_dotenv_from(&cwd);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timetabler_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env().context("Invalid configuration")?;
    tracing::info!(
        api_url = %config.api_url,
        strategy = %config.commit_strategy,
        days = config.visible_days,
        "Starting timetable preference editor"
    );

    let mut http = HttpApiClient::new(&config.api_url, config.request_timeout);
    if let Some(token) = &config.api_token {
        http = http.with_token(token.clone());
    }
    let raw: Arc<dyn RawApiPort> = Arc::new(http);

    let periods = PeriodService::new(raw.clone())
        .list_periods(config.organization_id)
        .await
        .context("Failed to load periods")?;
    tracing::info!(count = periods.len(), "Loaded periods");

    let session = EditingSession::new(Arc::new(PreferenceService::new(raw)), periods, config.days())
        .with_scope(config.scope())
        .with_strategy(config.commit_strategy);
    let mut console = Console::new(session);

    println!("Type 'help' for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        let (flow, output) = console.execute(command).await;
        for text in output {
            println!("{text}");
        }
        if flow == Flow::Quit {
            break;
        }
    }

    Ok(())
}
