use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use benefit_agent::{Agent, BenefitClient, RequestContext, Session};
use clap::Parser;
use shared::config::Settings;
use shared::db::{InteractionLog, MemoryInteractionLog, PgInteractionLog};
use shared::dto::UploadedDocument;
use shared::utils::char_len;
use shared::{Language, Location};
use text_extraction::extract_document_text;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Ask about card benefits at a simulated location.
#[derive(Debug, Parser)]
#[command(name = "benefit-agent", version)]
struct Cli {
    /// Simulated location, e.g. "Chennai Airport".
    #[arg(long, default_value = "IIT Madras Main Gate")]
    location: Location,
    /// Language of the benefit title.
    #[arg(long, default_value = "English")]
    language: Language,
    /// PDF with card terms to consult.
    #[arg(long)]
    document: Option<PathBuf>,
    /// Card number; only the masked form leaves this process.
    #[arg(long)]
    card: Option<String>,
    /// Overrides BENEFIT_API_URL.
    #[arg(long)]
    endpoint: Option<String>,
    /// The question.
    #[arg(required = true, trailing_var_arg = true)]
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let cli = Cli::parse();
    let settings = Settings::new().context("load settings")?;

    let log: Arc<dyn InteractionLog> = if settings.persistence_enabled() {
        Arc::new(PgInteractionLog::open(&settings.database_url).await?)
    } else {
        Arc::new(MemoryInteractionLog::default())
    };

    let session = Session::new(cli.card.as_deref().unwrap_or(&settings.card_number));
    let mut ctx = RequestContext::new(session, cli.location, cli.language);

    if let Some(path) = &cli.document {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("read {}", path.display()))?;
        let file_size = data.len() as i64;
        let content = extract_document_text(data).await;
        info!(path = %path.display(), chars = char_len(&content), "document loaded");
        let record = UploadedDocument {
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload.pdf".to_string()),
            file_size,
            content: content.clone(),
            user_session: ctx.session.id.clone(),
        };
        if let Err(e) = log.record_document(&record).await {
            warn!(%e, "failed to record uploaded document");
        }
        ctx = ctx.with_document(content);
    }

    let endpoint = cli.endpoint.unwrap_or(settings.benefit_api_url);
    let client = BenefitClient::new(endpoint, Duration::from_secs(settings.request_timeout_secs))?;
    let agent = Agent::new(client, log);

    let outcome = agent.ask(ctx, &cli.query.join(" ")).await;
    for line in &outcome.context.reasoning_log {
        eprintln!("> {line}");
    }
    if let Some(error) = &outcome.error {
        eprintln!("{error}");
    }
    if let Some(benefit) = &outcome.benefit {
        println!("{}", serde_json::to_string_pretty(benefit)?);
    }
    Ok(())
}
