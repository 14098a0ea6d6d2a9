use std::sync::Arc;

use shared::db::InteractionLog;
use shared::dto::{BenefitQueryLog, BenefitRequest};
use shared::Benefit;
use tracing::{error, warn};

use crate::client::{BenefitClient, ClientError};
use crate::session::RequestContext;

pub const EMPTY_QUERY: &str = "Please enter a question about your card benefits.";
pub const REQUEST_FAILED: &str = "Failed to process request. Please try again.";

/// Result of one query, carrying the request context back to the caller.
#[derive(Debug)]
pub struct AgentOutcome {
    pub context: RequestContext,
    pub benefit: Option<Benefit>,
    pub error: Option<String>,
    pub fallback: bool,
}

pub struct Agent {
    client: BenefitClient,
    log: Arc<dyn InteractionLog>,
}

impl Agent {
    pub fn new(client: BenefitClient, log: Arc<dyn InteractionLog>) -> Self {
        Self { client, log }
    }

    pub async fn ask(&self, ctx: RequestContext, query: &str) -> AgentOutcome {
        if query.trim().is_empty() {
            return AgentOutcome {
                context: ctx,
                benefit: None,
                error: Some(EMPTY_QUERY.to_string()),
                fallback: false,
            };
        }

        let init = format!("Initializing Agentic Engine for {}...", ctx.session.card_number_masked);
        let geofence = format!("Setting Geofence: {}", ctx.location);
        let ctx = ctx
            .log(init)
            .log(geofence)
            .log("Scanning uploaded Visa PDFs for benefits...")
            .log("Requesting benefit verification...");

        let request = BenefitRequest {
            query: query.to_string(),
            location: ctx.location,
            language: ctx.language,
            pdf_content: ctx.document.clone(),
            card_number: Some(ctx.session.card_number_masked.clone()),
        };

        match self.client.verify(&request).await {
            Ok(benefit) => {
                self.record(&ctx, query, &benefit).await;
                AgentOutcome {
                    context: ctx.log("Benefit verification complete!"),
                    benefit: Some(benefit),
                    error: None,
                    fallback: false,
                }
            }
            Err(e) if e.is_unavailable() => {
                error!(%e, endpoint = self.client.endpoint(), "benefit verification failed");
                let benefit = Benefit::fallback(ctx.location);
                AgentOutcome {
                    context: ctx.log("Using fallback demo benefit"),
                    benefit: Some(benefit),
                    error: Some(REQUEST_FAILED.to_string()),
                    fallback: true,
                }
            }
            Err(e) => {
                warn!(%e, "service answered without a benefit");
                let message = match e {
                    ClientError::Rejected(msg) => msg,
                    other => other.to_string(),
                };
                AgentOutcome {
                    context: ctx,
                    benefit: None,
                    error: Some(message),
                    fallback: false,
                }
            }
        }
    }

    async fn record(&self, ctx: &RequestContext, query: &str, benefit: &Benefit) {
        let entry = BenefitQueryLog {
            card_number_masked: ctx.session.card_number_masked.clone(),
            location: ctx.location,
            language: ctx.language,
            query: query.to_string(),
            benefit_response: benefit.clone(),
            reasoning_log: ctx.reasoning_log.clone(),
            user_session: ctx.session.id.clone(),
        };
        if let Err(e) = self.log.record_query(&entry).await {
            error!(%e, session = %ctx.session.id, "failed to record benefit query");
        }
    }
}
