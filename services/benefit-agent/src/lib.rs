//! Client side of the benefit service: keeps the per-request reasoning log,
//! calls `POST /verify-benefit`, substitutes a fallback benefit when the
//! service is unreachable and appends the interaction to the query log.

pub mod agent;
pub mod client;
pub mod session;

pub use agent::{Agent, AgentOutcome};
pub use client::{BenefitClient, ClientError};
pub use session::{mask_card_number, RequestContext, Session};
