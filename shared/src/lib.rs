//! Shared building blocks of the benefit services: the benefit data model,
//! the static rule table and resolver, wire DTOs, configuration, errors and
//! the interaction log.

pub mod benefit;
pub mod benefit_resolver;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod rules;
pub mod utils;

pub use benefit::{Benefit, Language, Location};
pub use benefit_resolver::resolve;
