//! Issue-sync GitHub infrastructure adapter.
//!
//! Implements the port traits defined in the [`tasks`] crate
//! ([`tasks::IssueTracker`], [`tasks::ProjectBoard`]) on top of `reqwest`:
//!
//! - issue search and creation use the REST API (`/search/issues`,
//!   `/repos/{owner}/{repo}/issues`);
//! - project lookup, item creation, and status updates use the GraphQL API
//!   (Projects v2).
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. All GitHub
//! API details (authentication headers, endpoint paths, response shapes,
//! GraphQL error envelopes) are handled here; the orchestration layer never
//! sees them. HTTP failures are mapped to [`tasks::GatewayError`] and returned
//! immediately. There is no retry or back-off.

mod client;
mod graphql;
mod rest;
mod wire;

pub use client::{ApiToken, GithubClient, GithubConfig};
