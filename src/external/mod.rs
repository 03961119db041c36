// ABOUTME: Opaque external collaborator contracts: narrative, sessions, secrets, remote recipes
// ABOUTME: The plan-generation core depends on these traits, never on concrete transports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

/// Narrative phrasing around generated plans
pub mod narrative;
/// Remote recipe source over HTTP
pub mod recipe_api;
/// Credential lookup for external services
pub mod secrets;
/// Best-effort TTL'd plan handoff between requests
pub mod session_store;

pub use narrative::{NarrativeService, TemplateNarrative};
pub use recipe_api::{RemoteRecipeConfig, RemoteRecipeSource};
pub use secrets::{EnvSecrets, SecretsProvider};
pub use session_store::{InMemorySessionStore, SessionStore};
