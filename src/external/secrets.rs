// ABOUTME: Credential lookup contract for external services
// ABOUTME: Environment-backed implementation; secrets never live in configuration files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

use crate::errors::{AppError, AppResult};

/// Supplies credentials for external collaborators
#[async_trait::async_trait]
pub trait SecretsProvider: Send + Sync {
    /// Fetch a named secret
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_ERROR` when the secret is not available
    async fn secret(&self, name: &str) -> AppResult<String>;
}

/// Reads secrets from process environment variables
pub struct EnvSecrets;

#[async_trait::async_trait]
impl SecretsProvider for EnvSecrets {
    async fn secret(&self, name: &str) -> AppResult<String> {
        std::env::var(name)
            .map_err(|_| AppError::config(format!("environment variable {name} is not set")))
    }
}
