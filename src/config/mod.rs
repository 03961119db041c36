// ABOUTME: Configuration management for the plan-generation core
// ABOUTME: Environment-only configuration with typed sub-configs and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

/// Environment-based configuration management
pub mod environment;

pub use environment::{
    CacheSettings, CoreConfig, Environment, NutritionSettings, ProgressionSettings,
};
