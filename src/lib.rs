// ABOUTME: Main library entry point for the Fitcoach plan-generation core
// ABOUTME: Provides workout progression, balance validation, meal optimization, and plan caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

// deny(unsafe_code): zero-tolerance unsafe policy for the whole crate
#![deny(unsafe_code)]

//! # Fitcoach Core
//!
//! A knowledge-augmented fitness plan-generation core. The crate turns
//! immutable exercise and recipe catalogs into deterministic weekly workout
//! and meal plans, validates their weekly balance, and caches finished plans
//! with request coalescing.
//!
//! ## Features
//!
//! - **Progression engine**: 7-day plans with progressive overload against a
//!   prior completed cycle
//! - **Balance validation**: weekly muscle-group coverage and
//!   consecutive-day conflict reports
//! - **Meal optimization**: deterministic recipe selection and portion
//!   scaling within a calorie tolerance band
//! - **Plan cache**: TTL'd, fingerprint-keyed cache where concurrent misses
//!   share one computation
//!
//! ## Architecture
//!
//! - **Catalog**: immutable exercise and recipe repositories with pluggable
//!   population sources
//! - **Intelligence**: pure plan-generation engines; no I/O at this layer
//! - **Cache**: request fingerprinting plus the coalescing TTL cache
//! - **External**: opaque collaborator contracts (narrative, sessions,
//!   secrets, remote recipes)
//!
//! ## Example Usage
//!
//! ```rust
//! use fitcoach_core::catalog::ExerciseCatalog;
//! use fitcoach_core::config::ProgressionSettings;
//! use fitcoach_core::errors::AppResult;
//! use fitcoach_core::intelligence::ProgressionEngine;
//! use fitcoach_core::models::{DifficultyTier, Goal};
//! use std::sync::Arc;
//!
//! fn main() -> AppResult<()> {
//!     let engine = ProgressionEngine::new(
//!         Arc::new(ExerciseCatalog::builtin()),
//!         ProgressionSettings::default(),
//!     );
//!     let plan = engine.generate_plan(Goal::Maintenance, DifficultyTier::Beginner, None)?;
//!     println!("{} days planned", plan.days.len());
//!     Ok(())
//! }
//! ```

/// TTL plan cache with request coalescing and fingerprinting
pub mod cache;

/// Immutable exercise and recipe catalogs
pub mod catalog;

/// Environment-based configuration management
pub mod config;

/// Application constants and default values
pub mod constants;

/// Unified error handling with structured codes
pub mod errors;

/// Opaque external collaborator contracts
pub mod external;

/// Plan-generation engines: progression, balance, meal optimization
pub mod intelligence;

/// Structured logging setup and event helpers
pub mod logging;

/// Common data models for workout and meal planning
pub mod models;
