// ABOUTME: Plan-generation engines: workout progression, balance validation, meal optimization
// ABOUTME: Pure deterministic computation over immutable catalogs; no I/O at this layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

/// Weekly balance validation for workout plans
pub mod balance;
/// Meal selection and portion scaling against calorie and macro targets
pub mod meal_optimizer;
/// Workout plan assembly with progressive overload
pub mod progression;

pub use balance::BalanceValidator;
pub use meal_optimizer::MealOptimizer;
pub use progression::ProgressionEngine;
