// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod logs;
pub mod profile;
pub mod stats;
pub mod user;

pub use logs::{FoodLog, Meal, NewFoodLog, NewWorkoutLog, StepLog, WorkoutLog};
pub use profile::{ActivityLevel, FitnessGoal, Gender, UserProfile};
pub use stats::{DailySummary, NutritionTotals, Targets, WeeklyActivityDay};
pub use user::{Account, User};
