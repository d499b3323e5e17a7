// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout, food and step log models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

/// Logged workout, stored in the `workouts_{userId}` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutLog {
    /// Time-ordered id (UUID v7)
    pub id: Uuid,
    pub date: NaiveDate,
    /// Activity name (free text)
    pub activity: String,
    /// Duration in minutes
    pub duration: u32,
    pub calories_burned: u32,
}

/// Workout submission without an id.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NewWorkoutLog {
    pub date: NaiveDate,
    #[validate(length(min = 1, max = 100))]
    pub activity: String,
    #[validate(range(min = 1, max = 1440))]
    pub duration: u32,
    /// Estimated from the activity when omitted
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(optional))]
    pub calories_burned: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// Logged food item, stored in the `foods_{userId}` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FoodLog {
    pub id: Uuid,
    pub date: NaiveDate,
    pub meal: Meal,
    pub food: String,
    pub calories: u32,
    /// Grams
    pub protein: f64,
    /// Grams
    pub carbs: f64,
    /// Grams
    pub fat: f64,
}

/// Food submission without an id.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NewFoodLog {
    pub date: NaiveDate,
    pub meal: Meal,
    #[validate(length(min = 1, max = 100))]
    pub food: String,
    pub calories: u32,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub protein: f64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub carbs: f64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub fat: f64,
}

/// Step count for one calendar day, keyed by date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StepLog {
    pub date: NaiveDate,
    pub steps: u32,
}

impl WorkoutLog {
    /// Assign a fresh id to a submission.
    pub fn from_new(new: NewWorkoutLog, calories_burned: u32) -> Self {
        Self {
            id: Uuid::now_v7(),
            date: new.date,
            activity: new.activity,
            duration: new.duration,
            calories_burned,
        }
    }
}

impl From<NewFoodLog> for FoodLog {
    fn from(new: NewFoodLog) -> Self {
        Self {
            id: Uuid::now_v7(),
            date: new.date,
            meal: new.meal,
            food: new.food,
            calories: new.calories,
            protein: new.protein,
            carbs: new.carbs,
            fat: new.fat,
        }
    }
}
