//! Daily and weekly aggregates for dashboard views.
//!
//! These are computed on demand from the per-user logs; nothing here is
//! persisted.

use chrono::NaiveDate;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::FoodLog;

/// Summed intake for one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NutritionTotals {
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl NutritionTotals {
    /// Add one food entry to the running totals.
    pub fn add(&mut self, log: &FoodLog) {
        self.calories = self.calories.saturating_add(log.calories);
        self.protein += log.protein;
        self.carbs += log.carbs;
        self.fat += log.fat;
    }

    /// Totals over every entry logged on `date`.
    pub fn for_date<'a>(logs: impl IntoIterator<Item = &'a FoodLog>, date: NaiveDate) -> Self {
        let mut totals = Self::default();
        for log in logs.into_iter().filter(|log| log.date == date) {
            totals.add(log);
        }
        totals
    }
}

/// Dashboard numbers for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub calorie_target: i64,
    pub step_goal: u32,
    pub steps: u32,
    pub calories_consumed: u32,
    pub calories_burned: u32,
    /// target - consumed + burned (negative when over target)
    pub calories_remaining: i64,
    pub nutrition: NutritionTotals,
    pub streak: u32,
}

/// Personal targets derived from the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Targets {
    pub calorie_target: i64,
    pub step_goal: u32,
    pub recommended_workouts: Vec<String>,
    pub streak: u32,
}

/// One bar of the weekly activity chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeeklyActivityDay {
    /// "Mon".."Sun"
    pub day: String,
    pub date: NaiveDate,
    pub steps: u32,
    /// Workout calories burned that day
    pub calories: u32,
}
