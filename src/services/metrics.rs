// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived fitness metrics.
//!
//! Everything here is a pure function of its arguments. Callers pass the
//! profile (if any) and "today" explicitly, so nothing depends on the clock
//! or on storage.

use chrono::{Days, NaiveDate};

use crate::models::{
    ActivityLevel, DailySummary, FitnessGoal, FoodLog, Gender, NutritionTotals, StepLog, Targets,
    UserProfile, WeeklyActivityDay, WorkoutLog,
};
use crate::services::catalog;
use crate::time_utils::weekday_label;

/// Calorie target used when no profile exists.
pub const DEFAULT_CALORIE_TARGET: i64 = 2000;
/// Step goal used when no profile exists.
pub const DEFAULT_STEP_GOAL: u32 = 10_000;

const GOAL_CALORIE_ADJUSTMENT: f64 = 500.0;
const WEEK_DAYS: u64 = 7;

const BASE_WORKOUTS: [&str; 4] = ["Walking", "Jogging", "Cycling", "Swimming"];

// ─── Streak ──────────────────────────────────────────────────

/// Result of applying the daily login transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Already recorded today; nothing changed.
    Unchanged,
    /// Last login was yesterday; streak grew by one.
    Extended,
    /// First login, or a gap of more than a day; streak restarted at 1.
    Reset,
}

/// Apply the login-day transition to `profile` for `today`.
///
/// The caller persists the profile when the result is not `Unchanged`.
pub fn apply_daily_streak(profile: &mut UserProfile, today: NaiveDate) -> StreakChange {
    if profile.last_login_date == Some(today) {
        return StreakChange::Unchanged;
    }

    let yesterday = today.pred_opt();
    let change = if profile.last_login_date.is_some() && profile.last_login_date == yesterday {
        profile.streak = profile.streak.saturating_add(1);
        StreakChange::Extended
    } else {
        profile.streak = 1;
        StreakChange::Reset
    };

    profile.last_login_date = Some(today);
    change
}

/// Merge a submitted profile with the stored one.
///
/// Only biometrics and goals come from `incoming`. Streak state is taken
/// from `stored` after today's login transition; a first save starts at 1.
pub fn prepare_profile_save(
    mut incoming: UserProfile,
    stored: Option<UserProfile>,
    today: NaiveDate,
) -> UserProfile {
    let (streak, last_login_date) = match stored {
        Some(mut stored) => {
            apply_daily_streak(&mut stored, today);
            (stored.streak, stored.last_login_date)
        }
        None => (1, Some(today)),
    };

    incoming.streak = streak;
    incoming.last_login_date = last_login_date;
    incoming
}

// ─── Targets ─────────────────────────────────────────────────

/// Basal metabolic rate (Mifflin-St Jeor), kcal/day.
pub fn basal_metabolic_rate(profile: &UserProfile) -> f64 {
    let base = 10.0 * profile.weight + 6.25 * profile.height - 5.0 * f64::from(profile.age);
    match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}

pub fn activity_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::LightlyActive => 1.375,
        ActivityLevel::Active => 1.55,
        ActivityLevel::VeryActive => 1.725,
    }
}

/// Daily calorie target: BMR scaled by activity, shifted by goal.
pub fn daily_calorie_target(profile: Option<&UserProfile>) -> i64 {
    let Some(profile) = profile else {
        return DEFAULT_CALORIE_TARGET;
    };

    let tdee = basal_metabolic_rate(profile) * activity_factor(profile.activity_level);
    let target = match profile.fitness_goal {
        FitnessGoal::Lose => tdee - GOAL_CALORIE_ADJUSTMENT,
        FitnessGoal::Gain => tdee + GOAL_CALORIE_ADJUSTMENT,
        FitnessGoal::Maintain => tdee,
    };

    target.round() as i64
}

pub fn step_goal(profile: Option<&UserProfile>) -> u32 {
    match profile.map(|p| p.activity_level) {
        None => DEFAULT_STEP_GOAL,
        Some(ActivityLevel::Sedentary) => 7_500,
        Some(ActivityLevel::LightlyActive) => 10_000,
        Some(ActivityLevel::Active) => 12_500,
        Some(ActivityLevel::VeryActive) => 15_000,
    }
}

/// Suggested activities for the profile's goal, in display order.
pub fn recommended_workouts(profile: Option<&UserProfile>) -> Vec<String> {
    let Some(profile) = profile else {
        return Vec::new();
    };

    let names: Vec<&str> = match profile.fitness_goal {
        FitnessGoal::Lose => BASE_WORKOUTS
            .into_iter()
            .chain([
                "High-Intensity Interval Training (HIIT)",
                "Circuit Training",
                "Aerobic Exercise",
                "Jump Rope",
            ])
            .collect(),
        FitnessGoal::Gain => vec![
            "Weight Training",
            "Resistance Band Training",
            "Bodyweight Exercises",
            "Protein-rich Diet",
            "Progressive Overload Training",
        ],
        FitnessGoal::Maintain => BASE_WORKOUTS
            .into_iter()
            .chain([
                "Yoga",
                "Pilates",
                "Bodyweight Training",
                "Balanced Cardio and Strength",
            ])
            .collect(),
    };

    names.into_iter().map(String::from).collect()
}

/// Rated activities followed by any recommendations not already listed.
pub fn workout_options(profile: Option<&UserProfile>) -> Vec<String> {
    let mut options: Vec<String> = catalog::rated_activities()
        .map(String::from)
        .collect();

    for workout in recommended_workouts(profile) {
        if !options.contains(&workout) {
            options.push(workout);
        }
    }

    options
}

pub fn targets(profile: Option<&UserProfile>) -> Targets {
    Targets {
        calorie_target: daily_calorie_target(profile),
        step_goal: step_goal(profile),
        recommended_workouts: recommended_workouts(profile),
        streak: profile.map_or(0, |p| p.streak),
    }
}

// ─── Summaries ───────────────────────────────────────────────

pub fn steps_on(steps: &[StepLog], date: NaiveDate) -> u32 {
    steps
        .iter()
        .find(|log| log.date == date)
        .map_or(0, |log| log.steps)
}

pub fn workout_calories_on(workouts: &[WorkoutLog], date: NaiveDate) -> u32 {
    workouts
        .iter()
        .filter(|log| log.date == date)
        .fold(0u32, |total, log| total.saturating_add(log.calories_burned))
}

/// Inputs for dashboard aggregation, borrowed from one user's data.
#[derive(Debug, Clone, Copy)]
pub struct UserDataView<'a> {
    pub profile: Option<&'a UserProfile>,
    pub workouts: &'a [WorkoutLog],
    pub foods: &'a [FoodLog],
    pub steps: &'a [StepLog],
}

pub fn daily_summary(view: UserDataView<'_>, date: NaiveDate) -> DailySummary {
    let calorie_target = daily_calorie_target(view.profile);
    let nutrition = NutritionTotals::for_date(view.foods, date);
    let calories_burned = workout_calories_on(view.workouts, date);

    DailySummary {
        date,
        calorie_target,
        step_goal: step_goal(view.profile),
        steps: steps_on(view.steps, date),
        calories_consumed: nutrition.calories,
        calories_burned,
        calories_remaining: calorie_target - i64::from(nutrition.calories)
            + i64::from(calories_burned),
        nutrition,
        streak: view.profile.map_or(0, |p| p.streak),
    }
}

/// Seven days ending at `end`, oldest first.
pub fn weekly_activity(view: UserDataView<'_>, end: NaiveDate) -> Vec<WeeklyActivityDay> {
    (0..WEEK_DAYS)
        .rev()
        .filter_map(|offset| end.checked_sub_days(Days::new(offset)))
        .map(|date| WeeklyActivityDay {
            day: weekday_label(date).to_string(),
            date,
            steps: steps_on(view.steps, date),
            calories: workout_calories_on(view.workouts, date),
        })
        .collect()
}
