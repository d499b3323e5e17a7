// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static reference data: per-minute workout burn rates and common foods.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Meal;

/// Burn rate applied to activities without a listed rate (kcal/min).
pub const DEFAULT_CALORIES_PER_MINUTE: u32 = 5;

const ACTIVITY_RATES: [(&str, u32); 10] = [
    ("Walking", 4),
    ("Jogging", 8),
    ("Cycling", 7),
    ("Swimming", 8),
    ("HIIT", 12),
    ("Weight Training", 6),
    ("Yoga", 3),
    ("Pilates", 5),
    ("Dance", 6),
    ("Boxing", 10),
];

/// A common food with its nutrition facts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FoodItem {
    pub name: &'static str,
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

const fn food(name: &'static str, calories: u32, protein: f64, carbs: f64, fat: f64) -> FoodItem {
    FoodItem {
        name,
        calories,
        protein,
        carbs,
        fat,
    }
}

const BREAKFAST: [FoodItem; 4] = [
    food("Oatmeal with fruits", 300, 10.0, 50.0, 5.0),
    food("Scrambled eggs with toast", 350, 20.0, 30.0, 15.0),
    food("Greek yogurt with granola", 280, 15.0, 35.0, 8.0),
    food("Smoothie bowl", 320, 12.0, 55.0, 5.0),
];

const LUNCH: [FoodItem; 4] = [
    food("Grilled chicken salad", 400, 35.0, 20.0, 18.0),
    food("Turkey sandwich", 450, 25.0, 45.0, 15.0),
    food("Vegetable soup with bread", 300, 10.0, 45.0, 8.0),
    food("Quinoa bowl with veggies", 380, 15.0, 50.0, 12.0),
];

const DINNER: [FoodItem; 4] = [
    food("Salmon with roasted vegetables", 480, 30.0, 25.0, 25.0),
    food("Pasta with tomato sauce", 450, 15.0, 70.0, 10.0),
    food("Stir-fry with rice", 500, 25.0, 60.0, 15.0),
    food("Lean beef with potatoes", 520, 35.0, 40.0, 20.0),
];

const SNACK: [FoodItem; 4] = [
    food("Apple with peanut butter", 200, 5.0, 25.0, 8.0),
    food("Protein bar", 220, 15.0, 25.0, 6.0),
    food("Mixed nuts", 180, 6.0, 6.0, 16.0),
    food("Greek yogurt", 120, 10.0, 5.0, 5.0),
];

/// Activities that have a listed burn rate, in display order.
pub fn rated_activities() -> impl Iterator<Item = &'static str> {
    ACTIVITY_RATES.iter().map(|(name, _)| *name)
}

pub fn calories_per_minute(activity: &str) -> u32 {
    ACTIVITY_RATES
        .iter()
        .find(|(name, _)| *name == activity)
        .map_or(DEFAULT_CALORIES_PER_MINUTE, |(_, rate)| *rate)
}

/// Rough calories burned for `duration` minutes of `activity`.
pub fn estimate_workout_calories(activity: &str, duration: u32) -> u32 {
    calories_per_minute(activity).saturating_mul(duration)
}

pub fn common_foods(meal: Meal) -> &'static [FoodItem] {
    match meal {
        Meal::Breakfast => &BREAKFAST,
        Meal::Lunch => &LUNCH,
        Meal::Dinner => &DINNER,
        Meal::Snack => &SNACK,
    }
}
