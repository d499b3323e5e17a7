// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User profile model: biometrics, goal and login streak state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum FitnessGoal {
    Lose,
    Maintain,
    Gain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    Active,
    VeryActive,
}

/// Profile record stored at `profile_{userId}`.
///
/// Created on the first profile save and rewritten in place afterwards,
/// either by a save or by the daily streak transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    /// Age in years
    #[validate(range(min = 1, max = 150))]
    pub age: u32,
    pub gender: Gender,
    /// Height in centimeters
    #[validate(range(exclusive_min = 0.0, max = 300.0))]
    pub height: f64,
    /// Weight in kilograms
    #[validate(range(exclusive_min = 0.0, max = 700.0))]
    pub weight: f64,
    pub fitness_goal: FitnessGoal,
    pub activity_level: ActivityLevel,
    /// Last calendar day the streak was advanced for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(optional))]
    pub last_login_date: Option<NaiveDate>,
    /// Consecutive login days
    #[serde(default)]
    pub streak: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_json_layout() {
        let profile = UserProfile {
            age: 30,
            gender: Gender::Male,
            height: 180.0,
            weight: 80.0,
            fitness_goal: FitnessGoal::Maintain,
            activity_level: ActivityLevel::LightlyActive,
            last_login_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            streak: 3,
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            value,
            json!({
                "age": 30,
                "gender": "male",
                "height": 180.0,
                "weight": 80.0,
                "fitnessGoal": "maintain",
                "activityLevel": "lightlyActive",
                "lastLoginDate": "2024-01-15",
                "streak": 3
            })
        );
    }

    #[test]
    fn test_profile_missing_streak_fields_default() {
        let profile: UserProfile = serde_json::from_value(json!({
            "age": 41,
            "gender": "other",
            "height": 165,
            "weight": 62.5,
            "fitnessGoal": "gain",
            "activityLevel": "veryActive"
        }))
        .unwrap();

        assert_eq!(profile.last_login_date, None);
        assert_eq!(profile.streak, 0);
        assert_eq!(profile.activity_level, ActivityLevel::VeryActive);
    }

    #[test]
    fn test_profile_validation_rejects_zero_age() {
        let profile: UserProfile = serde_json::from_value(json!({
            "age": 0,
            "gender": "female",
            "height": 160,
            "weight": 55,
            "fitnessGoal": "lose",
            "activityLevel": "active"
        }))
        .unwrap();

        assert!(profile.validate().is_err());
    }
}
