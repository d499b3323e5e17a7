// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user tracking service.
//!
//! Handles the read-modify-write workflows over one user's data:
//! 1. Daily streak transition when a session opens
//! 2. Profile saves
//! 3. Workout and food appends, step upserts
//! 4. Targets and summaries over the stored logs
//!
//! Writes for one user are serialized by a per-user lock so concurrent
//! requests never drop an append. Derivations live in `metrics`.

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::db::FitnessDb;
use crate::error::Result;
use crate::models::{
    DailySummary, FoodLog, NewFoodLog, NewWorkoutLog, StepLog, Targets, UserProfile,
    WeeklyActivityDay, WorkoutLog,
};
use crate::services::catalog::estimate_workout_calories;
use crate::services::metrics::{self, StreakChange, UserDataView};

type UserLocks = Arc<DashMap<Uuid, Arc<Mutex<()>>>>;

/// Everything stored for one user.
#[derive(Debug, Clone, Default)]
pub struct UserData {
    pub profile: Option<UserProfile>,
    pub workouts: Vec<WorkoutLog>,
    pub foods: Vec<FoodLog>,
    pub steps: Vec<StepLog>,
}

impl UserData {
    pub fn view(&self) -> UserDataView<'_> {
        UserDataView {
            profile: self.profile.as_ref(),
            workouts: &self.workouts,
            foods: &self.foods,
            steps: &self.steps,
        }
    }
}

/// Overwrite the entry for `date`, or append one if none exists.
pub fn upsert_step_log(logs: &mut Vec<StepLog>, date: NaiveDate, steps: u32) -> StepLog {
    let entry = StepLog { date, steps };
    match logs.iter_mut().find(|log| log.date == date) {
        Some(existing) => existing.steps = steps,
        None => logs.push(entry.clone()),
    }
    entry
}

#[derive(Clone)]
pub struct TrackerService {
    db: FitnessDb,
    user_locks: UserLocks,
}

impl TrackerService {
    pub fn new(db: FitnessDb) -> Self {
        Self {
            db,
            user_locks: Arc::new(DashMap::new()),
        }
    }

    async fn lock_user(&self, user_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = self
            .user_locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    // ─── Session ─────────────────────────────────────────────────

    /// Apply the login-day streak transition for `today`.
    ///
    /// Idempotent within a day. Returns the (possibly updated) profile, or
    /// `None` if the user has not saved one yet.
    pub async fn record_login(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<Option<UserProfile>> {
        let _guard = self.lock_user(user_id).await;

        let Some(mut profile) = self.db.get_profile(user_id)? else {
            return Ok(None);
        };

        let change = metrics::apply_daily_streak(&mut profile, today);
        if change != StreakChange::Unchanged {
            self.db.set_profile(user_id, &profile)?;
            tracing::info!(
                user_id = %user_id,
                streak = profile.streak,
                change = ?change,
                "Streak updated"
            );
        }

        Ok(Some(profile))
    }

    /// Load a user's full data after applying the daily streak transition.
    pub async fn open_session(&self, user_id: Uuid, today: NaiveDate) -> Result<UserData> {
        let profile = self.record_login(user_id, today).await?;
        Ok(UserData {
            profile,
            ..self.load(user_id)?
        })
    }

    /// Read everything stored for a user without side effects.
    pub fn load(&self, user_id: Uuid) -> Result<UserData> {
        Ok(UserData {
            profile: self.db.get_profile(user_id)?,
            workouts: self.db.get_workouts(user_id)?,
            foods: self.db.get_foods(user_id)?,
            steps: self.db.get_steps(user_id)?,
        })
    }

    // ─── Profile ─────────────────────────────────────────────────

    pub fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        self.db.get_profile(user_id)
    }

    /// Save biometrics and goals. Streak state is kept from the stored
    /// profile, advanced for `today`; submitted streak fields are ignored.
    pub async fn save_profile(
        &self,
        user_id: Uuid,
        profile: UserProfile,
        today: NaiveDate,
    ) -> Result<UserProfile> {
        let _guard = self.lock_user(user_id).await;

        let stored = self.db.get_profile(user_id)?;
        let profile = metrics::prepare_profile_save(profile, stored, today);
        self.db.set_profile(user_id, &profile)?;

        tracing::info!(user_id = %user_id, streak = profile.streak, "Profile saved");
        Ok(profile)
    }

    // ─── Logs ────────────────────────────────────────────────────

    pub fn workouts(&self, user_id: Uuid) -> Result<Vec<WorkoutLog>> {
        self.db.get_workouts(user_id)
    }

    /// Append a workout. Missing calories are estimated from the activity.
    pub async fn add_workout(&self, user_id: Uuid, new: NewWorkoutLog) -> Result<WorkoutLog> {
        let calories = new
            .calories_burned
            .unwrap_or_else(|| estimate_workout_calories(&new.activity, new.duration));
        let log = WorkoutLog::from_new(new, calories);

        let _guard = self.lock_user(user_id).await;
        let mut logs = self.db.get_workouts(user_id)?;
        logs.push(log.clone());
        self.db.set_workouts(user_id, &logs)?;

        tracing::debug!(
            user_id = %user_id,
            workout_id = %log.id,
            count = logs.len(),
            "Workout logged"
        );
        Ok(log)
    }

    pub fn foods(&self, user_id: Uuid) -> Result<Vec<FoodLog>> {
        self.db.get_foods(user_id)
    }

    pub async fn add_food(&self, user_id: Uuid, new: NewFoodLog) -> Result<FoodLog> {
        let log = FoodLog::from(new);

        let _guard = self.lock_user(user_id).await;
        let mut logs = self.db.get_foods(user_id)?;
        logs.push(log.clone());
        self.db.set_foods(user_id, &logs)?;

        tracing::debug!(
            user_id = %user_id,
            food_id = %log.id,
            count = logs.len(),
            "Food logged"
        );
        Ok(log)
    }

    pub fn steps(&self, user_id: Uuid) -> Result<Vec<StepLog>> {
        self.db.get_steps(user_id)
    }

    /// Set the step count for `date`, replacing any earlier value.
    pub async fn update_steps(&self, user_id: Uuid, date: NaiveDate, steps: u32) -> Result<StepLog> {
        let _guard = self.lock_user(user_id).await;

        let mut logs = self.db.get_steps(user_id)?;
        let entry = upsert_step_log(&mut logs, date, steps);
        self.db.set_steps(user_id, &logs)?;

        tracing::debug!(user_id = %user_id, %date, steps, "Steps updated");
        Ok(entry)
    }

    // ─── Derived ─────────────────────────────────────────────────

    pub fn targets(&self, user_id: Uuid) -> Result<Targets> {
        let profile = self.db.get_profile(user_id)?;
        Ok(metrics::targets(profile.as_ref()))
    }

    pub fn workout_options(&self, user_id: Uuid) -> Result<Vec<String>> {
        let profile = self.db.get_profile(user_id)?;
        Ok(metrics::workout_options(profile.as_ref()))
    }

    pub fn daily_summary(&self, user_id: Uuid, date: NaiveDate) -> Result<DailySummary> {
        let data = self.load(user_id)?;
        Ok(metrics::daily_summary(data.view(), date))
    }

    pub fn weekly_activity(&self, user_id: Uuid, end: NaiveDate) -> Result<Vec<WeeklyActivityDay>> {
        let data = self.load(user_id)?;
        Ok(metrics::weekly_activity(data.view(), end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, FitnessGoal, Gender};
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_profile() -> UserProfile {
        UserProfile {
            age: 30,
            gender: Gender::Male,
            height: 180.0,
            weight: 80.0,
            fitness_goal: FitnessGoal::Lose,
            activity_level: ActivityLevel::Active,
            last_login_date: None,
            streak: 0,
        }
    }

    fn new_workout(activity: &str, calories: Option<u32>) -> NewWorkoutLog {
        NewWorkoutLog {
            date: date(2024, 3, 1),
            activity: activity.to_string(),
            duration: 30,
            calories_burned: calories,
        }
    }

    #[test]
    fn test_upsert_step_log_overwrites_same_date() {
        let mut logs = Vec::new();
        upsert_step_log(&mut logs, date(2024, 3, 1), 4000);
        upsert_step_log(&mut logs, date(2024, 3, 2), 5000);
        upsert_step_log(&mut logs, date(2024, 3, 1), 9000);

        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0], StepLog { date: date(2024, 3, 1), steps: 9000 });
        assert_eq!(logs[1].steps, 5000);
    }

    #[tokio::test]
    async fn test_record_login_without_profile() {
        let tracker = TrackerService::new(FitnessDb::new_in_memory());
        let result = tracker
            .record_login(Uuid::new_v4(), date(2024, 3, 1))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_streak_over_consecutive_sessions() {
        let db = FitnessDb::new_in_memory();
        let tracker = TrackerService::new(db.clone());
        let user_id = Uuid::new_v4();

        let saved = tracker
            .save_profile(user_id, make_profile(), date(2024, 3, 1))
            .await
            .unwrap();
        assert_eq!(saved.streak, 1);

        // Same day: unchanged, however many times the session opens
        tracker.open_session(user_id, date(2024, 3, 1)).await.unwrap();
        let data = tracker.open_session(user_id, date(2024, 3, 1)).await.unwrap();
        assert_eq!(data.profile.as_ref().unwrap().streak, 1);

        let data = tracker.open_session(user_id, date(2024, 3, 2)).await.unwrap();
        assert_eq!(data.profile.as_ref().unwrap().streak, 2);

        let data = tracker.open_session(user_id, date(2024, 3, 5)).await.unwrap();
        assert_eq!(data.profile.as_ref().unwrap().streak, 1);

        let stored = db.get_profile(user_id).unwrap().unwrap();
        assert_eq!(stored.last_login_date, Some(date(2024, 3, 5)));
    }

    #[tokio::test]
    async fn test_save_profile_keeps_stored_streak() {
        let db = FitnessDb::new_in_memory();
        let tracker = TrackerService::new(db.clone());
        let user_id = Uuid::new_v4();
        let today = date(2024, 3, 1);

        let mut stored = make_profile();
        stored.streak = 12;
        stored.last_login_date = Some(today);
        db.set_profile(user_id, &stored).unwrap();

        let mut edited = make_profile();
        edited.weight = 78.5;
        let saved = tracker.save_profile(user_id, edited.clone(), today).await.unwrap();
        assert_eq!(saved.streak, 12);
        assert_eq!(saved.weight, 78.5);

        edited.streak = 999;
        let saved = tracker.save_profile(user_id, edited, today).await.unwrap();
        assert_eq!(saved.streak, 12);
        assert_eq!(db.get_profile(user_id).unwrap().unwrap().streak, 12);
    }

    #[tokio::test]
    async fn test_append_workouts_preserves_order_and_ids() {
        let tracker = TrackerService::new(FitnessDb::new_in_memory());
        let user_id = Uuid::new_v4();

        let names = ["Walking", "Jogging", "Cycling", "Swimming", "Yoga"];
        for name in names {
            tracker
                .add_workout(user_id, new_workout(name, Some(100)))
                .await
                .unwrap();
        }

        let logs = tracker.workouts(user_id).unwrap();
        assert_eq!(logs.len(), names.len());
        assert_eq!(
            logs.iter().map(|l| l.activity.as_str()).collect::<Vec<_>>(),
            names
        );
        let ids: HashSet<Uuid> = logs.iter().map(|l| l.id).collect();
        assert_eq!(ids.len(), names.len());
    }

    #[tokio::test]
    async fn test_add_workout_estimates_missing_calories() {
        let tracker = TrackerService::new(FitnessDb::new_in_memory());
        let user_id = Uuid::new_v4();

        let estimated = tracker
            .add_workout(user_id, new_workout("Jogging", None))
            .await
            .unwrap();
        let explicit = tracker
            .add_workout(user_id, new_workout("Jogging", Some(10)))
            .await
            .unwrap();

        assert_eq!(estimated.calories_burned, 240);
        assert_eq!(explicit.calories_burned, 10);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let tracker = TrackerService::new(FitnessDb::new_in_memory());
        let user_id = Uuid::new_v4();

        let mut handles = Vec::new();
        for i in 0..20 {
            let tracker = tracker.clone();
            handles.push(tokio::spawn(async move {
                tracker
                    .add_food(
                        user_id,
                        NewFoodLog {
                            date: date(2024, 3, 1),
                            meal: crate::models::Meal::Snack,
                            food: format!("Snack {}", i),
                            calories: 100,
                            protein: 1.0,
                            carbs: 2.0,
                            fat: 3.0,
                        },
                    )
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(tracker.foods(user_id).unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_users_do_not_share_data() {
        let tracker = TrackerService::new(FitnessDb::new_in_memory());
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        tracker
            .update_steps(alice, date(2024, 3, 1), 8000)
            .await
            .unwrap();
        tracker
            .save_profile(alice, make_profile(), date(2024, 3, 1))
            .await
            .unwrap();

        let bob_data = tracker.load(bob).unwrap();
        assert!(bob_data.profile.is_none());
        assert!(bob_data.steps.is_empty());
        assert_eq!(tracker.targets(bob).unwrap().calorie_target, 2000);
        assert_eq!(tracker.targets(alice).unwrap().step_goal, 12_500);
    }
}
