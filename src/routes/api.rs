// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    DailySummary, FoodLog, Meal, NewFoodLog, NewWorkoutLog, StepLog, Targets, User, UserProfile,
    WeeklyActivityDay, WorkoutLog,
};
use crate::services::catalog::{self, FoodItem};
use crate::services::metrics;
use crate::time_utils::{parse_date, today_utc};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const MAX_STEPS_PER_DAY: u32 = 200_000;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/profile", get(get_profile).put(put_profile))
        .route("/api/workouts", get(get_workouts).post(post_workout))
        .route("/api/workouts/options", get(get_workout_options))
        .route("/api/workouts/estimate", get(get_workout_estimate))
        .route("/api/foods", get(get_foods).post(post_food))
        .route("/api/foods/catalog", get(get_food_catalog))
        .route("/api/steps", get(get_steps))
        .route("/api/steps/{date}", put(put_steps))
        .route("/api/targets", get(get_targets))
        .route("/api/summary/daily", get(get_daily_summary))
        .route("/api/summary/weekly", get(get_weekly_activity))
}

fn parse_date_param(name: &str, raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(raw) => parse_date(raw).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid '{}' parameter: must be YYYY-MM-DD", name))
        }),
        None => Ok(today_utc()),
    }
}

// ─── User Session ────────────────────────────────────────────

/// Current user and everything stored for them, with today's streak
/// applied.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MeResponse {
    pub user: User,
    pub profile: Option<UserProfile>,
    pub streak: u32,
    pub workouts: Vec<WorkoutLog>,
    pub foods: Vec<FoodLog>,
    pub steps: Vec<StepLog>,
    pub today: DailySummary,
}

/// Restore a session: runs the daily streak transition and returns the
/// user's data.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<MeResponse>> {
    let user = state
        .accounts
        .get_user(auth.user_id)?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", auth.user_id)))?;

    let today = today_utc();
    let data = state.tracker.open_session(auth.user_id, today).await?;
    let summary = metrics::daily_summary(data.view(), today);

    Ok(Json(MeResponse {
        user,
        streak: data.profile.as_ref().map_or(0, |p| p.streak),
        profile: data.profile,
        workouts: data.workouts,
        foods: data.foods,
        steps: data.steps,
        today: summary,
    }))
}

// ─── Profile ─────────────────────────────────────────────────

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    state
        .tracker
        .get_profile(auth.user_id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Profile not set up yet".to_string()))
}

async fn put_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<UserProfile>> {
    profile.validate()?;

    let saved = state
        .tracker
        .save_profile(auth.user_id, profile, today_utc())
        .await?;
    Ok(Json(saved))
}

// ─── Workouts ────────────────────────────────────────────────

async fn get_workouts(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<WorkoutLog>>> {
    Ok(Json(state.tracker.workouts(auth.user_id)?))
}

async fn post_workout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<NewWorkoutLog>,
) -> Result<(StatusCode, Json<WorkoutLog>)> {
    body.validate()?;

    let log = state.tracker.add_workout(auth.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

async fn get_workout_options(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<String>>> {
    Ok(Json(state.tracker.workout_options(auth.user_id)?))
}

#[derive(Deserialize)]
struct EstimateQuery {
    activity: String,
    duration: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EstimateResponse {
    pub activity: String,
    pub duration: u32,
    pub calories_per_minute: u32,
    pub calories_burned: u32,
}

async fn get_workout_estimate(Query(params): Query<EstimateQuery>) -> Json<EstimateResponse> {
    Json(EstimateResponse {
        calories_per_minute: catalog::calories_per_minute(&params.activity),
        calories_burned: catalog::estimate_workout_calories(&params.activity, params.duration),
        activity: params.activity,
        duration: params.duration,
    })
}

// ─── Foods ───────────────────────────────────────────────────

async fn get_foods(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<FoodLog>>> {
    Ok(Json(state.tracker.foods(auth.user_id)?))
}

async fn post_food(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<NewFoodLog>,
) -> Result<(StatusCode, Json<FoodLog>)> {
    body.validate()?;

    let log = state.tracker.add_food(auth.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

#[derive(Deserialize)]
struct CatalogQuery {
    meal: Meal,
}

async fn get_food_catalog(Query(params): Query<CatalogQuery>) -> Json<&'static [FoodItem]> {
    Json(catalog::common_foods(params.meal))
}

// ─── Steps ───────────────────────────────────────────────────

async fn get_steps(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<StepLog>>> {
    Ok(Json(state.tracker.steps(auth.user_id)?))
}

#[derive(Deserialize)]
struct StepsBody {
    steps: u32,
}

/// Set the step count for a date; repeated calls overwrite.
async fn put_steps(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(date): Path<String>,
    Json(body): Json<StepsBody>,
) -> Result<Json<StepLog>> {
    let date = parse_date(&date)
        .ok_or_else(|| AppError::BadRequest("Invalid date: must be YYYY-MM-DD".to_string()))?;

    if body.steps > MAX_STEPS_PER_DAY {
        return Err(AppError::BadRequest(format!(
            "Step count must be at most {}",
            MAX_STEPS_PER_DAY
        )));
    }

    let entry = state
        .tracker
        .update_steps(auth.user_id, date, body.steps)
        .await?;
    Ok(Json(entry))
}

// ─── Targets & Summaries ─────────────────────────────────────

async fn get_targets(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Targets>> {
    Ok(Json(state.tracker.targets(auth.user_id)?))
}

#[derive(Deserialize)]
struct DailyQuery {
    date: Option<String>,
}

async fn get_daily_summary(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<DailyQuery>,
) -> Result<Json<DailySummary>> {
    let date = parse_date_param("date", params.date.as_deref())?;

    tracing::debug!(user_id = %auth.user_id, %date, "Fetching daily summary");
    Ok(Json(state.tracker.daily_summary(auth.user_id, date)?))
}

#[derive(Deserialize)]
struct WeeklyQuery {
    end: Option<String>,
}

async fn get_weekly_activity(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<WeeklyQuery>,
) -> Result<Json<Vec<WeeklyActivityDay>>> {
    let end = parse_date_param("end", params.end.as_deref())?;
    Ok(Json(state.tracker.weekly_activity(auth.user_id, end)?))
}
