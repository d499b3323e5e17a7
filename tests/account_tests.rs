// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signup, login and session restore over the HTTP API.

use axum::http::StatusCode;
use chrono::Days;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_signup_returns_user_and_token() {
    let (app, state) = common::create_test_app();

    let response = common::send_json(
        &app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "email": "Alice@Example.com",
            "password": "secret123",
            "fullName": "Alice Liddell"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["fullName"], "Alice Liddell");
    assert_eq!(body["streak"], 0);
    assert!(body["user"].get("passwordHash").is_none());

    let accounts = state.db.get_accounts().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_ne!(accounts[0].password_hash, "secret123");

    let current = state.accounts.current_user().unwrap().unwrap();
    assert_eq!(current.email, "alice@example.com");
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let (app, state) = common::create_test_app();
    common::signup(&app, "bob@example.com").await;

    let response = common::send_json(
        &app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "email": "BOB@example.com",
            "password": "another-password",
            "fullName": "Other Bob"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "duplicate_account");
    assert_eq!(state.db.get_accounts().unwrap().len(), 1);
}

#[tokio::test]
async fn test_signup_validation() {
    let (app, _) = common::create_test_app();

    let response = common::send_json(
        &app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "email": "not-an-email",
            "password": "secret123",
            "fullName": "Nobody"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = common::send_json(
        &app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "email": "short@example.com",
            "password": "abc",
            "fullName": "Shorty"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success_and_failures() {
    let (app, _) = common::create_test_app();
    common::signup(&app, "carol@example.com").await;

    let response = common::send_json(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "carol@example.com", "password": "correct horse battery" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["user"]["email"], "carol@example.com");
    assert!(body["token"].as_str().is_some());

    let wrong_password = common::send_json(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "carol@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = common::body_json(wrong_password).await;

    let unknown = common::send_json(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "whatever" })),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = common::body_json(unknown).await;

    // Unknown email and wrong password are indistinguishable
    assert_eq!(wrong_password, unknown);
    assert_eq!(unknown["error"], "invalid_credentials");
}

#[tokio::test]
async fn test_login_runs_streak_transition() {
    let (app, state) = common::create_test_app();
    let token = common::signup(&app, "dave@example.com").await;

    let response = common::send_json(
        &app,
        "PUT",
        "/api/profile",
        Some(&token),
        Some(json!({
            "age": 30,
            "gender": "male",
            "height": 180.0,
            "weight": 80.0,
            "fitnessGoal": "maintain",
            "activityLevel": "sedentary"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Pretend the last login was two days ago
    let user = state.accounts.current_user().unwrap().unwrap();
    let mut profile = state.db.get_profile(user.id).unwrap().unwrap();
    profile.last_login_date = fittrack::time_utils::today_utc().checked_sub_days(Days::new(2));
    profile.streak = 5;
    state.db.set_profile(user.id, &profile).unwrap();

    let response = common::send_json(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "dave@example.com", "password": "correct horse battery" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["streak"], 1);

    // A second session on the same day leaves it alone
    let response = common::send_json(&app, "GET", "/api/me", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["streak"], 1);
    assert_eq!(body["user"]["email"], "dave@example.com");
}

#[tokio::test]
async fn test_me_extends_streak_from_yesterday() {
    let (app, state) = common::create_test_app();
    let token = common::signup(&app, "erin@example.com").await;
    let user = state.accounts.current_user().unwrap().unwrap();

    let mut profile = fittrack::models::UserProfile {
        age: 28,
        gender: fittrack::models::Gender::Female,
        height: 165.0,
        weight: 60.0,
        fitness_goal: fittrack::models::FitnessGoal::Lose,
        activity_level: fittrack::models::ActivityLevel::Active,
        last_login_date: None,
        streak: 3,
    };
    profile.last_login_date = fittrack::time_utils::today_utc().pred_opt();
    state.db.set_profile(user.id, &profile).unwrap();

    let response = common::send_json(&app, "GET", "/api/me", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["streak"], 4);
    assert_eq!(
        body["profile"]["lastLoginDate"],
        fittrack::time_utils::today_utc().to_string()
    );
}

#[tokio::test]
async fn test_me_restores_user_data() {
    let (app, _) = common::create_test_app();
    let token = common::signup(&app, "frank@example.com").await;
    let today = fittrack::time_utils::today_utc().to_string();

    common::send_json(
        &app,
        "PUT",
        &format!("/api/steps/{}", today),
        Some(&token),
        Some(json!({ "steps": 6543 })),
    )
    .await;
    common::send_json(
        &app,
        "POST",
        "/api/workouts",
        Some(&token),
        Some(json!({ "date": today, "activity": "Yoga", "duration": 20 })),
    )
    .await;

    let response = common::send_json(&app, "GET", "/api/me", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;

    assert!(body["profile"].is_null());
    assert_eq!(body["streak"], 0);
    assert_eq!(body["steps"], json!([{ "date": today, "steps": 6543 }]));
    assert_eq!(body["workouts"].as_array().unwrap().len(), 1);
    assert_eq!(body["foods"], json!([]));
    assert_eq!(body["today"]["steps"], 6543);
    assert_eq!(body["today"]["caloriesBurned"], 60);
    assert_eq!(body["today"]["calorieTarget"], 2000);
}
