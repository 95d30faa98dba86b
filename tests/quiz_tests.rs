// tests/quiz_tests.rs

use quizhub::{config::Config, routes, state::AppState};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

async fn spawn_app() -> (String, SqlitePool) {
    let db_path = std::env::temp_dir().join(format!("quizhub-test-{}.db", uuid::Uuid::new_v4()));
    let database_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to open test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: database_url.clone(),
        rust_log: "error".to_string(),
        max_award_xp: 100,
        demo_teacher_username: None,
        demo_teacher_password: None,
    };

    let state = AppState {
        pool: pool.clone(),
        config,
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool)
}

/// Registers a student and returns (token, user_id).
async fn register_student(client: &reqwest::Client, address: &str, username: &str) -> (String, i64) {
    let body: serde_json::Value = client
        .post(format!("{}/register", address))
        .json(&serde_json::json!({
            "username": username,
            "password": "password123",
            "name": username,
            "role": "student"
        }))
        .send()
        .await
        .expect("Register failed")
        .json()
        .await
        .expect("Failed to parse register json");

    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_i64().unwrap(),
    )
}

async fn current_xp(pool: &SqlitePool, user_id: i64) -> i64 {
    let (xp,): (i64,) = sqlx::query_as("SELECT xp FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap();
    xp
}

// Seeded Mathematics (subject 1) has two items with correct indices 2 and 1.
const MATHEMATICS: i64 = 1;
// Seeded English (subject 4) has no items.
const ENGLISH: i64 = 4;

#[tokio::test]
async fn quiz_presentation_strips_the_correct_index() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let (token, _) = register_student(&client, &address, "rama").await;

    let response = client
        .get(format!("{}/quiz/{}", address, MATHEMATICS))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["subject"]["name"], "Mathematics");

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    for item in items {
        assert!(item.get("answer").is_none(), "answer index leaked: {item}");
        assert!(item["options"].as_array().unwrap().len() >= 2);
    }
}

#[tokio::test]
async fn mathematics_scenario_scores_one_of_two() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let (token, _) = register_student(&client, &address, "rama").await;

    // Fetch item ids from the presented quiz.
    let quiz: serde_json::Value = client
        .get(format!("{}/quiz/{}", address, MATHEMATICS))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let items = quiz["items"].as_array().unwrap();
    let q1 = items[0]["id"].as_i64().unwrap();
    let q2 = items[1]["id"].as_i64().unwrap();

    // First item answered correctly (index 2), second incorrectly (index 0).
    let result: serde_json::Value = client
        .post(format!("{}/quiz/{}/submit", address, MATHEMATICS))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            q1.to_string(): "2",
            q2.to_string(): "0"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(result["correct"], 1);
    assert_eq!(result["total"], 2);
    assert_eq!(result["xp_gain"], 10);
    assert_eq!(result["progress"], 50);
}

#[tokio::test]
async fn resubmission_is_idempotent_on_progress_but_not_on_xp() {
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let (token, user_id) = register_student(&client, &address, "rama").await;

    let answers = serde_json::json!({ "1": "2", "2": "0" });
    let xp_before = current_xp(&pool, user_id).await;

    for _ in 0..2 {
        let result: serde_json::Value = client
            .post(format!("{}/quiz/{}/submit", address, MATHEMATICS))
            .header("Authorization", format!("Bearer {}", token))
            .json(&answers)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(result["progress"], 50);
    }

    // Progress reflects only the latest attempt...
    let (progress,): (i64,) =
        sqlx::query_as("SELECT progress FROM user_progress WHERE user_id = ? AND subject_id = ?")
            .bind(user_id)
            .bind(MATHEMATICS)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(progress, 50);

    // ...while XP accumulates across attempts.
    assert_eq!(current_xp(&pool, user_id).await, xp_before + 20);
}

#[tokio::test]
async fn zero_correct_submission_gains_nothing_and_never_decreases_xp() {
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let (token, user_id) = register_student(&client, &address, "rama").await;

    let xp_before = current_xp(&pool, user_id).await;

    let result: serde_json::Value = client
        .post(format!("{}/quiz/{}/submit", address, MATHEMATICS))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({ "1": "0", "2": "3" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(result["correct"], 0);
    assert_eq!(result["xp_gain"], 0);
    let progress = result["progress"].as_i64().unwrap();
    assert!((0..=100).contains(&progress));
    assert_eq!(current_xp(&pool, user_id).await, xp_before);
}

#[tokio::test]
async fn malformed_selections_count_as_incorrect_not_as_errors() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let (token, _) = register_student(&client, &address, "rama").await;

    let response = client
        .post(format!("{}/quiz/{}/submit", address, MATHEMATICS))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "1": "banana",
            "2": 99,
            "not-an-id": "2"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let result: serde_json::Value = response.json().await.unwrap();
    assert_eq!(result["correct"], 0);
    assert_eq!(result["total"], 2);
}

#[tokio::test]
async fn empty_subject_grades_to_zero_percent() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let (token, _) = register_student(&client, &address, "rama").await;

    let result: serde_json::Value = client
        .post(format!("{}/quiz/{}/submit", address, ENGLISH))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(result["correct"], 0);
    assert_eq!(result["total"], 0);
    assert_eq!(result["xp_gain"], 0);
    assert_eq!(result["progress"], 0);
}

#[tokio::test]
async fn unknown_subject_is_not_found() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let (token, _) = register_student(&client, &address, "rama").await;

    let present = client
        .get(format!("{}/quiz/999", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(present.status().as_u16(), 404);

    let submit = client
        .post(format!("{}/quiz/999/submit", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(submit.status().as_u16(), 404);
}

#[tokio::test]
async fn quiz_routes_require_a_session() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let present = client
        .get(format!("{}/quiz/{}", address, MATHEMATICS))
        .send()
        .await
        .unwrap();
    assert_eq!(present.status().as_u16(), 401);

    let submit = client
        .post(format!("{}/quiz/{}/submit", address, MATHEMATICS))
        .json(&serde_json::json!({"1": "2"}))
        .send()
        .await
        .unwrap();
    assert_eq!(submit.status().as_u16(), 401);
}
