// tests/admin_tests.rs

mod common;

use std::io::Cursor;

use calamine::{Reader, Xlsx, open_workbook_from_rs};
use common::{ADMIN_PASSWORD, ADMIN_USERNAME, TestApp, perfect_answers, spawn_app};
use memory_game::{db, export};
use serde_json::{Value, json};

async fn submit(app: &TestApp, email: &str, name: &str, answers: Value) {
    let response = app
        .client
        .post(app.url("/api/quiz"))
        .json(&json!({ "answers": answers, "score": 0, "email": email, "name": name }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
}

async fn list(app: &TestApp, token: &str) -> Vec<Value> {
    let response = app
        .client
        .get(app.url("/api/admin/users"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    response.json().await.unwrap()
}

#[tokio::test]
async fn login_returns_token() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/admin/login"))
        .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["type"], "Bearer");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn login_with_bad_credentials_is_401() {
    let app = spawn_app().await;

    for (username, password) in [(ADMIN_USERNAME, "wrong"), ("nobody", ADMIN_PASSWORD)] {
        let response = app
            .client
            .post(app.url("/api/admin/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 401);
    }
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let app = spawn_app().await;
    let config = common::test_config();

    assert!(!db::seed_admin_user(&app.pool, &config).await.unwrap());
}

#[tokio::test]
async fn admin_routes_require_a_token() {
    let app = spawn_app().await;

    for path in ["/api/admin/users", "/api/admin/export"] {
        let response = app.client.get(app.url(path)).send().await.unwrap();
        assert_eq!(response.status().as_u16(), 401);

        let response = app
            .client
            .get(app.url(path))
            .bearer_auth("not-a-jwt")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 401);
    }
}

#[tokio::test]
async fn listing_is_sorted_and_read_only() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    submit(&app, "first@example.com", "First", json!({})).await;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    submit(&app, "second@example.com", "Second", perfect_answers()).await;

    let first = list(&app, &token).await;
    let second = list(&app, &token).await;

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(first[0]["email"], "second@example.com");
    assert_eq!(first[0]["score"], 5);
    assert!(first[0]["completedAt"].is_string());
    assert_eq!(first[1]["email"], "first@example.com");
}

#[tokio::test]
async fn export_downloads_workbook_matching_listing() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    submit(&app, "a@example.com", "A", perfect_answers()).await;
    submit(&app, "b@example.com", "B", json!({ "1": "Bona Pump" })).await;

    let response = app
        .client
        .get(app.url("/api/admin/export"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["content-type"],
        export::XLSX_CONTENT_TYPE
    );
    let disposition = response.headers()["content-disposition"].to_str().unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("participants.xlsx"));

    let bytes = response.bytes().await.unwrap();
    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(Cursor::new(bytes.to_vec())).expect("Failed to open workbook");
    assert_eq!(workbook.sheet_names(), vec![export::SHEET_NAME.to_string()]);

    let sheet = workbook
        .worksheet_range("Participants")
        .expect("Participants sheet missing");
    let cells: Vec<Vec<String>> = sheet
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    assert_eq!(cells[0], ["Name", "Email", "Phone", "Score / 7", "Date"]);

    let listing = list(&app, &token).await;
    let data = &cells[1..];
    assert_eq!(data.len(), listing.len());

    for (row, participant) in data.iter().zip(&listing) {
        assert_eq!(row[1], participant["email"].as_str().unwrap());
        assert_eq!(row[3], format!("{} / 7", participant["score"]));
        assert!(!row[4].is_empty());
    }

    let mut scores: Vec<&str> = data.iter().map(|row| row[3].as_str()).collect();
    scores.sort();
    assert_eq!(scores, ["0 / 7", "5 / 7"]);
}

#[tokio::test]
async fn empty_export_has_only_the_header_row() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let bytes = app
        .client
        .get(app.url("/api/admin/export"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes.to_vec())).unwrap();
    let sheet = workbook.worksheet_range(export::SHEET_NAME).unwrap();
    assert_eq!(sheet.height(), 1);
}

#[tokio::test]
async fn wrong_method_on_admin_route_is_405() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/admin/users"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 405);
}
