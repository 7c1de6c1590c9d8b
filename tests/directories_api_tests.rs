mod test_utils;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use uuid::Uuid;

use launchboard::errors::AppError;
use test_utils::*;

#[actix_rt::test]
async fn list_directories_returns_every_document() {
    let mut repos = TestRepos::default();
    repos.directories
        .expect_list_directories()
        .times(1)
        .returning(|| Ok(vec![
            directory(json!({"name": "Product Hunt", "url": "https://producthunt.com", "dr": 91})),
            directory(json!({"name": "BetaList", "url": "https://betalist.com"})),
        ]));
    let app = init_app(repos).await;

    let req = test::TestRequest::get()
        .uri("/api/directories")
        .insert_header(session_cookie(&regular_session()))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    let directories = body["directories"].as_array().expect("directories array");
    assert_eq!(directories.len(), 2);
    assert_eq!(directories[0]["name"], "Product Hunt");
    assert!(directories[0]["id"].is_string());
}

#[actix_rt::test]
async fn list_directories_reports_store_failure_as_500() {
    let mut repos = TestRepos::default();
    repos.directories
        .expect_list_directories()
        .returning(|| Err(AppError::InternalError("connection refused".into())));
    let app = init_app(repos).await;

    let req = test::TestRequest::get()
        .uri("/api/directories")
        .insert_header(session_cookie(&regular_session()))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].is_string());
    assert!(!body["error"].as_str().unwrap_or_default().contains("connection refused"));
}

#[actix_rt::test]
async fn list_directories_without_session_redirects_home() {
    let app = init_app(TestRepos::default()).await;

    let req = test::TestRequest::get().uri("/api/directories").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/"));
}

#[actix_rt::test]
async fn admin_creates_directory() {
    let created = Uuid::new_v4();
    let mut repos = TestRepos::default();
    repos.directories
        .expect_create_directory()
        .withf(|_, doc| doc.get("name") == Some(&json!("Hacker News")))
        .times(1)
        .returning(move |_, _| Ok(created));
    let app = init_app(repos).await;

    let req = test::TestRequest::post()
        .uri("/admin/api/directories")
        .insert_header(session_cookie(&admin_session()))
        .set_json(json!({"name": "Hacker News", "url": "https://news.ycombinator.com"}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["id"], created.to_string());
}

#[actix_rt::test]
async fn directory_documents_cannot_choose_their_id() {
    let app = init_app(TestRepos::default()).await;

    let req = test::TestRequest::post()
        .uri("/admin/api/directories")
        .insert_header(session_cookie(&admin_session()))
        .set_json(json!({"id": "custom", "name": "Sneaky"}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn non_object_directory_body_is_rejected() {
    let app = init_app(TestRepos::default()).await;

    let req = test::TestRequest::post()
        .uri("/admin/api/directories")
        .insert_header(session_cookie(&admin_session()))
        .set_json(json!(["not", "an", "object"]))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn deleting_missing_directory_is_404() {
    let mut repos = TestRepos::default();
    repos.directories
        .expect_delete_directory()
        .returning(|_| Err(AppError::NotFound("Directory not found".into())));
    let app = init_app(repos).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/admin/api/directories/{}", Uuid::new_v4()))
        .insert_header(session_cookie(&admin_session()))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn directories_page_lists_cards_by_rating() {
    let mut repos = TestRepos::default();
    repos.directories
        .expect_list_directories()
        .returning(|| Ok(vec![
            directory(json!({"name": "Low Rated", "url": "https://low.test", "dr": 10})),
            directory(json!({"name": "High Rated", "url": "https://high.test", "dr": 90})),
            directory(json!({"description": "no name or url"})),
        ]));
    let app = init_app(repos).await;

    let req = test::TestRequest::get()
        .uri("/directories")
        .insert_header(session_cookie(&regular_session()))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf8 body");
    let high = body.find("High Rated").expect("high rated card");
    let low = body.find("Low Rated").expect("low rated card");
    assert!(high < low);
}

#[actix_rt::test]
async fn directories_page_skips_script_links() {
    let mut repos = TestRepos::default();
    repos.directories
        .expect_list_directories()
        .returning(|| Ok(vec![
            directory(json!({"name": "Safe Listing", "url": "https://safe.test"})),
            directory(json!({"name": "Script Listing", "url": "javascript:alert(document.cookie)"})),
        ]));
    let app = init_app(repos).await;

    let req = test::TestRequest::get()
        .uri("/directories")
        .insert_header(session_cookie(&regular_session()))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf8 body");
    assert!(body.contains("Safe Listing"));
    assert!(!body.contains("Script Listing"));
    assert!(!body.contains("javascript:"));
}
