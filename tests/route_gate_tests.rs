mod test_utils;

use actix_web::{http::{header, StatusCode}, test};
use serde_json::Value;

use launchboard::entities::session::Role;
use test_utils::*;

#[actix_rt::test]
async fn public_pages_render_without_session() {
    let app = init_app(TestRepos::default()).await;

    for path in ["/", "/login", "/tos", "/privacy-policy"] {
        let req = test::TestRequest::get().uri(path).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK, "{path}");
    }
}

#[actix_rt::test]
async fn login_redirects_signed_in_visitors_to_launch() {
    let app = init_app(TestRepos::default()).await;

    let req = test::TestRequest::get()
        .uri("/login")
        .insert_header(session_cookie(&regular_session()))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/launch"));
}

#[actix_rt::test]
async fn private_page_without_session_redirects_home() {
    let app = init_app(TestRepos::default()).await;

    let req = test::TestRequest::get().uri("/launch").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/"));
}

#[actix_rt::test]
async fn expired_token_counts_as_signed_out() {
    let app = init_app(TestRepos::default()).await;

    let req = test::TestRequest::get()
        .uri("/launch")
        .insert_header(("Cookie", format!("session_token={}", expired_token(&regular_session()))))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/"));
}

#[actix_rt::test]
async fn bearer_token_is_accepted() {
    let mut repos = TestRepos::default();
    repos.weeks.expect_list_launch_weeks().returning(|_| Ok(vec![launch_week(5, &["acme"])]));
    let app = init_app(repos).await;

    let req = test::TestRequest::get()
        .uri("/launch")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", session_token(&regular_session()))))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf8 body");
    assert!(body.contains("Regular Founder"));
}

#[actix_rt::test]
async fn session_endpoint_is_empty_when_signed_out() {
    let app = init_app(TestRepos::default()).await;

    let req = test::TestRequest::get().uri("/api/auth/session").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, serde_json::json!({}));
}

#[actix_rt::test]
async fn session_endpoint_takes_role_from_store_and_reissues_cookie() {
    let session = regular_session();
    let stored = user_from(&session, Role::Admin);

    let mut repos = TestRepos::default();
    repos.users
        .expect_upsert_user()
        .withf(|user| user.id == "user_regular" && user.role == Role::Regular)
        .times(1)
        .returning(move |_| Ok(stored.clone()));
    let app = init_app(repos).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/session")
        .insert_header(session_cookie(&session))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res.response()
        .cookies()
        .find(|c| c.name() == "session_token")
        .expect("session cookie re-issued");
    assert!(!cookie.value().is_empty());

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["user"]["id"], "user_regular");
    assert_eq!(body["user"]["role"], "ADMIN");
    assert!(body["expires"].is_string());
}

#[actix_rt::test]
async fn sign_out_clears_cookie_and_redirects() {
    let app = init_app(TestRepos::default()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/signout")
        .insert_header(session_cookie(&regular_session()))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/"));
    let cookie = res.response()
        .cookies()
        .find(|c| c.name() == "session_token")
        .expect("removal cookie");
    assert_eq!(cookie.value(), "");
}
