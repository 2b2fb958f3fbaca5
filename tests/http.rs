use actix_web::{App, http::StatusCode, test, web};
use tutorlink::models::AppStartTime;
use tutorlink::routes;

#[actix_web::test]
async fn health_needs_no_token() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppStartTime {
                start_datetime: chrono::Utc::now(),
            }))
            .configure(routes::configure_system_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["status"], "ok");
}

#[actix_web::test]
async fn protected_routes_reject_missing_token() {
    let app = test::init_service(
        App::new()
            .configure(routes::configure_schedule_routes)
            .configure(routes::configure_assignment_routes),
    )
    .await;

    for uri in ["/api/v1/schedules/me", "/api/v1/assignments/mine"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 1001);
    }
}

#[actix_web::test]
async fn protected_routes_reject_malformed_header() {
    let app = test::init_service(App::new().configure(routes::configure_user_routes)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("Authorization", "Token abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
