#[cfg(test)]
mod tests {
    use crate::helpers::app::make_test_app;
    use api::auth::generate_jwt;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::models::user::Model as UserModel;
    use db::models::user_authority::{Authority, Model as UserAuthorityModel};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct TestData {
        editor: UserModel,
        viewer: UserModel,
        admin: UserModel,
    }

    async fn setup_test_data(db: &sea_orm::DatabaseConnection) -> TestData {
        let editor = UserModel::create(db, "editor", "editor@example.com", "pass", false)
            .await
            .unwrap();
        let viewer = UserModel::create(db, "viewer", "viewer@example.com", "pass", false)
            .await
            .unwrap();
        let admin = UserModel::create(db, "admin", "admin@example.com", "pass", true)
            .await
            .unwrap();

        UserAuthorityModel::grant(db, editor.id, Authority::NoticeAdd)
            .await
            .unwrap();
        UserAuthorityModel::grant(db, viewer.id, Authority::NoticeQuery)
            .await
            .unwrap();

        TestData {
            editor,
            viewer,
            admin,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────

    async fn read_json_body(res: axum::response::Response) -> Value {
        let body_bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice::<Value>(&body_bytes).unwrap()
    }

    fn create_request(token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/notices")
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    // ─────────────────────────────────────────────────────────────
    // CREATE: POST /api/notices
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn create_notice_succeeds_with_add_authority() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.editor.id, data.editor.admin);

        let body = json!({ "title": "Maintenance window", "content": "Back at 06:00." });
        let response = app.oneshot(create_request(Some(&token), body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Notice created successfully");
        assert_eq!(json["data"]["title"], "Maintenance window");
        assert_eq!(json["data"]["user_id"], data.editor.id);
        // Unspecified fields fall back to an unpublished, everyone-visible notice.
        assert_eq!(json["data"]["status"], "draft");
        assert_eq!(json["data"]["audience"], "all");
    }

    #[tokio::test]
    async fn create_notice_accepts_explicit_status_and_audience() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.editor.id, data.editor.admin);

        let body = json!({
            "title": "Staff rota",
            "content": "New rota attached.",
            "status": "published",
            "audience": "staff"
        });
        let response = app.oneshot(create_request(Some(&token), body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json_body(response).await;
        assert_eq!(json["data"]["status"], "published");
        assert_eq!(json["data"]["audience"], "staff");
    }

    #[tokio::test]
    async fn create_notice_forbidden_without_add_authority() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.viewer.id, data.viewer.admin);

        let body = json!({ "title": "Nope", "content": "Not allowed." });
        let response = app.oneshot(create_request(Some(&token), body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let json = read_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Insufficient permissions");
    }

    #[tokio::test]
    async fn create_notice_requires_a_token() {
        let (app, app_state) = make_test_app().await;
        setup_test_data(app_state.db()).await;

        let body = json!({ "title": "Anonymous", "content": "No token." });
        let response = app.oneshot(create_request(None, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = read_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Authentication required");
    }

    #[tokio::test]
    async fn admin_can_create_without_an_explicit_grant() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.admin.id, data.admin.admin);

        let body = json!({ "title": "From the top", "content": "Admin speaking." });
        let response = app.oneshot(create_request(Some(&token), body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json_body(response).await;
        assert_eq!(json["data"]["user_id"], data.admin.id);
    }

    #[tokio::test]
    async fn create_notice_validates_the_title() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.editor.id, data.editor.admin);

        let body = json!({ "title": "", "content": "Body without a title." });
        let response = app
            .clone()
            .oneshot(create_request(Some(&token), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = read_json_body(response).await;
        assert!(json["message"].as_str().unwrap().contains("Title"));

        let body = json!({ "title": "x".repeat(201), "content": "Too long." });
        let response = app.oneshot(create_request(Some(&token), body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
