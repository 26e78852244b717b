#[cfg(test)]
mod tests {
    use crate::helpers::app::make_test_app;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::models::user::Model as UserModel;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn read_json_body(res: axum::response::Response) -> Value {
        let body_bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice::<Value>(&body_bytes).unwrap()
    }

    fn login_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // ─────────────────────────────────────────────────────────────
    // POST /api/auth/login
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn login_succeeds_with_valid_credentials() {
        let (app, app_state) = make_test_app().await;
        let user = UserModel::create(app_state.db(), "editor", "editor@example.com", "pass", false)
            .await
            .unwrap();

        let req = login_request(json!({ "username": "editor", "password": "pass" }));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Login successful");
        assert!(!json["data"]["token"].as_str().unwrap().is_empty());
        assert!(!json["data"]["expires_at"].as_str().unwrap().is_empty());
        assert_eq!(json["data"]["user"]["id"], user.id);
        assert_eq!(json["data"]["user"]["username"], "editor");
        assert_eq!(json["data"]["user"]["admin"], false);
        assert!(json["data"]["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn login_rejects_a_wrong_password() {
        let (app, app_state) = make_test_app().await;
        UserModel::create(app_state.db(), "editor", "editor@example.com", "pass", false)
            .await
            .unwrap();

        let req = login_request(json!({ "username": "editor", "password": "nope" }));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = read_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid username or password");
    }

    #[tokio::test]
    async fn login_rejects_an_unknown_username() {
        let (app, _app_state) = make_test_app().await;

        let req = login_request(json!({ "username": "ghost", "password": "pass" }));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = read_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid username or password");
    }

    #[tokio::test]
    async fn login_requires_username_and_password() {
        let (app, _app_state) = make_test_app().await;

        let req = login_request(json!({ "username": "", "password": "" }));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = read_json_body(response).await;
        assert_eq!(json["success"], false);
        let message = json["message"].as_str().unwrap();
        assert!(message.contains("Username is required"));
        assert!(message.contains("Password is required"));
    }
}
