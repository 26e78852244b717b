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
    use sea_orm::EntityTrait;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn read_json_body(res: axum::response::Response) -> Value {
        let body_bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice::<Value>(&body_bytes).unwrap()
    }

    fn me_request(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri("/api/auth/me");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    // ─────────────────────────────────────────────────────────────
    // GET /api/auth/me
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn me_returns_profile_with_authorities() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let user = UserModel::create(db, "editor", "editor@example.com", "pass", false)
            .await
            .unwrap();
        UserAuthorityModel::grant(db, user.id, Authority::NoticeAdd)
            .await
            .unwrap();
        UserAuthorityModel::grant(db, user.id, Authority::NoticeQuery)
            .await
            .unwrap();
        let (token, _) = generate_jwt(user.id, user.admin);

        let response = app.oneshot(me_request(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "User retrieved successfully");
        assert_eq!(json["data"]["id"], user.id);
        assert_eq!(json["data"]["username"], "editor");
        assert_eq!(json["data"]["email"], "editor@example.com");
        assert_eq!(json["data"]["admin"], false);

        let authorities: Vec<&str> = json["data"]["authorities"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a.as_str().unwrap())
            .collect();
        assert_eq!(authorities.len(), 2);
        assert!(authorities.contains(&"notice:add"));
        assert!(authorities.contains(&"notice:query"));
    }

    #[tokio::test]
    async fn me_requires_a_token() {
        let (app, _app_state) = make_test_app().await;

        let response = app.oneshot(me_request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn me_rejects_a_garbage_token() {
        let (app, _app_state) = make_test_app().await;

        let response = app
            .oneshot(me_request(Some("not.a.real.token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn me_is_not_found_when_the_user_row_is_gone() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let user = UserModel::create(db, "ghost", "ghost@example.com", "pass", false)
            .await
            .unwrap();
        let (token, _) = generate_jwt(user.id, user.admin);

        db::models::user::Entity::delete_by_id(user.id)
            .exec(db)
            .await
            .unwrap();

        let response = app.oneshot(me_request(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = read_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "User not found");
    }
}
