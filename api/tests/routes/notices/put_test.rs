#[cfg(test)]
mod tests {
    use crate::helpers::app::make_test_app;
    use api::auth::generate_jwt;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::models::notice::{Audience, Model as NoticeModel, NoticeStatus};
    use db::models::user::Model as UserModel;
    use db::models::user_authority::{Authority, Model as UserAuthorityModel};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct TestData {
        editor: UserModel,
        viewer: UserModel,
        draft: NoticeModel,
        published: NoticeModel,
    }

    async fn setup_test_data(db: &sea_orm::DatabaseConnection) -> TestData {
        let editor = UserModel::create(db, "editor", "editor@example.com", "pass", false)
            .await
            .unwrap();
        let viewer = UserModel::create(db, "viewer", "viewer@example.com", "pass", false)
            .await
            .unwrap();

        UserAuthorityModel::grant(db, editor.id, Authority::NoticeAdd)
            .await
            .unwrap();
        UserAuthorityModel::grant(db, viewer.id, Authority::NoticeQuery)
            .await
            .unwrap();

        let draft = NoticeModel::create(
            db,
            editor.id,
            "Draft plans",
            "Still being written.",
            NoticeStatus::Draft,
            Audience::All,
        )
        .await
        .unwrap();

        let published = NoticeModel::create(
            db,
            editor.id,
            "Go-live announcement",
            "We are live.",
            NoticeStatus::Published,
            Audience::All,
        )
        .await
        .unwrap();

        TestData {
            editor,
            viewer,
            draft,
            published,
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

    fn edit_request(notice_id: i64, token: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri(format!("/api/notices/{}", notice_id))
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // ─────────────────────────────────────────────────────────────
    // EDIT: PUT /api/notices/{notice_id}
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn edit_replaces_the_fields_of_a_draft() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.editor.id, data.editor.admin);

        let body = json!({ "title": "Revised plans", "content": "Second pass." });
        let response = app
            .oneshot(edit_request(data.draft.id, &token, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Notice updated successfully");
        assert_eq!(json["data"]["title"], "Revised plans");
        assert_eq!(json["data"]["content"], "Second pass.");
        // Omitted fields keep their stored values.
        assert_eq!(json["data"]["status"], "draft");
        assert_eq!(json["data"]["audience"], "all");
        assert_eq!(json["data"]["user_id"], data.editor.id);
    }

    #[tokio::test]
    async fn edit_can_publish_a_draft() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.editor.id, data.editor.admin);

        let body = json!({
            "title": "Draft plans",
            "content": "Final wording.",
            "status": "published",
            "audience": "staff"
        });
        let response = app
            .oneshot(edit_request(data.draft.id, &token, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json_body(response).await;
        assert_eq!(json["data"]["status"], "published");
        assert_eq!(json["data"]["audience"], "staff");
    }

    #[tokio::test]
    async fn edit_rejects_a_published_notice() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.editor.id, data.editor.admin);

        let body = json!({ "title": "Rewritten", "content": "History edit." });
        let response = app
            .oneshot(edit_request(data.published.id, &token, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let json = read_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Published notices cannot be edited");

        // The stored row is untouched.
        let stored = NoticeModel::get_by_id(app_state.db(), data.published.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.title, "Go-live announcement");
    }

    #[tokio::test]
    async fn edit_unknown_notice_is_not_found() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.editor.id, data.editor.admin);

        let body = json!({ "title": "Ghost", "content": "No such row." });
        let response = app
            .oneshot(edit_request(999999, &token, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = read_json_body(response).await;
        assert_eq!(json["message"], "Notice not found");
    }

    #[tokio::test]
    async fn edit_validates_the_payload() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.editor.id, data.editor.admin);

        let body = json!({ "title": "", "content": "No title." });
        let response = app
            .oneshot(edit_request(data.draft.id, &token, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = read_json_body(response).await;
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("Title"));
    }

    #[tokio::test]
    async fn edit_forbidden_without_add_authority() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.viewer.id, data.viewer.admin);

        let body = json!({ "title": "Hijack", "content": "Should bounce." });
        let response = app
            .oneshot(edit_request(data.draft.id, &token, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
