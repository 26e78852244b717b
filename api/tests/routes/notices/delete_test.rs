#[cfg(test)]
mod tests {
    use crate::helpers::app::make_test_app;
    use api::auth::generate_jwt;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::models::notice::{Audience, Model as NoticeModel, NoticeStatus};
    use db::models::notice_read::Model as NoticeReadModel;
    use db::models::user::Model as UserModel;
    use db::models::user_authority::{Authority, Model as UserAuthorityModel};
    use serde_json::Value;
    use tower::ServiceExt;

    struct TestData {
        janitor: UserModel,
        viewer: UserModel,
        admin: UserModel,
        notice: NoticeModel,
    }

    async fn setup_test_data(db: &sea_orm::DatabaseConnection) -> TestData {
        let janitor = UserModel::create(db, "janitor", "janitor@example.com", "pass", false)
            .await
            .unwrap();
        let viewer = UserModel::create(db, "viewer", "viewer@example.com", "pass", false)
            .await
            .unwrap();
        let admin = UserModel::create(db, "admin", "admin@example.com", "pass", true)
            .await
            .unwrap();

        UserAuthorityModel::grant(db, janitor.id, Authority::NoticeDel)
            .await
            .unwrap();
        UserAuthorityModel::grant(db, viewer.id, Authority::NoticeQuery)
            .await
            .unwrap();

        let notice = NoticeModel::create(
            db,
            janitor.id,
            "Old announcement",
            "Out of date.",
            NoticeStatus::Published,
            Audience::All,
        )
        .await
        .unwrap();

        TestData {
            janitor,
            viewer,
            admin,
            notice,
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

    fn delete_request(notice_id: i64, token: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/notices/{}", notice_id))
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    // ─────────────────────────────────────────────────────────────
    // DELETE: DELETE /api/notices/{notice_id}
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn delete_removes_the_notice_and_its_receipts() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let db = app_state.db();
        NoticeReadModel::mark_read(db, data.notice.id, data.viewer.id)
            .await
            .unwrap();
        let (token, _) = generate_jwt(data.janitor.id, data.janitor.admin);

        let response = app
            .oneshot(delete_request(data.notice.id, &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Notice deleted successfully");

        assert!(NoticeModel::get_by_id(db, data.notice.id).await.unwrap().is_none());
        // Read receipts go with the notice.
        assert!(NoticeReadModel::readers(db, data.notice.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.janitor.id, data.janitor.admin);

        let response = app
            .clone()
            .oneshot(delete_request(data.notice.id, &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(delete_request(data.notice.id, &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn delete_forbidden_without_del_authority() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.viewer.id, data.viewer.admin);

        let response = app
            .oneshot(delete_request(data.notice.id, &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let json = read_json_body(response).await;
        assert_eq!(json["message"], "Insufficient permissions");
        assert!(
            NoticeModel::get_by_id(app_state.db(), data.notice.id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn admin_can_delete_without_an_explicit_grant() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.admin.id, data.admin.admin);

        let response = app
            .oneshot(delete_request(data.notice.id, &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
