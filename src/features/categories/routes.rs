use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", post(handlers::create_category))
        .route("/api/categories", get(handlers::list_categories))
        .route(
            "/api/categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use fake::faker::lorem::en::Word;
    use fake::Fake;
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::features::categories::services::CategoryService;
    use crate::shared::test_helpers::InMemoryCategoryRepository;

    fn test_server() -> TestServer {
        let repo = Arc::new(InMemoryCategoryRepository::new());
        let service = Arc::new(CategoryService::new(repo));
        TestServer::new(super::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn create_then_get_roundtrip() {
        let server = test_server();
        let word: String = Word().fake();

        let created = server
            .post("/api/categories")
            .json(&json!({ "name": word, "description": "desc", "isActive": true }))
            .await;
        created.assert_status_ok();

        let body: Value = created.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["name"], word);

        let id = body["data"]["id"].as_str().unwrap().to_string();
        let fetched = server.get(&format!("/api/categories/{}", id)).await;
        fetched.assert_status_ok();

        let fetched_body: Value = fetched.json();
        assert_eq!(fetched_body["data"]["description"], "desc");
        assert_eq!(fetched_body["data"]["isActive"], true);
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict() {
        let server = test_server();

        server
            .post("/api/categories")
            .json(&json!({ "name": "Books", "isActive": true }))
            .await
            .assert_status_ok();

        let duplicate = server
            .post("/api/categories")
            .json(&json!({ "name": "Books", "isActive": false }))
            .await;
        duplicate.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let server = test_server();

        let response = server
            .post("/api/categories")
            .json(&json!({ "name": "", "isActive": true }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let server = test_server();

        let response = server
            .get(&format!("/api/categories/{}", uuid::Uuid::now_v7()))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_changes_fields() {
        let server = test_server();

        let created = server
            .post("/api/categories")
            .json(&json!({ "name": "Toys", "isActive": true }))
            .await;
        let id = created.json::<Value>()["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let updated = server
            .put(&format!("/api/categories/{}", id))
            .json(&json!({ "name": "Games", "description": "updated", "isActive": false }))
            .await;
        updated.assert_status_ok();

        let body: Value = updated.json();
        assert_eq!(body["data"]["name"], "Games");
        assert_eq!(body["data"]["isActive"], false);
    }

    #[tokio::test]
    async fn soft_deleted_category_stays_listed() {
        let server = test_server();

        let created = server
            .post("/api/categories")
            .json(&json!({ "name": "Toys", "isActive": true }))
            .await;
        let id = created.json::<Value>()["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let deleted = server
            .delete(&format!("/api/categories/{}?soft=true", id))
            .await;
        deleted.assert_status_ok();
        assert_eq!(deleted.json::<Value>()["data"], true);

        // Still visible after soft delete
        server
            .get(&format!("/api/categories/{}", id))
            .await
            .assert_status_ok();

        let list: Value = server.get("/api/categories").await.json();
        assert_eq!(list["meta"]["total"], 1);
    }

    #[tokio::test]
    async fn hard_delete_removes_category() {
        let server = test_server();

        let created = server
            .post("/api/categories")
            .json(&json!({ "name": "Toys", "isActive": true }))
            .await;
        let id = created.json::<Value>()["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let deleted = server.delete(&format!("/api/categories/{}", id)).await;
        deleted.assert_status_ok();
        assert_eq!(deleted.json::<Value>()["data"], true);

        server
            .get(&format!("/api/categories/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
