//! Catalog endpoint flow over the in-memory store and a mock file source

use std::sync::Arc;

use appindex::api::{
    ApiError, AppIndexApi, DetectRequest, ReorderRequest, Session, UpdateAppRequest,
};
use appindex::catalog::{
    AppInput, AppOrder, CatalogService, InMemoryCatalog, TechCatalogEntry, TechCategory,
    TechStackAnnotation,
};
use appindex::detection::TechDetector;
use appindex::github::MockFileFetcher;
use reqwest::StatusCode;
use serde_json::json;

const ADMIN: &str = "octocat";
const REPO_URL: &str = "https://github.com/octocat/shop";

fn api() -> AppIndexApi {
    let fetcher = MockFileFetcher::new()
        .with_file(
            "package.json",
            r#"{"dependencies": {"react": "18"}, "devDependencies": {"eslint": "8"}}"#,
        )
        .with_file("go.mod", "module example.com/shop");

    let store = InMemoryCatalog::with_tech_stacks(vec![
        TechCatalogEntry::new(1, "React", "react", TechCategory::Frontend),
        TechCatalogEntry::new(2, "ESLint", "eslint", TechCategory::Library),
        TechCatalogEntry::new(3, "Go", "go", TechCategory::Backend),
        TechCatalogEntry::new(4, "PostgreSQL", "postgresql", TechCategory::Database),
    ]);
    let detector = TechDetector::new(Arc::new(fetcher));
    let service = CatalogService::new(Arc::new(store), detector);
    AppIndexApi::new(service, Some(ADMIN.to_string()))
}

fn admin() -> Session {
    Session {
        user_id: 1,
        github_username: ADMIN.to_string(),
    }
}

fn visitor() -> Session {
    Session {
        user_id: 2,
        github_username: "someone".to_string(),
    }
}

fn input(title: &str) -> AppInput {
    AppInput {
        title: Some(title.to_string()),
        github_url: Some(REPO_URL.to_string()),
        ..AppInput::default()
    }
}

#[tokio::test]
async fn test_detect_requires_session() {
    let api = api();
    let request = DetectRequest {
        github_url: Some(REPO_URL.to_string()),
    };

    let err = api.detect_tech(None, request).await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(err.body(), json!({"error": "Unauthorized"}));
}

#[tokio::test]
async fn test_detect_requires_url() {
    let api = api();
    let err = api
        .detect_tech(Some(&visitor()), DetectRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.body(), json!({"error": "Missing github_url"}));
}

#[tokio::test]
async fn test_detect_returns_catalog_matches_with_roles() {
    let api = api();
    let request = DetectRequest {
        github_url: Some(REPO_URL.to_string()),
    };

    let response = api.detect_tech(Some(&visitor()), request).await.unwrap();
    assert_eq!(response.status, StatusCode::OK);

    let detected = response.body["detected"].as_array().unwrap();
    let names: Vec<&str> = detected.iter().map(|d| d["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["React", "ESLint", "Go"]);
    assert_eq!(detected[0]["usage_role"], "UIレンダリング");
    assert_eq!(detected[1]["usage_role"], "ビルド・開発ツール");
    assert_eq!(detected[2]["usage_role"], "バックエンド言語");
}

#[tokio::test]
async fn test_mutations_require_admin() {
    let api = api();

    let err = api.create_app(None, input("Shop")).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    let err = api
        .create_app(Some(&visitor()), input("Shop"))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Forbidden);

    let err = api
        .reorder_apps(Some(&visitor()), ReorderRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Forbidden);
}

#[tokio::test]
async fn test_create_requires_title() {
    let api = api();
    let err = api
        .create_app(Some(&admin()), AppInput::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.body(), json!({"error": "Missing title"}));
}

#[tokio::test]
async fn test_create_backfills_roles_and_keeps_explicit_ones() {
    let api = api();
    let payload = AppInput {
        tech_entries: Some(vec![
            TechStackAnnotation::new(1),
            TechStackAnnotation::with_role(3, "API"),
            TechStackAnnotation::new(4),
        ]),
        ..input("Shop")
    };

    let response = api.create_app(Some(&admin()), payload).await.unwrap();
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["id"].as_i64().is_some());

    let listing = api.list_apps().await.unwrap();
    let stacks = listing.body[0]["tech_stacks"].as_array().unwrap();
    let role_of = |id: i64| {
        stacks
            .iter()
            .find(|s| s["id"] == id)
            .map(|s| s["usage_role"].clone())
            .unwrap()
    };
    assert_eq!(role_of(1), json!("UIレンダリング"));
    assert_eq!(role_of(3), json!("API"));
    assert_eq!(role_of(4), serde_json::Value::Null);
}

#[tokio::test]
async fn test_update_and_delete_validation() {
    let api = api();

    let err = api
        .update_app(Some(&admin()), UpdateAppRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.body(), json!({"error": "Missing app id"}));

    let request = UpdateAppRequest {
        id: Some(404),
        input: input("Ghost"),
    };
    let err = api.update_app(Some(&admin()), request).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);

    let err = api.delete_app(Some(&admin()), None).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reorder_flow() {
    let api = api();
    let first = api.create_app(Some(&admin()), input("First")).await.unwrap();
    let second = api.create_app(Some(&admin()), input("Second")).await.unwrap();
    let first_id = first.body["id"].as_i64().unwrap();
    let second_id = second.body["id"].as_i64().unwrap();

    let err = api
        .reorder_apps(Some(&admin()), ReorderRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.body(), json!({"error": "Invalid orders"}));

    let request = ReorderRequest {
        orders: vec![
            AppOrder {
                id: second_id,
                display_order: 0,
            },
            AppOrder {
                id: first_id,
                display_order: 1,
            },
        ],
    };
    api.reorder_apps(Some(&admin()), request).await.unwrap();

    let listing = api.list_apps().await.unwrap();
    let titles: Vec<&str> = listing
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|app| app["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);

    api.delete_app(Some(&admin()), Some(first_id)).await.unwrap();
    let listing = api.list_apps().await.unwrap();
    assert_eq!(listing.body.as_array().unwrap().len(), 1);
}
