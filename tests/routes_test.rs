//! HTTP 路由集成测试

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use entity::{CategoryKind, SaleStatus, categories, dishes, users};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, Database, Set};
use serde_json::{Value, json};
use sky_takeout::AppConfig;
use sky_takeout::management::{AppState, ManagementServer};
use std::sync::Arc;
use tower::ServiceExt;

async fn setup_test_db() -> Arc<sea_orm::DatabaseConnection> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect test db");
    Migrator::up(&db, None).await.expect("run migrations");
    Arc::new(db)
}

struct Seeded {
    router: Router,
    user_id: i32,
    bundle_category: i32,
    enabled_dish: i32,
    disabled_dish: i32,
}

async fn setup() -> Seeded {
    let db = setup_test_db().await;
    let now = Utc::now().naive_utc();

    let user_id = users::ActiveModel {
        openid: Set("wx-route".to_string()),
        name: Set(None),
        phone: Set(None),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db.as_ref())
    .await
    .expect("insert user")
    .id;

    let mut category_ids = Vec::new();
    for (name, kind) in [("套餐", CategoryKind::Bundle), ("小炒", CategoryKind::Dish)] {
        let category = categories::ActiveModel {
            kind: Set(kind),
            name: Set(name.to_string()),
            sort: Set(0),
            status: Set(SaleStatus::Enabled),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db.as_ref())
        .await
        .expect("insert category");
        category_ids.push(category.id);
    }

    let mut dish_ids = Vec::new();
    for (name, status) in [("回锅肉", SaleStatus::Enabled), ("毛血旺", SaleStatus::Disabled)] {
        let dish = dishes::ActiveModel {
            name: Set(name.to_string()),
            category_id: Set(category_ids[1]),
            price: Set(32.0),
            image: Set(String::new()),
            description: Set(None),
            status: Set(status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db.as_ref())
        .await
        .expect("insert dish");
        dish_ids.push(dish.id);
    }

    let state = AppState::new(db, &AppConfig::default()).expect("build app state");
    Seeded {
        router: ManagementServer::create_router(state),
        user_id,
        bundle_category: category_ids[0],
        enabled_dish: dish_ids[0],
        disabled_dish: dish_ids[1],
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("route request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

fn user_request(method: &str, uri: &str, user_id: i32, body: Option<&Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("X-User-Id", user_id.to_string());
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

#[tokio::test]
async fn cart_routes_require_user_header() {
    let seeded = setup().await;

    let (status, body) = send(
        &seeded.router,
        json_request("POST", "/user/shoppingCart/add", &json!({"dishId": seeded.enabled_dish})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 0);
}

#[tokio::test]
async fn cart_flow_over_http() {
    let seeded = setup().await;
    let add = json!({"dishId": seeded.enabled_dish, "dishFlavor": "中辣"});

    let (status, body) = send(
        &seeded.router,
        user_request("POST", "/user/shoppingCart/add", seeded.user_id, Some(&add)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 1);
    assert_eq!(body["data"]["quantity"], 1);

    let (_, body) = send(
        &seeded.router,
        user_request("POST", "/user/shoppingCart/add", seeded.user_id, Some(&add)),
    )
    .await;
    assert_eq!(body["data"]["quantity"], 2);
    assert_eq!(body["data"]["dishFlavor"], "中辣");

    let (_, body) = send(
        &seeded.router,
        user_request("POST", "/user/shoppingCart/sub", seeded.user_id, Some(&add)),
    )
    .await;
    assert_eq!(body["code"], 1);

    let (_, body) = send(
        &seeded.router,
        user_request("GET", "/user/shoppingCart/list", seeded.user_id, None),
    )
    .await;
    let lines = body["data"].as_array().expect("cart lines");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"], 1);

    let (status, _) = send(
        &seeded.router,
        user_request("DELETE", "/user/shoppingCart/clean", seeded.user_id, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &seeded.router,
        user_request("GET", "/user/shoppingCart/list", seeded.user_id, None),
    )
    .await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn bundle_lifecycle_over_http() {
    let seeded = setup().await;

    let (status, body) = send(
        &seeded.router,
        json_request(
            "POST",
            "/admin/setmeal",
            &json!({
                "categoryId": seeded.bundle_category,
                "name": "川味双拼",
                "price": 59.0,
                "setmealDishes": [
                    {"dishId": seeded.enabled_dish, "copies": 1},
                    {"dishId": seeded.disabled_dish, "copies": 1}
                ]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"].as_i64().expect("bundle id");

    let (status, body) = send(
        &seeded.router,
        json_request("POST", &format!("/admin/setmeal/status/1?id={id}"), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 0);
    assert!(body["msg"].as_str().unwrap_or_default().contains("毛血旺"));

    let (status, _) = send(
        &seeded.router,
        json_request(
            "PUT",
            "/admin/setmeal",
            &json!({
                "id": id,
                "categoryId": seeded.bundle_category,
                "name": "川味双拼",
                "price": 49.0,
                "setmealDishes": [{"dishId": seeded.enabled_dish, "copies": 2}]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &seeded.router,
        json_request("POST", &format!("/admin/setmeal/status/1?id={id}"), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&seeded.router, get(&format!("/admin/setmeal/{id}"))).await;
    assert_eq!(body["data"]["status"], 1);
    assert_eq!(body["data"]["price"], 49.0);
    assert_eq!(body["data"]["items"][0]["copies"], 2);

    let (_, body) = send(&seeded.router, get("/admin/setmeal/page?page=1&pageSize=5")).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["records"][0]["categoryName"], "套餐");

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/admin/setmeal?ids={id}"))
        .body(Body::empty())
        .expect("build request");
    let (status, _) = send(&seeded.router, delete).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_bundle_maps_to_not_found() {
    let seeded = setup().await;

    let (status, body) = send(&seeded.router, get("/admin/setmeal/4040")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 0);
}

#[tokio::test]
async fn report_routes_return_joined_series() {
    let seeded = setup().await;

    let (status, body) = send(
        &seeded.router,
        get("/admin/report/turnoverStatistics?begin=2024-01-01&end=2024-01-03"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["dateList"], "2024-01-01,2024-01-02,2024-01-03");
    assert_eq!(body["data"]["turnoverList"], "0.0,0.0,0.0");

    let (_, body) = send(
        &seeded.router,
        get("/admin/report/ordersStatistics?begin=2024-01-01&end=2024-01-01"),
    )
    .await;
    assert_eq!(body["data"]["orderCompletionRate"], 0.0);

    let (status, body) = send(
        &seeded.router,
        get("/admin/report/userStatistics?begin=2024-01-05&end=2024-01-01"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 0);

    let (status, _) = send(
        &seeded.router,
        get("/admin/report/userStatistics?begin=yesterday&end=2024-01-01"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn raw_request(method: &str, uri: &str, body: &str, user_id: Option<i32>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header("X-User-Id", user_id.to_string());
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("build request")
}

#[tokio::test]
async fn malformed_requests_use_failure_envelope() {
    let seeded = setup().await;

    let (status, body) = send(
        &seeded.router,
        raw_request("POST", "/admin/setmeal", "{\"name\": ", None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 0);
    assert!(body["msg"].is_string());

    let (status, body) = send(
        &seeded.router,
        raw_request("PUT", "/admin/setmeal", "{\"id\": \"one\"}", None),
    )
    .await;
    assert!(status.is_client_error());
    assert_eq!(body["code"], 0);

    let (status, body) = send(
        &seeded.router,
        raw_request("POST", "/user/shoppingCart/add", "not json", Some(seeded.user_id)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 0);

    let (status, body) = send(
        &seeded.router,
        Request::builder()
            .method("DELETE")
            .uri("/admin/setmeal")
            .body(Body::empty())
            .expect("build request"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 0);

    let (status, body) = send(&seeded.router, get("/admin/setmeal/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 0);

    let (status, body) = send(&seeded.router, get("/admin/setmeal/page?page=first")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 0);

    let (status, body) = send(
        &seeded.router,
        Request::builder()
            .method("POST")
            .uri("/admin/setmeal/status/1")
            .body(Body::empty())
            .expect("build request"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 0);
}
