mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use chrono::NaiveDate;
use serde_json::json;
use sitedesk_core::types::DbId;
use sitedesk_db::models::client::{Client, CreateClient};
use sitedesk_db::models::item::CreateItem;
use sitedesk_db::repositories::{ClientRepo, ItemRepo};
use sqlx::PgPool;
use tower::ServiceExt;

use common::{body_json, build_test_app, get, post_json};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

async fn seed_client(pool: &PgPool, name: &str, email: &str) -> Client {
    let input = CreateClient {
        name: name.to_string(),
        email: email.to_string(),
        address_line1: "12 Main St".to_string(),
        city: "Austin".to_string(),
        state: "TX".to_string(),
        zip: "78701".to_string(),
        ..Default::default()
    };
    ClientRepo::create(pool, &input)
        .await
        .expect("client insert should succeed")
}

async fn seed_item(pool: &PgPool, name: &str, description: &str) {
    let input = CreateItem {
        name: name.to_string(),
        description: description.to_string(),
        default_rate: 10.0,
    };
    ItemRepo::create(pool, &input)
        .await
        .expect("item insert should succeed");
}

/// POST a quote payload and return the saved id.
async fn save_quote(pool: &PgPool, body: serde_json::Value) -> DbId {
    let response = post_json(build_test_app(pool.clone()), "/api/billing/quotes", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    body["id"].as_i64().expect("save response should carry an id")
}

async fn quote_detail(pool: &PgPool, id: DbId) -> serde_json::Value {
    let response = get(build_test_app(pool.clone()), &format!("/api/billing/quote?id={id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Quote editor: save
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_save_creates_and_reads_back(pool: PgPool) {
    let client = seed_client(&pool, "Acme Builders", "ops@acme.test").await;

    let id = save_quote(
        &pool,
        json!({
            "client_id": client.id,
            "title": "Driveway regrade",
            "notes": "  rush job  ",
            "items": [
                {"description": "Gravel", "quantity": 2, "rate": 10.0},
                {"description": "Sand", "quantity": 1, "rate": 5.5}
            ]
        }),
    )
    .await;

    let detail = quote_detail(&pool, id).await;
    assert_eq!(detail["quote"]["client_id"], client.id);
    assert_eq!(detail["quote"]["client_name"], "Acme Builders");
    assert_eq!(detail["quote"]["status"], "draft");
    assert_eq!(detail["quote"]["title"], "Driveway regrade");
    assert_eq!(detail["quote"]["notes"], "rush job");

    let items = detail["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["description"], "Gravel");
    assert_eq!(items[0]["line_total"], 20.0);
    assert_eq!(items[1]["description"], "Sand");
    assert_eq!(items[1]["line_total"], 5.5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_save_requires_a_client(pool: PgPool) {
    for body in [
        json!({"items": [{"description": "Gravel", "quantity": 1, "rate": 1.0}]}),
        json!({"client_id": 0, "items": [{"description": "Gravel", "quantity": 1, "rate": 1.0}]}),
    ] {
        let response = post_json(build_test_app(pool.clone()), "/api/billing/quotes", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Missing client_id");
    }

    // Nothing was written.
    assert_eq!(count_rows(&pool, "quotes").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_save_requires_a_surviving_line(pool: PgPool) {
    let client = seed_client(&pool, "Acme Builders", "ops@acme.test").await;

    for body in [
        json!({"client_id": client.id, "items": []}),
        json!({"client_id": client.id}),
        // Rows that normalization drops: blank descriptions, item_id 0.
        json!({"client_id": client.id, "items": [
            {"description": "   ", "quantity": 2, "rate": 10.0},
            {"item_id": 0, "description": "", "quantity": 1, "rate": 5.0}
        ]}),
    ] {
        let response = post_json(build_test_app(pool.clone()), "/api/billing/quotes", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "At least one line item is required");
    }

    assert_eq!(count_rows(&pool, "quotes").await, 0);
    assert_eq!(count_rows(&pool, "quote_items").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_save_rejects_malformed_json(pool: PgPool) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/billing/quotes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = build_test_app(pool).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid JSON");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_save_drops_blank_rows_and_is_stable_across_resaves(pool: PgPool) {
    let client = seed_client(&pool, "Acme Builders", "ops@acme.test").await;

    let payload = json!({
        "client_id": client.id,
        "title": "Fence line",
        "items": [
            {"description": "", "quantity": 0, "rate": 0},
            {"description": "  Post holes ", "quantity": 8, "rate": 12.5},
            {"description": "", "quantity": 3, "rate": 9.0},
            {"description": "Concrete", "quantity": 2, "rate": 10.0}
        ]
    });

    let id = save_quote(&pool, payload.clone()).await;
    let detail = quote_detail(&pool, id).await;
    let items = detail["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["description"], "Post holes");
    assert_eq!(items[1]["description"], "Concrete");

    // Re-saving the same payload (now as an update) keeps the same id and
    // rewrites an identical line set.
    let mut update = payload.clone();
    update["id"] = json!(id);
    let resaved = save_quote(&pool, update).await;
    assert_eq!(resaved, id);

    let detail = quote_detail(&pool, id).await;
    let items = detail["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["description"], "Post holes");
    assert_eq!(items[0]["line_total"], 100.0);
    assert_eq!(items[1]["description"], "Concrete");
    assert_eq!(items[1]["line_total"], 20.0);
    assert_eq!(count_rows(&pool, "quote_items").await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_save_coerces_unknown_status_to_draft(pool: PgPool) {
    let client = seed_client(&pool, "Acme Builders", "ops@acme.test").await;

    let id = save_quote(
        &pool,
        json!({
            "client_id": client.id,
            "status": "bogus",
            "items": [{"description": "Gravel", "quantity": 1, "rate": 1.0}]
        }),
    )
    .await;

    let detail = quote_detail(&pool, id).await;
    assert_eq!(detail["quote"]["status"], "draft");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_update_replaces_the_line_set_atomically(pool: PgPool) {
    let client = seed_client(&pool, "Acme Builders", "ops@acme.test").await;

    let id = save_quote(
        &pool,
        json!({
            "client_id": client.id,
            "title": "Deck",
            "items": [
                {"description": "Footings", "quantity": 4, "rate": 75.0},
                {"description": "Framing labor", "quantity": 10, "rate": 50.0}
            ]
        }),
    )
    .await;

    // A successful update replaces the snapshot wholesale.
    let resaved = save_quote(
        &pool,
        json!({
            "id": id,
            "client_id": client.id,
            "title": "Deck",
            "items": [
                {"description": "Footings", "quantity": 6, "rate": 75.0},
                {"description": "Decking boards", "quantity": 40, "rate": 3.25},
                {"description": "Hardware", "quantity": 1, "rate": 89.99}
            ]
        }),
    )
    .await;
    assert_eq!(resaved, id);

    let detail = quote_detail(&pool, id).await;
    let items = detail["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["quantity"], 6.0);

    // A failed update must leave the previous snapshot untouched. The NUL
    // byte is rejected by Postgres mid-insert, after the old lines were
    // already deleted inside the transaction.
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/billing/quotes",
        json!({
            "id": id,
            "client_id": client.id,
            "items": [{"description": "bad\u{0000}byte", "quantity": 1, "rate": 1.0}]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Database error saving quote");

    let detail = quote_detail(&pool, id).await;
    let items = detail["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[1]["description"], "Decking boards");
    assert_eq!(detail["quote"]["title"], "Deck");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_update_of_a_missing_quote_is_404(pool: PgPool) {
    let client = seed_client(&pool, "Acme Builders", "ops@acme.test").await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/billing/quotes",
        json!({
            "id": 424242,
            "client_id": client.id,
            "items": [{"description": "Gravel", "quantity": 1, "rate": 1.0}]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Quote with id 424242 not found");
    assert_eq!(count_rows(&pool, "quotes").await, 0);
}

// ---------------------------------------------------------------------------
// Quote editor: load and list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_get_validates_the_id_param(pool: PgPool) {
    for uri in [
        "/api/billing/quote",
        "/api/billing/quote?id=",
        "/api/billing/quote?id=abc",
        "/api/billing/quote?id=0",
    ] {
        let response = get(build_test_app(pool.clone()), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");

        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing or invalid quote id");
    }

    let response = get(build_test_app(pool), "/api/billing/quote?id=424242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Quote with id 424242 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_list_excludes_converted_and_honors_the_filter(pool: PgPool) {
    let client = seed_client(&pool, "Acme Builders", "ops@acme.test").await;

    let draft = save_quote(
        &pool,
        json!({"client_id": client.id, "title": "Draft job",
               "items": [{"description": "Gravel", "quantity": 2, "rate": 10.0},
                          {"description": "Sand", "quantity": 1, "rate": 5.5}]}),
    )
    .await;
    let issued = save_quote(
        &pool,
        json!({"client_id": client.id, "status": "issued", "title": "Issued job",
               "items": [{"description": "Labor", "quantity": 1, "rate": 100.0}]}),
    )
    .await;
    let converted = save_quote(
        &pool,
        json!({"client_id": client.id, "title": "Converted job",
               "items": [{"description": "Labor", "quantity": 1, "rate": 50.0}]}),
    )
    .await;
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/billing/quotes/convert",
        json!({"quote_id": converted}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Default listing: converted quotes are hidden.
    let response = get(build_test_app(pool.clone()), "/api/billing/quotes").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let results = body["results"].as_array().unwrap();
    let ids: Vec<i64> = results.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert!(ids.contains(&draft));
    assert!(ids.contains(&issued));
    assert!(!ids.contains(&converted));

    // Summed totals ride along with each row.
    let draft_row = results.iter().find(|r| r["id"] == draft).unwrap();
    assert_eq!(draft_row["total"], 25.5);
    assert_eq!(draft_row["client_name"], "Acme Builders");

    // Explicit filter: only that status.
    let response = get(build_test_app(pool.clone()), "/api/billing/quotes?status=issued").await;
    let body = body_json(response).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], issued);

    // Converted quotes are reachable when asked for by name.
    let response = get(build_test_app(pool.clone()), "/api/billing/quotes?status=converted").await;
    let body = body_json(response).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 1);

    // Unknown filter tokens are rejected, not coerced.
    let response = get(build_test_app(pool), "/api/billing/quotes?status=bogus").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid status filter");
}

// ---------------------------------------------------------------------------
// Conversion and invoices
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn convert_copies_the_line_snapshot(pool: PgPool) {
    let client = seed_client(&pool, "Acme Builders", "ops@acme.test").await;

    let quote_id = save_quote(
        &pool,
        json!({
            "client_id": client.id,
            "notes": "net 30",
            "items": [
                {"description": "Gravel", "quantity": 2, "rate": 10.0},
                {"description": "Sand", "quantity": 1, "rate": 5.5}
            ]
        }),
    )
    .await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/billing/quotes/convert",
        json!({"quote_id": quote_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let invoice_id = body["invoice_id"].as_i64().unwrap();

    // The quote flipped to converted.
    let detail = quote_detail(&pool, quote_id).await;
    assert_eq!(detail["quote"]["status"], "converted");

    // The invoice carries provenance, client display fields, and the
    // copied snapshot.
    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/billing/invoice?id={invoice_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let invoice = &body["invoice"];
    assert_eq!(invoice["quote_id"], quote_id);
    assert_eq!(invoice["client_id"], client.id);
    assert_eq!(invoice["client_name"], "Acme Builders");
    assert_eq!(invoice["client_address"], "12 Main St, Austin, TX, 78701");
    assert_eq!(invoice["status"], "unpaid");
    assert_eq!(invoice["notes"], "net 30");

    // Net-30 terms: due date is 30 days after issue.
    let issued: NaiveDate = invoice["issued_date"].as_str().unwrap().parse().unwrap();
    let due: NaiveDate = invoice["due_date"].as_str().unwrap().parse().unwrap();
    assert_eq!(due - issued, chrono::Duration::days(30));

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["description"], "Gravel");
    assert_eq!(items[0]["line_total"], 20.0);
    assert_eq!(items[1]["description"], "Sand");
    assert_eq!(items[1]["line_total"], 5.5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn convert_requires_a_quote_id(pool: PgPool) {
    for body in [json!({}), json!({"quote_id": 0})] {
        let response = post_json(
            build_test_app(pool.clone()),
            "/api/billing/quotes/convert",
            body,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing quote_id");
    }

    let response = post_json(
        build_test_app(pool),
        "/api/billing/quotes/convert",
        json!({"quote_id": 424242}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Quote with id 424242 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn convert_refuses_terminal_quotes(pool: PgPool) {
    let client = seed_client(&pool, "Acme Builders", "ops@acme.test").await;

    let quote_id = save_quote(
        &pool,
        json!({"client_id": client.id,
               "items": [{"description": "Gravel", "quantity": 1, "rate": 10.0}]}),
    )
    .await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/billing/quotes/convert",
        json!({"quote_id": quote_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Converting again conflicts and writes nothing.
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/billing/quotes/convert",
        json!({"quote_id": quote_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Quote already converted");
    assert_eq!(count_rows(&pool, "invoices").await, 1);

    // Cancelled quotes are refused with their status named.
    let cancelled = save_quote(
        &pool,
        json!({"client_id": client.id, "status": "cancelled",
               "items": [{"description": "Labor", "quantity": 1, "rate": 10.0}]}),
    )
    .await;
    let response = post_json(
        build_test_app(pool),
        "/api/billing/quotes/convert",
        json!({"quote_id": cancelled}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Quote is cancelled and cannot be converted");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invoice_get_validates_the_id_param(pool: PgPool) {
    for uri in [
        "/api/billing/invoice",
        "/api/billing/invoice?id=abc",
        "/api/billing/invoice?id=0",
    ] {
        let response = get(build_test_app(pool.clone()), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");

        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing or invalid invoice id");
    }

    let response = get(build_test_app(pool), "/api/billing/invoice?id=424242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invoice with id 424242 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invoice_list_sums_line_totals(pool: PgPool) {
    let client = seed_client(&pool, "Acme Builders", "ops@acme.test").await;

    let quote_id = save_quote(
        &pool,
        json!({"client_id": client.id,
               "items": [{"description": "Gravel", "quantity": 2, "rate": 10.0},
                          {"description": "Sand", "quantity": 1, "rate": 5.5}]}),
    )
    .await;
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/billing/quotes/convert",
        json!({"quote_id": quote_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(build_test_app(pool), "/api/billing/invoices").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["total"], 25.5);
    assert_eq!(results[0]["client_name"], "Acme Builders");
    assert_eq!(results[0]["status"], "unpaid");
}

// ---------------------------------------------------------------------------
// Catalog search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_search_matches_name_or_email_case_insensitively(pool: PgPool) {
    seed_client(&pool, "Acme Builders", "ops@acme.test").await;
    seed_client(&pool, "Zenith Roofing", "hello@zenith.test").await;

    // No query: everything, ordered by name.
    let response = get(build_test_app(pool.clone()), "/api/billing/clients").await;
    let body = body_json(response).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["name"], "Acme Builders");

    // Case-insensitive name match.
    let response = get(build_test_app(pool.clone()), "/api/billing/clients?q=ACME").await;
    let body = body_json(response).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 1);

    // Email matches too.
    let response = get(build_test_app(pool), "/api/billing/clients?q=zenith.test").await;
    let body = body_json(response).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Zenith Roofing");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn item_search_is_case_insensitive(pool: PgPool) {
    seed_item(&pool, "PVC Pipe 2in", "Schedule 40").await;
    seed_item(&pool, "Copper pipe", "Type L").await;
    seed_item(&pool, "Gravel", "Crushed, per yard").await;

    let upper = get(build_test_app(pool.clone()), "/api/billing/items?q=PIPE").await;
    let upper = body_json(upper).await;
    let lower = get(build_test_app(pool.clone()), "/api/billing/items?q=pipe").await;
    let lower = body_json(lower).await;

    assert_eq!(upper, lower);
    assert_eq!(upper["results"].as_array().unwrap().len(), 2);

    // Description text is searched as well.
    let response = get(build_test_app(pool), "/api/billing/items?q=crushed").await;
    let body = body_json(response).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Gravel");
}
