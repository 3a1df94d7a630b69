//! Hero endpoint tests
//!
//! Create, read, partial update and cascade delete through the HTTP
//! surface.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{errors, TestApp};
use superheroes::store::NamePolicy;

// =============================================================================
// Create and Read
// =============================================================================

#[tokio::test]
async fn test_create_then_get_round_trips_trimmed_values() {
    let app = TestApp::new().await;

    let (status, created) = app
        .post("/heroes", json!({"name": "  Kamala Khan ", "super_name": "Ms. Marvel"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Kamala Khan");

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = app.get(&format!("/heroes/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["name"], "Kamala Khan");
    assert_eq!(fetched["super_name"], "Ms. Marvel");
    assert_eq!(fetched["hero_powers"], json!([]));
}

#[tokio::test]
async fn test_list_heroes_in_id_order() {
    let app = TestApp::new().await;
    let first = app.hero("Doreen Green", "Squirrel Girl").await;
    let second = app.hero("Gwen Stacy", "Spider-Gwen").await;

    let (status, body) = app.get("/heroes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": first, "name": "Doreen Green", "super_name": "Squirrel Girl"},
            {"id": second, "name": "Gwen Stacy", "super_name": "Spider-Gwen"}
        ])
    );
}

#[tokio::test]
async fn test_get_hero_embeds_links_with_power() {
    let app = TestApp::new().await;
    let hero = app.hero("Carol Danvers", "Captain Marvel").await;
    let power = app.power("flight", "gives the wielder the ability to fly").await;
    let link = app.link(hero, power, "Strong").await;

    let (_, body) = app.get(&format!("/heroes/{hero}")).await;
    let links = body["hero_powers"].as_array().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["id"], link);
    assert_eq!(links[0]["strength"], "Strong");
    assert_eq!(links[0]["power"]["name"], "flight");
    assert!(links[0].get("hero").is_none());
}

#[tokio::test]
async fn test_create_hero_reports_every_missing_field() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/heroes", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors(&body), vec!["name is required", "super_name is required"]);

    let (status, body) = app.post("/heroes", json!({"name": "   ", "super_name": 7})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        errors(&body),
        vec!["name must not be empty", "super_name must be a string"]
    );

    let (_, list) = app.get("/heroes").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_hero_without_usable_body() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::POST, "/heroes", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors(&body), vec!["Request body is required"]);

    let (status, body) = app.send_raw(Method::POST, "/heroes", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors(&body), vec!["Request body is required"]);

    let (status, body) = app.post("/heroes", json!(["Storm"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors(&body), vec!["Request body must be a JSON object"]);
}

// =============================================================================
// Not Found
// =============================================================================

#[tokio::test]
async fn test_missing_hero_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/heroes/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Hero not found"}));

    let (status, _) = app.patch("/heroes/999", json!({"name": "x"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete("/heroes/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_integer_id_is_404() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/heroes/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Hero not found"}));
}

#[tokio::test]
async fn test_patch_missing_hero_with_bad_body_is_404() {
    let app = TestApp::new().await;
    let (status, _) = app.patch("/heroes/5", json!({"name": ""})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Partial Update
// =============================================================================

#[tokio::test]
async fn test_patch_applies_only_supplied_fields() {
    let app = TestApp::new().await;
    let id = app.hero("Kitty Pryde", "Shadowcat").await;

    let (status, body) = app
        .patch(&format!("/heroes/{id}"), json!({"super_name": " Sprite "}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id, "name": "Kitty Pryde", "super_name": "Sprite"}));
}

#[tokio::test]
async fn test_invalid_patch_changes_nothing() {
    let app = TestApp::new().await;
    let id = app.hero("Jean Grey", "Dark Phoenix").await;

    let (status, body) = app
        .patch(&format!("/heroes/{id}"), json!({"name": "Marvel Girl", "super_name": ""}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors(&body), vec!["super_name must not be empty"]);

    let (_, hero) = app.get(&format!("/heroes/{id}")).await;
    assert_eq!(hero["name"], "Jean Grey");
    assert_eq!(hero["super_name"], "Dark Phoenix");
}

#[tokio::test]
async fn test_empty_patch_is_idempotent() {
    let app = TestApp::new().await;
    let id = app.hero("Ororo Munroe", "Storm").await;
    let (_, before) = app.get(&format!("/heroes/{id}")).await;

    let (status, body) = app.patch(&format!("/heroes/{id}"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id, "name": "Ororo Munroe", "super_name": "Storm"}));

    let (status, _) = app
        .patch(&format!("/heroes/{id}"), json!({"unknown_field": true}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = app.get(&format!("/heroes/{id}")).await;
    assert_eq!(before, after);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_hero_cascades_links() {
    let app = TestApp::new().await;
    let hero = app.hero("Wanda Maximoff", "Scarlet Witch").await;
    let other = app.hero("Janet Van Dyne", "The Wasp").await;
    let flight = app.power("flight", "gives the wielder the ability to fly").await;
    let strength = app.power("super strength", "gives the wielder super-human strengths").await;
    let senses = app.power("super human senses", "allows the wielder to use her senses").await;

    app.link(hero, flight, "Strong").await;
    app.link(hero, strength, "Weak").await;
    app.link(hero, senses, "Average").await;
    let kept = app.link(other, flight, "Average").await;

    let (status, body) = app.delete(&format!("/heroes/{hero}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Hero \"Wanda Maximoff\" deleted successfully"})
    );

    let (_, links) = app.get(&format!("/hero_powers?hero_id={hero}")).await;
    assert_eq!(links, json!([]));

    let (_, all) = app.get("/hero_powers").await;
    let ids: Vec<i64> = all.as_array().unwrap().iter().map(|l| l["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![kept]);

    let (status, _) = app.get(&format!("/powers/{flight}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/heroes/{hero}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ids_are_never_reused() {
    let app = TestApp::new().await;
    let first = app.hero("Elektra Natchios", "Elektra").await;
    app.delete(&format!("/heroes/{first}")).await;

    let second = app.hero("Elektra Natchios", "Elektra").await;
    assert!(second > first);
}

#[tokio::test]
async fn test_store_failure_is_500_and_rolls_back() {
    let app = TestApp::new().await;
    let hero = app.hero("Wanda Maximoff", "Scarlet Witch").await;

    sqlx::query("DROP TABLE hero_powers")
        .execute(app.db.pool())
        .await
        .unwrap();

    let (status, body) = app.delete(&format!("/heroes/{hero}")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Failed to delete hero: "), "{message}");
    assert!(message.contains("hero_powers"), "{message}");
    assert!(body.get("errors").is_none());

    let (status, heroes) = app.get("/heroes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        heroes,
        json!([{"id": hero, "name": "Wanda Maximoff", "super_name": "Scarlet Witch"}])
    );
}

// =============================================================================
// Duplicate Names
// =============================================================================

#[tokio::test]
async fn test_duplicates_allowed_by_default() {
    let app = TestApp::new().await;
    app.hero("Gwen Stacy", "Spider-Gwen").await;
    app.hero("Gwen Stacy", "Spider-Gwen").await;

    let (_, list) = app.get("/heroes").await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_duplicates_rejected_when_configured() {
    let app = TestApp::with_policy(NamePolicy::RejectDuplicates).await;
    app.hero("Gwen Stacy", "Spider-Gwen").await;

    let (status, body) = app
        .post("/heroes", json!({"name": "Gwendolyn", "super_name": "Spider-Gwen"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        errors(&body),
        vec!["Hero with this name or super name already exists"]
    );
}
