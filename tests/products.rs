//! Product cache synchronization against a mock backend.


use cafe_client::models::ImageAsset;
use cafe_client::ProductCache;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_catalog(server: &MockServer, products: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/productos"))
        .and(query_param("limite", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::products_page(products)))
        .mount(server)
        .await;
}

fn ids(cache: &ProductCache) -> Vec<&str> {
    cache.products().iter().map(|p| p.id.as_str()).collect()
}

#[tokio::test]
async fn load_all_replaces_instead_of_accumulating() {
    let server = MockServer::start().await;
    let (mut cache, _tokens) = fixtures::cache(&server);
    mount_catalog(
        &server,
        vec![
            fixtures::product_body("p1", "Latte"),
            fixtures::product_body("p2", "Mocha"),
        ],
    )
    .await;

    cache.load_all().await.unwrap();
    let first = cache.products().to_vec();

    // Unchanged backend, second load: identical result, no duplication.
    cache.load_all().await.unwrap();

    assert_eq!(cache.products(), first.as_slice());
    assert_eq!(ids(&cache), vec!["p1", "p2"]);
}

#[tokio::test]
async fn add_appends_created_product_in_order() {
    let server = MockServer::start().await;
    let (mut cache, _tokens) = fixtures::cache(&server);
    mount_catalog(
        &server,
        vec![
            fixtures::product_body("p1", "Latte"),
            fixtures::product_body("p2", "Mocha"),
        ],
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/productos"))
        .and(body_json(json!({ "nombre": "Flat White", "categoria": "c1" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(fixtures::product_body("p3", "Flat White")),
        )
        .mount(&server)
        .await;

    cache.load_all().await.unwrap();
    let created = cache.add("c1", "Flat White").await.unwrap();

    assert_eq!(created.id, "p3");
    assert_eq!(created.name, "Flat White");
    assert_eq!(ids(&cache), vec!["p1", "p2", "p3"]);
}

#[tokio::test]
async fn add_failure_leaves_collection_untouched() {
    let server = MockServer::start().await;
    let (mut cache, _tokens) = fixtures::cache(&server);
    mount_catalog(&server, vec![fixtures::product_body("p1", "Latte")]).await;
    Mock::given(method("POST"))
        .and(path("/productos"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "msg": "no such category" })))
        .mount(&server)
        .await;

    cache.load_all().await.unwrap();
    let result = cache.add("nope", "Flat White").await;

    assert!(result.is_err());
    assert_eq!(ids(&cache), vec!["p1"]);
}

#[tokio::test]
async fn update_replaces_matching_entry_preserving_order() {
    let server = MockServer::start().await;
    let (mut cache, _tokens) = fixtures::cache(&server);
    mount_catalog(
        &server,
        vec![
            fixtures::product_body("p1", "Latte"),
            fixtures::product_body("p2", "Mocha"),
            fixtures::product_body("p3", "Flat White"),
        ],
    )
    .await;
    Mock::given(method("PUT"))
        .and(path("/productos/p2"))
        .and(body_json(json!({ "nombre": "Mocha Grande", "categoria": "c1" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(fixtures::product_body("p2", "Mocha Grande")),
        )
        .mount(&server)
        .await;

    cache.load_all().await.unwrap();
    cache.update("c1", "Mocha Grande", "p2").await.unwrap();

    assert_eq!(ids(&cache), vec!["p1", "p2", "p3"]);
    assert_eq!(cache.products()[1].name, "Mocha Grande");
    assert_eq!(cache.products().len(), 3);
}

#[tokio::test]
async fn update_with_unknown_id_leaves_collection_unchanged() {
    let server = MockServer::start().await;
    let (mut cache, _tokens) = fixtures::cache(&server);
    mount_catalog(&server, vec![fixtures::product_body("p1", "Latte")]).await;
    Mock::given(method("PUT"))
        .and(path("/productos/p9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::product_body("p9", "Ghost")))
        .mount(&server)
        .await;

    cache.load_all().await.unwrap();
    cache.update("c1", "Ghost", "p9").await.unwrap();

    assert_eq!(ids(&cache), vec!["p1"]);
}

#[tokio::test]
async fn remove_filters_deleted_id() {
    let server = MockServer::start().await;
    let (mut cache, _tokens) = fixtures::cache(&server);
    mount_catalog(
        &server,
        vec![
            fixtures::product_body("p1", "Latte"),
            fixtures::product_body("p2", "Mocha"),
            fixtures::product_body("p3", "Flat White"),
        ],
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path("/productos/p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::product_body("p2", "Mocha")))
        .mount(&server)
        .await;

    cache.load_all().await.unwrap();
    cache.remove("p2").await.unwrap();

    assert_eq!(ids(&cache), vec!["p1", "p3"]);
}

#[tokio::test]
async fn remove_failure_leaves_collection_untouched() {
    let server = MockServer::start().await;
    let (mut cache, _tokens) = fixtures::cache(&server);
    mount_catalog(&server, vec![fixtures::product_body("p1", "Latte")]).await;
    Mock::given(method("DELETE"))
        .and(path("/productos/p1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    cache.load_all().await.unwrap();
    let result = cache.remove("p1").await;

    assert!(result.is_err());
    assert_eq!(ids(&cache), vec!["p1"]);
}

#[tokio::test]
async fn load_by_id_returns_product_without_touching_collection() {
    let server = MockServer::start().await;
    let (mut cache, _tokens) = fixtures::cache(&server);
    mount_catalog(&server, vec![fixtures::product_body("p1", "Latte")]).await;
    Mock::given(method("GET"))
        .and(path("/productos/p9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::product_body("p9", "Espresso")))
        .mount(&server)
        .await;

    cache.load_all().await.unwrap();
    let fetched = cache.load_by_id("p9").await.unwrap();

    assert_eq!(fetched.id, "p9");
    assert_eq!(ids(&cache), vec!["p1"]);
}

#[tokio::test]
async fn upload_image_sends_multipart_archivo_field() {
    let server = MockServer::start().await;
    let (cache, _tokens) = fixtures::cache(&server);
    Mock::given(method("PUT"))
        .and(path("/uploads/productos/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::product_body("p1", "Latte")))
        .expect(1)
        .mount(&server)
        .await;

    cache
        .upload_image(
            ImageAsset {
                bytes: vec![0xFF, 0xD8, 0xFF],
                mime_type: "image/jpeg".to_string(),
                file_name: "latte.jpg".to_string(),
            },
            "p1",
        )
        .await;

    let requests = server.received_requests().await.unwrap();
    let upload = &requests[0];
    let content_type = upload.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&upload.body);
    assert!(body.contains("name=\"archivo\""));
    assert!(body.contains("filename=\"latte.jpg\""));
}

#[tokio::test]
async fn upload_image_failure_is_swallowed() {
    let server = MockServer::start().await;
    let (mut cache, _tokens) = fixtures::cache(&server);
    mount_catalog(&server, vec![fixtures::product_body("p1", "Latte")]).await;
    Mock::given(method("PUT"))
        .and(path("/uploads/productos/p1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    cache.load_all().await.unwrap();
    // No Result to inspect: the failure is logged and absorbed.
    cache
        .upload_image(
            ImageAsset {
                bytes: vec![1, 2, 3],
                mime_type: "image/png".to_string(),
                file_name: "x.png".to_string(),
            },
            "p1",
        )
        .await;

    assert_eq!(ids(&cache), vec!["p1"]);
}
