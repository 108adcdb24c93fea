//! Blogs, hospital cards and cross-cutting HTTP behaviour.

mod common;

use common::{file_part, TestApp, ALLOWED_ORIGIN};
use reqwest::multipart::Form;
use serde_json::json;

#[tokio::test]
async fn root_reports_liveness() {
    let app = TestApp::spawn().await;
    let response = app.client.get(app.url("/")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "GlobalCare API is running");

    let (status, body) = app.get_json("/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn created_blog_is_listed_first() {
    let app = TestApp::spawn().await;

    let (status, _) = app
        .post_form("/api/blogs", Form::new().text("title", "Older post"))
        .await;
    assert_eq!(status, 201);

    let form = Form::new()
        .text("title", "Medical expo 2025")
        .text("tagline", "Meet us at stall 12")
        .text("dateTime", "2025-03-01T10:00")
        .text("location", "Bengaluru")
        .text("mapLink", "https://maps.example/expo")
        .part("image", file_part("expo.jpg", b"jpeg"));
    let (status, created) = app.post_form("/api/blogs", form).await;
    assert_eq!(status, 201);

    let (status, body) = app.get_json("/api/blogs").await;
    assert_eq!(status, 200);
    let blogs = body["data"].as_array().unwrap();
    assert_eq!(blogs.len(), 2);

    let first = &blogs[0];
    assert_eq!(first["_id"], created["data"]["_id"]);
    assert_eq!(first["title"], "Medical expo 2025");
    assert_eq!(first["tagline"], "Meet us at stall 12");
    assert_eq!(first["dateTime"], "2025-03-01T10:00");
    assert_eq!(first["location"], "Bengaluru");
    assert_eq!(first["mapLink"], "https://maps.example/expo");
    let image = first["image"].as_str().unwrap();
    assert!(image.starts_with("/uploads/") && image.ends_with("-expo.jpg"));
    assert!(first["createdAt"].is_string());
}

#[tokio::test]
async fn blog_without_title_is_400() {
    let app = TestApp::spawn().await;

    let form = Form::new()
        .text("tagline", "No title")
        .part("image", file_part("x.jpg", b"x"));
    let (status, body) = app.post_form("/api/blogs", form).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "title is required");
    assert_eq!(app.upload_count(), 0);
}

#[tokio::test]
async fn deleting_a_blog_removes_its_image() {
    let app = TestApp::spawn().await;
    let form = Form::new()
        .text("title", "Launch")
        .part("image", file_part("launch.png", b"png"));
    let (_, body) = app.post_form("/api/blogs", form).await;
    let id = body["data"]["_id"].as_str().unwrap().to_string();
    let image = body["data"]["image"].as_str().unwrap().to_string();

    let (status, _) = app.delete(&format!("/api/blogs/{}", id)).await;
    assert_eq!(status, 200);
    let (status, _) = app.get_json(&format!("/api/blogs/{}", id)).await;
    assert_eq!(status, 404);
    let file = app.client.get(app.url(&image)).send().await.unwrap();
    assert_eq!(file.status(), 404);
}

#[tokio::test]
async fn hospitals_list_most_recent_first() {
    let app = TestApp::spawn().await;
    for name in ["City Hospital", "Lake Clinic", "Hill Care"] {
        let (status, _) = app
            .post_json(
                "/api/hospitals",
                json!({ "name": name, "location": "Mysuru", "description": "Supplied OT", "moreLink": "https://example.com" }),
            )
            .await;
        assert_eq!(status, 201);
    }

    let (_, body) = app.get_json("/api/hospitals").await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Hill Care", "Lake Clinic", "City Hospital"]);

    let (status, _) = app
        .post_json("/api/hospitals", json!({ "name": "No location" }))
        .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn cors_reflects_only_listed_origins() {
    let app = TestApp::spawn().await;

    let allowed = app
        .client
        .get(app.url("/api/blogs"))
        .header("Origin", ALLOWED_ORIGIN)
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.headers()["access-control-allow-origin"], ALLOWED_ORIGIN);
    assert_eq!(allowed.headers()["access-control-allow-credentials"], "true");

    let other = app
        .client
        .get(app.url("/api/blogs"))
        .header("Origin", "https://elsewhere.example")
        .send()
        .await
        .unwrap();
    assert!(other.headers().get("access-control-allow-origin").is_none());
    assert_eq!(
        other.headers()["access-control-allow-methods"],
        "GET,POST,PUT,DELETE,OPTIONS"
    );
}

#[tokio::test]
async fn options_short_circuits_with_200() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .request(reqwest::Method::OPTIONS, app.url("/api/contact"))
        .header("Origin", ALLOWED_ORIGIN)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["access-control-allow-headers"],
        "Content-Type,Authorization"
    );
    assert_eq!(response.text().await.unwrap(), "OK");
    assert_eq!(app.store.count("contacts").await, 0);
}

#[tokio::test]
async fn api_responses_carry_security_headers_but_uploads_do_not() {
    let app = TestApp::spawn().await;

    let api = app.client.get(app.url("/api/blogs")).send().await.unwrap();
    let headers = api.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert_eq!(headers["referrer-policy"], "no-referrer");
    assert_eq!(headers["cross-origin-resource-policy"], "same-origin");
    assert_eq!(
        headers["strict-transport-security"],
        "max-age=15552000; includeSubDomains"
    );
    assert!(headers["content-security-policy"]
        .to_str()
        .unwrap()
        .starts_with("default-src 'self'"));

    let form = Form::new()
        .text("title", "Embedded")
        .part("image", file_part("embed.png", b"png"));
    let (_, body) = app.post_form("/api/blogs", form).await;
    let image = body["data"]["image"].as_str().unwrap().to_string();

    // Site pages on other origins embed these images.
    let file = app.client.get(app.url(&image)).send().await.unwrap();
    assert_eq!(file.status(), 200);
    assert!(file.headers().get("cross-origin-resource-policy").is_none());
    assert!(file.headers().get("content-security-policy").is_none());
}
