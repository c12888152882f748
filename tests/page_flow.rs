//! End-to-end page behaviour: load from a mock service, then drive the page
//! through the events a browser host would deliver.

use serde_json::json;
use simple_folio::client::ApiClient;
use simple_folio::config::{ApiConfig, FolioConfig};
use simple_folio::contact::{ContactField, FAILURE_MESSAGE, FormStatus, SUCCESS_MESSAGE};
use simple_folio::grid::LightboxRegion;
use simple_folio::page::{Event, Page, Section};
use simple_folio::types::{Category, CategoryFilter};
use simple_folio::viewport::{IntersectionEntry, Rect};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn photo(id: &str, category: &str, featured: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Title {id}"),
        "category": category,
        "imageData": format!("data:image/jpeg;base64,{id}"),
        "description": format!("About {id}"),
        "featured": featured
    })
}

fn testimonial(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "clientName": name,
        "testimonialText": format!("Said by {name}"),
        "rating": 5
    })
}

async fn portfolio_server() -> MockServer {
    let server = MockServer::start().await;
    let bodies = [
        (
            "/api/photos",
            json!([
                photo("p1", "portrait", false),
                photo("w1", "wedding", true),
                photo("p2", "portrait", false),
                photo("l1", "landscape", false),
            ]),
        ),
        (
            "/api/testimonials",
            json!([
                testimonial("t1", "alice"),
                testimonial("t2", "bob"),
                testimonial("t3", "carol"),
            ]),
        ),
        (
            "/api/about",
            json!({
                "bioText": "Shooting weddings since **2010**.",
                "photographerName": "Jane Doe",
                "tagline": "Light and Shadow",
                "portraitImage": ""
            }),
        ),
    ];
    for (endpoint, body) in bodies {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
    }
    server
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: server.uri(),
        ..ApiConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn browse_filter_and_lightbox() {
    let server = portfolio_server().await;
    let mut page = Page::load(&client_for(&server), &FolioConfig::default()).await;
    assert_eq!(page.grid().visible_len(), 4);

    page.dispatch(Event::Tick(Duration::from_millis(100)));
    assert!(page.hero_visible());

    // Reveal the first portrait cell, then switch filter before a late
    // notification for the old collection arrives.
    let old_key = page.grid().cell_key(2).unwrap();
    page.dispatch(Event::SelectCategory(CategoryFilter::Only(Category::Portrait)));
    page.dispatch(Event::CellIntersections(vec![IntersectionEntry::intersecting(
        old_key, 1.0,
    )]));
    assert_eq!(page.grid().visible_len(), 2);
    assert!(!page.grid().is_revealed(0));

    page.dispatch(Event::CellLayout {
        index: 1,
        rect: Rect::new(0.0, 500.0, 300.0, 400.0),
    });
    page.dispatch(Event::Scroll(Rect::new(0.0, 0.0, 1280.0, 800.0)));
    assert!(page.grid().is_revealed(1));
    assert!(!page.grid().is_revealed(0));

    page.dispatch(Event::OpenPhoto(1));
    assert_eq!(page.grid().lightbox_photo().unwrap().id, "p2");
    page.dispatch(Event::LightboxClick(LightboxRegion::Content));
    assert!(page.grid().lightbox_photo().is_some());

    // Lightbox photo filtered out closes it
    page.dispatch(Event::SelectCategory(CategoryFilter::Only(Category::Landscape)));
    assert!(page.grid().lightbox_photo().is_none());

    let html = page.render().into_string();
    assert!(html.contains("Jane Doe Photography"));
    assert!(html.contains("data:image/jpeg;base64,w1"));
    assert!(html.contains("<strong>2010</strong>"));
    assert!(html.contains(r#"class="filter-pill active" data-category="landscape""#));
}

#[tokio::test]
async fn carousel_autoplay_hover_and_swipe() {
    let server = portfolio_server().await;
    let mut page = Page::load(&client_for(&server), &FolioConfig::default()).await;

    page.dispatch(Event::Tick(Duration::from_secs(5)));
    assert_eq!(page.carousel().current().unwrap().client_name, "bob");

    page.dispatch(Event::CarouselHoverEnter);
    page.dispatch(Event::Tick(Duration::from_secs(20)));
    assert_eq!(page.carousel().current_index(), Some(1));

    page.dispatch(Event::TouchStart(400.0));
    page.dispatch(Event::TouchMove(320.0));
    page.dispatch(Event::TouchEnd);
    assert_eq!(page.carousel().current_index(), Some(2));

    page.dispatch(Event::CarouselHoverLeave);
    page.dispatch(Event::Tick(Duration::from_secs(5)));
    assert_eq!(page.carousel().current_index(), Some(0));

    page.dispatch(Event::SectionIntersections(vec![IntersectionEntry::intersecting(
        Section::Testimonials,
        0.6,
    )]));
    let html = page.render().into_string();
    assert!(html.contains(r#"class="testimonials-container visible""#));
    assert!(html.contains(r#"class="dot active" data-index="0""#));

    page.teardown();
    assert_eq!(page.scheduler().armed_count(), 0);

    // Unmount can still deliver hover events
    page.dispatch(Event::CarouselHoverEnter);
    page.dispatch(Event::CarouselHoverLeave);
    page.dispatch(Event::Tick(Duration::from_secs(5)));
    assert_eq!(page.scheduler().armed_count(), 0);
    assert_eq!(page.carousel().current_index(), Some(0));
}

#[tokio::test]
async fn contact_submission_success_and_failure() {
    let server = portfolio_server().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "c1"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut page = Page::load(&client, &FolioConfig::default()).await;
    for (field, value) in [
        (ContactField::Name, "Ada"),
        (ContactField::Email, "ada@example.com"),
        (ContactField::Message, "Are you free in June?"),
    ] {
        page.dispatch(Event::ContactInput {
            field,
            value: value.to_string(),
        });
    }

    page.submit_contact(&client).await.unwrap();
    assert_eq!(page.contact().status(), Some(FormStatus::Failure));
    assert_eq!(page.contact().field(ContactField::Name), "Ada");
    assert!(page.render().into_string().contains(FAILURE_MESSAGE));

    page.submit_contact(&client).await.unwrap();
    assert_eq!(page.contact().status(), Some(FormStatus::Success));
    assert_eq!(page.contact().field(ContactField::Message), "");
    // maud leaves apostrophes unescaped
    assert!(page.render().into_string().contains(SUCCESS_MESSAGE));

    // Cleared form cannot be resubmitted
    assert!(page.submit_contact(&client).await.is_err());
}

#[tokio::test]
async fn unreachable_service_renders_fallback_page() {
    let client = ApiClient::new(&ApiConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
    })
    .unwrap();
    let page = Page::load(&client, &FolioConfig::default()).await;
    assert!(page.data().photos.is_empty());
    let html = page.render().into_string();
    assert!(html.contains("Your Name"));
    assert!(!html.contains("photo-card"));
    assert!(!html.contains("testimonials-section"));
}
