use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use library_catalog::database::models::{Author, AuthorDraft, Genre, GenreDraft, NewBook};
use library_catalog::database::{BookStore, EntityStore, MemoryStore};
use library_catalog::server::{router, AppState};
use tower::ServiceExt;

fn setup() -> (Router, Arc<MemoryStore>) {
    let state = AppState::new(MemoryStore::new());
    let store = Arc::clone(&state.store);
    (router(state), store)
}

async fn seed(store: &MemoryStore) -> (Author, Genre) {
    let author = EntityStore::<Author>::insert(
        store,
        AuthorDraft {
            first_name: "John".into(),
            family_name: "Tolkien".into(),
            date_of_birth: None,
            date_of_death: None,
        },
    )
    .await
    .unwrap();
    let genre = EntityStore::<Genre>::insert(store, GenreDraft { name: "Fantasy".into() })
        .await
        .unwrap();
    store
        .insert_book(NewBook {
            title: "The Hobbit".into(),
            summary: "There and back again".into(),
            isbn: "9780261102217".into(),
            author_id: author.id,
            genre_ids: vec![genre.id],
        })
        .await
        .unwrap();
    (author, genre)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, location, String::from_utf8(body.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

#[tokio::test]
async fn detail_pages_list_dependent_books() {
    let (app, store) = setup();
    let (author, genre) = seed(&store).await;

    let (status, _, body) = send(&app, get(&format!("/author/{}", author.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Author Detail | Library Catalog</title>"));
    assert!(body.contains("Tolkien, John"));
    assert!(body.contains("The Hobbit"));

    let (status, _, body) = send(&app, get(&format!("/genre/{}", genre.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("There and back again"));
}

#[tokio::test]
async fn delete_with_dependents_is_blocked() {
    let (app, store) = setup();
    let (author, genre) = seed(&store).await;

    let (status, _, body) = send(&app, get(&format!("/author/{}/delete", author.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Delete the following books before attempting to delete this author."));
    assert!(!body.contains("name=\"authorid\""));

    let form = format!("authorid={}", author.id);
    let (status, location, body) =
        send(&app, post_form(&format!("/author/{}/delete", author.id), &form)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(location, None);
    assert!(body.contains("The Hobbit"));
    assert!(EntityStore::<Author>::find_by_id(store.as_ref(), author.id)
        .await
        .unwrap()
        .is_some());

    let form = format!("genreid={}", genre.id);
    let (status, _, _) = send(&app, post_form(&format!("/genre/{}/delete", genre.id), &form)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(EntityStore::<Genre>::count(store.as_ref()).await.unwrap(), 1);
}

#[tokio::test]
async fn delete_succeeds_once_books_are_gone() {
    let (app, store) = setup();
    let (author, _) = seed(&store).await;

    for book in EntityStore::<Author>::dependents(store.as_ref(), author.id).await.unwrap() {
        assert!(store.delete_book(book.id).await.unwrap());
        assert_eq!(store.find_book(book.id).await.unwrap(), None);
    }

    let form = format!("authorid={}", author.id);
    let (status, location, _) =
        send(&app, post_form(&format!("/author/{}/delete", author.id), &form)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/authors"));
    assert_eq!(EntityStore::<Author>::count(store.as_ref()).await.unwrap(), 0);
}

#[tokio::test]
async fn create_form_pages_render_empty() {
    let (app, _) = setup();

    let (status, _, body) = send(&app, get("/author/create")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Create Author | Library Catalog</title>"));

    let (status, _, body) = send(&app, get("/genre/create")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Create Genre | Library Catalog</title>"));
    assert!(body.contains("value=\"\""));
}

#[tokio::test]
async fn update_of_missing_record_is_not_found() {
    let (app, _) = setup();

    let (status, _, body) = send(
        &app,
        post_form(
            "/genre/7f1c3a52-1d0b-4c8e-9a55-3b8e0a2f4d10/update",
            "name=Poetry",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Genre not found"));

    let (status, _, _) = send(&app, get("/genre/not-a-uuid/update")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn author_list_is_sorted_by_family_name() {
    let (app, _) = setup();

    for form in [
        "first_name=Isaac&family_name=Asimov",
        "first_name=Ben&family_name=Bova",
        "first_name=Ann&family_name=Asimov",
    ] {
        let (status, _, _) = send(&app, post_form("/author/create", form)).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
    }

    let (_, _, body) = send(&app, get("/authors")).await;
    let ann = body.find("Asimov, Ann").unwrap();
    let isaac = body.find("Asimov, Isaac").unwrap();
    let ben = body.find("Bova, Ben").unwrap();
    assert!(ann < isaac && isaac < ben);
}
