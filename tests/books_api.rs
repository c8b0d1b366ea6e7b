mod common;

use axum::http::StatusCode;
use common::{error_code, TestApp};
use serde_json::{json, Value};

fn message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or("")
}

#[tokio::test]
async fn create_book_round_trips_isbn_and_embeds_author() {
    let app = TestApp::new().await;
    let (_, author) = app
        .post(
            "/api/authors",
            json!({ "name": "Laura Esquivel", "nationality": "Mexicana", "birth_date": "1950-09-30" }),
        )
        .await;
    let author_id = author["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .post(
            "/api/books",
            json!({
                "title": "Como agua para chocolate",
                "isbn": "123-4567890123",
                "author_id": author_id,
                "publication_year": 1989,
                "genre": "  Novela  "
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let data = &body["data"];
    assert_eq!(data["isbn"], "123-4567890123");
    assert_eq!(data["title"], "Como agua para chocolate");
    assert_eq!(data["author_id"], author_id);
    assert_eq!(data["author"]["id"], author_id);
    assert_eq!(data["author"]["name"], "Laura Esquivel");
    assert_eq!(data["publication_year"], 1989);
    assert_eq!(data["genre"], "Novela");
    assert_eq!(data["available"], true);
}

#[tokio::test]
async fn create_book_validation_order() {
    let app = TestApp::new().await;
    let author_id = app.author("Julio Cortázar").await;
    app.book("Rayuela", "9788437604572", author_id).await;

    // Every field is bad: the title is reported first.
    let (status, body) = app
        .post("/api/books", json!({ "title": "123", "isbn": "x", "author_id": 999, "publication_year": 0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body).starts_with("title"), "{}", body);

    let (_, body) = app
        .post("/api/books", json!({ "title": "Bestiario", "isbn": "12-34", "author_id": 999 }))
        .await;
    assert!(message(&body).starts_with("isbn must have"), "{}", body);

    // Unknown author is a client error, not a 404, and comes before the duplicate isbn.
    let (status, body) = app
        .post("/api/books", json!({ "title": "Bestiario", "isbn": "9788437604572", "author_id": 999 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "author does not exist");

    let (_, body) = app
        .post(
            "/api/books",
            json!({ "title": "Bestiario", "isbn": "9788437604572", "author_id": author_id, "publication_year": 0 }),
        )
        .await;
    assert_eq!(message(&body), "isbn already exists");

    let (_, body) = app
        .post("/api/books", json!({ "title": "Bestiario", "isbn": "9788437604573", "author_id": author_id }))
        .await;
    assert_eq!(message(&body), "publication_year must be an integer");

    let (_, body) = app
        .post(
            "/api/books",
            json!({ "title": "Bestiario", "isbn": "9788437604573", "author_id": author_id, "publication_year": -3 }),
        )
        .await;
    assert_eq!(message(&body), "publication_year must be greater than 0");

    let (_, body) = app
        .post(
            "/api/books",
            json!({
                "title": "Bestiario", "isbn": "9788437604573", "author_id": author_id,
                "publication_year": 1951, "genre": "   "
            }),
        )
        .await;
    assert_eq!(message(&body), "genre cannot be only whitespace");

    assert_eq!(app.count("book").await, 1);
}

#[tokio::test]
async fn duplicate_isbn_creates_no_row() {
    let app = TestApp::new().await;
    let author_id = app.author("Octavio Paz").await;
    app.book("El laberinto de la soledad", "9786071612", author_id).await;

    let (status, body) = app
        .post(
            "/api/books",
            json!({ "title": "Piedra de sol", "isbn": "9786071612", "author_id": author_id, "publication_year": 1957 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "validation_error");
    assert_eq!(app.count("book").await, 1);
}

#[tokio::test]
async fn list_books_filters_by_availability() {
    let app = TestApp::new().await;
    let author_id = app.author("Benito Pérez Galdós").await;
    let a = app.book("Fortunata y Jacinta", "1111111111", author_id).await;
    app.book("Marianela", "2222222222", author_id).await;
    app.book("Doña Perfecta", "3333333333", author_id).await;
    app.put(&format!("/api/books/{}", a), json!({ "available": false })).await;

    let (status, body) = app.get("/api/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total_items"], 3);
    assert_eq!(body["data"][0]["author"]["name"], "Benito Pérez Galdós");
    assert!(body["data"][0]["author"].get("nationality").is_some());

    let (_, body) = app.get("/api/books?available=false").await;
    assert_eq!(body["meta"]["total_items"], 1);
    assert_eq!(body["data"][0]["title"], "Fortunata y Jacinta");

    let (_, body) = app.get("/api/books?available=true&pageSize=1&page=2").await;
    assert_eq!(body["meta"]["total_items"], 2);
    assert_eq!(body["meta"]["total_pages"], 2);
    assert_eq!(body["data"][0]["title"], "Doña Perfecta");

    let (status, _) = app.get("/api/books?available=sometimes").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_is_case_insensitive_substring() {
    let app = TestApp::new().await;
    let author_id = app.author("Miguel de Cervantes").await;
    app.book("Don Quijote de la Mancha", "9788424116", author_id).await;
    app.book("Novelas ejemplares", "9788424117", author_id).await;
    app.book("La Galatea", "9788424118", author_id).await;

    let (status, body) = app.get("/api/books/search?title=QUIJOTE").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total_items"], 1);
    assert_eq!(body["data"][0]["title"], "Don Quijote de la Mancha");

    let (_, body) = app.get("/api/books/search?title=la&pageSize=1").await;
    assert_eq!(body["meta"]["total_items"], 3);
    assert_eq!(body["meta"]["total_pages"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn search_without_matches_is_not_found() {
    let app = TestApp::new().await;
    let author_id = app.author("Rosalía de Castro").await;
    app.book("Cantares gallegos", "9788497820", author_id).await;

    let (status, body) = app.get("/api/books/search?title=zzz&page=1&pageSize=10").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "not_found");

    // Wildcards in the needle match literally.
    let (status, _) = app.get("/api/books/search?title=%25").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/books/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_book_embeds_author() {
    let app = TestApp::new().await;
    let author_id = app.author("Ana María Matute").await;
    let id = app.book("Primera memoria", "9788423342", author_id).await;

    let (status, body) = app.get(&format!("/api/books/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["author"]["id"], author_id);
    assert_eq!(body["data"]["author"]["name"], "Ana María Matute");

    let (status, _) = app.get("/api/books/4040").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_book_partial_fields() {
    let app = TestApp::new().await;
    let first = app.author("Emilia Pardo Bazán").await;
    let second = app.author("Leopoldo Alas").await;
    let id = app.book("Los pazos de Ulloa", "9788437600", first).await;

    let (status, body) = app
        .put(
            &format!("/api/books/{}", id),
            json!({ "author_id": second, "publication_year": 1886, "genre": " Realismo ", "available": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let data = &body["data"];
    assert_eq!(data["title"], "Los pazos de Ulloa");
    assert_eq!(data["isbn"], "9788437600");
    assert_eq!(data["author_id"], second);
    assert_eq!(data["author"]["name"], "Leopoldo Alas");
    assert_eq!(data["publication_year"], 1886);
    assert_eq!(data["genre"], "Realismo");
    assert_eq!(data["available"], false);

    let (_, body) = app
        .put(&format!("/api/books/{}", id), json!({ "title": "La Regenta", "isbn": "978-84-376-01" }))
        .await;
    assert_eq!(body["data"]["title"], "La Regenta");
    assert_eq!(body["data"]["isbn"], "978-84-376-01");
}

#[tokio::test]
async fn update_book_with_zero_author_keeps_author() {
    let app = TestApp::new().await;
    let author_id = app.author("Camilo José Cela").await;
    let id = app.book("La colmena", "9788423342660", author_id).await;

    let (status, body) = app
        .put(&format!("/api/books/{}", id), json!({ "author_id": 0 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["author_id"], author_id);
}

#[tokio::test]
async fn update_book_rejections_leave_row_untouched() {
    let app = TestApp::new().await;
    let author_id = app.author("Carmen Laforet").await;
    let id = app.book("Nada", "9788423338", author_id).await;
    app.book("La isla y los demonios", "9788423339", author_id).await;
    let uri = format!("/api/books/{}", id);

    let cases = [
        (json!({ "isbn": "9788423339" }), "isbn already exists on another book"),
        (json!({ "isbn": "97-" }), ""),
        (json!({ "author_id": 77 }), "author does not exist"),
        (json!({ "publication_year": 0 }), "publication_year must be greater than 0"),
        (json!({ "genre": " " }), "genre cannot be only whitespace"),
        (json!({ "title": "" }), ""),
        (json!({ "title": "Nada 2", "available": "no" }), ""),
    ];
    for (patch, expected) in cases {
        let (status, body) = app.put(&uri, patch.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", patch);
        assert_eq!(error_code(&body), "validation_error");
        if !expected.is_empty() {
            assert_eq!(message(&body), expected);
        }
    }

    // Re-using its own isbn is fine, and an empty isbn is ignored.
    let (status, _) = app.put(&uri, json!({ "isbn": "9788423338" })).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.put(&uri, json!({ "isbn": "" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isbn"], "9788423338");

    let (_, body) = app.get(&uri).await;
    assert_eq!(body["data"]["title"], "Nada");
    assert_eq!(body["data"]["available"], true);
}

#[tokio::test]
async fn update_missing_book_is_not_found() {
    let app = TestApp::new().await;
    let (status, _) = app.put("/api/books/3", json!({ "available": true })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_book_then_author() {
    let app = TestApp::new().await;
    let author_id = app.author("Miguel Delibes").await;
    let id = app.book("El camino", "9788423310", author_id).await;

    let (status, body) = app.delete(&format!("/api/books/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "book deleted");
    let (status, _) = app.delete(&format!("/api/books/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete(&format!("/api/authors/{}", author_id)).await;
    assert_eq!(status, StatusCode::OK);
}
