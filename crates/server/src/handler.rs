//! axum routes for the quiz.

use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::error::WebError;
use crate::page;
use crate::quiz::{Next, Quiz};

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    q: usize,
}

/// Unwrap `?q=`; anything but a non-negative integer is a bad request.
fn index_of(query: Result<Query<IndexQuery>, QueryRejection>) -> Result<usize, WebError> {
    query
        .map(|Query(params)| params.q)
        .map_err(|rejection| WebError::InvalidInput(format!("q must be a poem index: {}", rejection.body_text())))
}

fn redirect_to_poem(index: usize) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, format!("./poem?q={index}"))]).into_response()
}

fn after_answer(next: Next) -> Response {
    match next {
        Next::Poem(index) => redirect_to_poem(index),
        Next::Complete => Html(page::complete()).into_response(),
    }
}

pub fn router(quiz: Arc<Quiz>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/list", get(list))
        .route("/randpoem", get(random_poem))
        .route("/poem", get(poem))
        .route("/wrong", get(wrong))
        .route("/correct", get(correct))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(quiz)
}

async fn home() -> Html<&'static str> {
    Html(page::footer())
}

async fn list(State(quiz): State<Arc<Quiz>>) -> Html<String> {
    Html(page::list(&quiz.status().await))
}

async fn random_poem(State(quiz): State<Arc<Quiz>>) -> Response {
    redirect_to_poem(quiz.random_index())
}

async fn poem(
    State(quiz): State<Arc<Quiz>>, query: Result<Query<IndexQuery>, QueryRejection>,
) -> Result<Html<String>, WebError> {
    let index = index_of(query)?;
    let round = quiz.question(index).await?;
    Ok(Html(page::poem(&round)))
}

async fn wrong(
    State(quiz): State<Arc<Quiz>>, query: Result<Query<IndexQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let index = index_of(query)?;
    Ok(after_answer(quiz.mark_wrong(index).await?))
}

async fn correct(
    State(quiz): State<Arc<Quiz>>, query: Result<Query<IndexQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let index = index_of(query)?;
    Ok(after_answer(quiz.mark_correct(index).await?))
}

async fn not_found(uri: Uri) -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(page::escape(&uri.to_string())))
}
