//! HTTP front end for the todo store.
//!
//! Each handler validates its input, runs exactly one `TodoStore`
//! operation and answers with a conventional status code. Anything not under
//! `/todos` falls through to static files.

pub mod config;
pub mod error;

use std::future::Future;
use std::path::Path as FsPath;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use error::ApiError;
pub use todo_core::{Todo, TodoStore};

pub fn app(store: TodoStore, static_dir: impl AsRef<FsPath>) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(
    listener: TcpListener,
    store: TodoStore,
    static_dir: impl AsRef<FsPath>,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(store, static_dir))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Serve until Ctrl-C or SIGTERM.
pub async fn run(
    listener: TcpListener,
    store: TodoStore,
    static_dir: impl AsRef<FsPath>,
) -> Result<(), std::io::Error> {
    serve(listener, store, static_dir, shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

fn parse_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn parse_todo(body: &[u8]) -> Result<Todo, ApiError> {
    serde_json::from_slice(body).map_err(|err| ApiError::BadRequest(err.to_string()))
}

async fn list_todos(State(store): State<TodoStore>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(store.list().await?))
}

async fn get_todo(
    State(store): State<TodoStore>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(id)?;
    Ok(Json(store.get(id).await?))
}

async fn create_todo(
    State(store): State<TodoStore>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let todo = parse_todo(&body)?;
    let id = store.create(&todo).await?;
    Ok((StatusCode::CREATED, [(header::LOCATION, format!("/todos/{id}"))]))
}

async fn update_todo(
    State(store): State<TodoStore>,
    id: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(id)?;
    let todo = parse_todo(&body)?.with_id(id);
    store.update(&todo).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_todo(
    State(store): State<TodoStore>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(id)?;
    store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_todo_accepts_partial_body() {
        let todo = parse_todo(br#"{"description":"buy milk"}"#).unwrap();
        assert_eq!(todo, Todo::new("buy milk", false));
    }

    #[test]
    fn parse_todo_rejects_malformed_json() {
        assert!(matches!(parse_todo(b"{"), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_todo(b""), Err(ApiError::BadRequest(_))));
        assert!(matches!(
            parse_todo(br#"{"completed":"no"}"#),
            Err(ApiError::BadRequest(_))
        ));
    }
}
