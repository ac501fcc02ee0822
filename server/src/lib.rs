//! HTTP server for the users API.
//!
//! # Design
//! Thin axum handlers over [`store::UserStore`]. The store is shared as
//! `Arc<RwLock<UserStore>>`: reads take the read guard, create/update/delete
//! take the write guard, so concurrent requests against one process cannot
//! race the collection. Handlers map the store's `None` to 404; everything
//! else the extractors reject on their own (bad id path segment, malformed
//! JSON body).

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub mod store;

pub use store::{User, UserPayload, UserStore};

type Db = Arc<RwLock<UserStore>>;

/// Build the router over a fresh, empty store.
pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(UserStore::new()));
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "users server listening");
    }
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let users = db.read().await.list();
    debug!(count = users.len(), "list users");
    Json(users)
}

async fn create_user(State(db): State<Db>, Json(payload): Json<UserPayload>) -> Json<User> {
    let user = db.write().await.create(payload);
    info!(id = user.id, "created user");
    Json(user)
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<User>, StatusCode> {
    db.read().await.get(id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<User>, StatusCode> {
    let updated = db.write().await.update(id, payload);
    match updated {
        Some(user) => {
            info!(id, "updated user");
            Ok(Json(user))
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn delete_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    match db.write().await.delete(id) {
        Some(()) => {
            info!(id, "deleted user");
            Ok(StatusCode::OK)
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}
