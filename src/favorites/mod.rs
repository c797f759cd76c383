use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod repo;
mod repo_types;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::favorite_routes())
}
