//! Axum router construction.
//!
//! [`build`] assembles the complete application router:
//! - Middleware layers (CORS, per-request trace id)
//! - Optional Swagger UI / OpenAPI document (disable with `CHATAI_ENABLE_SWAGGER=false`)
//! - Health route
//! - Project, prompt, file and transcript routes
//! - The JSON chat endpoint and the HTML chat page

mod chat;
mod chat_page;
mod dashboard;
pub mod doc;
mod files;
mod health;
mod messages;
mod projects;
mod prompts;

use std::sync::Arc;

use axum::{Router, middleware};
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{cors, trace};
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(health::router())
        .merge(dashboard::router())
        .merge(projects::router())
        .merge(prompts::router())
        .merge(files::router(state.config.max_upload_bytes))
        .merge(messages::router())
        .merge(chat::router())
        .merge(chat_page::router());

    if state.config.enable_swagger {
        app = app
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(cors::cors_layer(&state.config))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}
