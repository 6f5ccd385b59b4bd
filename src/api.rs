//! HTTP API for the `/ask` service

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::responder::Responder;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub responder: Arc<Responder>,
}

impl AppState {
    pub fn new(responder: Responder) -> Self {
        Self {
            responder: Arc::new(responder),
        }
    }
}
