use std::sync::Arc;

use service::gapminder::GapminderSource;

/// Shared handler state, built once in `startup` and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn GapminderSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn GapminderSource>) -> Self {
        Self { source }
    }
}
