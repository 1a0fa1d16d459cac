use std::sync::Arc;

use crate::adapters::inbound::http::ServiceFactory;

#[derive(Clone)]
pub struct AppState {
    pub factory: Arc<dyn ServiceFactory>,
}

impl AppState {
    pub fn new(factory: Arc<dyn ServiceFactory>) -> Self {
        Self { factory }
    }
}
