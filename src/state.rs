// src/state.rs
use std::sync::Arc;

use crate::events::{EventSink, TracingSink};
use crate::store::ProductStore;
use crate::validation::ProductSchema;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub events: Arc<dyn EventSink>,
    pub schema: ProductSchema,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            store,
            events: Arc::new(TracingSink),
            schema: ProductSchema,
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }
}
