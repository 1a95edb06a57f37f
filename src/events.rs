//! Hook invoked after every product mutation and every rejected payload.

use tracing::{error, info};

use crate::validation::FieldErrors;

#[derive(Debug, Clone, PartialEq)]
pub enum ProductEvent {
    Added { id: i64, name: String },
    Updated { id: i64 },
    Deleted { id: i64 },
    /// A create or update body failed validation; `id` is set for updates.
    Rejected {
        action: &'static str,
        id: Option<i64>,
        errors: FieldErrors,
    },
}

pub trait EventSink: Send + Sync {
    fn record(&self, event: &ProductEvent);
}

/// Default sink: writes events to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &ProductEvent) {
        match event {
            ProductEvent::Added { id, name } => info!(id, %name, "Added new product: {name}"),
            ProductEvent::Updated { id } => info!(id, "Updated product with ID {id}"),
            ProductEvent::Deleted { id } => info!(id, "Deleted product with ID {id}"),
            ProductEvent::Rejected {
                action,
                id: Some(id),
                errors,
            } => error!(id, ?errors, "Validation error while {action} product ID {id}"),
            ProductEvent::Rejected {
                action,
                id: None,
                errors,
            } => error!(?errors, "Validation error while {action} product"),
        }
    }
}
