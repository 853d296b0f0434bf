//! Route handlers organized by resource

use serde::Serialize;

pub mod categories;
pub mod health;
pub mod products;

/// `{"message": ...}` acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn deleted(resource: &str, id: i32) -> Self {
        Self {
            message: format!("{} with id {} deleted successfully.", resource, id),
        }
    }
}
