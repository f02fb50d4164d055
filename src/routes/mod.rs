//! Router synthesis: entity CRUD routes per model, plus common routes.

mod common;
mod entity;

pub use common::common_routes;
pub use entity::{entity_routes, rest_routes};
