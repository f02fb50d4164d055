//! Per-router state: one model's resolved declaration and its access API.

use crate::model::ModelAccess;
use crate::schema::ResolvedModel;
use std::sync::Arc;

#[derive(Clone)]
pub struct ModelState {
    pub resolved: Arc<ResolvedModel>,
    pub model: Arc<dyn ModelAccess>,
}
