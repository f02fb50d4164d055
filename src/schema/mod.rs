//! Model declarations: raw field definitions and the resolved form used at runtime.

mod resolved;
mod types;

pub use resolved::{resolve, PkKind, ResolvedModel};
pub use types::{FieldDescriptor, FieldKind, ModelDefinition};
