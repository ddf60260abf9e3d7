// Domain layer - business logic, entities, value objects
// No dependencies on other layers

pub mod entities;
pub mod value_objects;
pub mod events;
pub mod error;

pub use entities::*;
pub use value_objects::*;
pub use events::*;
pub use error::{DomainError, FieldError};
