//! Domain models with validation at construction
//!
//! Request bodies are read into wire structs, then converted into
//! validated values (`NewProduct`, `ProductChanges`, ...) before any
//! store access. Invalid input returns ValidationError, not panic.

pub mod category;
pub mod field;
pub mod product;
pub mod validation;

pub use category::{Category, CategoryChanges, CategoryInput, CategoryPatch, NewCategory};
pub use product::{NewProduct, Product, ProductChanges, ProductInput, ProductPatch};
pub use validation::ValidationError;
