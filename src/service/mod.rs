//! Product service: validation plus CRUD over the configured store.

mod crud;
mod validation;
pub use crud::CrudService;
pub use validation::RequestValidator;
