// ABOUTME: Core library for brewlog, containing the brew record model and its validation rules.
// ABOUTME: Also defines the storage-agnostic repository contract and the record service on top of it.

pub mod model;
pub mod repository;
pub mod service;
pub mod validation;

pub use model::{Brew, BrewId, BrewInput, NewBrew, Page, PageQuery};
pub use repository::BrewRepository;
pub use service::BrewService;
pub use validation::{FieldError, Location, ValidationError};
