// ABOUTME: Persistence layer for brewlog, storing brew records in SQLite.
// ABOUTME: Provides the Database handle and per-request sessions implementing BrewRepository.

pub mod sqlite;

pub use sqlite::{BrewSession, Database, StoreError};
