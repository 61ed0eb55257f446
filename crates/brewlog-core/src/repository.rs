// ABOUTME: Persistence contract for brew records, implemented by the SQLite store.
// ABOUTME: Keeps the record service independent of any particular storage backend.

use crate::model::{Brew, BrewId, NewBrew, Page};

/// Primitive row access over stored brews. Implementations own id
/// assignment and timestamping; callers pass only validated fields.
pub trait BrewRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up a brew by primary key.
    fn find_by_id(&self, id: BrewId) -> Result<Option<Brew>, Self::Error>;

    /// Newest first by `created_at`. A `skip` past the end yields an empty list.
    fn list(&self, page: Page) -> Result<Vec<Brew>, Self::Error>;

    /// Assign a fresh id, stamp `created_at`, and persist.
    fn insert(&self, fields: &NewBrew) -> Result<Brew, Self::Error>;

    /// Overwrite every user field and stamp `updated_at`. `None` when the id
    /// does not exist, in which case nothing is written.
    fn replace(&self, id: BrewId, fields: &NewBrew) -> Result<Option<Brew>, Self::Error>;

    /// Remove permanently. Returns false when the id does not exist.
    fn delete(&self, id: BrewId) -> Result<bool, Self::Error>;
}
