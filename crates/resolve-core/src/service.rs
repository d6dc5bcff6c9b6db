//! Operation layer over the record store
//!
//! Stateless per-call semantics: every operation is a single independent
//! read, or a single fetch-modify-reinsert on one record. Timestamps and
//! fresh ids come from the injected collaborators.

use crate::clock::{Clock, SystemClock};
use crate::db::RecordStore;
use crate::error::{Error, Result};
use crate::ids::{IdSource, UuidSource};
use crate::models::{FieldUpdate, Resolution, ResolutionId, ResolutionPayload};

/// CRUD, filter, and search operations over a record store
pub struct ResolutionService<S: RecordStore> {
    store: S,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,
}

impl<S: RecordStore> ResolutionService<S> {
    /// Create a service with the host clock and random UUIDs
    pub fn new(store: S) -> Self {
        Self::with_collaborators(store, Box::new(SystemClock), Box::new(UuidSource))
    }

    /// Create a service with explicit clock and id collaborators
    pub fn with_collaborators(store: S, clock: Box<dyn Clock>, ids: Box<dyn IdSource>) -> Self {
        Self { store, clock, ids }
    }

    /// Create a new resolution from a payload
    ///
    /// Generates a fresh id, starts with no tags and no `updated_at`. A store
    /// fault here surfaces as an opaque creation error.
    pub fn create(&mut self, payload: ResolutionPayload) -> Result<Resolution> {
        let record = Resolution::new(self.ids.new_id(), payload, self.clock.now());

        self.store
            .insert(&record)
            .map_err(|e| Error::CreationFailed(e.to_string()))?;

        tracing::debug!(id = %record.id, "created resolution");
        Ok(record)
    }

    /// Get a resolution by id
    pub fn get(&self, id: &ResolutionId) -> Result<Resolution> {
        self.store
            .get(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// All resolutions in store order; empty when the store is empty
    pub fn list(&self) -> Result<Vec<Resolution>> {
        self.store.values()
    }

    /// Replace exactly one named field of a record
    ///
    /// This path never touches `updated_at`; only the full-payload update
    /// does.
    pub fn set_field(&mut self, id: &ResolutionId, update: FieldUpdate) -> Result<Resolution> {
        let mut record = self.get(id)?;
        tracing::debug!(id = %id, field = update.field_name(), "updating field");
        update.apply(&mut record);
        self.store.insert(&record)?;
        Ok(record)
    }

    /// Replace every payload field and stamp `updated_at`
    ///
    /// Tags are left untouched by this path.
    pub fn update(&mut self, id: &ResolutionId, payload: ResolutionPayload) -> Result<Resolution> {
        let mut record = self.get(id)?;
        record.apply_payload(payload);
        record.updated_at = Some(self.clock.now());
        self.store.insert(&record)?;
        Ok(record)
    }

    /// Delete a resolution, returning the removed record
    pub fn delete(&mut self, id: &ResolutionId) -> Result<Resolution> {
        self.store
            .remove(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Replace the record's entire tag sequence with the given tags
    ///
    /// Wholesale replace, not a set union: the previous tags are discarded.
    pub fn insert_tags(&mut self, id: &ResolutionId, tags: Vec<String>) -> Result<Resolution> {
        self.replace_tags(id, tags)
    }

    /// Replace the record's entire tag sequence with the given tags
    ///
    /// Wholesale replace, not a set difference: passing an empty sequence
    /// clears all tags.
    pub fn delete_tags(&mut self, id: &ResolutionId, tags: Vec<String>) -> Result<Resolution> {
        self.replace_tags(id, tags)
    }

    fn replace_tags(&mut self, id: &ResolutionId, tags: Vec<String>) -> Result<Resolution> {
        let mut record = self.get(id)?;
        record.tags = tags;
        self.store.insert(&record)?;
        Ok(record)
    }

    /// All resolutions whose category equals the given string exactly
    pub fn by_category(&self, category: &str) -> Result<Vec<Resolution>> {
        let matches = self
            .store
            .values()?
            .into_iter()
            .filter(|record| record.category == category)
            .collect();
        Ok(matches)
    }

    /// All resolutions matching a query
    ///
    /// A record matches if the query is a substring of its name or
    /// description, or equals one of its tags exactly. Case-sensitive, no
    /// ranking; results keep store order.
    pub fn search(&self, query: &str) -> Result<Vec<Resolution>> {
        let matches = self
            .store
            .values()?
            .into_iter()
            .filter(|record| record.matches(query))
            .collect();
        Ok(matches)
    }
}
