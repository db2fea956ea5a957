//! To-many relationships on persisted records
//!
//! The persistence layer owns the real storage; [`Relationships`] is the
//! seam it implements. [`Record`] is an in-memory implementation for
//! embedders without a store and for tests.

use crate::core::error::{Error, Result};
use indexmap::{IndexMap, IndexSet};
use std::hash::Hash;

/// A record exposing its to-many relationships as mutable sets.
pub trait Relationships {
    type Object: Hash + Eq;

    /// The live set behind the relationship `key`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownRelationship`] if the record has no such relationship.
    fn mutable_set(&mut self, key: &str) -> Result<&mut IndexSet<Self::Object>>;

    /// Appends `value` to the relationship `key`.
    ///
    /// Returns `false` when `value` was already related.
    fn add_object(&mut self, value: Self::Object, key: &str) -> Result<bool> {
        Ok(self.mutable_set(key)?.insert(value))
    }
}

/// Record with a fixed set of declared relationships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<T: Hash + Eq> {
    relationships: IndexMap<String, IndexSet<T>>,
}

impl<T: Hash + Eq> Record<T> {
    pub fn new<I, S>(relationship_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let relationships = relationship_names
            .into_iter()
            .map(|name| (name.into(), IndexSet::new()))
            .collect();
        Self { relationships }
    }

    pub fn related(&self, key: &str) -> Option<&IndexSet<T>> {
        self.relationships.get(key)
    }

    pub fn relationship_names(&self) -> impl Iterator<Item = &str> {
        self.relationships.keys().map(String::as_str)
    }
}

impl<T: Hash + Eq> Relationships for Record<T> {
    type Object = T;

    fn mutable_set(&mut self, key: &str) -> Result<&mut IndexSet<T>> {
        self.relationships
            .get_mut(key)
            .ok_or_else(|| Error::UnknownRelationship(key.to_string()))
    }
}
