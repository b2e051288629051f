//! # Object Cache
//!
//! Per-type lazy maps from a decoded value to its witnessed object.
//!
//! A map is either *loaded* (it holds every object of its type) or *partial*
//! (it holds point lookups only). Inserting into a partial map marks it as
//! holding unsaved state: the next full load must first be preceded by a
//! clear, which the model does when it sees `has_new`.

use crate::object::OntObject;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, trace};

/// Lazy cache for one object type.
#[derive(Debug, Clone)]
pub struct ObjectMap<X: Ord> {
    objects: BTreeMap<X, Arc<OntObject<X>>>,
    loaded: bool,
    has_new: bool,
    label: String,
}

impl<X> ObjectMap<X>
where
    X: Ord + Clone + Debug + Send + Sync,
{
    /// An empty, unloaded map. `label` only appears in log events.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            objects: BTreeMap::new(),
            loaded: false,
            has_new: false,
            label: label.into(),
        }
    }

    /// Point lookup. Never triggers a full load; consults `lookup` only
    /// when the map is partial and the key is not cached yet.
    pub fn get<E>(
        &mut self,
        key: &X,
        lookup: impl FnOnce(&X) -> Result<Option<OntObject<X>>, E>,
    ) -> Result<Option<Arc<OntObject<X>>>, E> {
        if let Some(found) = self.objects.get(key) {
            return Ok(Some(Arc::clone(found)));
        }
        if self.loaded {
            return Ok(None);
        }
        let Some(object) = lookup(key)? else {
            return Ok(None);
        };
        let object = Arc::new(object);
        self.objects.insert(key.clone(), Arc::clone(&object));
        Ok(Some(object))
    }

    /// Fill the map from a full scan. A no-op when already loaded, or when
    /// the map holds unsaved state the caller must clear first.
    pub fn load<E>(&mut self, scan: impl FnOnce() -> Result<Vec<OntObject<X>>, E>) -> Result<(), E> {
        if self.loaded || self.has_new {
            return Ok(());
        }
        let objects = scan()?;
        debug!(map = %self.label, count = objects.len(), "loading object map");
        for object in objects {
            // Point lookups already cached stay as they are.
            self.objects
                .entry(object.value().clone())
                .or_insert_with(|| Arc::new(object));
        }
        self.loaded = true;
        Ok(())
    }

    /// Cache an object written by the caller. An equal object already
    /// cached keeps its witnesses; the new ones are added to them.
    pub fn insert(&mut self, object: OntObject<X>) -> Arc<OntObject<X>> {
        if !self.loaded {
            self.has_new = true;
        }
        let object = match self.objects.remove(object.value()) {
            Some(existing) => {
                let mut merged = OntObject::clone(&existing);
                merged.merge(object);
                merged
            }
            None => object,
        };
        let object = Arc::new(object);
        self.objects.insert(object.value().clone(), Arc::clone(&object));
        object
    }

    pub fn remove(&mut self, key: &X) -> Option<Arc<OntObject<X>>> {
        self.objects.remove(key)
    }

    /// Drop everything and return to the unloaded state.
    pub fn clear(&mut self) {
        if !self.objects.is_empty() || self.loaded {
            trace!(map = %self.label, evicted = self.objects.len(), "clearing object map");
        }
        self.objects.clear();
        self.loaded = false;
        self.has_new = false;
    }

    pub fn keys(&self) -> impl Iterator<Item = &X> {
        self.objects.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Arc<OntObject<X>>> {
        self.objects.values()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn has_new(&self) -> bool {
        self.has_new
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
