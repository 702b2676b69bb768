use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::filter::entities::field::{FieldDescriptor, FieldsProvider};

/// Relation nesting never goes deeper than this during lookups.
pub const MAX_RELATION_DEPTH: usize = 3;

/// Memoizing view over a field set for the duration of one traversal.
///
/// Each relation provider is resolved at most once, keyed by the relation
/// field's name (names are unique across nesting levels).
pub struct FieldResolver {
    root: Arc<Vec<FieldDescriptor>>,
    cache: RefCell<HashMap<String, Arc<Vec<FieldDescriptor>>>>,
}

impl FieldResolver {
    pub fn new(fields: &FieldsProvider) -> Self {
        Self {
            root: fields.resolve(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> Arc<Vec<FieldDescriptor>> {
        Arc::clone(&self.root)
    }

    /// Sub-fields of a relation; empty for scalar fields.
    pub fn relation_fields(&self, field: &FieldDescriptor) -> Arc<Vec<FieldDescriptor>> {
        let Some(relation) = &field.relation else {
            return Arc::new(Vec::new());
        };

        if let Some(cached) = self.cache.borrow().get(&field.name) {
            return Arc::clone(cached);
        }

        let resolved = relation.fields.resolve();
        self.cache
            .borrow_mut()
            .insert(field.name.clone(), Arc::clone(&resolved));
        resolved
    }

    /// Finds the descriptor for `key` reached through `current_path`.
    ///
    /// The current scope is searched by target path first, then the whole
    /// tree depth-first by full name, then depth-first by target path.
    pub fn find(
        &self,
        scope: &[FieldDescriptor],
        key: &str,
        current_path: &str,
    ) -> Option<FieldDescriptor> {
        if let Some(field) = scope.iter().find(|f| f.target_field_path == key) {
            return Some(field.clone());
        }

        let root = self.root();
        self.search(&root, 0, &|f: &FieldDescriptor| f.name == current_path)
            .or_else(|| self.search(&root, 0, &|f: &FieldDescriptor| f.target_field_path == key))
    }

    fn search(
        &self,
        fields: &[FieldDescriptor],
        depth: usize,
        predicate: &dyn Fn(&FieldDescriptor) -> bool,
    ) -> Option<FieldDescriptor> {
        if let Some(found) = fields.iter().find(|f| predicate(f)) {
            return Some(found.clone());
        }
        if depth + 1 >= MAX_RELATION_DEPTH {
            return None;
        }

        fields
            .iter()
            .filter(|f| f.is_relation())
            .find_map(|f| self.search(&self.relation_fields(f), depth + 1, predicate))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn looped(prefix: String, calls: &'static AtomicUsize) -> Vec<FieldDescriptor> {
        let child = format!("{prefix}parent__");
        vec![
            FieldDescriptor::text(&format!("{prefix}name"), "Nome"),
            FieldDescriptor::to_one(
                &format!("{prefix}parent"),
                "Pai",
                FieldsProvider::deferred(move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    looped(child.clone(), calls)
                }),
            ),
        ]
    }

    #[test]
    fn test_self_referential_search_terminates() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let resolver = FieldResolver::new(&FieldsProvider::resolved(looped(String::new(), &CALLS)));

        let root = resolver.root();
        assert!(resolver.find(&root, "missing", "missing").is_none());
        assert!(CALLS.load(Ordering::SeqCst) <= MAX_RELATION_DEPTH);
    }

    #[test]
    fn test_relation_fields_are_memoized() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let resolver = FieldResolver::new(&FieldsProvider::resolved(looped(String::new(), &CALLS)));
        let root = resolver.root();
        let parent = root.iter().find(|f| f.name == "parent").cloned();

        let parent = parent.expect("parent relation");
        resolver.relation_fields(&parent);
        resolver.relation_fields(&parent);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_find_by_full_name_in_relation() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let resolver = FieldResolver::new(&FieldsProvider::resolved(looped(String::new(), &CALLS)));

        let found = resolver.find(&[], "name", "parent__name");
        assert_eq!(found.map(|f| f.name), Some("parent__name".to_string()));
    }
}
