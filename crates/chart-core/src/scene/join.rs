// File: crates/chart-core/src/scene/join.rs
// Summary: Keyed data join (enter/update/exit) between a data slice and existing elements.

use std::collections::HashMap;

use tracing::trace;

use super::{ElementKind, NodeId, SceneGraph, Selector};

/// Identity used to match data items with existing elements.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum JoinKey {
    Key(String),
    Index(usize),
}

impl From<&str> for JoinKey {
    fn from(v: &str) -> Self { JoinKey::Key(v.to_string()) }
}

impl From<String> for JoinKey {
    fn from(v: String) -> Self { JoinKey::Key(v) }
}

impl From<usize> for JoinKey {
    fn from(v: usize) -> Self { JoinKey::Index(v) }
}

/// Result of a join. Entered elements are already created; exiting elements
/// are still attached so the caller can remove them or fade them out.
#[derive(Clone, Debug, Default)]
pub struct JoinedElements {
    /// (element, data index) for newly created elements.
    pub entered: Vec<(NodeId, usize)>,
    /// (element, data index) for elements whose key matched a data item.
    pub updated: Vec<(NodeId, usize)>,
    /// Elements whose key matched no data item, in document order.
    pub exiting: Vec<NodeId>,
}

impl JoinedElements {
    /// Entered and updated elements together, ordered by data index.
    pub fn all(&self) -> Vec<(NodeId, usize)> {
        let mut all: Vec<(NodeId, usize)> =
            self.entered.iter().chain(self.updated.iter()).copied().collect();
        all.sort_by_key(|(_, i)| *i);
        all
    }

    pub fn len(&self) -> usize { self.entered.len() + self.updated.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl SceneGraph {
    /// Join `data` against the descendants of `context` matching `selector`.
    ///
    /// Elements are matched by the key stored when they entered; elements
    /// without a stored key use their position in the selection. When keys
    /// repeat, the first data item wins and later duplicates enter; the first
    /// element wins and later duplicates exit. New elements of `kind` are
    /// appended to `context`, tagged with `class` when given.
    pub fn join<T, F>(
        &mut self,
        context: NodeId,
        selector: &Selector,
        kind: ElementKind,
        class: Option<&str>,
        data: &[T],
        key_fn: F,
    ) -> JoinedElements
    where
        F: Fn(&T, usize) -> JoinKey,
    {
        let existing = self.select_all(context, selector);
        let mut by_key: HashMap<JoinKey, NodeId> = HashMap::with_capacity(existing.len());
        let mut duplicates: Vec<NodeId> = Vec::new();
        for (i, id) in existing.iter().enumerate() {
            let key = self.key(*id).cloned().unwrap_or(JoinKey::Index(i));
            if by_key.contains_key(&key) {
                duplicates.push(*id);
            } else {
                by_key.insert(key, *id);
            }
        }

        let mut joined = JoinedElements::default();
        let mut pending_enter: Vec<(usize, JoinKey)> = Vec::new();
        for (i, datum) in data.iter().enumerate() {
            let key = key_fn(datum, i);
            match by_key.remove(&key) {
                Some(id) => joined.updated.push((id, i)),
                None => pending_enter.push((i, key)),
            }
        }

        joined.exiting = existing
            .iter()
            .copied()
            .filter(|id| duplicates.contains(id) || by_key.values().any(|v| v == id))
            .collect();

        for (i, key) in pending_enter {
            let id = self.append(context, kind);
            if let Some(c) = class {
                self.classed(id, c, true);
            }
            self.set_key(id, key);
            joined.entered.push((id, i));
        }

        trace!(
            selector = %selector.to_css(),
            enter = joined.entered.len(),
            update = joined.updated.len(),
            exit = joined.exiting.len(),
            "data join"
        );
        joined
    }

    /// Remove every exiting element of a join immediately.
    pub fn remove_exiting(&mut self, joined: &JoinedElements) {
        for id in &joined.exiting {
            self.remove(*id);
        }
    }
}
