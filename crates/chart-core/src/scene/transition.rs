// File: crates/chart-core/src/scene/transition.rs
// Summary: Timed attribute/style transitions driven by an explicit scene clock.
// Notes:
// - One transition per element. Starting a new one supersedes the running one,
//   keeping whatever intermediate values were already applied.
// - Numeric values interpolate through the easing curve; any other value
//   switches to its target on the first frame.

use tracing::trace;

use super::{AttrValue, NodeId, SceneGraph};
use crate::ease::Easing;

/// Description of a transition to run on one element.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub duration_ms: f64,
    pub easing: Easing,
    attrs: Vec<(String, AttrValue)>,
    styles: Vec<(String, AttrValue)>,
    remove_on_end: bool,
}

impl Transition {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            easing: Easing::CUBIC_IN_OUT,
            attrs: Vec::new(),
            styles: Vec::new(),
            remove_on_end: false,
        }
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn style(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.styles.push((name.to_string(), value.into()));
        self
    }

    /// Remove the element once the transition completes.
    pub fn remove(mut self) -> Self {
        self.remove_on_end = true;
        self
    }
}

#[derive(Clone, Debug)]
struct Tween {
    name: String,
    from: Option<AttrValue>,
    to: AttrValue,
}

impl Tween {
    fn value_at(&self, eased: f64) -> AttrValue {
        match (&self.from, &self.to) {
            (Some(AttrValue::Number(a)), AttrValue::Number(b)) => AttrValue::Number(a + (b - a) * eased),
            _ => self.to.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ActiveTransition {
    start_ms: f64,
    duration_ms: f64,
    easing: Easing,
    attrs: Vec<Tween>,
    styles: Vec<Tween>,
    remove_on_end: bool,
}

impl SceneGraph {
    /// Start `transition` on `id`. Zero or negative durations apply at once.
    pub fn transition(&mut self, id: NodeId, transition: Transition) {
        let now = self.clock_ms;
        let Some(node) = self.node_mut(id) else { return };
        let capture = |map: &std::collections::BTreeMap<String, AttrValue>, items: Vec<(String, AttrValue)>| {
            items
                .into_iter()
                .map(|(name, to)| Tween { from: map.get(&name).cloned(), name, to })
                .collect::<Vec<_>>()
        };
        let active = ActiveTransition {
            start_ms: now,
            duration_ms: transition.duration_ms,
            easing: transition.easing,
            attrs: capture(&node.attrs, transition.attrs),
            styles: capture(&node.style, transition.styles),
            remove_on_end: transition.remove_on_end,
        };
        node.transition = Some(active);
        if transition.duration_ms <= 0.0 {
            self.step_transition(id, true);
        }
    }

    /// Cancel any running transition on `id`, keeping the current values.
    pub fn interrupt(&mut self, id: NodeId) {
        if let Some(n) = self.node_mut(id) {
            n.transition = None;
        }
    }

    pub fn has_transition(&self, id: NodeId) -> bool {
        self.node(id).map(|n| n.transition.is_some()).unwrap_or(false)
    }

    /// Number of elements with a running transition.
    pub fn active_transitions(&self) -> usize {
        self.nodes.iter().filter_map(|s| s.node.as_ref()).filter(|n| n.transition.is_some()).count()
    }

    /// Move the clock forward and apply every running transition.
    pub fn advance(&mut self, elapsed_ms: f64) {
        self.clock_ms += elapsed_ms.max(0.0);
        for id in self.transitioning() {
            self.step_transition(id, false);
        }
    }

    /// Jump every running transition to its end state.
    pub fn finish_transitions(&mut self) {
        let ids = self.transitioning();
        trace!(count = ids.len(), "finish transitions");
        for id in ids {
            self.step_transition(id, true);
        }
    }

    fn transitioning(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(slot, s)| {
                let active = s.node.as_ref().is_some_and(|n| n.transition.is_some());
                active.then_some(NodeId { slot, generation: s.generation })
            })
            .collect()
    }

    fn step_transition(&mut self, id: NodeId, force_end: bool) {
        let now = self.clock_ms;
        let Some(node) = self.node_mut(id) else { return };
        let Some(active) = node.transition.clone() else { return };
        let elapsed = now - active.start_ms;
        let progress = if force_end || active.duration_ms <= 0.0 {
            1.0
        } else {
            (elapsed / active.duration_ms).clamp(0.0, 1.0)
        };
        if progress <= 0.0 {
            return;
        }
        let eased = active.easing.apply(progress);
        for tween in &active.attrs {
            node.attrs.insert(tween.name.clone(), tween.value_at(eased));
        }
        for tween in &active.styles {
            node.style.insert(tween.name.clone(), tween.value_at(eased));
        }
        if progress >= 1.0 {
            node.transition = None;
            if active.remove_on_end {
                self.remove(id);
            }
        }
    }
}
