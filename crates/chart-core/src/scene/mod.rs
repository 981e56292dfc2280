// File: crates/chart-core/src/scene/mod.rs
// Summary: Retained scene graph (SVG-like element tree) with selectors, data joins and transitions.
// Notes:
// - Nodes live in an arena addressed by `NodeId`. Removed slots are recycled;
//   ids carry the slot generation, so a stale id simply stops resolving.
// - Operations on unknown ids are no-ops; the scene is the only owner of its nodes.

mod join;
mod selector;
mod svg;
mod transition;

use std::collections::BTreeMap;
use std::fmt;

use crate::color::Color;

pub use join::{JoinKey, JoinedElements};
pub use selector::Selector;
pub use transition::Transition;

use transition::ActiveTransition;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    slot: usize,
    generation: u32,
}

impl NodeId {
    pub fn index(&self) -> usize { self.slot }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Svg,
    Group,
    Rect,
    Text,
    Title,
    Polyline,
    Line,
}

impl ElementKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Svg => "svg",
            ElementKind::Group => "g",
            ElementKind::Rect => "rect",
            ElementKind::Text => "text",
            ElementKind::Title => "title",
            ElementKind::Polyline => "polyline",
            ElementKind::Line => "line",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "svg" => ElementKind::Svg,
            "g" => ElementKind::Group,
            "rect" => ElementKind::Rect,
            "text" => ElementKind::Text,
            "title" => ElementKind::Title,
            "polyline" => ElementKind::Polyline,
            "line" => ElementKind::Line,
            _ => return None,
        })
    }
}

/// Attribute or style value. Numbers interpolate during transitions.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl AttrValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(v) => Some(*v),
            AttrValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Number(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Number(v) => f.write_str(&fmt_num(*v)),
            AttrValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self { AttrValue::Number(v) }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self { AttrValue::Text(v.to_string()) }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self { AttrValue::Text(v) }
}

impl From<Color> for AttrValue {
    fn from(v: Color) -> Self { AttrValue::Text(v.to_css()) }
}

/// Format a number the way SVG attributes expect: no trailing zeros, at most
/// three decimals.
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let s = format!("{:.3}", rounded);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) kind: ElementKind,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: BTreeMap<String, AttrValue>,
    pub(crate) style: BTreeMap<String, AttrValue>,
    pub(crate) text: Option<String>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) key: Option<JoinKey>,
    pub(crate) transition: Option<ActiveTransition>,
}

impl Node {
    fn new(kind: ElementKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            style: BTreeMap::new(),
            text: None,
            children: Vec::new(),
            parent,
            key: None,
            transition: None,
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Element tree rooted at a single node.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
    clock_ms: f64,
}

impl SceneGraph {
    pub fn new(root_kind: ElementKind) -> Self {
        let root = Slot { generation: 0, node: Some(Node::new(root_kind, None)) };
        Self { nodes: vec![root], free: Vec::new(), root: NodeId { slot: 0, generation: 0 }, clock_ms: 0.0 }
    }

    pub fn root(&self) -> NodeId { self.root }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot).filter(|s| s.generation == id.generation).and_then(|s| s.node.as_ref())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.slot).filter(|s| s.generation == id.generation).and_then(|s| s.node.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool { self.node(id).is_some() }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize { self.nodes.len() - self.free.len() }

    /// Arena slots allocated so far, live or free.
    pub fn capacity(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    // ---- structure ---------------------------------------------------------

    /// Append a new element as the last child of `parent`.
    /// Appending to a removed parent creates a detached node that nothing reaches.
    pub fn append(&mut self, parent: NodeId, kind: ElementKind) -> NodeId {
        let attached = self.contains(parent);
        let node = Node::new(kind, attached.then_some(parent));
        let id = match self.free.pop() {
            Some(slot) => {
                let entry = &mut self.nodes[slot];
                entry.generation = entry.generation.wrapping_add(1);
                entry.node = Some(node);
                NodeId { slot, generation: entry.generation }
            }
            None => {
                self.nodes.push(Slot { generation: 0, node: Some(node) });
                NodeId { slot: self.nodes.len() - 1, generation: 0 }
            }
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        id
    }

    /// Append an element carrying one class.
    pub fn append_classed(&mut self, parent: NodeId, kind: ElementKind, class: &str) -> NodeId {
        let id = self.append(parent, kind);
        self.classed(id, class, true);
        id
    }

    /// Remove `id` and its whole subtree. The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root || !self.contains(id) {
            return;
        }
        if let Some(parent) = self.node(id).and_then(|n| n.parent) {
            if let Some(p) = self.node_mut(parent) {
                p.children.retain(|c| *c != id);
            }
        }
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let taken = self
                .nodes
                .get_mut(cur.slot)
                .filter(|s| s.generation == cur.generation)
                .and_then(|s| s.node.take());
            if let Some(node) = taken {
                self.free.push(cur.slot);
                stack.extend(node.children);
            }
        }
    }

    /// Remove every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        let children = self.children(id).to_vec();
        for c in children {
            self.remove(c);
        }
    }

    pub fn kind(&self, id: NodeId) -> Option<ElementKind> { self.node(id).map(|n| n.kind) }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> { self.node(id).and_then(|n| n.parent) }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Pre-order descendants of `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(cur) = stack.pop() {
            out.push(cur);
            stack.extend(self.children(cur).iter().rev().copied());
        }
        out
    }

    // ---- classes, attributes, styles, text ---------------------------------

    pub fn classed(&mut self, id: NodeId, class: &str, on: bool) {
        if let Some(n) = self.node_mut(id) {
            let present = n.classes.iter().any(|c| c == class);
            if on && !present {
                n.classes.push(class.to_string());
            } else if !on && present {
                n.classes.retain(|c| c != class);
            }
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).map(|n| n.classes.iter().any(|c| c == class)).unwrap_or(false)
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        self.node(id).map(|n| n.classes.as_slice()).unwrap_or(&[])
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<AttrValue>) {
        if let Some(n) = self.node_mut(id) {
            n.attrs.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(n) = self.node_mut(id) {
            n.attrs.remove(name);
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&AttrValue> {
        self.node(id).and_then(|n| n.attrs.get(name))
    }

    /// Numeric attribute value, parsing text values when possible.
    pub fn attr_f64(&self, id: NodeId, name: &str) -> Option<f64> {
        self.attr(id, name).and_then(|v| v.as_number())
    }

    pub fn attrs(&self, id: NodeId) -> Option<&BTreeMap<String, AttrValue>> {
        self.node(id).map(|n| &n.attrs)
    }

    pub fn set_style(&mut self, id: NodeId, name: &str, value: impl Into<AttrValue>) {
        if let Some(n) = self.node_mut(id) {
            n.style.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_style(&mut self, id: NodeId, name: &str) {
        if let Some(n) = self.node_mut(id) {
            n.style.remove(name);
        }
    }

    pub fn style(&self, id: NodeId, name: &str) -> Option<&AttrValue> {
        self.node(id).and_then(|n| n.style.get(name))
    }

    pub fn styles(&self, id: NodeId) -> Option<&BTreeMap<String, AttrValue>> {
        self.node(id).map(|n| &n.style)
    }

    /// Replace the text content of `id`. Like DOM `textContent`, this drops any
    /// child elements.
    pub fn set_text(&mut self, id: NodeId, text: Option<&str>) {
        self.clear_children(id);
        if let Some(n) = self.node_mut(id) {
            n.text = text.map(str::to_string);
        }
    }

    /// Own text of `id`, without descendants.
    pub fn own_text(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.text.as_deref())
    }

    /// Concatenated text of `id` and its descendants, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(t) = self.own_text(id) {
            out.push_str(t);
        }
        for d in self.descendants(id) {
            if let Some(t) = self.own_text(d) {
                out.push_str(t);
            }
        }
        out
    }

    pub fn key(&self, id: NodeId) -> Option<&JoinKey> { self.node(id).and_then(|n| n.key.as_ref()) }

    pub fn set_key(&mut self, id: NodeId, key: JoinKey) {
        if let Some(n) = self.node_mut(id) {
            n.key = Some(key);
        }
    }

    // ---- selection ---------------------------------------------------------

    /// All descendants of `context` matching `selector`, in document order.
    pub fn select_all(&self, context: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(context)
            .into_iter()
            .filter(|id| self.node(*id).map(|n| selector.matches(n)).unwrap_or(false))
            .collect()
    }

    /// First descendant of `context` matching `selector`.
    pub fn select(&self, context: NodeId, selector: &Selector) -> Option<NodeId> {
        self.select_all(context, selector).into_iter().next()
    }

    /// Children of `context` matching `selector`.
    pub fn select_children(&self, context: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.children(context)
            .iter()
            .copied()
            .filter(|id| self.node(*id).map(|n| selector.matches(n)).unwrap_or(false))
            .collect()
    }

    /// Descendant query with whitespace-separated compound selectors,
    /// e.g. `".labels .label-text"` or `"g.y rect"`. Unparseable parts match nothing.
    pub fn query(&self, context: NodeId, query: &str) -> Vec<NodeId> {
        let mut current = vec![context];
        for part in query.split_whitespace() {
            let Some(selector) = Selector::parse(part) else {
                return Vec::new();
            };
            let mut next: Vec<NodeId> = Vec::new();
            for ctx in &current {
                for id in self.select_all(*ctx, &selector) {
                    if !next.contains(&id) {
                        next.push(id);
                    }
                }
            }
            current = next;
        }
        // Keep document order across contexts; the context itself never matches.
        self.descendants(context)
            .into_iter()
            .filter(|id| current.contains(id))
            .collect()
    }

    pub fn now_ms(&self) -> f64 { self.clock_ms }
}
