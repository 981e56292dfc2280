// File: crates/chart-core/src/scene/selector.rs
// Summary: Simple element selectors (`tag`, `.class`, `tag.class`).

use super::{ElementKind, Node};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Class(String),
    Tag(ElementKind),
    TagClass(ElementKind, String),
}

impl Selector {
    pub fn class(class: &str) -> Self {
        Selector::Class(class.to_string())
    }

    pub fn tag(kind: ElementKind) -> Self {
        Selector::Tag(kind)
    }

    pub fn tag_class(kind: ElementKind, class: &str) -> Self {
        Selector::TagClass(kind, class.to_string())
    }

    /// Parse a single compound selector. Multiple classes are not supported.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        match s.split_once('.') {
            Some(("", class)) if !class.is_empty() => Some(Selector::class(class)),
            Some((tag, class)) if !class.is_empty() => {
                ElementKind::from_tag(tag).map(|k| Selector::tag_class(k, class))
            }
            Some(_) => None,
            None => ElementKind::from_tag(s).map(Selector::Tag),
        }
    }

    pub(crate) fn matches(&self, node: &Node) -> bool {
        let has = |c: &str| node.classes.iter().any(|x| x == c);
        match self {
            Selector::Class(c) => has(c),
            Selector::Tag(k) => node.kind == *k,
            Selector::TagClass(k, c) => node.kind == *k && has(c),
        }
    }

    /// CSS text of the selector (`.label`, `rect`, `text.label`).
    pub fn to_css(&self) -> String {
        match self {
            Selector::Class(c) => format!(".{c}"),
            Selector::Tag(k) => k.tag().to_string(),
            Selector::TagClass(k, c) => format!("{}.{c}", k.tag()),
        }
    }
}
