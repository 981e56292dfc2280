// File: crates/chart-core/src/scene/svg.rs
// Summary: Serialize a scene graph to SVG markup.

use std::fmt::Write as _;

use super::{ElementKind, NodeId, SceneGraph};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl SceneGraph {
    /// SVG document for the whole scene.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        self.write_node(&mut out, self.root(), 0);
        out
    }

    /// SVG fragment for the subtree rooted at `id`.
    pub fn to_svg_fragment(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(&mut out, id, 0);
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId, depth: usize) {
        let Some(node) = self.node(id) else { return };
        let indent = "  ".repeat(depth);
        let tag = node.kind.tag();
        let _ = write!(out, "{indent}<{tag}");
        if node.kind == ElementKind::Svg && node.parent.is_none() {
            let _ = write!(out, " xmlns=\"{SVG_NS}\"");
        }
        if !node.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&node.classes.join(" ")));
        }
        for (name, value) in &node.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(&value.to_string()));
        }
        if !node.style.is_empty() {
            let style = node
                .style
                .iter()
                .map(|(k, v)| format!("{k}:{v}"))
                .collect::<Vec<_>>()
                .join(";");
            let _ = write!(out, " style=\"{}\"", escape(&style));
        }
        if node.children.is_empty() && node.text.is_none() {
            out.push_str("/>\n");
            return;
        }
        out.push('>');
        if let Some(text) = &node.text {
            out.push_str(&escape(text));
        }
        if node.children.is_empty() {
            let _ = writeln!(out, "</{tag}>");
            return;
        }
        out.push('\n');
        for child in &node.children {
            self.write_node(out, *child, depth + 1);
        }
        let _ = writeln!(out, "{indent}</{tag}>");
    }
}
