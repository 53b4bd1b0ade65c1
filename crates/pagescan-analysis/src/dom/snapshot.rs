//! Frozen DOM snapshot.
//!
//! A `DomSnapshot` is the materialized page the collaborator hands to the
//! core: an arena of elements in document order with layout geometry and a
//! computed-style subset. It is read-only for the duration of a scan;
//! concurrent page mutation is out of contract and at worst yields a stale
//! index, never a crash.

use serde::{Deserialize, Serialize};

use pagescan_core::types::collections::{FxHashMap, SmallVec4};
use pagescan_core::{NodeId, Rect};

/// Subset of computed style the checkers consume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputedStyle {
    pub display: Option<String>,
    pub position: Option<String>,
    pub z_index: Option<i32>,
    pub outline_style: Option<String>,
    pub outline_width: Option<f32>,
    pub outline_color: Option<String>,
    pub box_shadow: Option<String>,
    pub background_color: Option<String>,
}

/// One rendered element in the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementNode {
    pub id: NodeId,
    pub tag: String,
    pub attributes: FxHashMap<String, String>,
    pub classes: SmallVec4<String>,
    pub text: Option<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub bounds: Option<Rect>,
    pub style: ComputedStyle,
    pub focused: bool,
    /// Opening-tag HTML captured at snapshot time, used for snippets.
    pub html: String,
}

impl ElementNode {
    /// The element's `id` attribute, if non-empty.
    pub fn id_attr(&self) -> Option<&str> {
        self.attributes.get("id").map(|s| s.as_str()).filter(|s| !s.is_empty())
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Frozen arena of rendered elements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomSnapshot {
    nodes: Vec<ElementNode>,
    root: Option<NodeId>,
}

impl DomSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element under `parent` (or as the root when `parent` is
    /// `None` and no root exists yet). Returns the new node's identity.
    pub fn add(&mut self, parent: Option<NodeId>, builder: ElementBuilder) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        let node = builder.build(id, parent);
        if let Some(parent_id) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent_id.index()) {
                parent_node.children.push(id);
            }
        } else if self.root.is_none() {
            self.root = Some(id);
        }
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&ElementNode> {
        self.nodes.get(id.index())
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The currently focused element, if any.
    pub fn focused(&self) -> Option<&ElementNode> {
        self.nodes.iter().find(|n| n.focused)
    }

    /// All elements in document (pre-order) sequence.
    pub fn document_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let Some(root) = self.root else {
            return order;
        };
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.get(id) {
                // Reverse so the first child is visited first.
                for &child in node.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
        // Nodes detached from the root (none in a well-formed snapshot)
        // still participate, after the rooted subtree.
        if order.len() < self.nodes.len() {
            let mut seen = vec![false; self.nodes.len()];
            for &id in &order {
                seen[id.index()] = true;
            }
            for (index, _) in self.nodes.iter().enumerate() {
                if !seen[index] {
                    order.push(NodeId::new(index as u32));
                }
            }
        }
        order
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.get(id).and_then(|n| n.parent);
        while let Some(parent_id) = current {
            chain.push(parent_id);
            current = self.get(parent_id).and_then(|n| n.parent);
        }
        chain
    }

    /// 1-based position of `id` among siblings sharing its tag, plus the
    /// count of same-tag siblings (including itself).
    pub fn nth_of_type(&self, id: NodeId) -> (usize, usize) {
        let Some(node) = self.get(id) else {
            return (1, 1);
        };
        let Some(parent_id) = node.parent else {
            return (1, 1);
        };
        let Some(parent) = self.get(parent_id) else {
            return (1, 1);
        };
        let mut position = 0;
        let mut total = 0;
        for &sibling_id in &parent.children {
            if let Some(sibling) = self.get(sibling_id) {
                if sibling.tag == node.tag {
                    total += 1;
                    if sibling_id == id {
                        position = total;
                    }
                }
            }
        }
        (position.max(1), total.max(1))
    }
}

/// Builder for one snapshot element.
///
/// Collaborators (and tests) describe elements with it; the snapshot assigns
/// identities and wires parent/child links.
#[derive(Debug, Clone, Default)]
pub struct ElementBuilder {
    tag: String,
    attributes: FxHashMap<String, String>,
    classes: SmallVec4<String>,
    text: Option<String>,
    bounds: Option<Rect>,
    style: ComputedStyle,
    focused: bool,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.attributes.insert("id".into(), id.into());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        for c in class.split_whitespace() {
            self.classes.push(c.to_string());
        }
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn bounds(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.bounds = Some(Rect::new(x, y, width, height));
        self
    }

    pub fn style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn focused(mut self) -> Self {
        self.focused = true;
        self
    }

    fn build(self, id: NodeId, parent: Option<NodeId>) -> ElementNode {
        let html = render_opening_tag(&self.tag, &self.attributes, &self.classes);
        ElementNode {
            id,
            tag: self.tag,
            attributes: self.attributes,
            classes: self.classes,
            text: self.text,
            parent,
            children: Vec::new(),
            bounds: self.bounds,
            style: self.style,
            focused: self.focused,
            html,
        }
    }
}

/// Synthesize the opening-tag HTML for an element.
fn render_opening_tag(
    tag: &str,
    attributes: &FxHashMap<String, String>,
    classes: &SmallVec4<String>,
) -> String {
    let mut out = String::with_capacity(32);
    out.push('<');
    out.push_str(tag);
    if let Some(id) = attributes.get("id") {
        out.push_str(&format!(" id=\"{id}\""));
    }
    if !classes.is_empty() {
        out.push_str(&format!(" class=\"{}\"", classes.join(" ")));
    }
    // Deterministic attribute order for stable snippets.
    let mut rest: Vec<(&String, &String)> =
        attributes.iter().filter(|(k, _)| k.as_str() != "id").collect();
    rest.sort_by_key(|(k, _)| k.as_str());
    for (name, value) in rest {
        out.push_str(&format!(" {name}=\"{value}\""));
    }
    out.push('>');
    out
}
