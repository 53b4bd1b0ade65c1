//! Component tree handle and traversal output.
//!
//! `RuntimeNode` is the shape the UI-runtime introspector hands over: name
//! hints of several reliabilities, an optional associated DOM node, and
//! children. The walker flattens it into `ComponentDescriptor` records that
//! live for one traversal pass.

use serde::{Deserialize, Serialize};

use pagescan_core::{DescriptorId, NodeId};

/// Whether a tree node is a rendered host element or a logical component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Host,
    Component,
}

/// One node of the live component tree, as introspected from the page's
/// UI runtime. All name hints are optional; resolution picks the best.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeNode {
    /// Runtime-provided debug name (highest priority when non-trivial).
    pub debug_name: Option<String>,
    /// Display name declared on the component definition.
    pub display_name: Option<String>,
    /// Function or class identifier of the component definition.
    pub type_name: Option<String>,
    /// Context name, for provider-like nodes.
    pub context_name: Option<String>,
    /// Host element tag, for host nodes.
    pub host_tag: Option<String>,
    /// Host or logical component.
    pub kind: Option<ComponentKind>,
    /// DOM node this tree node rendered, if any.
    pub dom_node: Option<NodeId>,
    pub children: Vec<RuntimeNode>,
}

impl RuntimeNode {
    /// A logical component with a type identifier.
    pub fn component(type_name: &str) -> Self {
        Self {
            type_name: Some(type_name.to_string()),
            kind: Some(ComponentKind::Component),
            ..Self::default()
        }
    }

    /// A rendered host element.
    pub fn host(tag: &str) -> Self {
        Self {
            host_tag: Some(tag.to_string()),
            kind: Some(ComponentKind::Host),
            ..Self::default()
        }
    }

    /// A context-provider node for `context_name`.
    pub fn provider(context_name: &str) -> Self {
        Self {
            context_name: Some(context_name.to_string()),
            kind: Some(ComponentKind::Component),
            ..Self::default()
        }
    }

    pub fn with_dom(mut self, node: NodeId) -> Self {
        self.dom_node = Some(node);
        self
    }

    pub fn with_child(mut self, child: RuntimeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_debug_name(mut self, name: &str) -> Self {
        self.debug_name = Some(name.to_string());
        self
    }

    pub fn with_display_name(mut self, name: &str) -> Self {
        self.display_name = Some(name.to_string());
        self
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind.unwrap_or(ComponentKind::Component)
    }
}

/// Flattened traversal record for one tree node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    pub id: DescriptorId,
    pub name: Option<String>,
    pub kind: ComponentKind,
    pub dom_node: Option<NodeId>,
    pub depth: u32,
}
