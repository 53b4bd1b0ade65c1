//! DOM-to-component reverse index.
//!
//! Built in a single linear pass over the pre-order descriptor list and
//! read-only thereafter. Each DOM-bearing descriptor contributes its full
//! ancestor name chain; when several descriptors share one DOM node, the
//! first in pre-order wins — pre-order places the owning component before
//! the host element it rendered, so chains end at the component name.

use pagescan_core::types::collections::FxHashMap;
use pagescan_core::NodeId;

use super::tree::ComponentDescriptor;

/// Mapping from DOM node identity to its ancestor component name chain,
/// root → leaf.
#[derive(Debug, Default)]
pub struct DomComponentIndex {
    paths: FxHashMap<NodeId, Vec<String>>,
    walked_descriptors: usize,
}

impl DomComponentIndex {
    /// Build the index from a pre-order descriptor list.
    pub fn build(descriptors: &[ComponentDescriptor]) -> Self {
        let mut paths: FxHashMap<NodeId, Vec<String>> = FxHashMap::default();
        // Name chain of the current ancestor line; entries are
        // (depth, Some(name)) so unnamed ancestors keep their slot without
        // contributing to the chain.
        let mut name_stack: Vec<(u32, Option<String>)> = Vec::new();

        for descriptor in descriptors {
            while name_stack
                .last()
                .is_some_and(|(depth, _)| *depth >= descriptor.depth)
            {
                name_stack.pop();
            }
            name_stack.push((descriptor.depth, descriptor.name.clone()));

            if let Some(dom_node) = descriptor.dom_node {
                paths.entry(dom_node).or_insert_with(|| {
                    name_stack
                        .iter()
                        .filter_map(|(_, name)| name.clone())
                        .collect()
                });
            }
        }

        Self {
            paths,
            walked_descriptors: descriptors.len(),
        }
    }

    /// Ancestor name chain for `node`, or `None` when the node was not
    /// rendered by the inspected runtime (e.g. injected by a third-party
    /// script).
    pub fn lookup(&self, node: NodeId) -> Option<&[String]> {
        self.paths.get(&node).map(|path| path.as_slice())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            dom_nodes: self.paths.len(),
            walked_descriptors: self.walked_descriptors,
        }
    }
}

/// Index statistics.
#[derive(Debug, Clone, Copy)]
pub struct IndexStats {
    pub dom_nodes: usize,
    pub walked_descriptors: usize,
}
