//! Iterative component tree walker.
//!
//! Flattens the live tree into pre-order `ComponentDescriptor` records.
//! The walk is stack-based, never recursive, and bounded by hard node and
//! depth caps; overflowing a cap truncates the result and records a
//! recoverable `TraversalError` instead of failing the scan.

use tracing::{debug, warn};

use pagescan_core::config::TraversalConfig;
use pagescan_core::{DescriptorId, TraversalError};

use super::names::resolve_name;
use super::tree::{ComponentDescriptor, RuntimeNode};

/// Result of one traversal pass.
#[derive(Debug)]
pub struct WalkOutcome {
    pub descriptors: Vec<ComponentDescriptor>,
    /// Cap overflows hit during the walk (at most one per cap).
    pub truncations: Vec<TraversalError>,
}

impl WalkOutcome {
    pub fn is_truncated(&self) -> bool {
        !self.truncations.is_empty()
    }
}

/// Walk the component tree rooted at `root` in pre-order.
pub fn walk(root: &RuntimeNode, config: &TraversalConfig) -> WalkOutcome {
    let mut descriptors = Vec::new();
    let mut truncations: Vec<TraversalError> = Vec::new();
    let mut depth_capped = false;

    let mut stack: Vec<(&RuntimeNode, u32)> = vec![(root, 0)];
    while let Some((node, depth)) = stack.pop() {
        if descriptors.len() >= config.max_nodes {
            warn!(
                limit = config.max_nodes,
                "component tree walk truncated at node cap"
            );
            truncations.push(TraversalError::NodeCapExceeded {
                walked: descriptors.len(),
                limit: config.max_nodes,
            });
            break;
        }

        descriptors.push(ComponentDescriptor {
            id: DescriptorId::new(descriptors.len() as u32),
            name: resolve_name(node),
            kind: node.kind(),
            dom_node: node.dom_node,
            depth,
        });

        if depth as usize + 1 > config.max_depth {
            if !node.children.is_empty() && !depth_capped {
                depth_capped = true;
                warn!(
                    limit = config.max_depth,
                    "component tree walk truncated at depth cap"
                );
                truncations.push(TraversalError::DepthCapExceeded {
                    depth: depth as usize + 1,
                    limit: config.max_depth,
                });
            }
            continue;
        }

        // Reverse so the first child is visited first.
        for child in node.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    debug!(
        descriptors = descriptors.len(),
        truncated = !truncations.is_empty(),
        "component tree walk complete"
    );

    WalkOutcome {
        descriptors,
        truncations,
    }
}
