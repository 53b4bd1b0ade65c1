//! Component name resolution.
//!
//! Runtimes expose names in several shapes of varying quality. Resolution
//! is an explicit, ordered list of pure strategies applied until one
//! succeeds:
//!
//! 1. provider shape → `"<Context>.Provider"`
//! 2. debug name, when longer than two characters
//! 3. declared display name
//! 4. function/class identifier
//! 5. host element tag
//! 6. short debug name, when nothing longer exists
//!
//! A node matching none of these resolves to `None`.

use super::tree::RuntimeNode;

type NameResolver = fn(&RuntimeNode) -> Option<String>;

const RESOLVERS: &[NameResolver] = &[
    resolve_provider,
    resolve_debug_name,
    resolve_display_name,
    resolve_type_name,
    resolve_host_tag,
    resolve_short_debug_name,
];

/// Resolve the best available name for a tree node.
pub fn resolve_name(node: &RuntimeNode) -> Option<String> {
    RESOLVERS.iter().find_map(|resolver| resolver(node))
}

fn resolve_provider(node: &RuntimeNode) -> Option<String> {
    let context = non_empty(node.context_name.as_deref())?;
    Some(format!("{context}.Provider"))
}

fn resolve_debug_name(node: &RuntimeNode) -> Option<String> {
    let name = non_empty(node.debug_name.as_deref())?;
    if name.chars().count() > 2 {
        Some(name.to_string())
    } else {
        None
    }
}

fn resolve_display_name(node: &RuntimeNode) -> Option<String> {
    non_empty(node.display_name.as_deref()).map(str::to_string)
}

fn resolve_type_name(node: &RuntimeNode) -> Option<String> {
    non_empty(node.type_name.as_deref()).map(str::to_string)
}

fn resolve_host_tag(node: &RuntimeNode) -> Option<String> {
    non_empty(node.host_tag.as_deref()).map(str::to_string)
}

// A trivial debug name still beats nothing at all.
fn resolve_short_debug_name(node: &RuntimeNode) -> Option<String> {
    non_empty(node.debug_name.as_deref()).map(str::to_string)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
