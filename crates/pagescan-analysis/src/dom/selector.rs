//! Stable CSS selector generation and bounded selector matching.
//!
//! Generation prefers the element id, then builds a bounded-depth chain of
//! `tag.class1.class2:nth-of-type(k)` segments. Matching resolves the
//! rule-engine's target selectors against the frozen snapshot; the grammar
//! is bounded to what the generator and the rule engine emit: ids, tags,
//! classes, attribute tests, `:nth-of-type`, and descendant/child
//! combinators. Both directions are pure and total — malformed input yields
//! an empty or absent result, never a panic.

use pagescan_core::config::SelectorConfig;
use pagescan_core::NodeId;

use super::snapshot::{DomSnapshot, ElementNode};

/// Generate a stable selector for `id`.
///
/// Returns an empty string for an unknown node.
pub fn generate_selector(snapshot: &DomSnapshot, id: NodeId, config: &SelectorConfig) -> String {
    let Some(node) = snapshot.get(id) else {
        return String::new();
    };
    if let Some(id_attr) = node.id_attr() {
        return format!("#{}", css_escape(id_attr));
    }

    let mut segments = vec![segment_for(snapshot, node, config)];
    let mut current = node.parent;
    let mut ancestors_used = 0;
    while let Some(parent_id) = current {
        if ancestors_used >= config.max_ancestors {
            break;
        }
        let Some(parent) = snapshot.get(parent_id) else {
            break;
        };
        if let Some(id_attr) = parent.id_attr() {
            // An id anchors the selector; nothing above it adds precision.
            segments.push(format!("#{}", css_escape(id_attr)));
            break;
        }
        segments.push(segment_for(snapshot, parent, config));
        ancestors_used += 1;
        current = parent.parent;
    }

    segments.reverse();
    segments.join(" > ")
}

/// One selector segment: tag, up to `max_classes` class names, and an
/// `nth-of-type` tie-break when siblings share the tag.
fn segment_for(snapshot: &DomSnapshot, node: &ElementNode, config: &SelectorConfig) -> String {
    let mut segment = node.tag.clone();
    for class in node.classes.iter().take(config.max_classes) {
        segment.push('.');
        segment.push_str(&css_escape(class));
    }
    let (position, total) = snapshot.nth_of_type(node.id);
    if total > 1 {
        segment.push_str(&format!(":nth-of-type({position})"));
    }
    segment
}

/// Escape an identifier for use in a selector.
///
/// Alphanumerics, `_`, and `-` pass through; everything else is
/// backslash-escaped. A leading digit is escaped as well.
pub fn css_escape(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    for (index, c) in ident.chars().enumerate() {
        let safe = c.is_ascii_alphanumeric() || c == '_' || c == '-';
        if !safe || (index == 0 && c.is_ascii_digit()) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Resolve a selector against the snapshot: the first element in document
/// order matching any selector in the (possibly comma-separated) list.
/// First match wins when several elements match.
pub fn resolve_first(snapshot: &DomSnapshot, selector: &str) -> Option<NodeId> {
    let parsed = parse_selector_list(selector)?;
    snapshot
        .document_order()
        .into_iter()
        .find(|&id| parsed.iter().any(|complex| matches_complex(snapshot, id, complex)))
}

/// Whether element `id` matches `selector`.
pub fn matches(snapshot: &DomSnapshot, id: NodeId, selector: &str) -> bool {
    parse_selector_list(selector)
        .map(|parsed| parsed.iter().any(|complex| matches_complex(snapshot, id, complex)))
        .unwrap_or(false)
}

// ---- Parsed representation ----

#[derive(Debug, Clone, Default)]
struct CompoundSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
    nth_of_type: Option<usize>,
}

impl CompoundSelector {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
            && self.nth_of_type.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone)]
struct ComplexSelector {
    compounds: Vec<CompoundSelector>,
    /// One combinator between each adjacent compound pair.
    combinators: Vec<Combinator>,
}

fn parse_selector_list(selector: &str) -> Option<Vec<ComplexSelector>> {
    let trimmed = selector.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut list = Vec::new();
    for part in split_top_level_commas(trimmed) {
        list.push(parse_complex(part.trim())?);
    }
    if list.is_empty() {
        None
    } else {
        Some(list)
    }
}

/// Split on commas outside brackets and escapes.
fn split_top_level_commas(selector: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let bytes = selector.as_bytes();
    let mut index = 0usize;
    while index < bytes.len() {
        match bytes[index] {
            b'\\' => index += 1,
            b'[' | b'(' => depth += 1,
            b']' | b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                parts.push(&selector[start..index]);
                start = index + 1;
            }
            _ => {}
        }
        index += 1;
    }
    parts.push(&selector[start..]);
    parts
}

fn parse_complex(selector: &str) -> Option<ComplexSelector> {
    let mut compounds = Vec::new();
    let mut combinators = Vec::new();
    let chars: Vec<char> = selector.chars().collect();
    let mut index = 0usize;
    let mut pending: Option<Combinator> = None;

    while index < chars.len() {
        // Consume whitespace and an optional '>' between compounds.
        let mut saw_space = false;
        let mut saw_child = false;
        while index < chars.len() && (chars[index].is_whitespace() || chars[index] == '>') {
            if chars[index] == '>' {
                saw_child = true;
            } else {
                saw_space = true;
            }
            index += 1;
        }
        if index >= chars.len() {
            break;
        }
        if !compounds.is_empty() && (saw_space || saw_child) {
            pending = Some(if saw_child { Combinator::Child } else { Combinator::Descendant });
        }

        let (compound, consumed) = parse_compound(&chars[index..])?;
        if compound.is_empty() || consumed == 0 {
            return None;
        }
        if let Some(combinator) = pending.take() {
            combinators.push(combinator);
        }
        compounds.push(compound);
        index += consumed;
    }

    if compounds.is_empty() || combinators.len() + 1 != compounds.len() {
        return None;
    }
    Some(ComplexSelector { compounds, combinators })
}

fn parse_compound(chars: &[char]) -> Option<(CompoundSelector, usize)> {
    let mut compound = CompoundSelector::default();
    let mut index = 0usize;

    // Leading tag name or universal selector.
    if index < chars.len() && (chars[index].is_ascii_alphabetic() || chars[index] == '*') {
        if chars[index] == '*' {
            index += 1;
        } else {
            let (ident, consumed) = parse_ident(&chars[index..]);
            compound.tag = Some(ident.to_ascii_lowercase());
            index += consumed;
        }
    }

    while index < chars.len() {
        match chars[index] {
            '#' => {
                let (ident, consumed) = parse_ident(&chars[index + 1..]);
                if consumed == 0 {
                    return None;
                }
                compound.id = Some(ident);
                index += 1 + consumed;
            }
            '.' => {
                let (ident, consumed) = parse_ident(&chars[index + 1..]);
                if consumed == 0 {
                    return None;
                }
                compound.classes.push(ident);
                index += 1 + consumed;
            }
            '[' => {
                let close = chars[index..].iter().position(|&c| c == ']')?;
                let inner: String = chars[index + 1..index + close].iter().collect();
                compound.attrs.push(parse_attr(&inner)?);
                index += close + 1;
            }
            ':' => {
                let rest: String = chars[index..].iter().collect();
                if let Some(args) = rest.strip_prefix(":nth-of-type(") {
                    let close = args.find(')')?;
                    let n: usize = args[..close].trim().parse().ok()?;
                    compound.nth_of_type = Some(n);
                    index += ":nth-of-type(".len() + close + 1;
                } else {
                    // Unsupported pseudo-class; outside the bounded grammar.
                    return None;
                }
            }
            c if c.is_whitespace() || c == '>' || c == ',' => break,
            _ => return None,
        }
    }

    Some((compound, index))
}

/// Parse an identifier, honoring backslash escapes.
fn parse_ident(chars: &[char]) -> (String, usize) {
    let mut ident = String::new();
    let mut index = 0usize;
    while index < chars.len() {
        let c = chars[index];
        if c == '\\' && index + 1 < chars.len() {
            ident.push(chars[index + 1]);
            index += 2;
        } else if c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii() {
            ident.push(c);
            index += 1;
        } else {
            break;
        }
    }
    (ident, index)
}

/// Parse the inside of an attribute test: `name`, `name=value`,
/// `name="value"`, or `name='value'`.
fn parse_attr(inner: &str) -> Option<(String, Option<String>)> {
    let inner = inner.trim();
    if inner.is_empty() {
        return None;
    }
    match inner.split_once('=') {
        None => Some((inner.to_string(), None)),
        Some((name, value)) => {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((name.trim().to_string(), Some(value.to_string())))
        }
    }
}

// ---- Matching ----

fn matches_complex(snapshot: &DomSnapshot, id: NodeId, complex: &ComplexSelector) -> bool {
    matches_from(snapshot, id, &complex.compounds, &complex.combinators)
}

fn matches_from(
    snapshot: &DomSnapshot,
    id: NodeId,
    compounds: &[CompoundSelector],
    combinators: &[Combinator],
) -> bool {
    let last = compounds.len() - 1;
    if !matches_compound(snapshot, id, &compounds[last]) {
        return false;
    }
    if last == 0 {
        return true;
    }
    let parent = snapshot.get(id).and_then(|n| n.parent);
    match combinators[last - 1] {
        Combinator::Child => parent.map_or(false, |p| {
            matches_from(snapshot, p, &compounds[..last], &combinators[..last - 1])
        }),
        Combinator::Descendant => {
            let mut current = parent;
            while let Some(ancestor) = current {
                if matches_from(snapshot, ancestor, &compounds[..last], &combinators[..last - 1]) {
                    return true;
                }
                current = snapshot.get(ancestor).and_then(|n| n.parent);
            }
            false
        }
    }
}

fn matches_compound(snapshot: &DomSnapshot, id: NodeId, compound: &CompoundSelector) -> bool {
    let Some(node) = snapshot.get(id) else {
        return false;
    };
    if let Some(tag) = &compound.tag {
        if node.tag != *tag {
            return false;
        }
    }
    if let Some(wanted) = &compound.id {
        if node.id_attr() != Some(wanted.as_str()) {
            return false;
        }
    }
    for class in &compound.classes {
        if !node.has_class(class) {
            return false;
        }
    }
    for (name, value) in &compound.attrs {
        match (node.attr(name), value) {
            (None, _) => return false,
            (Some(_), None) => {}
            (Some(actual), Some(wanted)) => {
                if actual != wanted {
                    return false;
                }
            }
        }
    }
    if let Some(n) = compound.nth_of_type {
        if snapshot.nth_of_type(id).0 != n {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::snapshot::ElementBuilder;

    fn fixture() -> (DomSnapshot, NodeId, NodeId, NodeId) {
        let mut snap = DomSnapshot::new();
        let root = snap.add(None, ElementBuilder::new("body"));
        let nav = snap.add(Some(root), ElementBuilder::new("nav").class("top-bar"));
        let first = snap.add(Some(nav), ElementBuilder::new("button").class("btn primary"));
        let second = snap.add(Some(nav), ElementBuilder::new("button").class("btn").id("save"));
        (snap, nav, first, second)
    }

    #[test]
    fn test_generate_prefers_id() {
        let (snap, _, _, second) = fixture();
        let config = SelectorConfig::default();
        assert_eq!(generate_selector(&snap, second, &config), "#save");
    }

    #[test]
    fn test_generate_with_nth_of_type() {
        let (snap, _, first, _) = fixture();
        let config = SelectorConfig::default();
        let selector = generate_selector(&snap, first, &config);
        assert_eq!(selector, "body > nav.top-bar > button.btn.primary:nth-of-type(1)");
    }

    #[test]
    fn test_generated_selector_round_trips() {
        let (snap, _, first, second) = fixture();
        let config = SelectorConfig::default();
        for id in [first, second] {
            let selector = generate_selector(&snap, id, &config);
            assert_eq!(resolve_first(&snap, &selector), Some(id), "selector: {selector}");
        }
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let (snap, _, first, _) = fixture();
        // Two buttons match; document order decides.
        assert_eq!(resolve_first(&snap, "button"), Some(first));
        assert_eq!(resolve_first(&snap, "nav .btn"), Some(first));
    }

    #[test]
    fn test_attribute_and_child_combinators() {
        let (snap, nav, _, second) = fixture();
        assert!(matches(&snap, second, "nav > button[id=\"save\"]"));
        assert!(matches(&snap, nav, "body nav.top-bar"));
        assert!(!matches(&snap, second, "div > button"));
    }

    #[test]
    fn test_escaped_identifier() {
        let mut snap = DomSnapshot::new();
        let id = snap.add(None, ElementBuilder::new("div").id("a:b.c"));
        let config = SelectorConfig::default();
        let selector = generate_selector(&snap, id, &config);
        assert_eq!(selector, "#a\\:b\\.c");
        assert_eq!(resolve_first(&snap, &selector), Some(id));
    }

    #[test]
    fn test_malformed_selector_matches_nothing() {
        let (snap, _, _, _) = fixture();
        assert_eq!(resolve_first(&snap, ""), None);
        assert_eq!(resolve_first(&snap, ":hover"), None);
        assert_eq!(resolve_first(&snap, "button::"), None);
    }
}
