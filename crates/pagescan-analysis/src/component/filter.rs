//! User-facing component path filtering.
//!
//! Raw paths carry every resolved name on the ancestor line, including
//! framework wrappers and minified internals that mean nothing to the page
//! author. The user path keeps the contiguous leaf-most run of meaningful
//! names: names are dropped when they are shorter than the configured
//! minimum, denylisted, dotted (`Primitive.span`), or anonymous
//! (`__`-prefixed), and everything above the last dropped name goes with
//! it. If nothing survives, the leaf-most raw name is used as a fallback.

use pagescan_core::config::FilterConfig;

/// Fallback component label when a path is empty after filtering and no
/// raw name exists to fall back on.
pub const UNKNOWN_COMPONENT: &str = "Unknown";

/// Whether a name is noise in a user-facing path.
pub fn is_noise_name(name: &str, config: &FilterConfig) -> bool {
    if name.chars().count() < config.min_name_length {
        return true;
    }
    if name.starts_with("__") {
        return true;
    }
    if name.contains('.') {
        return true;
    }
    config.framework_denylist.iter().any(|denied| denied == name)
}

/// Compute the user-facing path from a raw path.
///
/// Returns the suffix of `raw` strictly below the last noise name. An
/// empty result falls back to the leaf-most raw name, or `"Unknown"` when
/// the raw path itself is empty.
pub fn user_path(raw: &[String], config: &FilterConfig) -> Vec<String> {
    let mut kept: Vec<String> = raw
        .iter()
        .rev()
        .take_while(|name| !is_noise_name(name, config))
        .cloned()
        .collect();
    kept.reverse();

    if kept.is_empty() {
        match raw.last() {
            Some(leaf) => vec![leaf.clone()],
            None => vec![UNKNOWN_COMPONENT.to_string()],
        }
    } else {
        kept
    }
}

/// Whether the leaf-most name of a path belongs to a framework rather than
/// application code.
pub fn is_framework_component(path: &[String], config: &FilterConfig) -> bool {
    let Some(leaf) = path.last() else {
        return false;
    };
    if leaf.contains('.') || leaf.starts_with("__") {
        return true;
    }
    config.framework_denylist.iter().any(|denied| denied == leaf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FilterConfig {
        FilterConfig::default()
    }

    fn path(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_suffix_below_last_dropped_name() {
        let raw = path(&["App", "Provider", "C", "Button"]);
        assert_eq!(user_path(&raw, &config()), path(&["Button"]));
    }

    #[test]
    fn test_clean_path_kept_whole() {
        let raw = path(&["Header", "Nav", "IconButton"]);
        assert_eq!(user_path(&raw, &config()), raw);
    }

    #[test]
    fn test_dotted_and_anonymous_names_dropped() {
        let raw = path(&["Page", "Primitive.span", "SaveButton"]);
        assert_eq!(user_path(&raw, &config()), path(&["SaveButton"]));

        let raw = path(&["Page", "__internal", "Toolbar", "SaveButton"]);
        assert_eq!(user_path(&raw, &config()), path(&["Toolbar", "SaveButton"]));
    }

    #[test]
    fn test_all_noise_falls_back_to_leaf() {
        let raw = path(&["App", "Primitive.div"]);
        assert_eq!(user_path(&raw, &config()), path(&["Primitive.div"]));
    }

    #[test]
    fn test_empty_raw_path_is_unknown() {
        assert_eq!(user_path(&[], &config()), path(&[UNKNOWN_COMPONENT]));
    }

    #[test]
    fn test_user_path_is_subsequence_of_raw() {
        let raw = path(&["App", "Layout", "Xy", "Grid", "Cell"]);
        let user = user_path(&raw, &config());
        let mut raw_iter = raw.iter();
        for name in &user {
            assert!(raw_iter.any(|r| r == name), "{name} not in raw order");
        }
    }

    #[test]
    fn test_framework_component_classification() {
        assert!(is_framework_component(&path(&["App", "Primitive.span"]), &config()));
        assert!(is_framework_component(&path(&["Provider"]), &config()));
        assert!(!is_framework_component(&path(&["Header", "SaveButton"]), &config()));
        assert!(!is_framework_component(&[], &config()));
    }
}
