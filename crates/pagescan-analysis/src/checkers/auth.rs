//! Accessible authentication checker (WCAG 3.3.8, level AA).
//!
//! Detects authentication flows that rest on a cognitive function test
//! with no alternative: CAPTCHA widgets inside auth forms, password fields
//! that block paste or disable autocomplete, and one-time-code inputs that
//! refuse autofill. Alternatives (WebAuthn, OAuth providers, magic links)
//! clear the form.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use once_cell::sync::Lazy;

use pagescan_core::{AuditConfig, CheckerError, Impact, NodeId};

use crate::dom::{DomSnapshot, ElementNode};

use super::traits::{StructuralChecker, StructuralCheckerKind};
use super::types::{Criterion, StructuralViolation};

static CAPTCHA_MARKERS: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .build(["captcha", "recaptcha", "hcaptcha", "cf-turnstile", "arkose"])
        .expect("static marker set")
});

static ALTERNATIVE_MARKERS: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .build([
            "webauthn",
            "passkey",
            "magic-link",
            "magiclink",
            "oauth",
            "sign-in-with",
            "sso",
        ])
        .expect("static marker set")
});

pub struct AccessibleAuthChecker;

impl StructuralChecker for AccessibleAuthChecker {
    fn kind(&self) -> StructuralCheckerKind {
        StructuralCheckerKind::AccessibleAuth
    }

    fn check(
        &self,
        snapshot: &DomSnapshot,
        config: &AuditConfig,
    ) -> Result<Vec<StructuralViolation>, CheckerError> {
        let mut violations = Vec::new();

        for form_id in auth_forms(snapshot) {
            let members = subtree(snapshot, form_id);
            let has_alternative = members
                .iter()
                .filter_map(|&id| snapshot.get(id))
                .any(marks_alternative);

            for &id in &members {
                let Some(node) = snapshot.get(id) else {
                    continue;
                };

                if marks_captcha(node) && !has_alternative {
                    violations.push(StructuralViolation::new(
                        Criterion::AccessibleAuthentication,
                        id,
                        snapshot,
                        config,
                        Impact::Serious,
                        "authentication requires solving a CAPTCHA with no alternative method",
                    ));
                }

                if is_password_input(node) {
                    if blocks_paste(node) {
                        violations.push(StructuralViolation::new(
                            Criterion::AccessibleAuthentication,
                            id,
                            snapshot,
                            config,
                            Impact::Serious,
                            "password field blocks paste, forcing memorized transcription",
                        ));
                    } else if node.attr("autocomplete") == Some("off") {
                        violations.push(StructuralViolation::new(
                            Criterion::AccessibleAuthentication,
                            id,
                            snapshot,
                            config,
                            Impact::Moderate,
                            "password field disables autocomplete, blocking password managers",
                        ));
                    }
                }

                if is_code_input(node) && node.attr("autocomplete") != Some("one-time-code") {
                    violations.push(StructuralViolation::new(
                        Criterion::AccessibleAuthentication,
                        id,
                        snapshot,
                        config,
                        Impact::Moderate,
                        "one-time-code input does not accept autofill (autocomplete=\"one-time-code\")",
                    ));
                }
            }
        }

        Ok(violations)
    }
}

/// Forms that look like authentication: they contain a password input or a
/// one-time-code input.
fn auth_forms(snapshot: &DomSnapshot) -> Vec<NodeId> {
    snapshot
        .document_order()
        .into_iter()
        .filter(|&id| {
            let Some(node) = snapshot.get(id) else {
                return false;
            };
            if node.tag != "form" {
                return false;
            }
            subtree(snapshot, id).iter().any(|&member| {
                snapshot
                    .get(member)
                    .is_some_and(|n| is_password_input(n) || is_code_input(n))
            })
        })
        .collect()
}

fn subtree(snapshot: &DomSnapshot, root: NodeId) -> Vec<NodeId> {
    let mut members = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        members.push(id);
        if let Some(node) = snapshot.get(id) {
            stack.extend(node.children.iter().copied());
        }
    }
    members
}

fn is_password_input(node: &ElementNode) -> bool {
    node.tag == "input" && node.attr("type") == Some("password")
}

/// Single-character numeric inputs arranged as a code entry grid.
fn is_code_input(node: &ElementNode) -> bool {
    node.tag == "input"
        && node.attr("inputmode") == Some("numeric")
        && node.attr("maxlength") == Some("1")
}

fn blocks_paste(node: &ElementNode) -> bool {
    node.attr("onpaste")
        .is_some_and(|handler| handler.contains("return false") || handler.contains("preventDefault"))
}

fn marks_captcha(node: &ElementNode) -> bool {
    marker_haystacks(node).any(|value| CAPTCHA_MARKERS.is_match(value))
}

fn marks_alternative(node: &ElementNode) -> bool {
    if node.attr("autocomplete") == Some("webauthn") {
        return true;
    }
    marker_haystacks(node).any(|value| ALTERNATIVE_MARKERS.is_match(value))
}

/// The strings markers are searched in: classes, id, and iframe sources.
fn marker_haystacks(node: &ElementNode) -> impl Iterator<Item = &str> {
    node.classes
        .iter()
        .map(|c| c.as_str())
        .chain(node.attr("id"))
        .chain(node.attr("src"))
        .chain(node.attr("data-provider"))
}
