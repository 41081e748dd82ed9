//! Root-to-host selector rewriting
//!
//! Rewrites CSS authored against a document root so it can be adopted inside
//! a shadow tree: every `:root` selector is replaced by a host-element
//! selector (`:host` by default), and attribute selectors trailing the host
//! token are folded into its functional form, `:host[a][b]` becoming
//! `:host([a][b])`.

use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};

use crate::config::TransformOptions;
use crate::css_rules::{self, process_rules, CssRule, COMMENT_PLACEHOLDER};

const DEFAULT_HOST_SELECTOR: &str = ":host";

// Conditional group at-rules whose bodies contain style rules of their own
const CONDITIONAL_GROUP_AT_RULES: &[&str] = &[
    "@media",
    "@supports",
    "@document",
    "@layer",
    "@container",
    "@scope",
    "@starting-style",
];

// `:root` with the pseudo-class name matched case-insensitively and bounded
// on the right, so `:rooted` and `.root-class` stay untouched
static COLON_ROOT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i):root\b").unwrap());

static ATTR_CLAUSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]+\]").unwrap());

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*[\s\S]*?\*/").unwrap());

static COMMENT_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&regex::escape(COMMENT_PLACEHOLDER)).unwrap());

/// Rewrites `:root` selectors into a host-element selector.
///
/// The rewriter is immutable once constructed; every method is a pure
/// string-to-string mapping, so a single instance can be shared across
/// threads and applied to any number of rules.
pub struct HostRewriter {
    host_selector: String,
    host_attr_run_re: Regex,
}

impl HostRewriter {
    /// A rewriter targeting the default `:host` selector.
    pub fn new() -> Self {
        Self::with_host_selector(DEFAULT_HOST_SELECTOR)
    }

    /// A rewriter targeting a custom host selector, e.g. `.my-custom-host`.
    /// The selector is treated as an opaque literal token and is not
    /// validated.
    pub fn with_host_selector(host_selector: &str) -> Self {
        let pattern = format!(r"{}((?:\[[^\]]+\])+)", regex::escape(host_selector));
        HostRewriter {
            host_selector: host_selector.to_string(),
            host_attr_run_re: Regex::new(&pattern).unwrap(),
        }
    }

    pub fn from_options(options: &TransformOptions) -> Self {
        match options.custom_host_selector.as_deref() {
            Some(selector) => Self::with_host_selector(selector),
            None => Self::new(),
        }
    }

    /// Rewrite one selector: substitute every `:root` occurrence with the
    /// host selector, then fold any attribute clauses that directly follow
    /// it into the functional form (`:host[a][b]` -> `:host([a][b])`).
    ///
    /// A selector without `:root` is returned unchanged. Quoted strings
    /// inside attribute values are opaque to both passes, so neither a
    /// `:root` nor a `]` inside a quoted value affects the result.
    pub fn rewrite_selector(&self, selector: &str) -> String {
        let escaped = css_rules::escape_in_strings(selector);
        if !COLON_ROOT_RE.is_match(&escaped) {
            return selector.to_string();
        }

        let substituted = COLON_ROOT_RE.replace_all(&escaped, NoExpand(&self.host_selector));
        let folded = self
            .host_attr_run_re
            .replace_all(&substituted, |caps: &Captures| {
                let run = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                let attrs: String = ATTR_CLAUSE_RE
                    .find_iter(run)
                    .map(|m| m.as_str())
                    .collect();
                format!("{}({})", self.host_selector, attrs)
            });

        css_rules::unescape_in_strings(&folded)
    }

    /// Rewrite every rule selector in a stylesheet. Declaration blocks are
    /// never modified, comments are preserved verbatim, and conditional
    /// group at-rules (`@media`, `@supports`, ...) are descended into while
    /// other at-rules pass through untouched.
    pub fn transform_css_text(&self, css_text: &str) -> String {
        // Collect comments and replace them with a placeholder so their
        // content is invisible to rule parsing
        let mut comments: Vec<String> = Vec::new();
        let css = COMMENT_RE.replace_all(css_text, |caps: &Captures| {
            comments.push(caps.get(0).map(|m| m.as_str()).unwrap_or("").to_string());
            COMMENT_PLACEHOLDER
        });

        let transformed = self.transform_rules(&css);
        if comments.is_empty() {
            return transformed;
        }

        // Put the comments back at their original positions
        let mut next_comment = 0;
        COMMENT_PLACEHOLDER_RE
            .replace_all(&transformed, |_: &Captures| {
                let restored = comments
                    .get(next_comment)
                    .cloned()
                    .unwrap_or_else(|| COMMENT_PLACEHOLDER.to_string());
                next_comment += 1;
                restored
            })
            .to_string()
    }

    fn transform_rules(&self, css_text: &str) -> String {
        process_rules(css_text, |rule: CssRule| {
            if !rule.selector.starts_with('@') {
                return CssRule::new(self.rewrite_selector(&rule.selector), rule.content);
            }
            if CONDITIONAL_GROUP_AT_RULES
                .iter()
                .any(|at_rule| rule.selector.starts_with(at_rule))
            {
                let content = self.transform_rules(&rule.content);
                return CssRule::new(rule.selector, content);
            }
            rule
        })
    }
}

impl Default for HostRewriter {
    fn default() -> Self {
        Self::new()
    }
}
