//! CSS rule traversal
//!
//! Splits stylesheet text into per-rule `selector` / `content` pairs, hands
//! each rule to a callback and reassembles the text around the callback's
//! edits, preserving all whitespace and punctuation between rules.
//!
//! Tokenization is placeholder-based: characters that would confuse the rule
//! pattern are lifted out of quoted strings first, then `{...}` bodies are
//! lifted out as opaque blocks, and both are restored after the callback has
//! run.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub(crate) const COMMENT_PLACEHOLDER: &str = "%COMMENT%";
const BLOCK_PLACEHOLDER: &str = "%BLOCK%";
const COMMA_IN_PLACEHOLDER: &str = "%COMMA_IN_PLACEHOLDER%";
const SEMI_IN_PLACEHOLDER: &str = "%SEMI_IN_PLACEHOLDER%";
const COLON_IN_PLACEHOLDER: &str = "%COLON_IN_PLACEHOLDER%";
const LBRACKET_IN_PLACEHOLDER: &str = "%LBRACKET_IN_PLACEHOLDER%";
const RBRACKET_IN_PLACEHOLDER: &str = "%RBRACKET_IN_PLACEHOLDER%";
const LBRACE_IN_PLACEHOLDER: &str = "%LBRACE_IN_PLACEHOLDER%";
const RBRACE_IN_PLACEHOLDER: &str = "%RBRACE_IN_PLACEHOLDER%";

static RULE_RE: Lazy<Regex> = Lazy::new(|| {
    let comment = regex::escape(COMMENT_PLACEHOLDER);
    let block = regex::escape(BLOCK_PLACEHOLDER);
    // (leading ws/comments)(selector)(ws)({%BLOCK%} | ;); the closing brace
    // is optional so an unterminated final block still matches
    let pattern = format!(
        r"(\s*(?:{}\s*)*)([^;{{}}]+?)(\s*)((?:\{{{}\}}?\s*;?)|(?:\s*;))",
        comment, block
    );
    Regex::new(&pattern).unwrap()
});

/// A single rule as seen by the [`process_rules`] callback: the selector (or
/// at-rule prelude) and the raw text between its braces. Bodyless rules such
/// as `@import x;` have an empty `content`.
#[derive(Clone, Debug)]
pub struct CssRule {
    pub selector: String,
    pub content: String,
}

impl CssRule {
    pub fn new(selector: String, content: String) -> Self {
        CssRule { selector, content }
    }
}

struct EscapedBlocks {
    escaped: String,
    blocks: Vec<String>,
}

/// Apply `rule_callback` to every rule in `input` and return the reassembled
/// stylesheet text. Nested blocks are handed to the callback unparsed, as
/// part of the enclosing rule's `content`.
pub fn process_rules<F>(input: &str, mut rule_callback: F) -> String
where
    F: FnMut(CssRule) -> CssRule,
{
    let escaped = escape_in_strings(input);
    let with_blocks = escape_brace_blocks(&escaped);

    let mut next_block = 0;
    let result = RULE_RE.replace_all(&with_blocks.escaped, |caps: &Captures| {
        let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let selector = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let middle = caps.get(3).map(|m| m.as_str()).unwrap_or("");
        let suffix = caps.get(4).map(|m| m.as_str()).unwrap_or("");

        let mut content = String::new();
        let mut content_prefix = "";
        let mut final_suffix = suffix;
        if let Some(tail) = suffix
            .strip_prefix('{')
            .and_then(|s| s.strip_prefix(BLOCK_PLACEHOLDER))
        {
            if next_block < with_blocks.blocks.len() {
                content = with_blocks.blocks[next_block].clone();
                next_block += 1;
            }
            content_prefix = "{";
            final_suffix = tail;
        }

        let rule = rule_callback(CssRule::new(selector.to_string(), content));
        format!(
            "{}{}{}{}{}{}",
            prefix, rule.selector, middle, content_prefix, rule.content, final_suffix
        )
    });

    unescape_in_strings(&result)
}

/// Replace `;`, `,`, `:`, `[`, `]`, `{` and `}` inside quoted strings with
/// placeholder tokens so they cannot be mistaken for selector or rule
/// structure. Backslash escapes are passed through untouched, including the
/// escaped character.
pub(crate) fn escape_in_strings(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            out.push(ch);
            if let Some(next) = chars.next() {
                out.push(next);
            }
            continue;
        }
        match quote {
            Some(q) if ch == q => {
                quote = None;
                out.push(ch);
            }
            Some(_) => match ch {
                ';' => out.push_str(SEMI_IN_PLACEHOLDER),
                ',' => out.push_str(COMMA_IN_PLACEHOLDER),
                ':' => out.push_str(COLON_IN_PLACEHOLDER),
                '[' => out.push_str(LBRACKET_IN_PLACEHOLDER),
                ']' => out.push_str(RBRACKET_IN_PLACEHOLDER),
                '{' => out.push_str(LBRACE_IN_PLACEHOLDER),
                '}' => out.push_str(RBRACE_IN_PLACEHOLDER),
                _ => out.push(ch),
            },
            None => {
                if ch == '\'' || ch == '"' {
                    quote = Some(ch);
                }
                out.push(ch);
            }
        }
    }

    out
}

/// Inverse of [`escape_in_strings`].
pub(crate) fn unescape_in_strings(input: &str) -> String {
    input
        .replace(COMMA_IN_PLACEHOLDER, ",")
        .replace(SEMI_IN_PLACEHOLDER, ";")
        .replace(COLON_IN_PLACEHOLDER, ":")
        .replace(LBRACKET_IN_PLACEHOLDER, "[")
        .replace(RBRACKET_IN_PLACEHOLDER, "]")
        .replace(LBRACE_IN_PLACEHOLDER, "{")
        .replace(RBRACE_IN_PLACEHOLDER, "}")
}

/// Lift every top-level `{...}` body out of `input`, replacing it with
/// `%BLOCK%` and collecting the bodies in order. Nested braces stay inside
/// their block; an unterminated block is collected as-is.
fn escape_brace_blocks(input: &str) -> EscapedBlocks {
    let mut escaped = String::with_capacity(input.len());
    let mut blocks = Vec::new();
    let mut block = String::new();
    let mut depth = 0usize;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            let target = if depth > 0 { &mut block } else { &mut escaped };
            target.push(ch);
            if let Some(next) = chars.next() {
                target.push(next);
            }
            continue;
        }
        match ch {
            '{' => {
                if depth == 0 {
                    escaped.push('{');
                } else {
                    block.push('{');
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    blocks.push(std::mem::take(&mut block));
                    escaped.push_str(BLOCK_PLACEHOLDER);
                    escaped.push('}');
                } else {
                    block.push('}');
                }
            }
            _ => {
                if depth > 0 {
                    block.push(ch);
                } else {
                    escaped.push(ch);
                }
            }
        }
    }

    if depth > 0 {
        blocks.push(block);
        escaped.push_str(BLOCK_PLACEHOLDER);
    }

    EscapedBlocks { escaped, blocks }
}
