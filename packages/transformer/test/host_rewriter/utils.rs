//! Shared helpers for the host rewriter specs

use shadowdom_transformer::HostRewriter;

#[allow(dead_code)]
pub fn rewrite(selector: &str) -> String {
    HostRewriter::new().rewrite_selector(selector)
}

#[allow(dead_code)]
pub fn rewrite_with(selector: &str, host_selector: &str) -> String {
    HostRewriter::with_host_selector(host_selector).rewrite_selector(selector)
}

#[allow(dead_code)]
pub fn transform(css: &str) -> String {
    HostRewriter::new().transform_css_text(css)
}

#[allow(dead_code)]
pub fn transform_with(css: &str, host_selector: &str) -> String {
    HostRewriter::with_host_selector(host_selector).transform_css_text(css)
}
