#![deny(clippy::all)]

//! Rewrites document-level CSS for shadow DOM encapsulation: `:root`
//! selectors become host-element selectors (`:host`, or a caller-supplied
//! custom selector), with trailing attribute selectors folded into the
//! host's functional form.

#[cfg(feature = "napi-bindings")]
use napi::bindgen_prelude::*;
#[cfg(feature = "napi-bindings")]
use napi_derive::napi;

mod config;
pub mod css_rules;
pub mod host_rewriter;

// Re-exports
pub use config::TransformOptions;
pub use css_rules::{process_rules, CssRule};
pub use host_rewriter::HostRewriter;

/// Transform a stylesheet, taking options as a JSON string
/// (`{"customHostSelector": "..."}`). Invalid options JSON is reported as an
/// error; the transform itself cannot fail.
#[cfg(feature = "napi-bindings")]
#[napi]
pub fn transform_css(css: String, options_json: Option<String>) -> Result<String> {
    let options: TransformOptions = match options_json {
        Some(json) => serde_json::from_str(&json)
            .map_err(|e| Error::from_reason(format!("invalid transform options: {}", e)))?,
        None => TransformOptions::default(),
    };

    let rewriter = HostRewriter::from_options(&options);
    Ok(rewriter.transform_css_text(&css))
}

/// Rewrite a single selector with the given host selector.
#[cfg(feature = "napi-bindings")]
#[napi]
pub fn rewrite_selector(selector: String, host_selector: Option<String>) -> String {
    let rewriter = match host_selector.as_deref() {
        Some(host) => HostRewriter::with_host_selector(host),
        None => HostRewriter::new(),
    };
    rewriter.rewrite_selector(&selector)
}
