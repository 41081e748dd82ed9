#![deny(clippy::all)]

use napi_derive::napi;
use shadowdom_transformer::{HostRewriter, TransformOptions};

/// Options object accepted by the `ShadowDomTransformer` constructor.
#[napi(object)]
#[derive(Default)]
pub struct RewriteOptions {
    /// Selector substituted for `:root`. Defaults to `:host`.
    pub custom_host_selector: Option<String>,
}

#[napi]
pub struct ShadowDomTransformer {
    rewriter: HostRewriter,
}

#[napi]
impl ShadowDomTransformer {
    #[napi(constructor)]
    pub fn new(options: Option<RewriteOptions>) -> Self {
        let options = options.unwrap_or_default();
        let transform_options = TransformOptions {
            custom_host_selector: options.custom_host_selector,
        };
        ShadowDomTransformer {
            rewriter: HostRewriter::from_options(&transform_options),
        }
    }

    /// Transform a whole stylesheet.
    #[napi]
    pub fn transform(&self, css: String) -> String {
        self.rewriter.transform_css_text(&css)
    }

    /// Rewrite a single selector.
    #[napi]
    pub fn rewrite_selector(&self, selector: String) -> String {
        self.rewriter.rewrite_selector(&selector)
    }
}
