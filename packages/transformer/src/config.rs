//! Transform configuration

use serde::{Deserialize, Serialize};

/// Options accepted by the transform. Serialized field names are camelCase,
/// so JSON produced for the Node plugin surface (`customHostSelector`)
/// deserializes directly.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
    /// Selector substituted for `:root`. Defaults to `:host` when absent.
    pub custom_host_selector: Option<String>,
}
