use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use rpmkit_types::PlacementMethod;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArtifactEvent {
    /// The artifact link was followed to the real package file
    Resolved { link: PathBuf, real: PathBuf },

    /// Hard linking was refused; falling back to a content copy
    LinkFallback {
        source: PathBuf,
        destination: PathBuf,
        reason: String,
    },

    Placed {
        source: PathBuf,
        destination: PathBuf,
        method: PlacementMethod,
    },
}
