//! Data-intake descriptors for `from` trunks. Immutable once built.

use serde::{Deserialize, Serialize};

use crate::types::Layout;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    File {
        path: String,
        #[serde(default)]
        format: Option<String>,
        #[serde(default)]
        layout: Option<Layout>,
    },
    Http {
        url: String,
    },
    Pool {
        id: String,
    },
    PoolMeta {
        id: String,
        meta: String,
    },
    CommitMeta {
        pool: String,
        commit: String,
        meta: String,
    },
    LakeMeta {
        meta: String,
    },
    Pass,
    /// Stands in for a reader the runtime wires up internally.
    Reader,
    /// Serialized as `{kind: extension, name: K}`.
    Extension {
        #[serde(rename = "name")]
        kind: String,
    },
}

impl Source {
    /// A file source with no layout.
    pub fn file(path: impl Into<String>, format: Option<&str>) -> Self {
        Source::File {
            path: path.into(),
            format: format.map(str::to_string),
            layout: None,
        }
    }

    pub fn pool(id: impl Into<String>) -> Self {
        Source::Pool { id: id.into() }
    }
}
