use std::collections::BTreeMap;

use serde_json::Value;

use crate::assets::store::AssetStore;
use crate::foundation::error::{DiaError, DiaResult};
use crate::foundation::natural::natural_cmp;

/// Name of the manifest entry inside a `.dia` archive.
pub const DEFAULT_MANIFEST_NAME: &str = "optimization_map.json";

/// Options for locating the manifest inside an asset store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveOpts {
    /// Entry name of the JSON manifest.
    pub manifest_name: String,
}

impl Default for ArchiveOpts {
    fn default() -> Self {
        Self {
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
        }
    }
}

#[derive(serde::Deserialize)]
struct ManifestDef {
    #[serde(default)]
    image_map: Option<Value>,
    #[serde(default)]
    alpha_map: Option<Value>,
    #[serde(default)]
    dependencies: Option<Value>,
}

/// Immutable mapping from image identifier to its image file, alpha-map file and parent.
///
/// Built once from manifest data. Links are not validated on load: a dangling parent or a
/// cycle only surfaces when that chain is resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct DependencyIndex {
    #[serde(rename = "image_map")]
    image_of: BTreeMap<String, String>,
    #[serde(rename = "alpha_map")]
    alpha_of: BTreeMap<String, String>,
    #[serde(rename = "dependencies")]
    parent_of: BTreeMap<String, String>,
}

impl DependencyIndex {
    /// Construct an empty index. Use the `with_*` builders to populate it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `id` to the file holding its pixels.
    pub fn with_image(mut self, id: impl Into<String>, filename: impl Into<String>) -> Self {
        self.image_of.insert(id.into(), filename.into());
        self
    }

    /// Map `id` to the file holding its alpha map.
    pub fn with_alpha(mut self, id: impl Into<String>, filename: impl Into<String>) -> Self {
        self.alpha_of.insert(id.into(), filename.into());
        self
    }

    /// Layer `id` on top of `parent`.
    pub fn with_parent(mut self, id: impl Into<String>, parent: impl Into<String>) -> Self {
        self.parent_of.insert(id.into(), parent.into());
        self
    }

    /// Parse a JSON manifest.
    ///
    /// The root must be an object. The `image_map`, `alpha_map` and `dependencies` groups are
    /// each optional; a group that is not an object, or a member whose value is not a string,
    /// is skipped with a warning.
    pub fn from_json_slice(bytes: &[u8]) -> DiaResult<Self> {
        let root: Value = serde_json::from_slice(bytes)
            .map_err(|e| DiaError::parse(format!("parse manifest JSON: {e}")))?;
        Self::from_value(root)
    }

    /// Parse a JSON manifest from a reader. See [`DependencyIndex::from_json_slice`].
    pub fn from_reader<R: std::io::Read>(r: R) -> DiaResult<Self> {
        let root: Value = serde_json::from_reader(r)
            .map_err(|e| DiaError::parse(format!("parse manifest JSON: {e}")))?;
        Self::from_value(root)
    }

    /// Fetch and parse the manifest entry from `store`.
    pub fn from_store(store: &dyn AssetStore, opts: &ArchiveOpts) -> DiaResult<Self> {
        let bytes = store.fetch(&opts.manifest_name)?;
        Self::from_json_slice(&bytes)
    }

    fn from_value(root: Value) -> DiaResult<Self> {
        if !root.is_object() {
            return Err(DiaError::parse("manifest root is not an object"));
        }
        let def: ManifestDef = serde_json::from_value(root)
            .map_err(|e| DiaError::parse(format!("read manifest groups: {e}")))?;

        let out = Self {
            image_of: collect_string_group("image_map", def.image_map),
            alpha_of: collect_string_group("alpha_map", def.alpha_map),
            parent_of: collect_string_group("dependencies", def.dependencies),
        };
        tracing::debug!(
            images = out.image_of.len(),
            alpha_maps = out.alpha_of.len(),
            dependencies = out.parent_of.len(),
            "loaded dependency index"
        );
        Ok(out)
    }

    /// Filename of `id`'s own image, if mapped.
    pub fn image_of(&self, id: &str) -> Option<&str> {
        self.image_of.get(id).map(String::as_str)
    }

    /// Filename of `id`'s alpha map, if any.
    pub fn alpha_of(&self, id: &str) -> Option<&str> {
        self.alpha_of.get(id).map(String::as_str)
    }

    /// Identifier `id` is layered on top of, if any.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.parent_of.get(id).map(String::as_str)
    }

    /// Whether `id` has an image mapping.
    pub fn contains(&self, id: &str) -> bool {
        self.image_of.contains_key(id)
    }

    /// Number of renderable identifiers.
    pub fn len(&self) -> usize {
        self.image_of.len()
    }

    /// Whether no identifier is renderable.
    pub fn is_empty(&self) -> bool {
        self.image_of.is_empty()
    }

    /// `(id, filename)` for every renderable identifier, in natural order of filename with the
    /// identifier breaking ties.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = self
            .image_of
            .iter()
            .map(|(id, file)| (id.as_str(), file.as_str()))
            .collect();
        out.sort_by(|(ida, fa), (idb, fb)| natural_cmp(fa, fb).then_with(|| natural_cmp(ida, idb)));
        out
    }

    /// Emit every mapping at `debug` level.
    pub fn log_summary(&self) {
        for (id, file) in &self.image_of {
            tracing::debug!(id = %id, file = %file, "image");
        }
        for (id, parent) in &self.parent_of {
            tracing::debug!(id = %id, parent = %parent, "dependency");
        }
        for (id, file) in &self.alpha_of {
            tracing::debug!(id = %id, file = %file, "alpha map");
        }
    }
}

/// Build a [`DependencyIndex`] from JSON manifest bytes.
pub fn build_dependency_index(manifest: &[u8]) -> DiaResult<DependencyIndex> {
    DependencyIndex::from_json_slice(manifest)
}

fn collect_string_group(group: &str, value: Option<Value>) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    let obj = match value {
        None | Some(Value::Null) => return out,
        Some(Value::Object(obj)) => obj,
        Some(_) => {
            tracing::warn!(group, "skipping manifest group that is not an object");
            return out;
        }
    };

    for (key, v) in obj {
        match v {
            Value::String(s) => {
                out.insert(key, s);
            }
            _ => tracing::warn!(group, key = %key, "skipping non-string value"),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/index/manifest.rs"]
mod tests;
