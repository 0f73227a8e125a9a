//! Aggregated manifest rendering.
//!
//! The manifest is the multi-document YAML file `podman kube play` reads when
//! the quadlet unit starts. Entries are sorted so that the output does not
//! depend on the order the inputs were given in.

use std::cmp::Ordering;

use crate::model::InputResource;

/// Stable sort key: kind, then namespace, then name.
pub fn compare_entries(a: &InputResource, b: &InputResource) -> Ordering {
    a.kind()
        .cmp(&b.kind())
        .then_with(|| a.namespace().cmp(&b.namespace()))
        .then_with(|| a.name().cmp(&b.name()))
}

/// Return the entries in manifest order without touching the input.
pub fn sorted_entries(entries: &[InputResource]) -> Vec<&InputResource> {
    let mut sorted: Vec<&InputResource> = entries.iter().collect();
    sorted.sort_by(|a, b| compare_entries(a, b));
    sorted
}

/// Serialize entries as one YAML stream, documents separated by `---`.
pub fn render_manifest(entries: &[InputResource]) -> Result<String, serde_yaml::Error> {
    let mut out = String::new();
    for (i, entry) in sorted_entries(entries).into_iter().enumerate() {
        if i > 0 {
            out.push_str("---\n");
        }
        out.push_str(&serde_yaml::to_string(&entry.value)?);
    }
    Ok(out)
}
