//! JSON hand-off of a finished crease pattern for rendering collaborators.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use latticefold::mesh::{EdgeUse, GridMesh};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EdgeRecord {
    pub from: [i32; 2],
    pub to: [i32; 2],
    pub kind: String,
    #[serde(rename = "use")]
    pub usage: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CpDocument {
    pub width: usize,
    pub height: usize,
    pub edges: Vec<EdgeRecord>,
}

fn use_label(usage: EdgeUse) -> &'static str {
    match usage {
        EdgeUse::NotUsed => "not_used",
        EdgeUse::Used => "used",
        EdgeUse::Unknown => "unknown",
    }
}

impl CpDocument {
    /// Every edge in mesh order.
    pub fn from_mesh(mesh: &GridMesh) -> Self {
        let edges = mesh
            .edges()
            .iter()
            .map(|e| EdgeRecord {
                from: [e.a().x, e.a().y],
                to: [e.b().x, e.b().y],
                kind: e.kind().label().to_string(),
                usage: use_label(e.usage()).to_string(),
            })
            .collect();
        Self {
            width: mesh.width(),
            height: mesh.height(),
            edges,
        }
    }
}

/// Pretty JSON to `out`, or to stdout when `out` is `None`.
pub fn write_document(doc: &CpDocument, out: Option<&Path>) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(doc)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("creating output dir {}", parent.display()))?;
                }
            }
            fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use latticefold::lattice::LatticePoint;
    use tempfile::tempdir;

    #[test]
    fn document_lists_every_edge_with_its_class() {
        let mut mesh = GridMesh::square(2);
        mesh.toggle_edge(LatticePoint::new(1, 0), LatticePoint::new(1, 1))
            .unwrap();
        let doc = CpDocument::from_mesh(&mesh);
        assert_eq!(doc.edges.len(), 4 * 4 + 2 * 2);
        let clicked = doc
            .edges
            .iter()
            .find(|e| e.from == [1, 0] && e.to == [1, 1])
            .unwrap();
        assert_eq!(clicked.usage, "used");
        assert!(doc.edges.iter().any(|e| e.usage == "not_used"));
        assert_eq!(
            doc.edges.iter().filter(|e| e.usage == "used").count(),
            8 + 1
        );
    }

    #[test]
    fn serialized_field_is_named_use() {
        let doc = CpDocument::from_mesh(&GridMesh::square(1));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["width"], 1);
        assert_eq!(value["edges"][0]["use"], "used");
        assert!(value["edges"][0].get("usage").is_none());
    }

    #[test]
    fn writes_into_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/cp.json");
        let doc = CpDocument::from_mesh(&GridMesh::square(3));
        write_document(&doc, Some(&path)).unwrap();
        let back: CpDocument = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(back, doc);
    }
}
