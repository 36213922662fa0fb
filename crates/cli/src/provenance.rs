use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Inputs recorded next to a layout artifact.
pub struct Payload {
    pub symbol: String,
    pub params: Value,
    /// Headline results (geometry, radius, ...).
    pub results: Value,
}

impl Payload {
    pub fn new(symbol: impl Into<String>, params: Value) -> Self {
        Self {
            symbol: symbol.into(),
            params,
            results: Value::Null,
        }
    }

    pub fn with_results(mut self, results: Value) -> Self {
        self.results = results;
        self
    }
}

/// Build the provenance document without touching the filesystem.
#[track_caller]
pub fn document(payload: &Payload, outputs: &[String]) -> Value {
    let callsite = Location::caller();
    json!({
        "code_rev": current_git_rev(),
        "engine_version": fdomain::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "symbol": payload.symbol,
        "params": payload.params,
        "results": payload.results,
        "outputs": outputs
    })
}

/// Write `<artifact>.provenance.json` next to a layout artifact.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: &Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let sidecar = provenance_path(artifact);
    if let Some(parent) = sidecar.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }
    let doc = document(payload, &[artifact.to_string_lossy().into_owned()]);
    fs::write(&sidecar, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    Ok(sidecar)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("layout"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_name_replaces_extension() {
        let derived = provenance_path(Path::new("/tmp/layouts/square.json"));
        assert_eq!(derived, Path::new("/tmp/layouts/square.provenance.json"));
    }

    #[test]
    fn sidecar_records_symbol_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("nested").join("square.json");
        let payload = Payload::new("<1.1:1:1,1,1:4,4>", json!({"relax": true}))
            .with_results(json!({"geometry": "euclidean"}));
        let path = write_sidecar(&artifact, &payload).unwrap();
        assert!(path.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["symbol"], "<1.1:1:1,1,1:4,4>");
        assert_eq!(parsed["results"]["geometry"], "euclidean");
        assert_eq!(parsed["engine_version"], fdomain::VERSION);
    }
}
