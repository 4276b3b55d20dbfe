use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

/// Contents of `<stem>.provenance.json`.
#[derive(Debug, Serialize)]
struct Provenance<'a> {
    code_rev: String,
    tool_version: &'static str,
    callsite: Callsite,
    command: &'a str,
    params: Value,
    outputs: Vec<String>,
}

/// Record how `artifact` was produced next to it. Returns the sidecar path.
#[track_caller]
pub fn write_sidecar(artifact: &Path, command: &str, params: Value) -> Result<PathBuf> {
    let caller = Location::caller();
    let doc = Provenance {
        code_rev: code_rev(),
        tool_version: latticefold::VERSION,
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        command,
        params,
        outputs: vec![artifact.to_string_lossy().into_owned()],
    };
    let path = sidecar_path(artifact);
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote provenance");
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "artifact".into());
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Build-time `GIT_COMMIT`, then the runtime variable, then `git rev-parse HEAD`.
fn code_rev() -> String {
    let non_empty = |s: String| (!s.is_empty()).then_some(s);
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .and_then(non_empty)
        .or_else(|| std::env::var("GIT_COMMIT").ok().and_then(non_empty))
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
