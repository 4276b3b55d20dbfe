//! Search collaborator backed by child processes.
//!
//! Each request runs one program to completion and returns its stdout. Spawn
//! failures, non-zero exits and non-UTF-8 output become `CpError::Backend`.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use clap::Args;
use latticefold::encode::RotationEncoding;
use latticefold::protocol::tiling_args;
use latticefold::session::{LoopMode, SearchBackend};
use latticefold::CpError;

/// Paths of the external search programs.
#[derive(Args, Clone, Debug)]
pub struct Programs {
    /// Tiling search: `<prog> <side> <slot>...`
    #[arg(long, default_value = "ftcp")]
    pub tiling_program: PathBuf,
    /// Loop length and connected silhouette search (`-mode=calcLength`, `-mode=findCP`)
    #[arg(long, default_value = "dotToGraph")]
    pub dot_program: PathBuf,
    /// Silhouette search for outlines made of several loops: `<prog> <dots>`
    #[arg(long, default_value = "solve_non_connect")]
    pub non_connect_program: PathBuf,
}

pub struct ProcessSearch {
    programs: Programs,
}

impl ProcessSearch {
    pub fn new(programs: Programs) -> Self {
        Self { programs }
    }
}

fn run(program: &Path, args: &[String]) -> Result<String, CpError> {
    let started = Instant::now();
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| CpError::backend(format!("cannot run {}: {e}", program.display())))?;
    tracing::debug!(
        program = %program.display(),
        args = args.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "search program finished"
    );
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CpError::backend(format!(
            "{} exited with {}: {}",
            program.display(),
            output.status,
            stderr.trim()
        )));
    }
    String::from_utf8(output.stdout)
        .map_err(|_| CpError::backend(format!("{} wrote non-UTF-8 output", program.display())))
}

impl SearchBackend for ProcessSearch {
    fn find_tiling(&mut self, encoding: &RotationEncoding) -> Result<String, CpError> {
        run(&self.programs.tiling_program, &tiling_args(encoding))
    }

    fn calc_loop_length(&mut self, dots: &str) -> Result<String, CpError> {
        let args = ["-mode=calcLength".to_string(), dots.to_string()];
        run(&self.programs.dot_program, &args)
    }

    fn find_painted(&mut self, mode: LoopMode, dots: &str, speed: u32) -> Result<String, CpError> {
        match mode {
            LoopMode::Connected => {
                let args = [
                    "-mode=findCP".to_string(),
                    dots.to_string(),
                    speed.to_string(),
                ];
                run(&self.programs.dot_program, &args)
            }
            LoopMode::Disconnected => {
                run(&self.programs.non_connect_program, &[dots.to_string()])
            }
        }
    }
}
