//! Interactive workflows as one event handler.
//!
//! Purpose
//! - Replace per-widget callbacks with a closed `Event` type consumed by
//!   `Session::handle`, so the edit and paint workflows are testable without a
//!   GUI and without the real search programs.
//!
//! Workflows
//! - Edit: the user clicks clickable edges of a mesh; `Execute` encodes it,
//!   asks the search for a tiling and stitches the answer onto a clone (the
//!   interactive mesh survives for another attempt).
//! - Paint: the user paints cells of an 8×8 silhouette; every click refreshes
//!   the perimeter and the search's loop length. `Execute` runs only when the
//!   loop length equals `SessionCfg::required_loop_length`, choosing the
//!   connected search when the outline is a single loop.
//!
//! The search itself sits behind `SearchBackend`; the CLI implements it with
//! child processes, tests with scripted answers.

use crate::encode::{encode, RotationEncoding};
use crate::error::CpError;
use crate::lattice::EdgeKey;
use crate::mesh::{EdgeUse, GridMesh};
use crate::paint::{is_single_loop, PaintedGrid, PAINT_SIZE};
use crate::protocol::{parse_cp_report, parse_loop_length, parse_tiling, SearchOutcome};
use crate::stitch::{apply_corners, stitch_with, StitchCfg};

/// Which painted-silhouette search to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopMode {
    /// The outline is one simple loop.
    Connected,
    /// The outline splits into several loops.
    Disconnected,
}

/// The external search. Each call returns the collaborator's raw text answer.
pub trait SearchBackend {
    /// Tiling request for an encoded mesh.
    fn find_tiling(&mut self, encoding: &RotationEncoding) -> Result<String, CpError>;
    /// Loop length of a painted silhouette (`LOOP_LENGTH:<n>` answer).
    fn calc_loop_length(&mut self, dots: &str) -> Result<String, CpError>;
    /// Crease-pattern search for a painted silhouette (report-style answer).
    fn find_painted(&mut self, mode: LoopMode, dots: &str, speed: u32)
        -> Result<String, CpError>;
}

#[derive(Clone, Copy, Debug)]
pub struct SessionCfg {
    /// Loop length a painted silhouette needs before a search is attempted.
    pub required_loop_length: usize,
    /// Forwarded to the connected search (1..=500).
    pub speed: u32,
    pub stitch: StitchCfg,
}

impl Default for SessionCfg {
    fn default() -> Self {
        Self {
            required_loop_length: 4 * PAINT_SIZE,
            speed: 500,
            stitch: StitchCfg::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    CellToggled { row: usize, col: usize },
    EdgeToggled(EdgeKey),
    Reset,
    Execute,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    CellPainted {
        row: usize,
        col: usize,
        value: u8,
        perimeter: usize,
        loop_length: usize,
    },
    EdgeToggled {
        edge: EdgeKey,
        usage: EdgeUse,
    },
    Cleared,
    /// A stitched crease pattern; `mode` is set for painted searches.
    Solved {
        mesh: GridMesh,
        mode: Option<LoopMode>,
    },
    NoSolution,
    LoopRejected {
        loop_length: usize,
        required: usize,
    },
    /// The event does not apply to this workflow.
    Ignored {
        reason: &'static str,
    },
}

#[derive(Clone, Debug)]
enum Workflow {
    Edit(GridMesh),
    Paint(PaintedGrid),
}

#[derive(Clone, Debug)]
pub struct Session {
    workflow: Workflow,
    cfg: SessionCfg,
}

impl Session {
    /// Edge-editing session over `mesh`.
    pub fn editing(mesh: GridMesh, cfg: SessionCfg) -> Self {
        Self {
            workflow: Workflow::Edit(mesh),
            cfg,
        }
    }

    /// Silhouette-painting session on an empty canvas.
    pub fn painting(cfg: SessionCfg) -> Self {
        Self::painted(PaintedGrid::new(), cfg)
    }

    /// Silhouette-painting session starting from an existing canvas.
    pub fn painted(grid: PaintedGrid, cfg: SessionCfg) -> Self {
        Self {
            workflow: Workflow::Paint(grid),
            cfg,
        }
    }

    pub fn cfg(&self) -> &SessionCfg {
        &self.cfg
    }

    /// The interactive mesh, for edit sessions.
    pub fn mesh(&self) -> Option<&GridMesh> {
        match &self.workflow {
            Workflow::Edit(mesh) => Some(mesh),
            Workflow::Paint(_) => None,
        }
    }

    /// The painted canvas, for paint sessions.
    pub fn painting_grid(&self) -> Option<&PaintedGrid> {
        match &self.workflow {
            Workflow::Paint(grid) => Some(grid),
            Workflow::Edit(_) => None,
        }
    }

    pub fn handle<B: SearchBackend + ?Sized>(
        &mut self,
        event: Event,
        backend: &mut B,
    ) -> Result<Response, CpError> {
        let cfg = self.cfg;
        match (&mut self.workflow, event) {
            (Workflow::Edit(mesh), Event::EdgeToggled(edge)) => {
                if mesh.edge_by_key(edge).is_none() {
                    return Ok(Response::Ignored {
                        reason: "no such edge",
                    });
                }
                let usage = mesh.toggle_edge(edge.lo(), edge.hi())?;
                Ok(Response::EdgeToggled { edge, usage })
            }
            (Workflow::Edit(mesh), Event::Reset) => {
                mesh.reset();
                Ok(Response::Cleared)
            }
            (Workflow::Edit(mesh), Event::Execute) => solve_mesh(mesh, &cfg, backend),
            (Workflow::Edit(_), Event::CellToggled { .. }) => Ok(Response::Ignored {
                reason: "cells can only be painted in a paint session",
            }),
            (Workflow::Paint(grid), Event::CellToggled { row, col }) => {
                let Some(value) = grid.toggle(row, col) else {
                    return Ok(Response::Ignored {
                        reason: "cell is outside the canvas",
                    });
                };
                // the click only sticks once the loop length is known
                let loop_length = match backend
                    .calc_loop_length(&grid.to_dot_string())
                    .and_then(|answer| parse_loop_length(&answer))
                {
                    Ok(n) => n,
                    Err(err) => {
                        grid.toggle(row, col);
                        return Err(err);
                    }
                };
                Ok(Response::CellPainted {
                    row,
                    col,
                    value,
                    perimeter: grid.perimeter(),
                    loop_length,
                })
            }
            (Workflow::Paint(grid), Event::Reset) => {
                grid.clear();
                Ok(Response::Cleared)
            }
            (Workflow::Paint(grid), Event::Execute) => solve_painting(grid, &cfg, backend),
            (Workflow::Paint(_), Event::EdgeToggled(_)) => Ok(Response::Ignored {
                reason: "edges can only be toggled in an edit session",
            }),
        }
    }
}

fn solve_mesh<B: SearchBackend + ?Sized>(
    mesh: &GridMesh,
    cfg: &SessionCfg,
    backend: &mut B,
) -> Result<Response, CpError> {
    let encoding = encode(mesh);
    tracing::debug!(
        side = encoding.side(),
        fixed = encoding.fixed_count(),
        "requesting tiling"
    );
    let answer = backend.find_tiling(&encoding)?;
    match parse_tiling(&answer, mesh.interior_count())? {
        SearchOutcome::NoSolution => Ok(Response::NoSolution),
        SearchOutcome::Tiling(tiling) => {
            let solved = stitch_with(mesh.clone(), &tiling.tiles, cfg.stitch)?;
            Ok(Response::Solved {
                mesh: solved,
                mode: None,
            })
        }
    }
}

fn solve_painting<B: SearchBackend + ?Sized>(
    grid: &PaintedGrid,
    cfg: &SessionCfg,
    backend: &mut B,
) -> Result<Response, CpError> {
    let dots = grid.to_dot_string();
    let loop_length = parse_loop_length(&backend.calc_loop_length(&dots)?)?;
    if loop_length != cfg.required_loop_length {
        tracing::debug!(
            loop_length,
            required = cfg.required_loop_length,
            "loop length rejected"
        );
        return Ok(Response::LoopRejected {
            loop_length,
            required: cfg.required_loop_length,
        });
    }
    let mode = if is_single_loop(grid.matrix(), loop_length) {
        LoopMode::Connected
    } else {
        LoopMode::Disconnected
    };
    tracing::debug!(?mode, loop_length, speed = cfg.speed, "searching painted silhouette");

    let sheet = GridMesh::square(PAINT_SIZE);
    let answer = backend.find_painted(mode, &dots, cfg.speed)?;
    match parse_cp_report(&answer, sheet.interior_count())? {
        SearchOutcome::NoSolution => Ok(Response::NoSolution),
        SearchOutcome::Tiling(tiling) => {
            let mut solved = stitch_with(sheet, &tiling.tiles, cfg.stitch)?;
            if let Some(corners) = tiling.corners {
                apply_corners(&mut solved, corners)?;
            }
            Ok(Response::Solved {
                mesh: solved,
                mode: Some(mode),
            })
        }
    }
}
