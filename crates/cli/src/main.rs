use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use latticefold::prelude::*;
use latticefold::protocol::format_tiling_request;
use serde_json::{json, Value};
use tracing_subscriber::fmt::SubscriberBuilder;

mod backend;
mod output;
mod provenance;
mod script;

use backend::{ProcessSearch, Programs};
use output::{write_document, CpDocument};

#[derive(Parser)]
#[command(name = "latticefold")]
#[command(about = "Square-lattice crease patterns: encode, search and stitch")]
#[command(version)]
struct Cmd {
    /// Log debug events (search requests, stitching statistics)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Decode boundary fold numbers into a mesh and write it as JSON
    Folds {
        #[command(flatten)]
        boundary: Boundary,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the tiling request a boundary assignment produces
    Encode {
        #[command(flatten)]
        boundary: Boundary,
    },
    /// Decode boundary fold numbers, run the tiling search and stitch the answer
    Solve {
        #[command(flatten)]
        boundary: Boundary,
        #[command(flatten)]
        solve: SolveOpts,
    },
    /// Search a crease pattern for a painted 8×8 silhouette
    Paint {
        /// 64 characters of '0'/'1', row-major
        #[arg(long)]
        dots: String,
        #[command(flatten)]
        painting: PaintOpts,
        #[command(flatten)]
        solve: SolveOpts,
    },
    /// Print the perimeter of a painted silhouette
    Perimeter {
        #[arg(long)]
        dots: String,
    },
    /// Replay a JSON-lines event script through an interactive session
    Session {
        #[arg(long)]
        script: PathBuf,
        /// Paint session instead of an edge-editing session
        #[arg(long)]
        paint: bool,
        /// Sheet side of an edge-editing session
        #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..))]
        size: u16,
        #[command(flatten)]
        painting: PaintOpts,
        #[command(flatten)]
        solve: SolveOpts,
    },
}

#[derive(Args)]
struct Boundary {
    /// Fold numbers clockwise from the top-left corner, one per outline vertex (8 = no folds)
    #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
    folds: Vec<i32>,
    /// Sheet side; defaults to a quarter of the number count
    #[arg(long)]
    size: Option<usize>,
}

impl Boundary {
    fn size(&self) -> Result<usize> {
        let size = self.size.unwrap_or(self.folds.len() / 4);
        ensure!(size >= 1, "sheet side must be at least 1");
        Ok(size)
    }

    fn decode(&self) -> Result<GridMesh> {
        let size = self.size()?;
        decode_folds(size, &self.folds).context("decoding boundary fold numbers")
    }
}

#[derive(Args)]
struct PaintOpts {
    /// Passed to the connected silhouette search
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u32).range(1..=500))]
    speed: u32,
    /// Loop length a silhouette needs before searching
    #[arg(long, default_value_t = 32)]
    required_loop_length: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum ConflictArg {
    /// Keep the later tile's bit and warn
    LastWriteWins,
    /// Fail on the first disagreement
    Strict,
}

impl From<ConflictArg> for ConflictPolicy {
    fn from(arg: ConflictArg) -> Self {
        match arg {
            ConflictArg::LastWriteWins => ConflictPolicy::LastWriteWins,
            ConflictArg::Strict => ConflictPolicy::Strict,
        }
    }
}

#[derive(Args)]
struct SolveOpts {
    #[command(flatten)]
    programs: Programs,
    /// How to treat tiles that disagree on a shared edge
    #[arg(long, value_enum, default_value_t = ConflictArg::LastWriteWins)]
    on_conflict: ConflictArg,
    /// Write the solved pattern here (plus a provenance sidecar) instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

impl SolveOpts {
    fn session_cfg(&self, painting: Option<&PaintOpts>) -> SessionCfg {
        let mut cfg = SessionCfg {
            stitch: StitchCfg {
                on_conflict: self.on_conflict.into(),
            },
            ..SessionCfg::default()
        };
        if let Some(p) = painting {
            cfg.speed = p.speed;
            cfg.required_loop_length = p.required_loop_length;
        }
        cfg
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Folds { boundary, out } => folds(boundary, out),
        Action::Encode { boundary } => encode_request(boundary),
        Action::Solve { boundary, solve } => solve_boundary(boundary, solve),
        Action::Paint {
            dots,
            painting,
            solve,
        } => paint(dots, painting, solve),
        Action::Perimeter { dots } => {
            let grid = PaintedGrid::from_dot_string(&dots)?;
            println!("{}", grid.perimeter());
            Ok(())
        }
        Action::Session {
            script,
            paint,
            size,
            painting,
            solve,
        } => replay(script, paint, size.into(), painting, solve),
    }
}

fn folds(boundary: Boundary, out: Option<PathBuf>) -> Result<()> {
    let mesh = boundary.decode()?;
    let params = json!({ "folds": boundary.folds, "size": mesh.width() });
    publish(&mesh, out.as_deref(), "folds", params)
}

fn encode_request(boundary: Boundary) -> Result<()> {
    let enc = encode(&boundary.decode()?);
    tracing::info!(fixed = enc.fixed_count(), slots = enc.len(), "encoded");
    println!("{}", format_tiling_request(&enc));
    Ok(())
}

fn solve_boundary(boundary: Boundary, solve: SolveOpts) -> Result<()> {
    let mesh = boundary.decode()?;
    let params = json!({
        "folds": boundary.folds,
        "size": mesh.width(),
        "tiling_program": solve.programs.tiling_program,
    });
    let mut session = Session::editing(mesh, solve.session_cfg(None));
    let mut search = ProcessSearch::new(solve.programs.clone());
    let response = session.handle(Event::Execute, &mut search)?;
    emit(response, &solve, "solve", &params)
}

fn paint(dots: String, painting: PaintOpts, solve: SolveOpts) -> Result<()> {
    let grid = PaintedGrid::from_dot_string(&dots)?;
    tracing::info!(
        cells = grid.filled(),
        perimeter = grid.perimeter(),
        "painted silhouette"
    );
    let params = json!({
        "dots": dots,
        "speed": painting.speed,
        "required_loop_length": painting.required_loop_length,
    });
    let mut session = Session::painted(grid, solve.session_cfg(Some(&painting)));
    let mut search = ProcessSearch::new(solve.programs.clone());
    match session.handle(Event::Execute, &mut search)? {
        Response::LoopRejected {
            loop_length,
            required,
        } => bail!("circuit length must be {required}, the search reports {loop_length}"),
        response => emit(response, &solve, "paint", &params),
    }
}

fn replay(
    script: PathBuf,
    paint: bool,
    size: usize,
    painting: PaintOpts,
    solve: SolveOpts,
) -> Result<()> {
    let text = std::fs::read_to_string(&script)
        .with_context(|| format!("reading {}", script.display()))?;
    let events = script::parse_script(&text)?;
    let mut session = if paint {
        Session::painted(PaintedGrid::new(), solve.session_cfg(Some(&painting)))
    } else {
        Session::editing(GridMesh::square(size), solve.session_cfg(None))
    };
    let mut search = ProcessSearch::new(solve.programs.clone());
    let params = json!({ "script": script, "paint": paint, "size": size });
    tracing::info!(events = events.len(), paint, "replaying session");
    for event in events {
        let response = session.handle(event, &mut search)?;
        emit(response, &solve, "session", &params)?;
    }
    Ok(())
}

/// Log a session response; solved patterns are written out.
fn emit(response: Response, solve: &SolveOpts, command: &str, params: &Value) -> Result<()> {
    match response {
        Response::Solved { mesh, mode } => {
            let (_, used, unknown) = mesh.use_counts();
            tracing::info!(?mode, used, unknown, "crease pattern found");
            publish(&mesh, solve.out.as_deref(), command, params.clone())
        }
        Response::NoSolution => {
            tracing::warn!("no flat-foldable crease pattern was found");
            Ok(())
        }
        Response::LoopRejected {
            loop_length,
            required,
        } => {
            tracing::warn!(loop_length, required, "loop length rejected, search skipped");
            Ok(())
        }
        Response::CellPainted {
            row,
            col,
            value,
            perimeter,
            loop_length,
        } => {
            tracing::info!(row, col, value, perimeter, loop_length, "cell painted");
            Ok(())
        }
        Response::EdgeToggled { edge, usage } => {
            tracing::info!(%edge, ?usage, "edge toggled");
            Ok(())
        }
        Response::Cleared => {
            tracing::info!("cleared");
            Ok(())
        }
        Response::Ignored { reason } => {
            tracing::warn!(reason, "event ignored");
            Ok(())
        }
    }
}

fn publish(
    mesh: &GridMesh,
    out: Option<&Path>,
    command: &str,
    params: Value,
) -> Result<()> {
    let doc = CpDocument::from_mesh(mesh);
    write_document(&doc, out)?;
    if let Some(path) = out {
        let sidecar = provenance::write_sidecar(path, command, params)?;
        tracing::info!(out = %path.display(), provenance = %sidecar.display(), "wrote crease pattern");
    }
    Ok(())
}
