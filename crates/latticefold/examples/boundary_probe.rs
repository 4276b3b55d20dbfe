//! Boundary probe: decode a 32-number fold assignment and show what the search
//! would receive.
//!
//! Purpose
//! - Quick sanity check of the boundary walk without running any search
//!   program: prints the request line and how many slots are already fixed.
//!
//! Usage
//! - `cargo run -p latticefold --example boundary_probe -- 8 4 1 1 ...` (32 numbers),
//!   or no arguments for a built-in sample.

use latticefold::prelude::*;
use latticefold::protocol::format_tiling_request;

const SAMPLE: [i32; 32] = [
    8, 4, 1, 1, 0, 0, 4, 0, 8, 1, 1, 4, 1, 0, 0, 3, 8, 4, 4, 0, 0, 0, 0, 6, 8, 0, 4, 1, 3, 4, 4, 3,
];

fn main() {
    let folds: Vec<i32> = std::env::args()
        .skip(1)
        .map(|a| a.parse().expect("fold numbers are integers"))
        .collect();
    let folds = if folds.is_empty() { SAMPLE.to_vec() } else { folds };

    let mesh = decode_boundary(&folds).expect("valid boundary assignment");
    let enc = encode(&mesh);
    let (not_used, used, unknown) = mesh.use_counts();
    println!("edges: {not_used} not used, {used} used, {unknown} undecided");
    println!(
        "slots: {} fixed of {} ({} interior vertices)",
        enc.fixed_count(),
        enc.len(),
        mesh.interior_count()
    );
    println!("request: {}", format_tiling_request(&enc));
}
