//! Line-oriented text exchange with the external search.
//!
//! Requests
//! - tiling: `<side> <slot> <slot> ...` (side = interior vertices per row),
//! - loop length / painted search: the 64-character dot string.
//!
//! Responses
//! - plain tiling answer: the first non-empty line is either the no-solution
//!   sentinel or `2 * vertex_count` digits, two per tile id;
//! - report answer (painted search): free-form diagnostic lines plus
//!   `CPSTR:<ids>`, `CORNERS:<b0 b1 b2 b3>` and `LOOP_LENGTH:<n>`.
//!
//! Anything else is a `CpError::Protocol`. "No solution" is a normal outcome.

use crate::encode::RotationEncoding;
use crate::error::CpError;

pub const NO_SOLUTION: &str = "NoSolution";
/// Older search builds answer with this instead of `NO_SOLUTION`.
pub const LEGACY_NO_SOLUTION: &str = "No CP";

const CPSTR_TAG: &str = "CPSTR:";
const CORNERS_TAG: &str = "CORNERS:";
const LOOP_LENGTH_TAG: &str = "LOOP_LENGTH:";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    NoSolution,
    Tiling(Tiling),
}

/// A solved tile assignment, row-major over interior vertices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tiling {
    pub tiles: Vec<u8>,
    /// Corner-diagonal bits (top-left, top-right, bottom-right, bottom-left), when reported.
    pub corners: Option<[u8; 4]>,
    /// Loop length echoed by report-style answers.
    pub loop_length: Option<usize>,
}

fn is_sentinel(line: &str) -> bool {
    line == NO_SOLUTION || line == LEGACY_NO_SOLUTION
}

/// Arguments of a tiling request, in process-argument form.
pub fn tiling_args(encoding: &RotationEncoding) -> Vec<String> {
    std::iter::once(encoding.side().to_string())
        .chain(encoding.slots().iter().map(|s| s.to_string()))
        .collect()
}

/// Tiling request as one line of whitespace-separated integers.
pub fn format_tiling_request(encoding: &RotationEncoding) -> String {
    if encoding.is_empty() {
        encoding.side().to_string()
    } else {
        format!("{} {}", encoding.side(), encoding)
    }
}

/// Split a fixed-width id string into 2-digit tile ids. The length is checked
/// before any chunk is parsed.
pub fn parse_tile_ids(ids: &str, vertex_count: usize) -> Result<Vec<u8>, CpError> {
    let ids = ids.trim();
    if ids.len() != 2 * vertex_count {
        return Err(CpError::protocol(format!(
            "tile string has {} characters, expected {} ({} ids)",
            ids.len(),
            2 * vertex_count,
            vertex_count
        )));
    }
    if let Some(pos) = ids.bytes().position(|b| !b.is_ascii_digit()) {
        return Err(CpError::protocol(format!(
            "tile string has a non-digit at position {pos}"
        )));
    }
    Ok(ids
        .as_bytes()
        .chunks(2)
        .map(|pair| (pair[0] - b'0') * 10 + (pair[1] - b'0'))
        .collect())
}

/// Parse a plain tiling answer: first non-empty line.
pub fn parse_tiling(response: &str, vertex_count: usize) -> Result<SearchOutcome, CpError> {
    let Some(line) = response.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return Err(CpError::protocol("empty response"));
    };
    if is_sentinel(line) {
        return Ok(SearchOutcome::NoSolution);
    }
    let tiles = parse_tile_ids(line, vertex_count)?;
    Ok(SearchOutcome::Tiling(Tiling {
        tiles,
        corners: None,
        loop_length: None,
    }))
}

fn tagged<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    line.strip_prefix(tag).map(str::trim)
}

fn parse_corners(value: &str) -> Result<[u8; 4], CpError> {
    let parsed = value
        .split_whitespace()
        .map(|v| match v {
            "0" => Ok(0u8),
            "1" => Ok(1u8),
            other => Err(CpError::protocol(format!("corner value {other:?} is not 0 or 1"))),
        })
        .collect::<Result<Vec<u8>, _>>()?;
    <[u8; 4]>::try_from(parsed.as_slice()).map_err(|_| {
        CpError::protocol(format!("expected 4 corner values, got {}", parsed.len()))
    })
}

fn parse_loop_value(value: &str) -> Result<usize, CpError> {
    value
        .parse()
        .map_err(|_| CpError::protocol(format!("loop length {value:?} is not an integer")))
}

/// Parse a report-style answer (painted search). Diagnostics are skipped; a
/// report without `CPSTR:` must carry the no-solution sentinel.
pub fn parse_cp_report(response: &str, vertex_count: usize) -> Result<SearchOutcome, CpError> {
    let mut tiles = None;
    let mut corners = None;
    let mut loop_length = None;
    let mut saw_sentinel = false;
    for line in response.lines().map(str::trim) {
        if let Some(v) = tagged(line, CPSTR_TAG) {
            tiles = Some(parse_tile_ids(v, vertex_count)?);
        } else if let Some(v) = tagged(line, CORNERS_TAG) {
            corners = Some(parse_corners(v)?);
        } else if let Some(v) = tagged(line, LOOP_LENGTH_TAG) {
            loop_length = Some(parse_loop_value(v)?);
        } else if is_sentinel(line) {
            saw_sentinel = true;
        }
    }
    match tiles {
        Some(tiles) => Ok(SearchOutcome::Tiling(Tiling {
            tiles,
            corners,
            loop_length,
        })),
        None if saw_sentinel => Ok(SearchOutcome::NoSolution),
        None => Err(CpError::protocol(
            "report has neither a CPSTR line nor a no-solution line",
        )),
    }
}

/// Parse the `LOOP_LENGTH:<n>` line of a loop-length answer.
pub fn parse_loop_length(response: &str) -> Result<usize, CpError> {
    response
        .lines()
        .map(str::trim)
        .find_map(|l| tagged(l, LOOP_LENGTH_TAG))
        .ok_or_else(|| CpError::protocol("no LOOP_LENGTH line in response"))
        .and_then(parse_loop_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;
    use crate::mesh::GridMesh;

    fn ids_string(ids: &[u8]) -> String {
        ids.iter().map(|i| format!("{i:02}")).collect()
    }

    #[test]
    fn tiling_request_leads_with_side() {
        let enc = encode(&GridMesh::square(2));
        assert_eq!(format_tiling_request(&enc), "1 0 0 0 0 0 0 0 0");
        let args = tiling_args(&enc);
        assert_eq!(args.len(), 9);
        assert_eq!(args[0], "1");

        let big = encode(&GridMesh::square(8));
        let line = format_tiling_request(&big);
        let fields: Vec<i32> = line.split_whitespace().map(|f| f.parse().unwrap()).collect();
        assert_eq!(fields.len(), 1 + 8 * 49);
        assert_eq!(fields[0], 7);
        assert!(fields[1..].contains(&-1));
    }

    #[test]
    fn plain_answers() {
        assert_eq!(parse_tiling("NoSolution\n", 49), Ok(SearchOutcome::NoSolution));
        assert_eq!(parse_tiling("No CP", 49), Ok(SearchOutcome::NoSolution));

        let ids: Vec<u8> = (0..49).map(|i| (i % 36) as u8).collect();
        let text = format!("{}\ntrailing diagnostics\n", ids_string(&ids));
        match parse_tiling(&text, 49).unwrap() {
            SearchOutcome::Tiling(t) => {
                assert_eq!(t.tiles, ids);
                assert_eq!(t.corners, None);
            }
            other => panic!("expected tiling, got {other:?}"),
        }
    }

    #[test]
    fn short_or_garbled_answers_are_protocol_errors() {
        let short = "0".repeat(96);
        assert!(matches!(parse_tiling(&short, 49), Err(CpError::Protocol { .. })));
        let odd = format!("{}x1", "0".repeat(96));
        assert!(matches!(parse_tiling(&odd, 49), Err(CpError::Protocol { .. })));
        assert!(matches!(parse_tiling("", 49), Err(CpError::Protocol { .. })));
        assert!(matches!(parse_tiling("no solution", 49), Err(CpError::Protocol { .. })));
    }

    #[test]
    fn out_of_catalog_ids_still_parse() {
        // catalog membership is the stitcher's concern
        let ids = parse_tile_ids("99", 1).unwrap();
        assert_eq!(ids, vec![99]);
    }

    #[test]
    fn report_answers() {
        let ids = vec![21u8; 49];
        let text = format!(
            "--- Search CP ---\nLOOP_LENGTH: 32\n3 Cycles found\n{0}\nCORNERS: 1 0 0 1\nCPSTR:{0}\n",
            ids_string(&ids)
        );
        assert_eq!(
            parse_cp_report(&text, 49),
            Ok(SearchOutcome::Tiling(Tiling {
                tiles: ids,
                corners: Some([1, 0, 0, 1]),
                loop_length: Some(32),
            }))
        );

        let none = "--- Search CP ---\nLOOP_LENGTH: 32\n0 Cycles found\nNo CP\n";
        assert_eq!(parse_cp_report(none, 49), Ok(SearchOutcome::NoSolution));

        let truncated = "--- Search CP ---\nLOOP_LENGTH: 32\n";
        assert!(matches!(
            parse_cp_report(truncated, 49),
            Err(CpError::Protocol { .. })
        ));
        let bad_corners = format!("CPSTR:{}\nCORNERS: 1 0 1\n", ids_string(&[0; 49]));
        assert!(parse_cp_report(&bad_corners, 49).is_err());
    }

    #[test]
    fn loop_length_line() {
        assert_eq!(parse_loop_length("LOOP_LENGTH: 4\n"), Ok(4));
        assert_eq!(parse_loop_length("noise\nLOOP_LENGTH:32"), Ok(32));
        assert!(parse_loop_length("LOOP_LENGTH: many").is_err());
        assert!(parse_loop_length("4").is_err());
    }
}
