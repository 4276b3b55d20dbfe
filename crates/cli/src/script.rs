//! JSON-lines session scripts.
//!
//! One event per line: `{"cell":[row,col]}`, `{"edge":[x1,y1,x2,y2]}`,
//! `"reset"` or `"execute"`. Blank lines and `#` comments are skipped.

use anyhow::{Context, Result};
use latticefold::lattice::{EdgeKey, LatticePoint};
use latticefold::session::Event;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptEvent {
    Cell([usize; 2]),
    Edge([i32; 4]),
    Reset,
    Execute,
}

impl From<ScriptEvent> for Event {
    fn from(ev: ScriptEvent) -> Self {
        match ev {
            ScriptEvent::Cell([row, col]) => Event::CellToggled { row, col },
            ScriptEvent::Edge([x1, y1, x2, y2]) => Event::EdgeToggled(EdgeKey::new(
                LatticePoint::new(x1, y1),
                LatticePoint::new(x2, y2),
            )),
            ScriptEvent::Reset => Event::Reset,
            ScriptEvent::Execute => Event::Execute,
        }
    }
}

pub fn parse_script(text: &str) -> Result<Vec<Event>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            serde_json::from_str::<ScriptEvent>(line)
                .map(Event::from)
                .with_context(|| format!("script line {}: {line:?}", i + 1))
        })
        .collect()
}
