//! Picking the puzzle to show for a given day

use std::ops::Bound;

use crate::error::LoadError;
use crate::puzzle::{DATE_FORMAT, PuzzleMapping, PuzzleRecord};

/// How a puzzle was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// Scheduled for exactly the requested day
    Exact,
    /// Most recent puzzle before the requested day
    Fallback,
}

/// A chosen puzzle, borrowed from the mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    pub date: &'a str,
    pub record: &'a PuzzleRecord,
    pub kind: SelectionKind,
}

/// Select the puzzle for `today`.
///
/// An exact match wins; otherwise the latest puzzle dated on or before
/// `today`. Puzzles dated after `today` are never shown.
pub fn select_puzzle<'a>(
    mapping: &'a PuzzleMapping,
    today: &str,
) -> Result<Selection<'a>, LoadError> {
    if let Some((date, record)) = mapping.get_key_value(today) {
        return Ok(Selection {
            date,
            record,
            kind: SelectionKind::Exact,
        });
    }

    mapping
        .range::<str, _>((Bound::Unbounded, Bound::Included(today)))
        .next_back()
        .map(|(date, record)| Selection {
            date,
            record,
            kind: SelectionKind::Fallback,
        })
        .ok_or_else(|| LoadError::NoPuzzleFound {
            today: today.to_string(),
        })
}

/// Today's date (UTC) as `YYYY-MM-DD`
pub fn today_iso() -> String {
    chrono::Utc::now().format(DATE_FORMAT).to_string()
}
