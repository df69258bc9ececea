use crate::core::{Record, RecordId};
use crate::selection::SelectionTracker;
use std::ops::Range;
use std::sync::Arc;

/// Everything a view needs to draw one row without querying again
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a> {
    /// Position in the full query result
    pub index: usize,
    pub record: &'a Arc<Record>,
    pub is_selected: bool,
    /// Zebra striping, counted on the absolute index
    pub is_even: bool,
    /// This record is the edit currently awaiting its save
    pub is_in_flight: bool,
}

/// Lazily build row views for `range` of `result`
///
/// Only the records inside the range are visited. The range is clipped to
/// the result length.
pub fn row_views<'a>(
    result: &'a [Arc<Record>],
    range: Range<usize>,
    selection: &'a SelectionTracker,
    in_flight: Option<&'a RecordId>,
) -> impl Iterator<Item = RowView<'a>> + 'a {
    let end = range.end.min(result.len());
    let start = range.start.min(end);

    result[start..end]
        .iter()
        .enumerate()
        .map(move |(offset, record)| {
            let index = start + offset;
            RowView {
                index,
                record,
                is_selected: selection.contains(record.id()),
                is_even: index % 2 == 0,
                is_in_flight: in_flight == Some(record.id()),
            }
        })
}
