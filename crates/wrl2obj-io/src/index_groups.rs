//! Decoding of flat, `-1`-terminated index lists.
//!
//! `coordIndex` arrays are written as one flat comma-separated list in which
//! `-1` closes each group: `0, 1, 2, -1, 2, 3, -1` holds the groups
//! `[0, 1, 2]` and `[2, 3]`. The terminator is never stored.

use thiserror::Error;
use wrl2obj_core::document::IndexGroup;

/// Value that closes an index group.
pub const GROUP_TERMINATOR: i64 = -1;

/// Positions are offsets into the flat value sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexGroupError {
    #[error("empty index group: -1 with no preceding index")]
    EmptyGroup { position: usize },
    #[error("negative index {value}; only -1 may appear as a group terminator")]
    NegativeIndex { value: i64, position: usize },
    #[error("index {value} is too large")]
    OutOfRange { value: i64, position: usize },
    #[error("index group is not terminated by -1")]
    Unterminated { position: usize },
}

impl IndexGroupError {
    /// Offset of the offending value in the flat sequence.
    pub fn position(&self) -> usize {
        match *self {
            IndexGroupError::EmptyGroup { position }
            | IndexGroupError::NegativeIndex { position, .. }
            | IndexGroupError::OutOfRange { position, .. }
            | IndexGroupError::Unterminated { position } => position,
        }
    }
}

/// Splits a flat value list into index groups.
///
/// Every group holds at least one index and must be closed by `-1`; an
/// unterminated trailing group is an error, not an implicit group.
pub fn decode_index_groups(values: &[i64]) -> Result<Vec<IndexGroup>, IndexGroupError> {
    let mut groups = Vec::new();
    let mut current = IndexGroup::new();
    let mut group_start = 0;

    for (position, &value) in values.iter().enumerate() {
        if value == GROUP_TERMINATOR {
            if current.is_empty() {
                return Err(IndexGroupError::EmptyGroup { position });
            }
            groups.push(std::mem::take(&mut current));
            group_start = position + 1;
            continue;
        }
        if value < 0 {
            return Err(IndexGroupError::NegativeIndex { value, position });
        }
        let index =
            usize::try_from(value).map_err(|_| IndexGroupError::OutOfRange { value, position })?;
        current.push(index);
    }

    if !current.is_empty() {
        return Err(IndexGroupError::Unterminated {
            position: group_start,
        });
    }
    Ok(groups)
}

/// Flattens groups back into the terminated form.
pub fn encode_index_groups(groups: &[IndexGroup]) -> Vec<i64> {
    let mut values = Vec::with_capacity(groups.iter().map(|g| g.len() + 1).sum());
    for group in groups {
        values.extend(group.iter().map(|&i| i as i64));
        values.push(GROUP_TERMINATOR);
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_groups() {
        let groups = decode_index_groups(&[0, 1, 2, -1, 3, 4, -1]).unwrap();
        assert_eq!(groups, vec![vec![0, 1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_decode_single_index_group() {
        assert_eq!(decode_index_groups(&[7, -1]).unwrap(), vec![vec![7]]);
    }

    #[test]
    fn test_decode_empty_list() {
        assert!(decode_index_groups(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_empty_group() {
        assert_eq!(
            decode_index_groups(&[0, 1, -1, -1]),
            Err(IndexGroupError::EmptyGroup { position: 3 })
        );
        assert_eq!(
            decode_index_groups(&[-1]),
            Err(IndexGroupError::EmptyGroup { position: 0 })
        );
    }

    #[test]
    fn test_decode_rejects_other_negatives() {
        let err = decode_index_groups(&[0, -2, -1]).unwrap_err();
        assert_eq!(err, IndexGroupError::NegativeIndex { value: -2, position: 1 });
        assert_eq!(err.position(), 1);
    }

    #[test]
    fn test_decode_rejects_unterminated_group() {
        let err = decode_index_groups(&[0, 1, -1, 2, 3]).unwrap_err();
        assert_eq!(err, IndexGroupError::Unterminated { position: 3 });
    }

    #[test]
    fn test_encode_inverts_decode() {
        let values = [5, 6, 7, -1, 0, -1, 1, 2, -1];
        let groups = decode_index_groups(&values).unwrap();
        assert_eq!(encode_index_groups(&groups), values);
    }
}
