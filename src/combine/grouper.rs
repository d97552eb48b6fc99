//! Fixed-size grouping of sorted recordings.

/// A contiguous run of items from a sorted list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileGroup<'a, T> {
    /// 1-based group number.
    pub index: usize,
    /// Position of the first item in the full list.
    pub start: usize,
    /// Items in this group, in list order.
    pub files: &'a [T],
}

/// Split `files` into consecutive groups of at most `size` items.
///
/// Every group except possibly the last holds exactly `size` items. A size
/// of 0 is treated as 1.
pub fn group_files<T>(files: &[T], size: usize) -> Vec<FileGroup<'_, T>> {
    let size = size.max(1);
    files
        .chunks(size)
        .enumerate()
        .map(|(i, chunk)| FileGroup {
            index: i + 1,
            start: i * size,
            files: chunk,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_sizes() {
        let items: Vec<u32> = (0..7).collect();
        let groups = group_files(&items, 3);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].files, &[0, 1, 2]);
        assert_eq!(groups[1].files, &[3, 4, 5]);
        assert_eq!(groups[2].files, &[6]);
        assert_eq!(groups[2].index, 3);
        assert_eq!(groups[2].start, 6);
    }

    #[test]
    fn test_group_partition_covers_every_item_once() {
        for len in 0..25usize {
            for size in 1..8usize {
                let items: Vec<usize> = (0..len).collect();
                let groups = group_files(&items, size);

                assert_eq!(groups.len(), len.div_ceil(size));
                let flat: Vec<usize> = groups.iter().flat_map(|g| g.files.iter().copied()).collect();
                assert_eq!(flat, items);
                for g in groups.iter().take(groups.len().saturating_sub(1)) {
                    assert_eq!(g.files.len(), size);
                }
            }
        }
    }

    #[test]
    fn test_group_empty_input() {
        let items: Vec<u8> = Vec::new();
        assert!(group_files(&items, 200).is_empty());
    }

    #[test]
    fn test_group_size_zero_treated_as_one() {
        let items = [1, 2];
        assert_eq!(group_files(&items, 0).len(), 2);
    }
}
