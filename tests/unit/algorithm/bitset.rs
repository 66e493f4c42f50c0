//! Tests for `CellBitset` membership and iteration

#[cfg(test)]
mod tests {
    use exitfield::algorithm::bitset::CellBitset;

    // Verifies a new bitset is empty with the requested capacity
    // Verified by initializing bitset with all bits set to 1
    #[test]
    fn test_new_bitset() {
        let bitset = CellBitset::new(10);
        assert_eq!(bitset.count(), 0);
        assert_eq!(bitset.capacity(), 10);
        assert_eq!(bitset.iter().next(), None);
    }

    // Tests insertion reports whether the cell was new
    // Verified by always returning true from insert
    #[test]
    fn test_insert_reports_freshness() {
        let mut bitset = CellBitset::new(10);
        assert!(bitset.insert(5));
        assert!(!bitset.insert(5));
        assert!(bitset.contains(5));
        assert!(!bitset.contains(3));
        assert_eq!(bitset.count(), 1);
    }

    // Tests removal reports whether the cell was present
    // Verified by removing the presence check from remove
    #[test]
    fn test_remove_reports_presence() {
        let mut bitset = CellBitset::new(10);
        bitset.insert(2);
        assert!(bitset.remove(2));
        assert!(!bitset.remove(2));
        assert_eq!(bitset.count(), 0);
    }

    // Tests out-of-range indices are ignored rather than panicking
    // Verified by indexing the bit vector directly
    #[test]
    fn test_out_of_range_indices() {
        let mut bitset = CellBitset::new(4);
        assert!(!bitset.insert(4));
        assert!(!bitset.contains(100));
        assert!(!bitset.remove(100));
        assert_eq!(bitset.count(), 0);
    }

    // Tests iteration yields present indices in ascending order
    // Verified by iterating over zero bits instead of one bits
    #[test]
    fn test_iter_ascending() {
        let mut bitset = CellBitset::new(16);
        for index in [9, 1, 15, 4] {
            bitset.insert(index);
        }
        assert_eq!(bitset.iter().collect::<Vec<_>>(), vec![1, 4, 9, 15]);
    }

    // Tests display output lists count, capacity and members
    // Verified by omitting the member list from the format string
    #[test]
    fn test_display() {
        let mut bitset = CellBitset::new(6);
        bitset.insert(1);
        bitset.insert(3);
        assert_eq!(bitset.to_string(), "CellBitset(2/6 cells: [1, 3])");
    }
}
