use proptest::prelude::*;
use scenario_grid::{
    decode_column, decode_range, encode_column, encode_range, parse_range, CellRef, GridDimensions,
    RangeFault, GridError,
};

proptest! {
    #[test]
    fn prop_encode_decode_round_trip(rows in 1u32..100_000, cols in 1u32..100_000) {
        let encoded = encode_range(rows, cols);
        prop_assert_eq!(decode_range(&encoded).unwrap(), GridDimensions::new(rows, cols));
    }

    #[test]
    fn prop_column_codec_round_trip(col in 1u32..=u32::MAX) {
        prop_assert_eq!(decode_column(&encode_column(col)).unwrap(), col);
    }

    #[test]
    fn prop_cell_display_parses_back(col in 1u32..20_000, row in 1u32..1_000_000) {
        let cell = CellRef::new(col, row).unwrap();
        let parsed: CellRef = cell.to_string().parse().unwrap();
        prop_assert_eq!(parsed, cell);
    }

    #[test]
    fn prop_offset_ranges_keep_dimensions(
        start_col in 1u32..500,
        start_row in 1u32..500,
        rows in 1u32..500,
        cols in 1u32..500,
    ) {
        let start = CellRef::new(start_col, start_row).unwrap();
        let end = CellRef::new(start_col + cols - 1, start_row + rows - 1).unwrap();
        let range = format!("{start}:{end}");
        prop_assert_eq!(decode_range(&range).unwrap(), GridDimensions::new(rows, cols));
        prop_assert!(parse_range(&range).unwrap().contains(&end));
    }

    #[test]
    fn prop_inverted_ranges_rejected(
        a_col in 1u32..500,
        a_row in 1u32..500,
        d_col in 1u32..50,
        d_row in 0u32..50,
    ) {
        // end strictly precedes start in the column dimension
        let start = CellRef::new(a_col + d_col, a_row + d_row).unwrap();
        let end = CellRef::new(a_col, a_row).unwrap();
        let err = decode_range(&format!("{start}:{end}")).unwrap_err();
        let is_inverted = matches!(err, GridError::MalformedRange { fault: RangeFault::Inverted, .. });
        prop_assert!(is_inverted);
    }

    #[test]
    fn prop_decode_is_deterministic(s in "[A-Za-z]{1,3}[0-9]{1,3}:[A-Za-z]{1,3}[0-9]{1,3}") {
        prop_assert_eq!(decode_range(&s), decode_range(&s));
    }
}

#[test]
fn documented_inverted_example_is_rejected() {
    assert!(decode_range("C3:A1").is_err());
}
