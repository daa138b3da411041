use super::*;

#[test]
fn dims_reject_empty_grids() {
    assert!(GridDims::new(0, 3).is_err());
    assert!(GridDims::new(3, 0).is_err());
    assert!(GridDims::new(1, 1).is_ok());
}

#[test]
fn index_and_coord_round_trip_row_major() {
    let dims = GridDims::new(3, 4).unwrap();
    assert_eq!(dims.index_of(Coord::new(1, 2)), 6);
    assert_eq!(dims.coord_of(6), Coord::new(1, 2));
    assert_eq!(dims.coord_of(11), Coord::new(2, 3));
}

#[test]
fn scan_is_row_major() {
    let dims = GridDims::new(2, 2).unwrap();
    let order: Vec<_> = dims.scan().collect();
    assert_eq!(
        order,
        vec![
            Coord::new(0, 0),
            Coord::new(0, 1),
            Coord::new(1, 0),
            Coord::new(1, 1)
        ]
    );
}

#[test]
fn contains_respects_bounds() {
    let dims = GridDims::new(2, 3).unwrap();
    assert!(dims.contains(Coord::new(1, 2)));
    assert!(!dims.contains(Coord::new(2, 0)));
    assert!(!dims.contains(Coord::new(0, 3)));
}

#[test]
fn no_data_renders_black() {
    assert_eq!(DisplayColor::NoData.to_rgba8(), [0, 0, 0, 255]);
    assert_eq!(DisplayColor::Gray(17).to_rgba8(), [17, 17, 17, 255]);
}

#[test]
fn dims_deserialize_through_validation() {
    let dims: GridDims = serde_json::from_str(r#"{ "rows": 2, "cols": 3 }"#).unwrap();
    assert_eq!((dims.rows(), dims.cols()), (2, 3));
    assert!(serde_json::from_str::<GridDims>(r#"{ "rows": 0, "cols": 3 }"#).is_err());
}
