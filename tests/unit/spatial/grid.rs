//! Tests for grid geometry, metadata validation and the coverage check

#[cfg(test)]
mod tests {
    use depixelator::DepixelError;
    use depixelator::spatial::{CellCoordinate, Extent, GridMetadata, PixelGrid, RgbColor};
    use std::collections::BTreeMap;

    fn full_cells(cols: u32, rows: u32, color: RgbColor) -> BTreeMap<CellCoordinate, RgbColor> {
        let mut cells = BTreeMap::new();
        for row in 0..rows {
            for col in 0..cols {
                cells.insert(CellCoordinate::new(col, row), color);
            }
        }
        cells
    }

    // Tests extents render and parse as "WxH"
    // Verified by swapping width and height in Display
    #[test]
    fn test_extent_text_form() {
        let extent = Extent::new(640, 480);
        assert_eq!(extent.to_string(), "640x480");
        assert_eq!("640x480".parse(), Ok(extent));
        assert!("640*480".parse::<Extent>().is_err());
        assert_eq!(extent.area(), 307_200);
    }

    // Tests grid dimensions round up for partial cells
    // Verified by using floor division
    #[test]
    fn test_grid_dimensions_ceil() {
        let metadata = GridMetadata::new(30, 30, 25).unwrap();
        assert_eq!(metadata.grid_dimensions(), Extent::new(2, 2));
        assert!(!metadata.is_perfect_grid());

        let metadata = GridMetadata::new(50, 75, 25).unwrap();
        assert_eq!(metadata.grid_dimensions(), Extent::new(2, 3));
        assert!(metadata.is_perfect_grid());

        let metadata = GridMetadata::new(1, 1, 25).unwrap();
        assert_eq!(metadata.grid_dimensions(), Extent::new(1, 1));
        assert!(!metadata.is_perfect_grid());
    }

    // Tests zero cell size and zero-area bitmaps are rejected
    // Verified by removing each precondition check
    #[test]
    fn test_metadata_rejects_invalid_arguments() {
        assert!(matches!(
            GridMetadata::new(10, 10, 0),
            Err(DepixelError::InvalidArgument {
                parameter: "cell_size",
                ..
            })
        ));
        assert!(matches!(
            GridMetadata::new(0, 10, 5),
            Err(DepixelError::InvalidArgument {
                parameter: "bitmap",
                ..
            })
        ));
        assert!(matches!(
            GridMetadata::new(10, 0, 5),
            Err(DepixelError::InvalidArgument { .. })
        ));
    }

    // Tests assembling a grid re-validates metadata built by hand
    // Verified by storing the metadata unchecked
    #[test]
    fn test_from_parts_validates_metadata() {
        let metadata = GridMetadata {
            width: 10,
            height: 10,
            cell_size: 0,
        };
        let result = PixelGrid::from_parts(metadata, BTreeMap::new());
        assert!(matches!(result, Err(DepixelError::InvalidArgument { .. })));
    }

    // Tests a complete lattice passes validation
    // Verified by comparing against floor-divided dimensions
    #[test]
    fn test_validate_complete_grid() {
        let metadata = GridMetadata::new(30, 30, 25).unwrap();
        let grid =
            PixelGrid::from_parts(metadata, full_cells(2, 2, RgbColor::new(1, 2, 3))).unwrap();

        assert!(grid.validate().is_ok());
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.color_at(CellCoordinate::new(1, 1)), Some(RgbColor::new(1, 2, 3)));
        assert_eq!(grid.color_at(CellCoordinate::new(2, 0)), None);
    }

    // Tests a missing cell is reported as a corrupt grid
    // Verified by removing the count check
    #[test]
    fn test_validate_missing_cell() {
        let metadata = GridMetadata::new(30, 30, 25).unwrap();
        let mut cells = full_cells(2, 2, RgbColor::default());
        cells.remove(&CellCoordinate::new(1, 0));
        let grid = PixelGrid::from_parts(metadata, cells).unwrap();

        match grid.validate() {
            Err(DepixelError::CorruptGrid {
                expected, found, ..
            }) => {
                assert_eq!(expected, 4);
                assert_eq!(found, 3);
            }
            other => unreachable!("Expected CorruptGrid, got {other:?}"),
        }
    }

    // Tests an out-of-lattice cell is caught even when the count matches
    // Verified by removing the range check
    #[test]
    fn test_validate_stray_cell() {
        let metadata = GridMetadata::new(30, 30, 25).unwrap();
        let mut cells = full_cells(2, 2, RgbColor::default());
        cells.remove(&CellCoordinate::new(1, 1));
        cells.insert(CellCoordinate::new(2, 1), RgbColor::default());
        let grid = PixelGrid::from_parts(metadata, cells).unwrap();

        match grid.validate() {
            Err(DepixelError::CorruptGrid { reason, .. }) => {
                assert!(reason.contains("2,1"), "reason should name the cell: {reason}");
            }
            other => unreachable!("Expected CorruptGrid, got {other:?}"),
        }
    }
}
