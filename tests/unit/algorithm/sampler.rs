//! Tests for top-left-corner grid sampling including edge cells and preconditions

#[cfg(test)]
mod tests {
    use depixelator::DepixelError;
    use depixelator::algorithm::sample;
    use depixelator::spatial::{CellCoordinate, Extent, RgbColor};
    use image::{Rgb, RgbImage};

    // Tests the all-red example yields four red cells
    // Verified by sampling only interior cells
    #[test]
    fn test_sample_uniform_red() {
        let bitmap = RgbImage::from_pixel(50, 50, Rgb([255, 0, 0]));
        let grid = sample(&bitmap, 25).unwrap();

        let red = RgbColor::new(255, 0, 0);
        let expected: Vec<_> = [(0, 0), (1, 0), (0, 1), (1, 1)]
            .into_iter()
            .map(|(col, row)| (CellCoordinate::new(col, row), red))
            .collect();
        let actual: Vec<_> = grid.cells().iter().map(|(&c, &color)| (c, color)).collect();

        assert_eq!(actual, expected);
        assert_eq!(grid.metadata().width, 50);
        assert_eq!(grid.metadata().height, 50);
        assert_eq!(grid.metadata().cell_size, 25);
    }

    // Tests the representative is the top-left pixel, not an average
    // Verified by sampling the cell center
    #[test]
    fn test_sample_uses_top_left_pixel() {
        let mut bitmap = RgbImage::from_pixel(4, 4, Rgb([0, 0, 255]));
        bitmap.put_pixel(0, 0, Rgb([9, 9, 9]));
        bitmap.put_pixel(2, 2, Rgb([7, 7, 7]));

        let grid = sample(&bitmap, 2).unwrap();

        assert_eq!(grid.color_at(CellCoordinate::new(0, 0)), Some(RgbColor::new(9, 9, 9)));
        assert_eq!(grid.color_at(CellCoordinate::new(1, 1)), Some(RgbColor::new(7, 7, 7)));
        assert_eq!(
            grid.color_at(CellCoordinate::new(1, 0)),
            Some(RgbColor::new(0, 0, 255))
        );
    }

    // Tests partial edge cells are included in the grid
    // Verified by iterating with floor-divided dimensions
    #[test]
    fn test_sample_includes_partial_cells() {
        let bitmap = RgbImage::from_fn(7, 3, |x, y| Rgb([x as u8, y as u8, 0]));
        let grid = sample(&bitmap, 2).unwrap();

        assert_eq!(grid.grid_dimensions(), Extent::new(4, 2));
        assert_eq!(grid.len(), 8);
        assert_eq!(grid.color_at(CellCoordinate::new(3, 1)), Some(RgbColor::new(6, 2, 0)));
        assert!(grid.validate().is_ok());
    }

    // Tests a cell larger than the bitmap produces a single cell
    // Verified by rejecting cell sizes above the bitmap size
    #[test]
    fn test_sample_cell_larger_than_bitmap() {
        let bitmap = RgbImage::from_fn(3, 2, |x, _| Rgb([x as u8 * 10, 0, 0]));
        let grid = sample(&bitmap, 25).unwrap();

        assert_eq!(grid.len(), 1);
        assert_eq!(grid.color_at(CellCoordinate::new(0, 0)), Some(RgbColor::new(0, 0, 0)));
    }

    // Tests a zero cell size is an invalid argument
    // Verified by removing the cell size check
    #[test]
    fn test_sample_zero_cell_size() {
        let bitmap = RgbImage::new(10, 10);
        assert!(matches!(
            sample(&bitmap, 0),
            Err(DepixelError::InvalidArgument {
                parameter: "cell_size",
                ..
            })
        ));
    }

    // Tests an empty bitmap is an invalid argument
    // Verified by removing the area check
    #[test]
    fn test_sample_empty_bitmap() {
        let bitmap = RgbImage::new(0, 0);
        assert!(matches!(
            sample(&bitmap, 5),
            Err(DepixelError::InvalidArgument { .. })
        ));
    }

    // Tests sampling is deterministic and leaves the input untouched
    // Verified by painting sampled pixels back into the source
    #[test]
    fn test_sample_is_pure() {
        let bitmap = RgbImage::from_fn(33, 17, |x, y| Rgb([x as u8, y as u8, (x ^ y) as u8]));
        let before = bitmap.clone();

        let first = sample(&bitmap, 4).unwrap();
        let second = sample(&bitmap, 4).unwrap();

        assert_eq!(first, second);
        assert_eq!(bitmap, before);
    }
}
