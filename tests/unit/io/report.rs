//! Tests for the human-readable analysis report

#[cfg(test)]
mod tests {
    use depixelator::algorithm::sample;
    use depixelator::analysis::analyze;
    use depixelator::io::report::write_report;
    use image::{Rgb, RgbImage};

    fn render(list_cells: bool) -> String {
        // Left half white, right half black; 4-pixel cells give a truncated 2x2 grid
        let bitmap = RgbImage::from_fn(8, 6, |x, _| {
            if x < 4 { Rgb([255, 255, 255]) } else { Rgb([0, 0, 0]) }
        });
        let grid = sample(&bitmap, 4).unwrap();
        let (histogram, summary) = analyze(&grid).unwrap();

        let mut out = Vec::new();
        write_report(&mut out, "stripes.png", &grid, &histogram, &summary, list_cells).unwrap();
        String::from_utf8(out).unwrap()
    }

    // Tests the basic analysis section
    // Verified by printing floor-divided grid dimensions
    #[test]
    fn test_report_basic_section() {
        let report = render(false);

        assert!(report.contains("Deconstructed image: stripes.png"));
        assert!(report.contains("Image dimensions: 8x6"));
        assert!(report.contains("Grid dimensions: 2x2"));
        assert!(report.contains("Total pixel blocks: 4"));
        assert!(report.contains("Perfect grid: no"));
        assert!(report.contains("UNIQUE COLORS FOUND: 2"));
    }

    // Tests color usage is listed with ties in ascending color order
    // Verified by listing colors in descending order
    #[test]
    fn test_report_color_usage_order() {
        let report = render(false);

        let black = report.find("RGB(0, 0, 0): 2 blocks").unwrap();
        let white = report.find("RGB(255, 255, 255): 2 blocks").unwrap();
        assert!(black < white);
    }

    // Tests the cell listing appears only when requested
    // Verified by ignoring the list_cells flag
    #[test]
    fn test_report_cell_listing() {
        assert!(!render(false).contains("GRID ANALYSIS"));

        let report = render(true);
        assert!(report.contains("GRID ANALYSIS:"));
        assert!(report.contains("Position 0,0: RGB(255, 255, 255)"));
        assert!(report.contains("Position 1,1: RGB(0, 0, 0)"));
        let first = report.find("Position 1,0").unwrap();
        let second = report.find("Position 0,1").unwrap();
        assert!(first < second, "cells should be listed in raster order");
    }
}
