//! Tests for PNG preview export including orientation, blanks and error handling

#[cfg(test)]
mod tests {
    use image::Rgba;
    use surfgrid::io::image::{export_grid_as_png, ramp_color};
    use surfgrid::io::configuration::DEFAULT_BLANK_VALUE;
    use surfgrid::{Extent, Grid, GridError};

    // Tests ramp endpoints and midpoint
    // Verified by reversing the ramp order
    #[test]
    fn test_ramp_color_stops() {
        assert_eq!(ramp_color(0.0), Rgba([48, 18, 59, 255]));
        assert_eq!(ramp_color(0.5), Rgba([60, 200, 120, 255]));
        assert_eq!(ramp_color(1.0), Rgba([200, 30, 20, 255]));
    }

    // Tests out-of-range and NaN inputs clamp to the ends
    // Verified by removing the clamp
    #[test]
    fn test_ramp_color_clamps() {
        assert_eq!(ramp_color(-3.0), ramp_color(0.0));
        assert_eq!(ramp_color(7.5), ramp_color(1.0));
        assert_eq!(ramp_color(f64::NAN), ramp_color(0.0));
    }

    // Tests the preview is written with y_min at the bottom and blanks transparent
    // Verified by drawing row 0 at the top
    #[test]
    fn test_export_orientation_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/preview.png");

        let mut grid = Grid::create_default().unwrap();
        grid.set(5, 5, DEFAULT_BLANK_VALUE);

        export_grid_as_png(&grid, &path).unwrap();
        let img = image::open(&path).unwrap().to_rgba8();

        assert_eq!(img.dimensions(), (11, 11));
        assert_eq!(img.get_pixel(0, 10), &ramp_color(0.0));
        assert_eq!(img.get_pixel(10, 0), &ramp_color(1.0));
        assert_eq!(img.get_pixel(5, 5).0[3], 0);
    }

    // Tests empty grids are rejected
    // Verified by writing a zero-sized image
    #[test]
    fn test_export_empty_grid() {
        let dir = tempfile::tempdir().unwrap();
        let grid = Grid::from_parts(
            Extent::new(0.0, 1.0, 0.0, 1.0),
            0,
            2,
            (0.0, 0.0),
            DEFAULT_BLANK_VALUE,
            Vec::new(),
        )
        .unwrap();

        let result = export_grid_as_png(&grid, &dir.path().join("empty.png"));
        assert!(matches!(
            result,
            Err(GridError::InvalidParameter {
                parameter: "grid",
                ..
            })
        ));
        assert!(!dir.path().join("empty.png").exists());
    }
}
