//! Tests for Surfer 6 stream and file encode/decode

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use surfgrid::codec::header::encoded_len;
    use surfgrid::codec::{
        DecodeMode, decode, decode_strict, encode, read_grid_file, write_grid_file,
    };
    use surfgrid::io::configuration::{DEFAULT_BLANK_VALUE, HEADER_SIZE};
    use surfgrid::{Extent, Grid, GridError};

    fn encoded(grid: &Grid) -> Vec<u8> {
        let mut bytes = Vec::new();
        encode(grid, &mut bytes).unwrap();
        bytes
    }

    fn precise_grid() -> Grid {
        let cells = vec![
            0.1,
            1.0 / 3.0,
            -2.718_281_828_459_045,
            1.0e-12,
            12_345_678.9,
            DEFAULT_BLANK_VALUE,
        ];
        let mut grid = Grid::from_parts(
            Extent::new(-1.25, 3.75, 10.0, 11.0),
            3,
            2,
            (0.0, 0.0),
            DEFAULT_BLANK_VALUE,
            cells,
        )
        .unwrap();
        grid.recompute_z_range();
        grid
    }

    // Tests the encoded stream has the documented size and leading tag
    // Verified by writing eight-byte cells
    #[test]
    fn test_encode_layout() {
        let grid = Grid::create_default().unwrap();
        let bytes = encoded(&grid);

        assert_eq!(bytes.len(), encoded_len(11, 11));
        assert_eq!(bytes.get(0..4), Some(&b"DSBB"[..]));

        let first_cell = bytes.get(HEADER_SIZE..HEADER_SIZE + 4);
        assert_eq!(first_cell, Some(&0.0_f32.to_le_bytes()[..]));
        let second_cell = bytes.get(HEADER_SIZE + 4..HEADER_SIZE + 8);
        assert_eq!(second_cell, Some(&1.0_f32.to_le_bytes()[..]));
    }

    // Tests round trip keeps structure exactly and rounds cells to f32
    // Verified by writing cells as f64
    #[test]
    fn test_round_trip_structure_and_precision() {
        let original = precise_grid();
        let decoded = decode(&mut Cursor::new(encoded(&original))).unwrap();

        assert_eq!(decoded.shape(), original.shape());
        assert_eq!(decoded.extent(), original.extent());
        assert_eq!(decoded.x_step(), original.x_step());
        assert_eq!(decoded.y_step(), original.y_step());
        assert_eq!(decoded.z_min(), original.z_min());
        assert_eq!(decoded.z_max(), original.z_max());

        for (&before, &after) in original.cells().iter().zip(decoded.cells()) {
            assert_eq!(after, f64::from(before as f32));
            let narrowed = before as f32;
            let ulp = f64::from((f32::from_bits(narrowed.to_bits() + 1) - narrowed).abs());
            assert!((after - before).abs() <= ulp, "{before} -> {after}");
        }
    }

    // Tests values representable in f32 survive exactly
    // Verified by truncating instead of rounding
    #[test]
    fn test_round_trip_exact_for_f32_values() {
        let original = Grid::create_default().unwrap();
        let decoded = decode(&mut Cursor::new(encoded(&original))).unwrap();

        assert_eq!(decoded, original);
    }

    // Tests the blank value is reset to the default on decode
    // Verified by reading the blank value from the z range
    #[test]
    fn test_decode_resets_blank_value() {
        let mut original = Grid::create_default().unwrap();
        original.set_blank_value(-99_999.0);
        original.set(1, 1, -99_999.0);

        let decoded = decode(&mut Cursor::new(encoded(&original))).unwrap();

        assert_eq!(decoded.blank_value(), DEFAULT_BLANK_VALUE);
        assert_eq!(decoded.get(1, 1), -99_999.0);
        assert_eq!(decoded.value(1, 1), Some(-99_999.0));
    }

    // Tests the cached z range is written as stored, not rescanned
    // Verified by calling recompute_z_range inside encode
    #[test]
    fn test_z_range_travels_verbatim() {
        let mut original = Grid::create_default().unwrap();
        original.set(0, 0, -500.0);
        original.set(10, 10, 500.0);

        let decoded = decode(&mut Cursor::new(encoded(&original))).unwrap();

        assert_eq!(decoded.z_min(), 0.0);
        assert_eq!(decoded.z_max(), 120.0);
        assert_eq!(decoded.get(0, 0), -500.0);
    }

    // Tests cells beyond single precision range become infinite
    // Verified by clamping to f32::MAX
    #[test]
    fn test_narrowing_overflow() {
        let mut original = Grid::create_default().unwrap();
        original.set(2, 0, 1.0e300);
        original.set(3, 0, -1.0e300);

        let decoded = decode(&mut Cursor::new(encoded(&original))).unwrap();

        assert_eq!(decoded.get(2, 0), f64::INFINITY);
        assert_eq!(decoded.get(3, 0), f64::NEG_INFINITY);
    }

    // Tests the permissive reader skips the tag while strict mode rejects it
    // Verified by validating the tag in both modes
    #[test]
    fn test_tag_handling() {
        let mut bytes = encoded(&Grid::create_default().unwrap());
        if let Some(tag) = bytes.get_mut(0..4) {
            tag.copy_from_slice(b"DSAA");
        }

        assert!(decode(&mut Cursor::new(bytes.clone())).is_ok());
        assert!(matches!(
            decode_strict(&mut Cursor::new(bytes)),
            Err(GridError::InvalidHeader { .. })
        ));
    }

    // Tests a stream cut inside the header fails cleanly
    // Verified by defaulting missing header fields to zero
    #[test]
    fn test_truncated_mid_header() {
        let bytes = encoded(&Grid::create_default().unwrap());

        for cut in [0, 3, 6, 30, HEADER_SIZE - 1] {
            let prefix = bytes.get(..cut).map(<[u8]>::to_vec).unwrap_or_default();
            let result = decode(&mut Cursor::new(prefix));
            assert!(
                matches!(
                    result,
                    Err(GridError::Truncated {
                        section: "header",
                        ..
                    })
                ),
                "cut at {cut}: {result:?}"
            );
        }
    }

    // Tests a stream cut inside the cell block fails cleanly
    // Verified by zero-filling missing cells
    #[test]
    fn test_truncated_cells() {
        let mut bytes = encoded(&Grid::create_default().unwrap());
        bytes.truncate(bytes.len() - 2);

        let result = decode(&mut Cursor::new(bytes));
        assert!(matches!(
            result,
            Err(GridError::Truncated {
                section: "cell values",
                ..
            })
        ));
    }

    // Tests a header claiming the largest grid over a short stream reports truncation
    // Verified by reserving the full header-declared buffer before reading
    #[test]
    fn test_oversized_header_on_short_stream() {
        let mut bytes = encoded(&Grid::create_default().unwrap());
        for field in [4..6, 6..8] {
            if let Some(size) = bytes.get_mut(field) {
                size.copy_from_slice(&i16::MAX.to_le_bytes());
            }
        }

        let result = decode(&mut Cursor::new(bytes));
        assert!(
            matches!(
                result,
                Err(GridError::Truncated {
                    section: "cell values",
                    ..
                })
            ),
            "{result:?}"
        );
    }

    // Tests grids larger than one read chunk decode completely
    // Verified by stopping after the first chunk
    #[test]
    fn test_decode_spans_several_chunks() {
        let cells: Vec<f64> = (0..300 * 300).map(|i| f64::from(i % 1000)).collect();
        let original = Grid::from_parts(
            Extent::new(0.0, 299.0, 0.0, 299.0),
            300,
            300,
            (0.0, 999.0),
            DEFAULT_BLANK_VALUE,
            cells,
        )
        .unwrap();

        let decoded = decode(&mut Cursor::new(encoded(&original))).unwrap();
        assert_eq!(decoded.cells().len(), 90_000);
        assert_eq!(decoded, original);
    }

    // Tests negative sizes are rejected, zero sizes give an empty grid
    // Verified by casting sizes with `as usize`
    #[test]
    fn test_degenerate_sizes() {
        let mut bytes = encoded(&Grid::create_default().unwrap());
        if let Some(x_size) = bytes.get_mut(4..6) {
            x_size.copy_from_slice(&(-2_i16).to_le_bytes());
        }
        assert!(matches!(
            decode(&mut Cursor::new(bytes.clone())),
            Err(GridError::InvalidHeader { .. })
        ));

        if let Some(x_size) = bytes.get_mut(4..6) {
            x_size.copy_from_slice(&0_i16.to_le_bytes());
        }
        let empty = decode(&mut Cursor::new(bytes.clone())).unwrap();
        assert_eq!(empty.shape(), (0, 11));
        assert!(empty.cells().is_empty());
        assert_eq!(empty.x_step(), -10.0);

        assert!(decode_strict(&mut Cursor::new(bytes)).is_err());
    }

    // Tests file round trip through a temporary directory
    // Verified by skipping the writer flush
    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.grd");
        let original = precise_grid();

        write_grid_file(&path, &original).unwrap();
        let metadata = std::fs::metadata(&path).unwrap();
        assert_eq!(metadata.len() as usize, encoded_len(3, 2));

        let decoded = read_grid_file(&path, DecodeMode::Strict).unwrap();
        assert_eq!(decoded.shape(), (3, 2));
        assert_eq!(decoded.z_max(), original.z_max());
    }

    // Tests open failures carry the path and operation
    // Verified by mapping through the generic I/O conversion
    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.grd");

        match read_grid_file(&path, DecodeMode::Permissive) {
            Err(GridError::FileSystem {
                path: reported,
                operation,
                ..
            }) => {
                assert_eq!(reported, path);
                assert_eq!(operation, "open");
            }
            other => unreachable!("Expected FileSystem error, got {other:?}"),
        }
    }

    // Tests create failures carry the path and operation
    // Verified by creating parent directories implicitly
    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.grd");
        let grid = Grid::create_default().unwrap();

        assert!(matches!(
            write_grid_file(&path, &grid),
            Err(GridError::FileSystem {
                operation: "create",
                ..
            })
        ));
    }

    // Tests truncated files report the read path
    // Verified by dropping path context on decode errors
    #[test]
    fn test_truncated_file_keeps_error_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.grd");
        std::fs::write(&path, b"DSBB\x0b\x00").unwrap();

        assert!(matches!(
            read_grid_file(&path, DecodeMode::Permissive),
            Err(GridError::Truncated { .. })
        ));
    }
}
