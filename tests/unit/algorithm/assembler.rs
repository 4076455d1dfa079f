//! Tests for print-sized assembly and framing

#[cfg(test)]
mod tests {
    use collage::algorithm::assembler::MosaicAssembler;
    use collage::algorithm::matching::MosaicOptions;
    use collage::analysis::pool::CandidatePool;
    use collage::io::image::DecodedImage;
    use collage::spatial::buffer::PixelBuffer;
    use collage::spatial::geometry::PrintSize;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const GREEN: [u8; 3] = [20, 180, 40];

    fn options() -> MosaicOptions {
        MosaicOptions {
            contour: false,
            ..MosaicOptions::default()
        }
    }

    fn single_pool(cell: usize) -> CandidatePool {
        let mut pool = CandidatePool::new("test", cell, cell);
        let image = PixelBuffer::filled(cell * 2, cell * 2, GREEN).expect("Failed to build image");
        pool.offer("green.jpg", Ok(DecodedImage::rgb(image)))
            .expect("Failed to offer");
        pool
    }

    // Tests a borderless mosaic covers the whole print
    // Verified by adding a border when the guidance is zero
    #[test]
    fn test_assemble_without_border() {
        let size = PrintSize::Custom {
            width: 8,
            height: 6,
        };
        let assembler = MosaicAssembler::new(size, 2, 0, options()).expect("Failed to lay out");
        let target = PixelBuffer::filled(16, 12, [90; 3]).expect("Failed to build target");

        assert_eq!(assembler.geometry().creator_dimensions(), (8, 6));

        let mosaic = assembler
            .assemble(&target, &single_pool(2), StdRng::seed_from_u64(1))
            .expect("Failed to assemble");

        assert_eq!(mosaic.dimensions(), (8, 6));
        assert!(mosaic.pixels().all(|p| p == GREEN));
    }

    // Tests the border is added around the cells when requested
    // Verified by returning the inner mosaic unchanged
    #[test]
    fn test_assemble_with_border() {
        let size = PrintSize::Custom {
            width: 9,
            height: 7,
        };
        let assembler = MosaicAssembler::new(size, 2, 1, options()).expect("Failed to lay out");
        let geometry = *assembler.geometry();
        assert_eq!((geometry.cols, geometry.rows), (3, 2));

        let target = PixelBuffer::filled(12, 8, [90; 3]).expect("Failed to build target");
        let mosaic = assembler
            .assemble(&target, &single_pool(2), StdRng::seed_from_u64(2))
            .expect("Failed to assemble");

        assert_eq!(mosaic.dimensions(), (9, 7));
        assert_eq!(mosaic.pixel(0, 0), Some([255; 3]));
        assert_eq!(mosaic.pixel(8, 6), Some([255; 3]));
        assert_eq!(
            mosaic.pixel(geometry.border.left, geometry.border.top),
            Some(GREEN)
        );
    }

    // Tests a custom border colour
    // Verified by ignoring the configured colour
    #[test]
    fn test_border_color() {
        let size = PrintSize::Custom {
            width: 9,
            height: 7,
        };
        let assembler = MosaicAssembler::new(size, 2, 1, options())
            .expect("Failed to lay out")
            .with_border_color([0, 0, 0]);
        let inner = PixelBuffer::filled(6, 4, GREEN).expect("Failed to build inner");

        let framed = assembler.finish(inner).expect("Failed to frame");
        assert_eq!(framed.pixel(0, 0), Some([0, 0, 0]));
    }

    // Tests the creator is shrunk to two pixels per cell
    // Verified by shrinking to one pixel per cell
    #[test]
    fn test_prepare_creator() {
        let size = PrintSize::Custom {
            width: 8,
            height: 6,
        };
        let assembler = MosaicAssembler::new(size, 2, 0, options()).expect("Failed to lay out");

        let target = PixelBuffer::filled(40, 30, [1, 2, 3]).expect("Failed to build target");
        let creator = assembler.prepare_creator(&target).expect("Failed to prepare");
        assert_eq!(creator.dimensions(), (8, 6));

        let small = PixelBuffer::filled(4, 4, [1, 2, 3]).expect("Failed to build target");
        assert!(assembler.prepare_creator(&small).is_err());
    }

    // Tests invalid layouts fail up front
    // Verified by deferring geometry validation to assembly
    #[test]
    fn test_invalid_layout() {
        let size = PrintSize::Custom {
            width: 8,
            height: 6,
        };
        assert!(MosaicAssembler::new(size, 0, 0, options()).is_err());
        assert!(MosaicAssembler::new(size, 2, 4, options()).is_err());
    }
}
