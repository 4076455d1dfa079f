//! Tests for tinted paste, borders and the single-image collage

#[cfg(test)]
mod tests {
    use collage::CollageError;
    use collage::algorithm::composite::{ToneMode, add_border, paste_at, single_image_collage};
    use collage::math::luminance::luminance_of;
    use collage::spatial::buffer::PixelBuffer;
    use collage::spatial::geometry::Border;

    const RED: [u8; 3] = [255, 0, 0];
    const WHITE: [u8; 3] = [255, 255, 255];

    // Tests a paste lands at the requested offset and nowhere else
    // Verified by ignoring the y offset
    #[test]
    fn test_paste_at_offset() {
        let mut dest = PixelBuffer::new(4, 4).expect("Failed to allocate");
        let src = PixelBuffer::from_fn(2, 2, |x, y| [10 + x as u8, 20 + y as u8, 30])
            .expect("Failed to build source");

        assert!(paste_at(&mut dest, &src, 1, 1, 1.0));

        assert_eq!(dest.pixel(1, 1), Some([10, 20, 30]));
        assert_eq!(dest.pixel(2, 1), Some([11, 20, 30]));
        assert_eq!(dest.pixel(1, 2), Some([10, 21, 30]));
        assert_eq!(dest.pixel(2, 2), Some([11, 21, 30]));
        assert_eq!(dest.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(dest.pixel(3, 3), Some([0, 0, 0]));
        assert_eq!(dest.pixels().filter(|&p| p != [0, 0, 0]).count(), 4);
    }

    // Tests a paste that does not fit leaves the destination untouched
    // Verified by clipping instead of refusing
    #[test]
    fn test_paste_at_refuses_overflow() {
        let mut dest = PixelBuffer::filled(4, 4, [9, 9, 9]).expect("Failed to allocate");
        let before = dest.clone();
        let src = PixelBuffer::filled(2, 2, RED).expect("Failed to build source");

        assert!(!paste_at(&mut dest, &src, 3, 3, 1.0));
        assert!(!paste_at(&mut dest, &src, usize::MAX, 0, 1.0));
        assert_eq!(dest, before);

        let big = PixelBuffer::filled(5, 1, RED).expect("Failed to build source");
        assert!(!paste_at(&mut dest, &big, 0, 0, 1.0));
        assert_eq!(dest, before);
    }

    // Tests the tone scales every channel with truncation
    // Verified by rounding the tinted value
    #[test]
    fn test_paste_at_tone() {
        let mut dest = PixelBuffer::new(1, 1).expect("Failed to allocate");
        let src = PixelBuffer::filled(1, 1, [200, 101, 3]).expect("Failed to build source");

        assert!(paste_at(&mut dest, &src, 0, 0, 0.5));
        assert_eq!(dest.pixel(0, 0), Some([100, 50, 1]));
    }

    // Tests a red square framed by one white pixel on every side
    // Verified by writing the right border before the row content
    #[test]
    fn test_add_border_ring() {
        let image = PixelBuffer::filled(2, 2, RED).expect("Failed to build image");
        let ring = Border {
            top: 1,
            bottom: 1,
            left: 1,
            right: 1,
        };
        let framed = add_border(&image, ring, WHITE).expect("Failed to add border");

        assert_eq!(framed.dimensions(), (4, 4));
        for y in 0..4 {
            for x in 0..4 {
                let inside = (1..=2).contains(&x) && (1..=2).contains(&y);
                let expected = if inside { RED } else { WHITE };
                assert_eq!(framed.pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    // Tests uneven borders
    // Verified by swapping left and right in add_border
    #[test]
    fn test_add_border_uneven() {
        let image = PixelBuffer::filled(1, 1, RED).expect("Failed to build image");
        let border = Border {
            top: 0,
            bottom: 2,
            left: 1,
            right: 0,
        };
        let framed = add_border(&image, border, WHITE).expect("Failed to add border");

        assert_eq!(framed.dimensions(), (2, 3));
        assert_eq!(framed.pixel(1, 0), Some(RED));
        assert_eq!(framed.pixel(0, 0), Some(WHITE));
    }

    // Tests only modes 0 and 1 exist
    // Verified by mapping unknown modes to luminance
    #[test]
    fn test_tone_mode_parsing() {
        assert_eq!(ToneMode::try_from(0).ok(), Some(ToneMode::Luminance));
        assert_eq!(ToneMode::try_from(1).ok(), Some(ToneMode::Sine));
        assert!(matches!(
            ToneMode::try_from(2),
            Err(CollageError::InvalidArgument { .. })
        ));
    }

    // Tests each copy is tinted by the luminance of its base pixel
    // Verified by tinting with the paste's own luminance
    #[test]
    fn test_single_collage_luminance_mode() {
        let base = PixelBuffer::from_fn(2, 1, |x, _| if x == 0 { WHITE } else { [0; 3] })
            .expect("Failed to build base");
        let paste = PixelBuffer::filled(2, 2, [200; 3]).expect("Failed to build paste");

        let collage =
            single_image_collage(&base, &paste, ToneMode::Luminance).expect("Failed to compose");

        assert_eq!(collage.dimensions(), (4, 2));
        let tinted = (luminance_of(255, 255, 255) * 200.0) as u8;
        assert_eq!(collage.pixel(1, 1), Some([tinted; 3]));
        assert_eq!(collage.pixel(2, 0), Some([0; 3]));
    }

    // Tests the sine tone is zero on the first row and column and peaks in the middle
    // Verified by using cosine instead of sine
    #[test]
    fn test_single_collage_sine_mode() {
        let base = PixelBuffer::filled(2, 2, [0; 3]).expect("Failed to build base");
        let paste = PixelBuffer::filled(2, 2, [200; 3]).expect("Failed to build paste");

        let collage = single_image_collage(&base, &paste, ToneMode::Sine).expect("Failed to compose");

        assert_eq!(collage.dimensions(), (4, 4));
        assert_eq!(collage.pixel(0, 0), Some([0; 3]));
        assert_eq!(collage.pixel(3, 0), Some([0; 3]));
        assert_eq!(collage.pixel(3, 3), Some([200; 3]));
    }
}
