//! Tests for quadrant shapes and their difference measure

#[cfg(test)]
mod tests {
    use collage::CollageError;
    use collage::analysis::shape::{
        LuminanceShape, ShapeModel, shape_difference, shape_of, shape_with_model,
    };
    use collage::math::luminance::luminance_of;
    use collage::spatial::buffer::PixelBuffer;

    fn left_white_right_black(width: usize, height: usize) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, _| {
            if x < width / 2 { [255; 3] } else { [0; 3] }
        })
        .expect("Failed to build buffer")
    }

    // Tests a uniform image yields four equal quadrants
    // Verified by measuring the top-left quadrant with plain brightness
    #[test]
    fn test_uniform_image_has_equal_quadrants() {
        let image = PixelBuffer::filled(6, 4, [120, 200, 40]).expect("Failed to build buffer");
        let shape = shape_of(&image).expect("Failed to compute shape");
        let [a, b, c, d] = shape.quadrants();

        assert!((a - b).abs() < 1e-6);
        assert!((b - c).abs() < 1e-6);
        assert!((c - d).abs() < 1e-6);
        assert!((a - luminance_of(120, 200, 40)).abs() < 1e-5);
    }

    // Tests quadrants are split at half width and half height
    // Verified by swapping the top-right and bottom-left origins
    #[test]
    fn test_quadrants_follow_layout() {
        let image = left_white_right_black(4, 4);
        let shape = shape_of(&image).expect("Failed to compute shape");
        let white = luminance_of(255, 255, 255);

        assert!((shape.top_left - white).abs() < 1e-5);
        assert!((shape.bottom_left - white).abs() < 1e-5);
        assert!(shape.top_right.abs() < 1e-6);
        assert!(shape.bottom_right.abs() < 1e-6);
    }

    // Tests odd remainders belong to no quadrant
    // Verified by dividing by the full quadrant extent including the remainder
    #[test]
    fn test_odd_dimensions_drop_remainder() {
        let image = PixelBuffer::from_fn(3, 3, |x, y| {
            if x == 2 || y == 2 { [255; 3] } else { [0; 3] }
        })
        .expect("Failed to build buffer");
        let shape = shape_of(&image).expect("Failed to compute shape");

        assert!(shape.quadrants().iter().all(|q| q.abs() < 1e-6));
    }

    // Tests images without four quadrants are rejected
    // Verified by removing the half-size check
    #[test]
    fn test_too_small_for_shape() {
        let image = PixelBuffer::new(1, 4).expect("Failed to build buffer");
        assert!(matches!(
            shape_of(&image),
            Err(CollageError::InvalidArgument { .. })
        ));
    }

    // Tests the legacy model measures only the top-left quadrant differently
    // Verified by applying the legacy measure to every quadrant
    #[test]
    fn test_legacy_model_top_left_brightness() {
        let image = PixelBuffer::filled(2, 2, [255, 255, 255]).expect("Failed to build buffer");
        let legacy =
            shape_with_model(&image, ShapeModel::Legacy).expect("Failed to compute shape");
        let perceptual =
            shape_with_model(&image, ShapeModel::Perceptual).expect("Failed to compute shape");

        assert!((legacy.top_left - 1.0).abs() < 1e-6);
        assert!((legacy.top_right - perceptual.top_right).abs() < 1e-6);
        assert!(legacy.top_left > perceptual.top_left);
    }

    // Tests the difference is a plain sum over quadrants
    // Verified by dividing the sum by four
    #[test]
    fn test_shape_difference_is_sum() {
        let half = LuminanceShape::uniform(0.5);

        assert!((shape_difference(&LuminanceShape::WHITE, &half) - 2.0).abs() < 1e-6);
        assert!(shape_difference(&half, &half).abs() < f32::EPSILON);
    }

    // Tests block shapes take one pixel per quadrant in reading order
    // Verified by swapping bottom-left and top-right in from_block
    #[test]
    fn test_from_block_order() {
        let shape =
            LuminanceShape::from_block([[0; 3], [255; 3], [0; 3], [0; 3]]);

        assert!(shape.top_right > 0.9);
        assert!(shape.bottom_left.abs() < f32::EPSILON);
        assert!((shape.mean() - shape.top_right / 4.0).abs() < 1e-6);
    }
}
