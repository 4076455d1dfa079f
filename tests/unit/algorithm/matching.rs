//! Tests for luminance, shape and contour selection

#[cfg(test)]
mod tests {
    use collage::algorithm::exclusion::ExclusionSet;
    use collage::algorithm::matching::{
        CellTarget, MatchStrategy, Matcher, MosaicOptions, any_above_threshold,
        best_by_luminance, best_by_shape,
    };
    use collage::analysis::pool::CandidatePool;
    use collage::analysis::shape::LuminanceShape;
    use collage::io::image::DecodedImage;
    use collage::spatial::buffer::PixelBuffer;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pool_of(values: &[u8]) -> CandidatePool {
        let mut pool = CandidatePool::new("test", 2, 2);
        for (i, &value) in values.iter().enumerate() {
            let image = PixelBuffer::filled(2, 2, [value; 3]).expect("Failed to build image");
            pool.offer(format!("{i}.jpg"), Ok(DecodedImage::rgb(image)))
                .expect("Failed to offer");
        }
        pool
    }

    fn no_contour(strategy: MatchStrategy) -> MosaicOptions {
        MosaicOptions {
            contour: false,
            strategy,
            ..MosaicOptions::default()
        }
    }

    // Tests the closest luminance wins
    // Verified by maximizing the difference
    #[test]
    fn test_best_by_luminance_closest() {
        let pool = pool_of(&[0, 128, 255]);
        let none = ExclusionSet::new(pool.len());

        assert_eq!(best_by_luminance(0.25, &pool, &none), Some(1));
        assert_eq!(best_by_luminance(0.95, &pool, &none), Some(2));
        assert_eq!(best_by_luminance(0.0, &pool, &none), Some(0));
    }

    // Tests excluded candidates are never returned
    // Verified by dropping the exclusion check
    #[test]
    fn test_best_by_luminance_respects_exclusions() {
        let pool = pool_of(&[0, 128, 255]);

        let excluded = ExclusionSet::from_indices(pool.len(), &[1]);
        assert_eq!(best_by_luminance(0.25, &pool, &excluded), Some(0));

        let all = ExclusionSet::from_indices(pool.len(), &[0, 1, 2]);
        assert_eq!(best_by_luminance(0.25, &pool, &all), None);
    }

    // Tests agreement with a brute-force search over non-excluded candidates
    // Verified by using <= so ties move to the last index
    #[test]
    fn test_best_by_luminance_matches_brute_force() {
        let pool = pool_of(&[10, 60, 60, 110, 160, 210, 250]);
        let excluded = ExclusionSet::from_indices(pool.len(), &[3, 5]);

        for step in 0..=20 {
            let target = step as f32 / 20.0;
            let mut expected = None;
            let mut best = f32::INFINITY;
            for (index, candidate) in pool.iter() {
                let diff = (candidate.luminance() - target).abs();
                if !excluded.contains(index) && diff < best {
                    best = diff;
                    expected = Some(index);
                }
            }

            let found = best_by_luminance(target, &pool, &excluded);
            assert_eq!(found, expected, "target {target}");
            assert!(found.is_none_or(|index| !excluded.contains(index)));
        }
    }

    // Tests ties keep the lowest index
    // Verified by replacing < with <=
    #[test]
    fn test_ties_keep_first() {
        let pool = pool_of(&[90, 90, 90]);
        let none = ExclusionSet::new(pool.len());

        assert_eq!(best_by_luminance(0.5, &pool, &none), Some(0));
        assert_eq!(
            best_by_shape(&LuminanceShape::uniform(0.5), &pool, &none),
            Some(0)
        );
    }

    // Tests the smallest shape difference wins
    // Verified by comparing only the top-left quadrant
    #[test]
    fn test_best_by_shape() {
        let pool = pool_of(&[0, 128, 255]);
        let none = ExclusionSet::new(pool.len());

        assert_eq!(
            best_by_shape(&LuminanceShape::uniform(0.9), &pool, &none),
            Some(2)
        );
        let excluded = ExclusionSet::from_indices(pool.len(), &[2]);
        assert_eq!(
            best_by_shape(&LuminanceShape::uniform(0.9), &pool, &excluded),
            Some(1)
        );
    }

    // Tests the random selector only returns qualifying candidates
    // Verified by checking the draw counter against the exclusions
    #[test]
    fn test_any_above_threshold_qualifies() {
        let pool = pool_of(&[0, 255, 10, 255, 240, 5]);
        let excluded = ExclusionSet::from_indices(pool.len(), &[3]);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            if let Some(index) = any_above_threshold(0.2, &pool, &excluded, &mut rng) {
                assert!(!excluded.contains(index));
                assert!(pool.get(index).is_some_and(|c| c.luminance() >= 0.2));
            }
        }
    }

    // Tests the random selector gives up when nothing qualifies
    // Verified by returning the last draw unconditionally
    #[test]
    fn test_any_above_threshold_none() {
        let pool = pool_of(&[0, 10, 255]);
        let excluded = ExclusionSet::from_indices(pool.len(), &[2]);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(any_above_threshold(0.2, &pool, &excluded, &mut rng), None);
        assert_eq!(
            any_above_threshold(0.2, &CandidatePool::new("empty", 2, 2), &excluded, &mut rng),
            None
        );
    }

    // Tests a pool of only bright candidates always yields a pick
    // Verified by drawing from 1..len instead of 0..len
    #[test]
    fn test_any_above_threshold_all_bright() {
        let pool = pool_of(&[255, 250, 245]);
        let none = ExclusionSet::new(pool.len());

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(any_above_threshold(0.2, &pool, &none, &mut rng).is_some());
        }
    }

    // Tests an exhausted neighbourhood falls back to ignoring exclusions
    // Verified by returning None when every candidate is excluded
    #[test]
    fn test_select_falls_back_when_exhausted() {
        let pool = pool_of(&[128]);
        let excluded = ExclusionSet::from_indices(pool.len(), &[0]);
        let mut matcher = Matcher::new(no_contour(MatchStrategy::Shape), StdRng::seed_from_u64(1));
        let cell = CellTarget::from_block([[30; 3]; 4]);

        assert_eq!(matcher.select(&cell, &pool, &excluded), Some(0));
    }

    // Tests near-white cells never get an excluded or dark candidate
    // Verified by skipping the shape fallback after a failed contour draw
    #[test]
    fn test_select_contour_cell() {
        let pool = pool_of(&[0, 255, 255]);
        let excluded = ExclusionSet::from_indices(pool.len(), &[1]);
        let white = CellTarget::from_block([[255; 3]; 4]);

        for seed in 0..20 {
            let mut matcher = Matcher::new(MosaicOptions::default(), StdRng::seed_from_u64(seed));
            assert_eq!(matcher.select(&white, &pool, &excluded), Some(2));
        }
    }

    // Tests the luminance strategy ranks by the block mean
    // Verified by ranking with the shape in both strategies
    #[test]
    fn test_select_luminance_strategy() {
        let pool = pool_of(&[0, 128, 255]);
        let none = ExclusionSet::new(pool.len());
        let mut matcher = Matcher::new(
            no_contour(MatchStrategy::Luminance),
            StdRng::seed_from_u64(3),
        );
        let cell = CellTarget::from_block([[140; 3], [120; 3], [128; 3], [128; 3]]);

        assert_eq!(matcher.select(&cell, &pool, &none), Some(1));
        assert!((cell.luminance - cell.shape.mean()).abs() < f32::EPSILON);
    }

    // Tests the defaults
    // Verified by disabling contour by default
    #[test]
    fn test_default_options() {
        let options = MosaicOptions::default();

        assert!(options.contour);
        assert_eq!(options.exclusion_radius, 2);
        assert_eq!(options.strategy, MatchStrategy::Shape);
        assert!((options.contour_tolerance - 0.8).abs() < f32::EPSILON);
        assert!((options.contour_threshold - 0.2).abs() < f32::EPSILON);
    }
}
