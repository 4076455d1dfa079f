//! Tests for stage progress bookkeeping

#[cfg(test)]
mod tests {
    use collage::io::progress::ProgressManager;

    // Tests starting a stage finishes the previous one
    // Verified by leaving the previous bar running
    #[test]
    fn test_stages_finish_in_order() {
        let mut progress = ProgressManager::new();

        progress.start_stage("Loading", 3);
        progress.advance("a.jpg");
        progress.advance("b.jpg");
        assert_eq!(progress.stages_done(), 0);

        progress.start_stage("Assembling", 2);
        assert_eq!(progress.stages_done(), 1);

        progress.finish();
        assert_eq!(progress.stages_done(), 2);
    }

    // Tests finishing without a stage is harmless
    // Verified by counting a stage on every finish_stage call
    #[test]
    fn test_finish_without_stage() {
        let mut progress = ProgressManager::default();

        progress.advance("nothing");
        progress.finish_stage();
        progress.finish();
        assert_eq!(progress.stages_done(), 0);
    }
}
