use proptest::prelude::*;

use reel_common::config::CompositionConfig;
use reel_render_engine::Timing;

proptest! {
    #[test]
    fn post_time_and_credits_follow_main_length(frames in 0u64..10_000_000) {
        let timing = Timing::new(frames, 30, &CompositionConfig::default());
        let main = frames as f64 / 30.0;

        prop_assert!((timing.post_time - (main + 2.0)).abs() < 1e-9);
        prop_assert!((timing.credits_start - main).abs() < 1e-9);
        prop_assert_eq!(timing.credits_end, timing.post_time);
    }

    #[test]
    fn audio_fade_ends_with_the_movie(frames in 0u64..10_000_000) {
        let timing = Timing::new(frames, 30, &CompositionConfig::default());
        let main = frames as f64 / 30.0;

        prop_assert!((timing.audio_fade_start - (main + 4.25 + 1.0)).abs() < 1e-9);
        prop_assert!((timing.audio_duration - (main + 4.25 + 2.0)).abs() < 1e-9);
        prop_assert_eq!(timing.audio_fade_secs, 1.0);
    }
}
