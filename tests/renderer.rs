mod support;

mod tests {
    use std::time::Instant as StdInstant;

    use fireflame_composer::color::{BIG_FLAME, EMBER, OFF, Rgb};
    use fireflame_composer::{
        ConfigError, Duration, EmberDamping, EmberVariant, FireConfig, FireRenderer,
        FlameEffectRequest, FlushError, RngEntropy,
    };

    use super::support::{FixedEntropy, RecordingStrip, is_dark};

    const MAX_LEDS: usize = 16;

    fn config(strip_length: usize) -> FireConfig {
        FireConfig {
            brightness: 255,
            ..FireConfig::DEFAULT
                .with_variant(EmberVariant::Plain)
                .with_strip_length(strip_length)
        }
    }

    #[test]
    fn test_draw_with_fixed_embers() {
        let strip = RecordingStrip::new();
        let mut renderer = FireRenderer::<_, _, MAX_LEDS>::new(
            strip.clone(),
            FixedEntropy::red(40),
            &config(3),
        )
        .unwrap();

        renderer.draw(Rgb::new(80, 35, 0)).unwrap();

        let expected = Rgb::new(40, 15, 0);
        assert_eq!(renderer.buffer().as_slice(), &[expected; 3]);
        assert_eq!(renderer.buffer().len(), 3);
        assert!(!renderer.buffer().is_empty());
        assert_eq!(strip.frames(), vec![vec![expected; 3]]);
        assert_eq!(renderer.flush_count(), 1);
    }

    #[test]
    fn test_draw_keeps_channels_within_base() {
        let strip = RecordingStrip::new();
        let mut renderer =
            FireRenderer::<_, _, MAX_LEDS>::new(strip.clone(), RngEntropy::seeded(7), &config(MAX_LEDS))
                .unwrap();

        for base in [EMBER, BIG_FLAME, Rgb::new(255, 255, 255), OFF] {
            renderer.draw(base).unwrap();
            for pixel in renderer.buffer().as_slice() {
                assert!(pixel.r <= base.r && pixel.r >= base.r.saturating_sub(80));
                assert!(pixel.g <= base.g && pixel.g >= base.g.saturating_sub(40));
                assert!(pixel.b <= base.b && pixel.b >= base.b.saturating_sub(40));
            }
        }
        assert_eq!(strip.frame_count(), 4);
        assert!(strip.frames().iter().all(|frame| frame.len() == MAX_LEDS));
    }

    #[test]
    fn test_same_seed_same_frame() {
        let first = RecordingStrip::new();
        let second = RecordingStrip::new();
        let mut a =
            FireRenderer::<_, _, MAX_LEDS>::new(first.clone(), RngEntropy::seeded(3), &config(8))
                .unwrap();
        let mut b =
            FireRenderer::<_, _, MAX_LEDS>::new(second.clone(), RngEntropy::seeded(3), &config(8))
                .unwrap();

        a.draw(EMBER).unwrap();
        b.draw(EMBER).unwrap();
        assert_eq!(a.buffer(), b.buffer());
    }

    #[test]
    fn test_clear_turns_everything_off() {
        let strip = RecordingStrip::new();
        let mut renderer =
            FireRenderer::<_, _, MAX_LEDS>::new(strip.clone(), FixedEntropy::red(0), &config(5))
                .unwrap();

        renderer.draw(BIG_FLAME).unwrap();
        renderer.clear().unwrap();

        for index in 0..5 {
            assert_eq!(renderer.pixel(index), Some(OFF));
        }
        assert_eq!(renderer.pixel(5), None);
        assert!(is_dark(&strip.last_frame().unwrap()));
    }

    #[test]
    fn test_big_flame_flushes_twice_and_ends_dark() {
        let strip = RecordingStrip::new();
        let mut renderer =
            FireRenderer::<_, _, MAX_LEDS>::new(strip.clone(), RngEntropy::seeded(11), &config(6))
                .unwrap();

        let started = StdInstant::now();
        renderer
            .big_flame(FlameEffectRequest {
                color: Rgb::new(220, 80, 0),
                duration: Duration::from_millis(200),
            })
            .unwrap();

        assert!(started.elapsed() >= std::time::Duration::from_millis(200));
        assert!(renderer.buffer().as_slice().iter().all(|pixel| *pixel == OFF));

        let frames = strip.frames();
        assert_eq!(frames.len(), 2);
        assert!(frames[0].iter().all(|pixel| pixel.r >= 140));
        assert!(is_dark(&frames[1]));
    }

    #[test]
    fn test_brightness_scales_output_only() {
        let strip = RecordingStrip::new();
        let config = FireConfig {
            brightness: 128,
            ..config(2)
        };
        let mut renderer =
            FireRenderer::<_, _, MAX_LEDS>::new(strip.clone(), FixedEntropy::red(0), &config)
                .unwrap();

        renderer.draw(Rgb::new(200, 100, 0)).unwrap();

        assert_eq!(renderer.pixel(0), Some(Rgb::new(200, 100, 0)));
        assert_eq!(strip.last_frame().unwrap(), vec![Rgb::new(100, 50, 0); 2]);

        renderer.set_brightness(0);
        renderer.draw(Rgb::new(200, 100, 0)).unwrap();
        assert!(is_dark(&strip.last_frame().unwrap()));
    }

    #[test]
    fn test_failed_flush_is_reported_and_rendering_continues() {
        let strip = RecordingStrip::failing();
        let mut renderer =
            FireRenderer::<_, _, MAX_LEDS>::new(strip.clone(), FixedEntropy::red(0), &config(2))
                .unwrap();

        assert_eq!(renderer.draw(EMBER), Err(FlushError("bus error")));
        assert_eq!(renderer.draw(EMBER), Err(FlushError("bus error")));
        assert_eq!(renderer.failed_flushes(), 2);
        assert_eq!(strip.frame_count(), 2);
    }

    #[test]
    fn test_drop_clears_and_releases_once() {
        let strip = RecordingStrip::new();
        {
            let mut renderer =
                FireRenderer::<_, _, MAX_LEDS>::new(strip.clone(), FixedEntropy::red(0), &config(4))
                    .unwrap();
            renderer.draw(BIG_FLAME).unwrap();
            renderer.shutdown();
            assert_eq!(strip.releases(), 1);
        }

        assert_eq!(strip.releases(), 1);
        assert_eq!(strip.frame_count(), 2);
        assert!(is_dark(&strip.last_frame().unwrap()));
    }

    #[test]
    fn test_drop_runs_cleanup_on_panic() {
        let strip = RecordingStrip::new();
        let inner = strip.clone();
        let result = std::panic::catch_unwind(move || {
            let mut renderer =
                FireRenderer::<_, _, MAX_LEDS>::new(inner, FixedEntropy::red(0), &config(4))
                    .unwrap();
            renderer.draw(BIG_FLAME).unwrap();
            panic!("render loop crashed");
        });

        assert!(result.is_err());
        assert_eq!(strip.releases(), 1);
        assert!(is_dark(&strip.last_frame().unwrap()));
    }

    #[test]
    fn test_rejects_bad_strip_length() {
        let empty = FireRenderer::<_, _, MAX_LEDS>::new(
            RecordingStrip::new(),
            FixedEntropy::red(0),
            &config(0),
        );
        assert!(matches!(empty, Err(ConfigError::EmptyStrip)));

        let too_long = FireRenderer::<_, _, MAX_LEDS>::new(
            RecordingStrip::new(),
            FixedEntropy::red(0),
            &config(MAX_LEDS + 1),
        );
        assert!(matches!(
            too_long,
            Err(ConfigError::StripTooLong { length: 17, max: 16 })
        ));
    }

    #[test]
    fn test_switching_damping() {
        let strip = RecordingStrip::new();
        let mut renderer =
            FireRenderer::<_, _, MAX_LEDS>::new(strip.clone(), FixedEntropy::red(40), &config(1))
                .unwrap();

        renderer.set_damping(EmberDamping::FLICKER).unwrap();
        renderer.draw(Rgb::new(100, 30, 0)).unwrap();
        assert_eq!(renderer.pixel(0), Some(Rgb::new(50, 14, 0)));

        let broken = EmberDamping {
            blue_divisor: 0,
            ..EmberDamping::FLICKER
        };
        assert_eq!(renderer.set_damping(broken), Err(ConfigError::ZeroEmberDivisor));
        assert_eq!(renderer.damping(), EmberDamping::FLICKER);
    }
}
