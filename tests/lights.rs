mod tests {
    use embassy_time::{Duration, Instant};
    use rgbw_composer::lights::MIN_FADE_DURATION;
    use rgbw_composer::routine::{RainbowRoutine, RoutineSlot};
    use rgbw_composer::{Error, Hsv, Lights, LightsConfig, Rgbw, Source};

    const RED: Rgbw = Rgbw::new(1.0, 0.0, 0.0, 0.0);
    const BLUE: Rgbw = Rgbw::new(0.0, 0.0, 1.0, 0.0);

    fn lights(fade_ms: u64) -> Lights<8> {
        let config = LightsConfig::default().with_fade_duration(Duration::from_millis(fade_ms));
        Lights::new(&config, Instant::from_millis(0)).unwrap()
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn weights(lights: &Lights<8>) -> Vec<(f32, bool)> {
        lights
            .live()
            .iter()
            .map(|entry| (entry.weight(), entry.is_active()))
            .collect()
    }

    #[test]
    fn test_empty_renders_black() {
        let mut lights = lights(1000);
        assert!(lights.is_empty());
        assert!(lights.active().is_none());
        assert_eq!(lights.total_weight(), 1.0);
        assert_eq!(lights.pixel_count(), 8);

        let frame = lights.render(at(5));
        assert!(frame.iter().all(|pixel| *pixel == Rgbw::BLACK));
        assert!(lights.is_empty());
    }

    #[test]
    fn test_single_selection_reaches_full_intensity() {
        let mut lights = lights(1000);
        lights.select(RED);

        let frame = lights.render(at(1000));
        for pixel in frame {
            assert!(approx(pixel.r, 1.0));
            assert!(approx(pixel.g, 0.0) && approx(pixel.b, 0.0) && approx(pixel.w, 0.0));
        }
        assert_eq!(weights(&lights), vec![(1.0, true)]);
    }

    #[test]
    fn test_weight_floor_dims_lone_fade_in() {
        let mut lights = lights(1000);
        lights.select(RED);

        let frame = lights.render(at(500));
        assert!(frame.iter().all(|pixel| approx(pixel.r, 0.5)));
        assert_eq!(lights.total_weight(), 1.0);
    }

    #[test]
    fn test_back_to_back_selection_renders_black() {
        let mut lights = lights(1000);
        lights.select(RED);
        lights.select(BLUE);
        assert_eq!(weights(&lights), vec![(0.0, false), (0.0, true)]);

        let frame = lights.render(at(0));
        assert!(frame.iter().all(|pixel| *pixel == Rgbw::BLACK));
        // The inactive entry never got any weight and is gone
        assert_eq!(weights(&lights), vec![(0.0, true)]);
    }

    #[test]
    fn test_new_selection_starts_invisible() {
        let mut lights = lights(60_000);
        lights.select(RED);
        lights.render(at(60_000));

        lights.select(BLUE);
        let frame = lights.render(at(60_005));
        for pixel in frame {
            assert!(pixel.r > 0.99);
            assert!(pixel.b < 0.01);
        }
    }

    #[test]
    fn test_crossfade_blends_by_weight() {
        let mut lights = lights(100);
        lights.select(RED);
        lights.render(at(100));

        lights.select(BLUE);
        let frame = lights.render(at(150));
        for pixel in frame {
            assert!(approx(pixel.r, 0.5));
            assert!(approx(pixel.b, 0.5));
        }
        assert_eq!(weights(&lights), vec![(0.5, false), (0.5, true)]);
    }

    #[test]
    fn test_faded_out_source_is_pruned() {
        let mut lights = lights(100);
        lights.select(RED);
        lights.render(at(100));
        lights.select(BLUE);
        lights.render(at(150));
        assert_eq!(lights.live().len(), 2);

        let frame = lights.render(at(250));
        assert!(frame.iter().all(|pixel| approx(pixel.b, 1.0) && approx(pixel.r, 0.0)));
        assert_eq!(weights(&lights), vec![(1.0, true)]);
        assert!(matches!(lights.active(), Some(Source::Rgbw(color)) if *color == BLUE));
    }

    #[test]
    fn test_weights_are_monotonic() {
        let mut lights = lights(1000);
        lights.select(RED);
        lights.render(at(300));
        lights.select(BLUE);
        lights.select(Rgbw::new(0.0, 1.0, 0.0, 0.0));

        let mut previous = weights(&lights);
        for step in 1..=20 {
            lights.render(at(300 + step * 70));
            let current = weights(&lights);
            for (weight, active) in &current {
                assert!((0.0..=1.0).contains(weight));
                if *active {
                    let (before, _) = previous.iter().find(|(_, active)| *active).unwrap();
                    assert!(weight >= before);
                }
            }
            let inactive_before: Vec<f32> = previous
                .iter()
                .filter(|(_, active)| !active)
                .map(|(weight, _)| *weight)
                .collect();
            let inactive_now: Vec<f32> = current
                .iter()
                .filter(|(_, active)| !active)
                .map(|(weight, _)| *weight)
                .collect();
            assert!(inactive_now.len() <= inactive_before.len());
            for weight in &inactive_now {
                assert!(inactive_before.iter().any(|before| weight <= before));
            }
            previous = current;
        }
        assert_eq!(weights(&lights), vec![(1.0, true)]);
    }

    #[test]
    fn test_hsv_constant_goes_through_color_model() {
        let mut lights = lights(10);
        lights.select(Hsv::new(0.0, 1.0, 1.0));
        let frame = lights.render(at(10));
        assert!(frame.iter().all(|pixel| approx(pixel.r, 1.0) && approx(pixel.w, 0.0)));

        lights.color_model_mut().set_brightness(0.5).unwrap();
        let frame = lights.render(at(20));
        // gamma 2 on red, white stays 0
        assert!(frame.iter().all(|pixel| approx(pixel.r, 0.25)));
    }

    #[test]
    fn test_tuple_sources() {
        let hsv = Source::<8>::try_from(&[0.5_f32, 1.0, 1.0][..]).unwrap();
        assert!(matches!(hsv, Source::Hsv(_)));
        let rgbw = Source::<8>::try_from(&[0.1_f32, 0.0, 0.0, 1.0][..]).unwrap();
        assert!(matches!(rgbw, Source::Rgbw(_)));
        assert_eq!(
            Source::<8>::try_from(&[1.0_f32, 2.0][..]).err(),
            Some(Error::InvalidArity(2))
        );
        assert_eq!(
            Source::<8>::try_from(&[0.0_f32; 5][..]).err(),
            Some(Error::InvalidArity(5))
        );
    }

    #[test]
    fn test_routine_advances_while_live() {
        let mut lights = lights(1000);
        lights.select(RainbowRoutine::default());
        lights.render(at(10));
        lights.render(at(20));
        let Some(Source::Routine(RoutineSlot::Rainbow(rainbow))) = lights.active() else {
            panic!("expected a rainbow");
        };
        assert_eq!(rainbow.offset(), 2);
    }

    #[test]
    fn test_fade_duration_floor() {
        let mut lights = lights(0);
        assert_eq!(lights.fade_duration(), MIN_FADE_DURATION);
        lights.set_fade_duration(Duration::from_millis(250));
        assert_eq!(lights.fade_duration(), Duration::from_millis(250));
        lights.set_fade_duration(Duration::from_millis(1));
        assert_eq!(lights.fade_duration(), MIN_FADE_DURATION);
    }

    #[test]
    fn test_full_arena_evicts_faintest() {
        let config = LightsConfig::default().with_fade_duration(Duration::from_millis(1000));
        let mut lights: Lights<4, 2> = Lights::new(&config, at(0)).unwrap();
        lights.select(RED);
        lights.render(at(500));
        lights.select(BLUE);
        lights.render(at(600));
        lights.select(Rgbw::new(0.0, 1.0, 0.0, 0.0));

        assert_eq!(lights.live().len(), 2);
        // red (0.4) outlived blue (0.1)
        assert!(matches!(lights.live()[0].source(), Source::Rgbw(color) if *color == RED));
        assert!(lights.live()[1].is_active());
    }

    #[test]
    fn test_clock_going_backwards_does_not_fade() {
        let mut lights = lights(1000);
        lights.select(RED);
        lights.render(at(500));
        lights.render(at(100));
        assert_eq!(weights(&lights), vec![(0.5, true)]);
    }

    #[test]
    fn test_invalid_color_config_is_rejected() {
        let config = LightsConfig::default()
            .with_color(rgbw_composer::ColorModelConfig::default().with_gamma(f32::NAN));
        assert!(Lights::<4>::new(&config, at(0)).is_err());
    }
}
