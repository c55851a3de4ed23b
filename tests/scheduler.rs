mod tests {
    use embassy_time::{Duration, Instant};
    use rgbw_composer::{
        FrameScheduler, IntentChannel, IntentProcessor, Lights, LightsConfig, LightsHandle,
        NullOutput, OutputDriver, Preset, Rgbw, Source,
    };

    #[derive(Default)]
    struct RecordingOutput {
        frames: Vec<Vec<Rgbw>>,
        staged: Vec<Rgbw>,
        brightness: Option<f32>,
    }

    impl OutputDriver for RecordingOutput {
        fn write(&mut self, colors: &[Rgbw]) {
            self.staged = colors.to_vec();
        }

        fn show(&mut self) {
            self.frames.push(core::mem::take(&mut self.staged));
        }

        fn brightness(&self) -> f32 {
            self.brightness.unwrap_or(1.0)
        }

        fn set_brightness(&mut self, brightness: f32) {
            self.brightness = Some(brightness);
        }
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn lights() -> Lights<6> {
        let config = LightsConfig::default().with_fade_duration(Duration::from_millis(100));
        Lights::new(&config, at(1000)).unwrap()
    }

    #[test]
    fn test_nothing_written_while_idle() {
        let channel = IntentChannel::<4>::new();
        let processor = IntentProcessor::new(channel.receiver(), 1);
        let mut scheduler =
            FrameScheduler::new(lights(), processor, RecordingOutput::default());

        let result = scheduler.tick(at(1000));
        assert!(!result.written);
        assert!(scheduler.output().frames.is_empty());
    }

    #[test]
    fn test_selection_reaches_output() {
        let channel = IntentChannel::<4>::new();
        let handle = LightsHandle::new(channel.sender());
        let processor = IntentProcessor::new(channel.receiver(), 1);
        let mut scheduler =
            FrameScheduler::new(lights(), processor, RecordingOutput::default());

        scheduler.tick(at(1000));
        handle.select(Preset::Rgbw(Rgbw::new(0.0, 0.0, 0.0, 1.0))).unwrap();

        let result = scheduler.tick(at(1050));
        assert!(result.written);
        let result = scheduler.tick(at(1150));
        assert!(result.written);

        let frames = &scheduler.output().frames;
        assert_eq!(frames.len(), 2);
        assert!(frames[0].iter().all(|pixel| (pixel.w - 0.5).abs() < 1e-4));
        assert!(frames[1].iter().all(|pixel| (pixel.w - 1.0).abs() < 1e-4));
        assert_eq!(frames[1].len(), 6);
    }

    #[test]
    fn test_intents_apply_to_lights_and_output() {
        let channel = IntentChannel::<8>::new();
        let handle = LightsHandle::new(channel.sender());
        let processor = IntentProcessor::new(channel.receiver(), 1);
        let mut scheduler =
            FrameScheduler::new(lights(), processor, RecordingOutput::default());

        handle.set_brightness(0.25).unwrap();
        handle.set_fade_duration(Duration::from_millis(400)).unwrap();
        handle.set_output_brightness(1.5).unwrap();
        handle.select(Preset::parse_from_str("sparkle").unwrap()).unwrap();
        scheduler.tick(at(1000));

        let lights = scheduler.lights();
        assert_eq!(lights.color_model().brightness(), 0.25);
        assert_eq!(lights.fade_duration(), Duration::from_millis(400));
        assert!(matches!(lights.active(), Some(Source::Routine(_))));
        assert_eq!(scheduler.output().brightness(), 1.0);
    }

    #[test]
    fn test_frame_pacing() {
        let channel = IntentChannel::<4>::new();
        let processor = IntentProcessor::new(channel.receiver(), 1);
        let mut scheduler = FrameScheduler::new(lights(), processor, NullOutput::new());

        let result = scheduler.tick(at(1000));
        assert_eq!(result.next_deadline, at(1005));
        assert_eq!(result.sleep_duration, Duration::from_millis(5));

        let result = scheduler.tick(at(1002));
        assert_eq!(result.next_deadline, at(1010));
        assert_eq!(result.sleep_duration, Duration::from_millis(8));

        // Too far behind: the backlog is dropped
        let result = scheduler.tick(at(1100));
        assert_eq!(result.next_deadline, at(1105));
    }

    #[test]
    fn test_custom_frame_duration() {
        let channel = IntentChannel::<4>::new();
        let processor = IntentProcessor::new(channel.receiver(), 1);
        let mut scheduler = FrameScheduler::with_frame_duration(
            lights(),
            processor,
            NullOutput::new(),
            Duration::from_millis(20),
        );

        let result = scheduler.tick(at(1000));
        assert_eq!(result.next_deadline, at(1020));
        let result = scheduler.tick(at(1030));
        assert_eq!(result.next_deadline, at(1040));
        assert_eq!(result.sleep_duration, Duration::from_millis(10));
    }

    #[test]
    fn test_lights_mut_selects_directly() {
        let channel = IntentChannel::<4>::new();
        let processor = IntentProcessor::new(channel.receiver(), 1);
        let mut scheduler =
            FrameScheduler::new(lights(), processor, RecordingOutput::default());

        scheduler.lights_mut().select(Rgbw::new(1.0, 0.0, 0.0, 0.0));
        assert!(scheduler.tick(at(1100)).written);
    }
}
