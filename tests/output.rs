mod tests {
    use rgbw_composer::{OutputDriver, Rgbw, Rgbw8, SmartLedsOutput};
    use smart_leds::{SmartLedsWrite, White};

    #[derive(Default)]
    struct FakeStrip {
        frames: Vec<Vec<Rgbw8>>,
        fail: bool,
    }

    impl SmartLedsWrite for FakeStrip {
        type Error = &'static str;
        type Color = Rgbw8;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
        where
            T: IntoIterator<Item = I>,
            I: Into<Self::Color>,
        {
            if self.fail {
                return Err("bus error");
            }
            self.frames.push(iterator.into_iter().map(Into::into).collect());
            Ok(())
        }
    }

    const fn rgbw8(r: u8, g: u8, b: u8, w: u8) -> Rgbw8 {
        Rgbw8 { r, g, b, a: White(w) }
    }

    #[test]
    fn test_write_and_show() {
        let mut output = SmartLedsOutput::<_, 4>::new(FakeStrip::default());
        output.write(&[Rgbw::new(1.0, 0.5, 0.0, 0.25), Rgbw::BLACK]);
        assert_eq!(output.staged(), &[rgbw8(255, 127, 0, 63), rgbw8(0, 0, 0, 0)]);

        output.show();
        let strip = output.into_inner();
        assert_eq!(strip.frames.len(), 1);
        assert_eq!(strip.frames[0].len(), 2);
    }

    #[test]
    fn test_brightness_scales_all_channels() {
        let mut output = SmartLedsOutput::<_, 4>::new(FakeStrip::default());
        assert_eq!(output.brightness(), 1.0);
        output.set_brightness(0.5);
        output.write(&[Rgbw::new(1.0, 1.0, 0.5, 1.0)]);
        assert_eq!(output.staged(), &[rgbw8(127, 127, 63, 127)]);

        output.set_brightness(3.0);
        assert_eq!(output.brightness(), 1.0);
    }

    #[test]
    fn test_overlong_frames_are_truncated() {
        let mut output = SmartLedsOutput::<_, 2>::new(FakeStrip::default());
        output.write(&[Rgbw::BLACK; 5]);
        assert_eq!(output.staged().len(), 2);
    }

    #[test]
    fn test_failed_write_is_dropped() {
        let mut output = SmartLedsOutput::<_, 2>::new(FakeStrip {
            fail: true,
            ..FakeStrip::default()
        });
        output.write(&[Rgbw::BLACK]);
        output.show();
        assert!(output.into_inner().frames.is_empty());
    }
}
