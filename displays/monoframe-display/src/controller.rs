//! Display controller driver
//!
//! Drives the select (CS, active low) and mode (DC, low = command) lines
//! around a write-only [`ByteTransport`]. Every streaming operation sends
//! exactly one frame, `BUFFER_LEN` bytes, and assumes the controller is in
//! data mode with the full-panel address window set up by [`boot`].
//!
//! [`boot`]: DisplayController::boot

use embedded_hal::delay::DelayNs;
use monoframe_core::{FrameBuffer, Zoom, BUFFER_LEN, HEIGHT, WIDTH};
use monoframe_hal::{ByteTransport, OutputPin};

use crate::error::DisplayError;
use crate::protocol::{ADDRESS_WINDOW, BOOT_SEQUENCE};
use crate::viewport::Viewport;

/// Cursor highlight XORed into the bytes of the cell under the cursor,
/// one entry per repeated column, before shifting to the cursor's row
const fn highlight(zoom: Zoom) -> &'static [u8] {
    match zoom {
        Zoom::X1 => &[0x01],
        Zoom::X2 => &[0x02, 0x01],
        Zoom::X4 => &[0x09, 0x06, 0x06, 0x09],
    }
}

/// Spread the low `8 / scale` bits of `bits` so each covers `scale` bits
fn replicate(bits: u8, scale: u8) -> u8 {
    if scale == 1 {
        return bits;
    }
    let block = (1u8 << scale) - 1;
    (0..8 / scale)
        .filter(|i| bits & (1 << i) != 0)
        .fold(0, |out, i| out | (block << (i * scale)))
}

/// Controller on a byte transport with select and mode lines
pub struct DisplayController<T, CS, DC> {
    transport: T,
    cs: CS,
    dc: DC,
    zoom: Zoom,
    viewport: Viewport,
}

impl<T, CS, DC> DisplayController<T, CS, DC>
where
    T: ByteTransport,
    CS: OutputPin,
    DC: OutputPin,
{
    /// Take ownership of the bus and control lines; nothing is sent
    pub fn new(transport: T, cs: CS, dc: DC) -> Self {
        Self {
            transport,
            cs,
            dc,
            zoom: Zoom::X1,
            viewport: Viewport::baseline(Zoom::X1),
        }
    }

    /// Release the bus and control lines
    pub fn release(self) -> (T, CS, DC) {
        (self.transport, self.cs, self.dc)
    }

    /// Pulse the controller's reset line: high 1 ms, low 10 ms, then high
    pub fn reset<R: OutputPin, D: DelayNs>(&mut self, rst: &mut R, delay: &mut D) {
        rst.set_high();
        delay.delay_ms(1);
        rst.set_low();
        delay.delay_ms(10);
        rst.set_high();
    }

    /// Select the controller with the mode line low
    pub fn enter_command_mode(&mut self) {
        // deselect is repeated to give the line time to settle
        self.cs.set_high();
        self.cs.set_high();
        self.dc.set_low();
        self.cs.set_low();
    }

    /// Select the controller with the mode line high
    pub fn enter_data_mode(&mut self) {
        self.dc.set_high();
        self.cs.set_low();
    }

    /// Send the power-on configuration and leave the controller in data mode
    pub fn boot(&mut self) -> Result<(), DisplayError> {
        self.enter_command_mode();
        self.send(&BOOT_SEQUENCE)?;

        self.enter_command_mode();
        self.send(&ADDRESS_WINDOW)?;

        self.enter_data_mode();

        #[cfg(feature = "defmt")]
        defmt::info!("display controller booted");

        Ok(())
    }

    /// Stream the framebuffer unchanged
    pub fn stream_full(&mut self, fb: &FrameBuffer) -> Result<(), DisplayError> {
        self.send(fb.as_bytes())
    }

    /// Stream an arbitrary full-screen image in framebuffer layout
    pub fn stream_image(&mut self, image: &[u8; BUFFER_LEN]) -> Result<(), DisplayError> {
        self.send(image)
    }

    /// Stream an all-dark frame without touching any buffer
    pub fn blank(&mut self) -> Result<(), DisplayError> {
        let line = [0u8; WIDTH];
        for _ in 0..BUFFER_LEN / WIDTH {
            self.send(&line)?;
        }
        Ok(())
    }

    /// Current windowed-stream magnification
    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    /// Switch magnification and recentre the window
    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.zoom = zoom;
        self.viewport = Viewport::baseline(zoom);

        #[cfg(feature = "defmt")]
        defmt::debug!("zoom {}x", zoom.scale());
    }

    /// Currently visible framebuffer region
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Stream the part of `fb` around the cursor, magnified by `zoom`
    ///
    /// Each source pixel becomes a `scale x scale` block. The cell under the
    /// cursor is highlighted in the transmitted bytes only; `fb` is not
    /// modified. The cursor is clamped into the framebuffer first.
    pub fn stream_windowed(
        &mut self,
        fb: &FrameBuffer,
        zoom: Zoom,
        cursor_x: i16,
        cursor_y: i16,
    ) -> Result<(), DisplayError> {
        if zoom != self.zoom {
            self.set_zoom(zoom);
        }

        let cx = cursor_x.clamp(0, WIDTH as i16 - 1) as u8;
        let cy = cursor_y.clamp(0, HEIGHT as i16 - 1) as u8;

        if self.viewport.follow(cx, cy) {
            #[cfg(feature = "defmt")]
            defmt::debug!("viewport jumped to ({}, {})", self.viewport.x, self.viewport.y);
        }

        let scale = zoom.scale();
        // source rows consumed per output page
        let rows = 8 / scale;
        let mask = if rows == 8 { 0xFF } else { (1u8 << rows) - 1 };
        let pattern = highlight(zoom);
        let cell_y = cy & !(rows - 1);
        let Viewport { x: x0, y: y0, width, height } = self.viewport;

        let bytes = fb.as_bytes();
        let mut line = [0u8; WIDTH];
        for y in (y0..y0 + height).step_by(rows as usize) {
            let page = usize::from(y / 8) * WIDTH;
            for (i, x) in (x0..x0 + width).enumerate() {
                let bits = (bytes[page + usize::from(x)] >> (y & 7)) & mask;
                let out = replicate(bits, scale);
                let column = &mut line[i * usize::from(scale)..(i + 1) * usize::from(scale)];

                if x == cx && y == cell_y {
                    let shift = (cy - cell_y) * scale;
                    for (dst, &mark) in column.iter_mut().zip(pattern) {
                        *dst = out ^ (mark << shift);
                    }
                } else {
                    column.fill(out);
                }
            }
            self.send(&line)?;
        }

        Ok(())
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.transport
            .write(bytes)
            .map_err(|_| DisplayError::Communication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use monoframe_core::Color;
    use proptest::prelude::*;
    use std::rc::Rc;
    use std::{vec, vec::Vec};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Cs(bool),
        Dc(bool),
        Rst(bool),
        Delay(u32),
        Byte(u8),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct FakeBus {
        log: Log,
        fail: bool,
    }

    impl ByteTransport for FakeBus {
        type Error = ();

        fn transfer(&mut self, byte: u8) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.log.borrow_mut().push(Event::Byte(byte));
            Ok(())
        }
    }

    struct FakePin {
        log: Log,
        event: fn(bool) -> Event,
        high: bool,
    }

    impl OutputPin for FakePin {
        fn set_high(&mut self) {
            self.high = true;
            self.log.borrow_mut().push((self.event)(true));
        }

        fn set_low(&mut self) {
            self.high = false;
            self.log.borrow_mut().push((self.event)(false));
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    struct FakeDelay(Log);

    impl DelayNs for FakeDelay {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.0.borrow_mut().push(Event::Delay(ms));
        }
    }

    fn controller(log: &Log) -> DisplayController<FakeBus, FakePin, FakePin> {
        DisplayController::new(
            FakeBus {
                log: log.clone(),
                fail: false,
            },
            FakePin {
                log: log.clone(),
                event: Event::Cs,
                high: true,
            },
            FakePin {
                log: log.clone(),
                event: Event::Dc,
                high: true,
            },
        )
    }

    fn sent(log: &Log) -> Vec<u8> {
        log.borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Byte(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    /// Streams one windowed frame and returns the transmitted bytes
    fn windowed(fb: &FrameBuffer, zoom: Zoom, x: i16, y: i16) -> Vec<u8> {
        let log = Log::default();
        let mut display = controller(&log);
        display.stream_windowed(fb, zoom, x, y).unwrap();
        sent(&log)
    }

    #[test]
    fn test_mode_switch_line_sequence() {
        let log = Log::default();
        let mut display = controller(&log);

        display.enter_command_mode();
        assert_eq!(
            *log.borrow(),
            [Event::Cs(true), Event::Cs(true), Event::Dc(false), Event::Cs(false)]
        );

        log.borrow_mut().clear();
        display.enter_data_mode();
        assert_eq!(*log.borrow(), [Event::Dc(true), Event::Cs(false)]);
    }

    #[test]
    fn test_boot_transcript() {
        let log = Log::default();
        let mut display = controller(&log);
        display.boot().unwrap();

        let command_mode = [Event::Cs(true), Event::Cs(true), Event::Dc(false), Event::Cs(false)];
        let mut expected = Vec::new();
        expected.extend(command_mode);
        expected.extend(BOOT_SEQUENCE.iter().map(|&b| Event::Byte(b)));
        expected.extend(command_mode);
        expected.extend(ADDRESS_WINDOW.iter().map(|&b| Event::Byte(b)));
        expected.extend([Event::Dc(true), Event::Cs(false)]);
        assert_eq!(*log.borrow(), expected);
    }

    #[test]
    fn test_reset_pulse() {
        let log = Log::default();
        let mut display = controller(&log);
        let mut rst = FakePin {
            log: log.clone(),
            event: Event::Rst,
            high: false,
        };
        display.reset(&mut rst, &mut FakeDelay(log.clone()));
        assert_eq!(
            *log.borrow(),
            [
                Event::Rst(true),
                Event::Delay(1),
                Event::Rst(false),
                Event::Delay(10),
                Event::Rst(true),
            ]
        );
    }

    #[test]
    fn test_stream_full_sends_buffer() {
        let mut fb = FrameBuffer::default();
        for (i, byte) in fb.as_bytes_mut().iter_mut().enumerate() {
            *byte = (i * 7) as u8;
        }
        let log = Log::default();
        controller(&log).stream_full(&fb).unwrap();
        assert_eq!(sent(&log), fb.as_bytes().to_vec());
    }

    #[test]
    fn test_stream_image_and_blank() {
        let image = [0xA5; BUFFER_LEN];
        let log = Log::default();
        let mut display = controller(&log);

        display.stream_image(&image).unwrap();
        assert_eq!(sent(&log), image.to_vec());

        log.borrow_mut().clear();
        display.blank().unwrap();
        assert_eq!(sent(&log), vec![0; BUFFER_LEN]);
    }

    #[test]
    fn test_transport_failure_is_reported() {
        let log = Log::default();
        let mut display = controller(&log);
        display.transport.fail = true;
        assert_eq!(display.boot(), Err(DisplayError::Communication));
        assert_eq!(
            display.stream_full(&FrameBuffer::default()),
            Err(DisplayError::Communication)
        );
    }

    #[test]
    fn test_windowed_1x_highlights_cursor_pixel() {
        let fb = FrameBuffer::default();
        let out = windowed(&fb, Zoom::X1, 5, 10);
        assert_eq!(out.len(), BUFFER_LEN);
        // page 1, column 5, bit 2
        assert_eq!(out[WIDTH + 5], 0x04);
        assert_eq!(out.iter().filter(|&&b| b != 0).count(), 1);
    }

    #[test]
    fn test_windowed_1x_inverts_lit_pixel() {
        let mut fb = FrameBuffer::default();
        fb.set(5, 10, Color::On);
        fb.set(6, 10, Color::On);
        let out = windowed(&fb, Zoom::X1, 5, 10);
        assert_eq!(out[WIDTH + 5], 0x00);
        assert_eq!(out[WIDTH + 6], 0x04);
        assert_eq!(fb.get(5, 10), 1);
    }

    #[test]
    fn test_windowed_2x_highlight_rows() {
        let fb = FrameBuffer::default();

        // window (32, 16); y = 20 is output page 1, x = 40 is column pair 8
        let out = windowed(&fb, Zoom::X2, 40, 20);
        assert_eq!(&out[WIDTH + 16..WIDTH + 18], &[0x02, 0x01]);

        let out = windowed(&fb, Zoom::X2, 40, 23);
        assert_eq!(&out[WIDTH + 16..WIDTH + 18], &[0x80, 0x40]);
        assert_eq!(out.iter().filter(|&&b| b != 0).count(), 2);
    }

    #[test]
    fn test_windowed_2x_replicates_pixels() {
        let mut fb = FrameBuffer::default();
        fb.set(33, 17, Color::On);
        let out = windowed(&fb, Zoom::X2, 90, 40);
        // row 17 is bit 1 of the first nibble -> bits 2..4 of the output
        assert_eq!(&out[2..4], &[0x0C, 0x0C]);
        assert_eq!(out.iter().filter(|&&b| b != 0).count(), 2 + 2);
    }

    #[test]
    fn test_windowed_4x_highlight_rows() {
        let fb = FrameBuffer::default();

        // window (48, 24); x = 50 is column group 2
        let out = windowed(&fb, Zoom::X4, 50, 24);
        assert_eq!(&out[8..12], &[0x09, 0x06, 0x06, 0x09]);

        let out = windowed(&fb, Zoom::X4, 50, 25);
        assert_eq!(&out[8..12], &[0x90, 0x60, 0x60, 0x90]);
    }

    #[test]
    fn test_windowed_4x_replicates_pixels() {
        let mut fb = FrameBuffer::default();
        fb.set(49, 27, Color::On);
        let out = windowed(&fb, Zoom::X4, 70, 35);
        // row 27 is the lower half of output page 1 (rows 26..28)
        assert_eq!(&out[WIDTH + 4..WIDTH + 8], &[0xF0; 4]);
    }

    #[test]
    fn test_windowed_follows_cursor() {
        let fb = FrameBuffer::default();
        let log = Log::default();
        let mut display = controller(&log);

        display.stream_windowed(&fb, Zoom::X4, 81, 24).unwrap();
        assert_eq!(display.viewport().x, 52);
        assert_eq!(display.zoom(), Zoom::X4);

        // switching zoom recentres before following
        display.stream_windowed(&fb, Zoom::X2, 40, 20).unwrap();
        assert_eq!(display.viewport(), Viewport::baseline(Zoom::X2));
    }

    #[test]
    fn test_windowed_clamps_cursor() {
        let fb = FrameBuffer::default();
        let log = Log::default();
        let mut display = controller(&log);
        display.stream_windowed(&fb, Zoom::X4, -10, 200).unwrap();

        let view = display.viewport();
        assert!(view.contains(0, 63));
        assert_eq!(sent(&log).len(), BUFFER_LEN);
    }

    #[test]
    fn test_set_zoom_resets_viewport() {
        let log = Log::default();
        let mut display = controller(&log);
        display.set_zoom(Zoom::X4);
        assert_eq!(display.viewport(), Viewport::baseline(Zoom::X4));
        assert!(log.borrow().is_empty());
    }

    proptest! {
        #[test]
        fn prop_windowed_is_read_only(
            seed in prop::collection::vec(any::<u8>(), BUFFER_LEN),
            zoom in prop_oneof![Just(Zoom::X1), Just(Zoom::X2), Just(Zoom::X4)],
            x in any::<i16>(),
            y in any::<i16>(),
        ) {
            let mut fb = FrameBuffer::default();
            fb.as_bytes_mut().copy_from_slice(&seed);
            let before = *fb.as_bytes();

            let out = windowed(&fb, zoom, x, y);
            prop_assert_eq!(out.len(), BUFFER_LEN);
            prop_assert_eq!(fb.as_bytes(), &before);
        }
    }
}
