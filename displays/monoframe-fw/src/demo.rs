//! Demo scene
//!
//! A ball bouncing inside a rounded frame, a status line with the frame
//! counter and CPU load, and a crosshair cursor driven by the d-pad.

use core::fmt::Write;

use monoframe_core::{Buttons, Color, FrameBuffer, Rasterizer, TextCursor, HEIGHT, WIDTH};

/// Ball radius in pixels
const BALL_RADIUS: i16 = 4;

/// Column-packed 8x8 smiley, blitted in the top-right corner
const SMILEY: [u8; 8] = [0x3C, 0x42, 0x95, 0xA1, 0xA1, 0x95, 0x42, 0x3C];

pub struct Scene {
    ball: (i16, i16),
    velocity: (i16, i16),
    cursor: (i16, i16),
}

impl Scene {
    pub const fn new() -> Self {
        Self {
            ball: (64, 32),
            velocity: (2, 1),
            cursor: (64, 32),
        }
    }

    /// Cursor position for windowed streaming
    pub fn cursor(&self) -> (i16, i16) {
        self.cursor
    }

    /// Advance one frame
    pub fn update(&mut self, held: Buttons) {
        let (mut x, mut y) = (self.ball.0 + self.velocity.0, self.ball.1 + self.velocity.1);
        let (max_x, max_y) = (WIDTH as i16 - 2 - BALL_RADIUS, HEIGHT as i16 - 2 - BALL_RADIUS);

        if x <= 1 + BALL_RADIUS || x >= max_x {
            self.velocity.0 = -self.velocity.0;
            x = x.clamp(1 + BALL_RADIUS, max_x);
        }
        if y <= 10 + BALL_RADIUS || y >= max_y {
            self.velocity.1 = -self.velocity.1;
            y = y.clamp(10 + BALL_RADIUS, max_y);
        }
        self.ball = (x, y);

        let (cx, cy) = &mut self.cursor;
        if held.pressed(Buttons::LEFT) {
            *cx -= 1;
        }
        if held.pressed(Buttons::RIGHT) {
            *cx += 1;
        }
        if held.pressed(Buttons::UP) {
            *cy -= 1;
        }
        if held.pressed(Buttons::DOWN) {
            *cy += 1;
        }
        *cx = (*cx).clamp(0, WIDTH as i16 - 1);
        *cy = (*cy).clamp(0, HEIGHT as i16 - 1);
    }

    /// Draw the scene into `fb`
    pub fn render(&self, fb: &mut FrameBuffer, text: &mut TextCursor, frame: u32, load: u32) {
        fb.clear(Color::Off);

        fb.draw_round_rect(0, 9, WIDTH as i16, HEIGHT as i16 - 9, 4, Color::On);
        fb.fill_circle(self.ball.0, self.ball.1, BALL_RADIUS, Color::On);
        fb.draw_triangle(10, 56, 20, 40, 30, 56, Color::On);
        fb.draw_bitmap(WIDTH as i16 - 8, 0, &SMILEY, 8, 8, Color::On);

        let (cx, cy) = self.cursor;
        fb.draw_fast_hline(cx - 2, cy, 5, Color::On);
        fb.draw_fast_vline(cx, cy - 2, 5, Color::On);

        text.set_cursor(0, 0);
        write!(text.writer(fb), "F{:05} L{:3}%", frame % 100_000, load).ok();
    }
}
