//! Draw primitives emitted by the particle field
//!
//! The field owns no drawing surface. It pushes commands into a `DrawSink`,
//! which the front end replays onto a canvas.

use glam::Vec2;

/// RGB color, 0-255 per channel
pub type Rgb = [u8; 3];

/// Connecting lines are white
pub const LINK_COLOR: Rgb = [255, 255, 255];

/// A single 2D drawing instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgb,
        alpha: f32,
    },
    /// Stroked line segment
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgb,
        alpha: f32,
        width: f32,
    },
}

impl DrawCommand {
    /// CSS `rgba(...)` string for the command's color and alpha
    pub fn css_color(&self) -> String {
        let (color, alpha) = match self {
            DrawCommand::Circle { color, alpha, .. } => (color, alpha),
            DrawCommand::Line { color, alpha, .. } => (color, alpha),
        };
        format!("rgba({}, {}, {}, {})", color[0], color[1], color[2], alpha)
    }
}

/// Receiver for draw commands
pub trait DrawSink {
    fn draw(&mut self, command: DrawCommand);
}

/// Recording sink (tests, headless runs)
impl DrawSink for Vec<DrawCommand> {
    fn draw(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

/// Sink that only counts commands
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingSink {
    pub circles: usize,
    pub lines: usize,
}

impl DrawSink for CountingSink {
    fn draw(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Circle { .. } => self.circles += 1,
            DrawCommand::Line { .. } => self.lines += 1,
        }
    }
}
