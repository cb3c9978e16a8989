//! Drawing surface abstraction consumed by particle and screen-effect rendering

use glam::Vec2;
use glint_core::Color;
use std::cell::RefCell;
use std::rc::Rc;

/// 2D immediate-mode target the engine renders into.
///
/// Implemented by the host's canvas/backbuffer. Positions are in surface
/// pixels; colors carry the final per-draw alpha.
pub trait DrawSurface {
    /// Overwrite the whole surface with the background at `alpha`.
    /// 1.0 is a full clear; lower values leave soft trails behind movers.
    fn fade(&mut self, alpha: f32);

    /// Filled polygon from absolute vertex positions
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);

    /// Stroked circle outline
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);

    /// Filled circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Line segment
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    /// Full-surface color overlay
    fn overlay(&mut self, color: Color);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fade {
        alpha: f32,
    },
    FillPolygon {
        points: Vec<Vec2>,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Overlay {
        color: Color,
    },
}

impl DrawCommand {
    /// Alpha of the color this command draws with, if any
    pub fn alpha(&self) -> Option<f32> {
        match self {
            DrawCommand::Fade { .. } => None,
            DrawCommand::FillPolygon { color, .. }
            | DrawCommand::StrokeCircle { color, .. }
            | DrawCommand::FillCircle { color, .. }
            | DrawCommand::Line { color, .. }
            | DrawCommand::Overlay { color } => Some(color.a),
        }
    }
}

/// Surface that records every draw call instead of rasterizing.
///
/// Clones share one command log, so a test or headless host can keep a
/// handle while the particle system owns the boxed surface.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    commands: Rc<RefCell<Vec<DrawCommand>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded commands
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.commands.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.commands.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.borrow().is_empty()
    }

    /// Drain the log, returning everything recorded so far
    pub fn take(&self) -> Vec<DrawCommand> {
        std::mem::take(&mut *self.commands.borrow_mut())
    }

    fn push(&self, command: DrawCommand) {
        self.commands.borrow_mut().push(command);
    }
}

impl DrawSurface for RecordingSurface {
    fn fade(&mut self, alpha: f32) {
        self.push(DrawCommand::Fade { alpha });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn overlay(&mut self, color: Color) {
        self.push(DrawCommand::Overlay { color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_log() {
        let recorder = RecordingSurface::new();
        let mut boxed: Box<dyn DrawSurface> = Box::new(recorder.clone());
        boxed.fade(0.3);
        boxed.fill_circle(Vec2::new(1.0, 2.0), 3.0, Color::WHITE);
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.commands()[0], DrawCommand::Fade { alpha: 0.3 });

        let drained = recorder.take();
        assert_eq!(drained.len(), 2);
        assert!(recorder.is_empty());
    }

    #[test]
    fn command_alpha() {
        let cmd = DrawCommand::Overlay {
            color: Color::WHITE.with_alpha(0.4),
        };
        assert_eq!(cmd.alpha(), Some(0.4));
        assert_eq!(DrawCommand::Fade { alpha: 1.0 }.alpha(), None);
    }
}
