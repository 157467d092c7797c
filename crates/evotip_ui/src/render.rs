//! Render command collection.
//!
//! The overlay never draws; it emits commands which the host translates to
//! its own draw calls. Each popup is emitted as its own batch so the host can
//! layer drill-down popups above their parents.

use crate::layout::Rect;
use crate::style::Color;

/// A render command for the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
        /// Corner radius.
        corner_radius: f32,
    },
    /// Rectangle outline.
    RectOutline {
        /// Bounds.
        bounds: Rect,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: f32,
        /// Corner radius.
        corner_radius: f32,
    },
    /// Single line of text.
    Text {
        /// Text content.
        text: String,
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
        /// Text color.
        color: Color,
        /// Font size.
        font_size: f32,
    },
    /// Host sprite drawn into a rect.
    Icon {
        /// Bounds.
        bounds: Rect,
        /// Host sprite key.
        icon: String,
        /// Tint color.
        color: Color,
    },
    /// Scissor rect (clip children).
    PushClip {
        /// Clip bounds.
        bounds: Rect,
    },
    /// Pop scissor rect.
    PopClip,
}

/// Commands for one layer, usually one popup.
#[derive(Debug, Clone, Default)]
pub struct UIBatch {
    /// Commands in submission order.
    pub commands: Vec<RenderCommand>,
    /// Layer; higher draws later.
    pub z_index: i32,
}

/// Collects render commands into layered batches for one frame.
#[derive(Debug, Default)]
pub struct UIRenderer {
    batches: Vec<UIBatch>,
    clips: Vec<Rect>,
}

impl UIRenderer {
    /// Creates an empty renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops everything recorded for the previous frame.
    pub fn begin_frame(&mut self) {
        self.batches.clear();
        self.clips.clear();
    }

    /// Starts a new batch at `z_index`. Open clips do not carry over.
    pub fn begin_batch(&mut self, z_index: i32) {
        self.clips.clear();
        self.batches.push(UIBatch {
            commands: Vec::with_capacity(32),
            z_index,
        });
    }

    fn current(&mut self) -> &mut Vec<RenderCommand> {
        if self.batches.is_empty() {
            self.begin_batch(0);
        }
        let last = self.batches.len() - 1;
        &mut self.batches[last].commands
    }

    /// Adds a command to the current batch.
    pub fn push(&mut self, command: RenderCommand) {
        self.current().push(command);
    }

    /// Clips following commands to `bounds`, intersected with any open clip.
    pub fn push_clip(&mut self, bounds: Rect) {
        let clip = match self.clips.last() {
            Some(open) => open.intersection(&bounds).unwrap_or(Rect::ZERO),
            None => bounds,
        };
        self.clips.push(clip);
        self.push(RenderCommand::PushClip { bounds: clip });
    }

    /// Closes the innermost clip. No-op without one.
    pub fn pop_clip(&mut self) {
        if self.clips.pop().is_some() {
            self.push(RenderCommand::PopClip);
        }
    }

    /// Innermost open clip.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clips.last().copied()
    }

    /// Finishes the frame. Non-empty batches come back ordered by layer;
    /// equal layers keep submission order.
    pub fn end_frame(&mut self) -> &[UIBatch] {
        self.clips.clear();
        self.batches.retain(|b| !b.commands.is_empty());
        self.batches.sort_by_key(|b| b.z_index);
        &self.batches
    }

    /// Commands recorded so far this frame.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.batches.iter().map(|b| b.commands.len()).sum()
    }
}
