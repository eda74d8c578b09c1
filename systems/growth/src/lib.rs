#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that translates pointer input into path growth commands.

use glam::Vec2;
use path_defence_core::Command;

/// Declarative growth preview describing a potential path extension.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthPreview {
    /// World-space point the growth command would target.
    pub at: Vec2,
    /// Indicates whether the preview represents a plausible growth point.
    ///
    /// Adapters derive this from the world's fast occupancy query; the world
    /// still re-validates on application.
    pub placeable: bool,
}

impl GrowthPreview {
    /// Creates a new growth preview descriptor.
    #[must_use]
    pub const fn new(at: Vec2, placeable: bool) -> Self {
        Self { at, placeable }
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GrowthInput {
    /// Indicates whether the player confirmed a growth on this frame.
    pub grow_action: bool,
    /// Indicates whether the player requested an undo on this frame.
    pub undo_action: bool,
}

impl GrowthInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(grow_action: bool, undo_action: bool) -> Self {
        Self {
            grow_action,
            undo_action,
        }
    }
}

/// Growth system that turns preview plus input into world commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Growth;

impl Growth {
    /// Creates a new growth system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Consumes the current preview and input to emit growth commands.
    ///
    /// Undo is emitted after growth so that a frame carrying both actions
    /// nets out to the state before the frame.
    pub fn handle(
        &self,
        preview: Option<GrowthPreview>,
        input: GrowthInput,
        out: &mut Vec<Command>,
    ) {
        if input.grow_action {
            if let Some(preview) = preview {
                if preview.placeable {
                    out.push(Command::GrowPath { at: preview.at });
                }
            }
        }

        if input.undo_action {
            out.push(Command::UndoGrowth);
        }
    }
}
