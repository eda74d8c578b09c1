use glam::Vec2;
use path_defence_core::Command;
use path_defence_system_growth::{Growth, GrowthInput, GrowthPreview};

#[test]
fn confirm_emits_grow_command_for_placeable_preview() {
    let growth = Growth::new();
    let mut commands = Vec::new();

    growth.handle(
        Some(GrowthPreview::new(Vec2::new(142.0, 110.0), true)),
        GrowthInput::new(true, false),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::GrowPath {
            at: Vec2::new(142.0, 110.0),
        }],
        "growth should emit a command when confirming a valid preview",
    );
}

#[test]
fn confirm_ignored_when_preview_not_placeable() {
    let growth = Growth::new();
    let mut commands = Vec::new();

    growth.handle(
        Some(GrowthPreview::new(Vec2::new(10.0, 10.0), false)),
        GrowthInput::new(true, false),
        &mut commands,
    );

    assert!(commands.is_empty(), "invalid preview must not emit commands");
}

#[test]
fn confirm_ignored_without_a_preview() {
    let growth = Growth::new();
    let mut commands = Vec::new();

    growth.handle(None, GrowthInput::new(true, false), &mut commands);

    assert!(commands.is_empty());
}

#[test]
fn undo_is_emitted_after_growth() {
    let growth = Growth::new();
    let mut commands = Vec::new();

    growth.handle(
        Some(GrowthPreview::new(Vec2::new(50.0, 50.0), true)),
        GrowthInput::new(true, true),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::GrowPath {
                at: Vec2::new(50.0, 50.0),
            },
            Command::UndoGrowth,
        ],
    );
}

#[test]
fn idle_input_is_silent() {
    let growth = Growth::new();
    let mut commands = Vec::new();

    growth.handle(
        Some(GrowthPreview::new(Vec2::new(50.0, 50.0), true)),
        GrowthInput::default(),
        &mut commands,
    );

    assert!(commands.is_empty());
}
