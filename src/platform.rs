//! Platform abstraction layer
//!
//! The simulation reaches the outside world only through the traits here:
//! a render sink it pushes entity placements into and an input source it
//! samples once per frame. Hosts wire in real devices; tests wire in the
//! recording/scripted doubles.

use std::collections::VecDeque;

/// Where entities get drawn. Fire-and-forget: the sink never reports back
/// into the simulation.
pub trait RenderSink {
    /// Position the sprite for `id` at the given top-left corner.
    fn place_at(&mut self, id: u32, x: f32, y: f32);
    /// Show or hide the sprite for `id` without removing it.
    fn set_visible(&mut self, id: u32, visible: bool);
    /// Drop the sprite for `id` entirely.
    fn remove(&mut self, id: u32);
}

/// Held input states sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

/// Where input intents come from.
pub trait InputSource {
    fn poll(&mut self) -> InputSnapshot;
}

/// Renders nothing. For headless runs.
#[derive(Debug, Default)]
pub struct NullRender;

impl RenderSink for NullRender {
    fn place_at(&mut self, _id: u32, _x: f32, _y: f32) {}
    fn set_visible(&mut self, _id: u32, _visible: bool) {}
    fn remove(&mut self, _id: u32) {}
}

/// Records every sink call so tests can assert on render sync.
#[derive(Debug, Default)]
pub struct RecordingRender {
    pub placements: Vec<(u32, f32, f32)>,
    pub visibility: Vec<(u32, bool)>,
    pub removed: Vec<u32>,
}

impl RenderSink for RecordingRender {
    fn place_at(&mut self, id: u32, x: f32, y: f32) {
        self.placements.push((id, x, y));
    }
    fn set_visible(&mut self, id: u32, visible: bool) {
        self.visibility.push((id, visible));
    }
    fn remove(&mut self, id: u32) {
        self.removed.push(id);
    }
}

/// Replays a fixed sequence of snapshots, then holds the last one forever.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
    held: InputSnapshot,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            held: InputSnapshot::default(),
        }
    }

    /// A source that reports the same snapshot every frame.
    pub fn hold(snapshot: InputSnapshot) -> Self {
        Self {
            frames: VecDeque::new(),
            held: snapshot,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputSnapshot {
        if let Some(next) = self.frames.pop_front() {
            self.held = next;
        }
        self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_replays_then_holds() {
        let fire = InputSnapshot {
            fire: true,
            ..Default::default()
        };
        let left = InputSnapshot {
            move_left: true,
            ..Default::default()
        };
        let mut source = ScriptedInput::new([fire, left]);
        assert_eq!(source.poll(), fire);
        assert_eq!(source.poll(), left);
        assert_eq!(source.poll(), left);
        assert_eq!(source.poll(), left);
    }

    #[test]
    fn test_hold_is_constant() {
        let snap = InputSnapshot {
            move_right: true,
            fire: true,
            ..Default::default()
        };
        let mut source = ScriptedInput::hold(snap);
        for _ in 0..5 {
            assert_eq!(source.poll(), snap);
        }
    }

    #[test]
    fn test_recording_render_captures_calls() {
        let mut sink = RecordingRender::default();
        sink.place_at(7, 100.0, 200.0);
        sink.set_visible(7, false);
        sink.remove(7);
        assert_eq!(sink.placements, vec![(7, 100.0, 200.0)]);
        assert_eq!(sink.visibility, vec![(7, false)]);
        assert_eq!(sink.removed, vec![7]);
    }
}
