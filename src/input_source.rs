//! Input source abstraction for the frame scheduler.
//!
//! Pointer-drag events feed the orientation model, key events drive the
//! editor toggle, and `Wait` marks a frame boundary in scripted
//! sequences. The headless scheduler pulls from any `InputProvider`, so
//! tests and the autopilot can replay exact input timelines.

use std::collections::VecDeque;
use std::time::Duration;

use crate::vr::hotspot::HotspotKind;

/// A unified input event delivered to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed at (x, y) in screen pixels; starts a drag.
    PointerDown { x: f64, y: f64 },
    /// Pointer moved to (x, y) in screen pixels.
    PointerMove { x: f64, y: f64 },
    /// Pointer released; ends the drag.
    PointerUp,
    /// A discrete key press.
    Key { key: char },
    /// Hotspot description returned by the external authoring dialog.
    AuthorHotspot { label: String, kind: HotspotKind },
    /// Let time pass (used in scripted sequences).
    Wait { duration: Duration },
}

/// Trait for providing input events to the session.
pub trait InputProvider: Send {
    /// Get the next input event, if any.
    fn next_event(&mut self) -> Option<InputEvent>;
    /// Whether there are more events to deliver.
    fn has_events(&self) -> bool;
}

/// A scripted input provider that delivers events from a pre-defined queue.
pub struct ScriptedInputProvider {
    events: VecDeque<InputEvent>,
}

impl ScriptedInputProvider {
    /// Create from a vector of events.
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self {
            events: VecDeque::from(events),
        }
    }

    /// Number of remaining events.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputProvider for ScriptedInputProvider {
    fn next_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}

/// A recording wrapper that logs all events from an inner provider.
pub struct RecordingProvider<P: InputProvider> {
    inner: P,
    recorded: Vec<InputEvent>,
}

impl<P: InputProvider> RecordingProvider<P> {
    /// Wrap an existing provider with recording.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            recorded: Vec::new(),
        }
    }

    /// Get all recorded events.
    pub fn recorded(&self) -> &[InputEvent] {
        &self.recorded
    }

    /// Consume and return recorded events, ready to be replayed.
    pub fn into_recorded(self) -> Vec<InputEvent> {
        self.recorded
    }
}

impl<P: InputProvider> InputProvider for RecordingProvider<P> {
    fn next_event(&mut self) -> Option<InputEvent> {
        let event = self.inner.next_event()?;
        self.recorded.push(event.clone());
        Some(event)
    }

    fn has_events(&self) -> bool {
        self.inner.has_events()
    }
}
