//! Press-then-drag recognizer for a single item.
//!
//! Composes [`PressHoldDetector`] and [`DragDetector`] into one state machine:
//!
//! ```text
//! Idle ──hold──▶ Pressing ──move──▶ Dragging ──move──▶ Dragging
//!   ▲               │                  │
//!   └── release: Committed(delta) ─────┤
//!   └── cancel:  Cancelled ────────────┘
//! ```
//!
//! The recognizer is pure: it never touches shared state. Callers turn the
//! returned [`GestureSignal`]s into store mutations, and drive the hold timer
//! through [`PressDragRecognizer::on_hold_deadline`].

use super::drag::DragDetector;
use super::press_hold::{HoldFailure, HoldOutcome, PressHoldDetector};
use crate::gesture_constants::{DRAG_THRESHOLD, LONG_PRESS_MIN_HOLD};
use crate::nodes::input::types::{PointerEvent, PointerEventKind, PointerId};
use scrolldrag_ui_graphics::Offset;
use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// No confirmed press. A touch may be down and waiting for its hold.
    Idle,
    /// The hold was confirmed; no movement yet.
    Pressing,
    Dragging,
}

impl GesturePhase {
    /// Whether the item counts as pressed in this phase.
    pub fn is_pressed(self) -> bool {
        !matches!(self, GesturePhase::Idle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureSignal {
    /// Idle → Pressing.
    Armed,
    /// Pressing → Dragging, with the translation since the drag began.
    DragStarted(Offset),
    /// Dragging self-loop.
    DragMoved(Offset),
    /// Released while pressed; carries the delta to commit (zero if the item
    /// was never dragged).
    Committed(Offset),
    /// Interrupted while pressed. Nothing must be committed.
    Cancelled,
    /// The touch ended or escaped before the press was confirmed.
    Rejected(HoldFailure),
}

pub type GestureSignals = SmallVec<[GestureSignal; 2]>;

#[derive(Clone, Debug)]
pub struct PressDragRecognizer {
    hold: PressHoldDetector,
    drag: DragDetector,
    phase: GesturePhase,
    pointer: Option<PointerId>,
    generation: u64,
}

impl Default for PressDragRecognizer {
    fn default() -> Self {
        Self::new(LONG_PRESS_MIN_HOLD, DRAG_THRESHOLD)
    }
}

impl PressDragRecognizer {
    pub fn new(min_hold: Duration, touch_slop: f32) -> Self {
        Self {
            hold: PressHoldDetector::new(min_hold, touch_slop),
            drag: DragDetector::new(),
            phase: GesturePhase::Idle,
            pointer: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Pointer owning the current gesture, if any.
    pub fn pointer(&self) -> Option<PointerId> {
        self.pointer
    }

    pub fn is_tracking(&self) -> bool {
        self.pointer.is_some()
    }

    /// Incremented on every accepted touch-down. Deferred work captures it to
    /// detect that its gesture has since ended.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Uptime at which the hold of the current touch would be confirmed.
    /// `None` once the press is confirmed or when no touch is down.
    pub fn pending_hold_deadline(&self) -> Option<Duration> {
        match self.phase {
            GesturePhase::Idle => self.hold.deadline(),
            _ => None,
        }
    }

    /// The in-progress drag delta; zero unless dragging.
    pub fn live_delta(&self) -> Offset {
        match self.phase {
            GesturePhase::Dragging => self.drag.translation(),
            _ => Offset::ZERO,
        }
    }

    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> GestureSignals {
        let mut signals = GestureSignals::new();
        match event.kind {
            PointerEventKind::Down => self.on_down(event),
            PointerEventKind::Move => {
                if self.pointer == Some(event.id) {
                    self.on_move(event, &mut signals);
                }
            }
            PointerEventKind::Up => {
                if self.pointer == Some(event.id) {
                    signals.push(self.on_up(event));
                }
            }
            PointerEventKind::Cancel => {
                if self.pointer == Some(event.id) {
                    signals.extend(self.cancel());
                }
            }
        }
        signals
    }

    /// Timer callback for the hold deadline scheduled after touch-down.
    ///
    /// Returns `None` when the check is stale (`generation` belongs to an
    /// earlier gesture) or the hold is not yet due.
    pub fn on_hold_deadline(&mut self, generation: u64, now: Duration) -> Option<GestureSignal> {
        if generation != self.generation || self.phase != GesturePhase::Idle {
            return None;
        }
        match self.hold.check_elapsed(now) {
            HoldOutcome::Held => Some(self.arm()),
            _ => None,
        }
    }

    /// Ends the current gesture because the system interrupted it or another
    /// recognizer won the touch.
    pub fn cancel(&mut self) -> Option<GestureSignal> {
        let signal = match self.phase {
            GesturePhase::Idle => match self.hold.cancel() {
                HoldOutcome::Failed(failure) => Some(GestureSignal::Rejected(failure)),
                _ => None,
            },
            GesturePhase::Pressing | GesturePhase::Dragging => Some(GestureSignal::Cancelled),
        };
        if signal.is_some() {
            log::trace!("gesture {} cancelled in {:?}", self.generation, self.phase);
        }
        self.reset();
        signal
    }

    fn on_down(&mut self, event: &PointerEvent) {
        if self.pointer.is_some() {
            // Single-pointer recognizer: later fingers are ignored until the
            // owning pointer lifts.
            return;
        }
        if event.is_consumed() {
            return;
        }
        self.generation += 1;
        self.pointer = Some(event.id);
        self.hold.start(event.position, event.uptime);
        log::trace!(
            "gesture {} touch-down at ({:.1}, {:.1})",
            self.generation,
            event.position.x,
            event.position.y
        );
    }

    fn on_move(&mut self, event: &PointerEvent, signals: &mut GestureSignals) {
        match self.phase {
            GesturePhase::Idle => {
                if event.is_consumed() {
                    signals.extend(self.cancel());
                    return;
                }
                match self.hold.update(event.position, event.uptime) {
                    HoldOutcome::Pending => {}
                    HoldOutcome::Held => {
                        signals.push(self.arm());
                        self.on_move(event, signals);
                    }
                    HoldOutcome::Failed(failure) => {
                        log::trace!("gesture {} rejected: {:?}", self.generation, failure);
                        self.reset();
                        signals.push(GestureSignal::Rejected(failure));
                    }
                }
            }
            GesturePhase::Pressing => {
                if event.is_consumed() {
                    signals.extend(self.cancel());
                    return;
                }
                event.consume();
                let delta = self.drag.update(event.position);
                if !delta.is_zero() {
                    self.phase = GesturePhase::Dragging;
                    signals.push(GestureSignal::DragStarted(delta));
                }
            }
            GesturePhase::Dragging => {
                if event.is_consumed() {
                    signals.extend(self.cancel());
                    return;
                }
                event.consume();
                signals.push(GestureSignal::DragMoved(self.drag.update(event.position)));
            }
        }
    }

    fn on_up(&mut self, event: &PointerEvent) -> GestureSignal {
        let signal = match self.phase {
            GesturePhase::Idle => match self.hold.release() {
                HoldOutcome::Failed(failure) => GestureSignal::Rejected(failure),
                _ => GestureSignal::Rejected(HoldFailure::ReleasedEarly),
            },
            GesturePhase::Pressing | GesturePhase::Dragging => {
                event.consume();
                GestureSignal::Committed(self.live_delta())
            }
        };
        log::trace!("gesture {} ended: {:?}", self.generation, signal);
        self.reset();
        signal
    }

    fn arm(&mut self) -> GestureSignal {
        let origin = self.hold.last_position().unwrap_or_default();
        self.hold.reset();
        self.drag.start(origin);
        self.phase = GesturePhase::Pressing;
        log::trace!("gesture {} armed", self.generation);
        GestureSignal::Armed
    }

    fn reset(&mut self) {
        self.hold.reset();
        self.drag.reset();
        self.phase = GesturePhase::Idle;
        self.pointer = None;
    }
}
