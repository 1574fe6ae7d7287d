//! Drag-and-drop rescheduling state machine.
//!
//! A pointer press on an appointment card arms a potential drag; the drag
//! only activates once the pointer travels past [`DRAG_ACTIVATION_DISTANCE`].
//! Release before that is a click. The calendar view observes only the
//! terminal outcomes ([`DragOutcome`]); cells report drop-target hover while
//! a drag is in flight.

use chrono::{NaiveDate, NaiveTime};
use egui::{Context, Id, Pos2};

/// Pointer travel (in points) required before a press becomes a drag.
/// Below this, a press-release sequence on a card counts as a click.
pub const DRAG_ACTIVATION_DISTANCE: f32 = 10.0;

#[derive(Clone, Debug)]
pub struct DragContext {
    pub appointment_id: String,
    pub original_date: NaiveDate,
    pub original_time: NaiveTime,
    pub press_origin: Pos2,
    pub hovered_date: Option<NaiveDate>,
    pub hovered_time: Option<NaiveTime>,
}

impl DragContext {
    pub fn new(
        appointment_id: impl Into<String>,
        original_date: NaiveDate,
        original_time: NaiveTime,
        press_origin: Pos2,
    ) -> Self {
        Self {
            appointment_id: appointment_id.into(),
            original_date,
            original_time,
            press_origin,
            hovered_date: None,
            hovered_time: None,
        }
    }
}

/// Live phase of a press that started on a card.
#[derive(Clone, Debug)]
pub enum DragPhase {
    /// Pressed, threshold not yet exceeded.
    Armed(DragContext),
    /// Threshold exceeded; the card is being dragged.
    Dragging(DragContext),
}

impl DragPhase {
    pub fn context(&self) -> &DragContext {
        match self {
            DragPhase::Armed(ctx) | DragPhase::Dragging(ctx) => ctx,
        }
    }

    fn context_mut(&mut self) -> &mut DragContext {
        match self {
            DragPhase::Armed(ctx) | DragPhase::Dragging(ctx) => ctx,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragPhase::Dragging(_))
    }

    /// Feed the latest pointer position; arms promote to dragging once the
    /// travel distance exceeds the activation threshold.
    pub fn with_pointer(self, pos: Pos2) -> DragPhase {
        match self {
            DragPhase::Armed(ctx) => {
                if ctx.press_origin.distance(pos) > DRAG_ACTIVATION_DISTANCE {
                    DragPhase::Dragging(ctx)
                } else {
                    DragPhase::Armed(ctx)
                }
            }
            dragging => dragging,
        }
    }

    /// Record the (day, time) cell currently under the pointer.
    pub fn with_hover(mut self, date: NaiveDate, time: NaiveTime) -> DragPhase {
        let ctx = self.context_mut();
        ctx.hovered_date = Some(date);
        ctx.hovered_time = Some(time);
        self
    }
}

/// Terminal transition of a press, produced on pointer release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released before the threshold: a plain click on the card.
    Click { appointment_id: String },
    /// Released over a valid (day, time) cell.
    Dropped {
        appointment_id: String,
        day: NaiveDate,
        time: NaiveTime,
    },
    /// Released outside any cell, or the drag was cancelled.
    Cancelled,
}

/// Resolve a release into its terminal outcome.
///
/// An activated drag never produces a click; a drop back onto the original
/// slot resolves to `Cancelled` so no-op reschedules are not issued.
pub fn resolve_release(phase: DragPhase) -> DragOutcome {
    match phase {
        DragPhase::Armed(ctx) => DragOutcome::Click {
            appointment_id: ctx.appointment_id,
        },
        DragPhase::Dragging(ctx) => match (ctx.hovered_date, ctx.hovered_time) {
            (Some(day), Some(time)) => {
                if day == ctx.original_date && time == ctx.original_time {
                    DragOutcome::Cancelled
                } else {
                    DragOutcome::Dropped {
                        appointment_id: ctx.appointment_id,
                        day,
                        time,
                    }
                }
            }
            _ => DragOutcome::Cancelled,
        },
    }
}

/// Frame-to-frame storage of the drag phase in egui memory.
pub struct DragManager;

impl DragManager {
    fn storage_id() -> Id {
        Id::new("appointment_drag_state")
    }

    pub fn arm(ctx: &Context, drag: DragContext) {
        ctx.memory_mut(|mem| {
            mem.data
                .insert_temp(Self::storage_id(), DragPhase::Armed(drag));
        });
    }

    pub fn current(ctx: &Context) -> Option<DragPhase> {
        ctx.memory_mut(|mem| mem.data.get_temp::<DragPhase>(Self::storage_id()))
    }

    pub fn is_dragging(ctx: &Context) -> bool {
        Self::current(ctx).map(|p| p.is_dragging()).unwrap_or(false)
    }

    /// Advance the stored phase with the latest pointer position.
    pub fn track_pointer(ctx: &Context, pos: Pos2) {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            if let Some(phase) = mem.data.get_temp::<DragPhase>(id) {
                mem.data.insert_temp(id, phase.with_pointer(pos));
            }
        });
    }

    /// Record the cell under the pointer as the current drop target.
    pub fn update_hover(ctx: &Context, date: NaiveDate, time: NaiveTime) {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            if let Some(phase) = mem.data.get_temp::<DragPhase>(id) {
                mem.data.insert_temp(id, phase.with_hover(date, time));
            }
        });
    }

    /// Remove and return the phase; called on pointer release.
    pub fn take(ctx: &Context) -> Option<DragPhase> {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            let phase = mem.data.get_temp::<DragPhase>(id);
            if phase.is_some() {
                mem.data.remove::<DragPhase>(id);
            }
            phase
        })
    }

    pub fn cancel(ctx: &Context) {
        ctx.memory_mut(|mem| {
            mem.data.remove::<DragPhase>(Self::storage_id());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_context(origin: Pos2) -> DragContext {
        DragContext::new(
            "apt-1",
            NaiveDate::from_ymd_opt(2025, 6, 11).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            origin,
        )
    }

    #[test]
    fn test_release_below_threshold_is_click() {
        let origin = Pos2::new(100.0, 100.0);
        let phase = DragPhase::Armed(sample_context(origin))
            .with_pointer(Pos2::new(104.0, 103.0));

        assert!(!phase.is_dragging());
        assert_eq!(
            resolve_release(phase),
            DragOutcome::Click {
                appointment_id: "apt-1".to_string()
            }
        );
    }

    #[test]
    fn test_travel_past_threshold_activates_drag() {
        let origin = Pos2::new(100.0, 100.0);
        let phase = DragPhase::Armed(sample_context(origin))
            .with_pointer(Pos2::new(100.0, 111.0));

        assert!(phase.is_dragging());
    }

    #[test]
    fn test_activated_drag_never_clicks() {
        let origin = Pos2::new(100.0, 100.0);
        // Move out past the threshold, then come back to the origin.
        let phase = DragPhase::Armed(sample_context(origin))
            .with_pointer(Pos2::new(120.0, 100.0))
            .with_pointer(origin);

        assert!(phase.is_dragging());
        let outcome = resolve_release(phase);
        assert!(!matches!(outcome, DragOutcome::Click { .. }));
    }

    #[test]
    fn test_drop_on_cell_produces_reschedule_target() {
        let origin = Pos2::new(100.0, 100.0);
        let day = NaiveDate::from_ymd_opt(2025, 6, 13).unwrap();
        let time = NaiveTime::from_hms_opt(14, 30, 0).unwrap();

        let phase = DragPhase::Armed(sample_context(origin))
            .with_pointer(Pos2::new(160.0, 180.0))
            .with_hover(day, time);

        assert_eq!(
            resolve_release(phase),
            DragOutcome::Dropped {
                appointment_id: "apt-1".to_string(),
                day,
                time,
            }
        );
    }

    #[test]
    fn test_drop_on_original_slot_is_cancelled() {
        let origin = Pos2::new(100.0, 100.0);
        let ctx = sample_context(origin);
        let day = ctx.original_date;
        let time = ctx.original_time;

        let phase = DragPhase::Armed(ctx)
            .with_pointer(Pos2::new(160.0, 180.0))
            .with_hover(day, time);

        assert_eq!(resolve_release(phase), DragOutcome::Cancelled);
    }

    #[test]
    fn test_drop_without_target_is_cancelled() {
        let origin = Pos2::new(100.0, 100.0);
        let phase = DragPhase::Armed(sample_context(origin))
            .with_pointer(Pos2::new(300.0, 300.0));

        assert_eq!(resolve_release(phase), DragOutcome::Cancelled);
    }
}
