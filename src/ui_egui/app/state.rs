//! View-level state for the calendar orchestrator.

/// Where the week's data currently stands. The grid only renders in
/// `Ready`; a failed fetch replaces the whole surface, never part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Failed(String),
}

impl LoadPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadPhase::Loading)
    }
}

/// Open state of the appointment details surface.
#[derive(Debug, Clone)]
pub struct DetailsState {
    pub appointment_id: String,
}
