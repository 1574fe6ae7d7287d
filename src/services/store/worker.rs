//! Background bridge to the appointment store.
//!
//! The UI thread never calls the store directly: requests go over a channel
//! to a worker thread and completions are drained once per frame. Fetches
//! carry a generation so the view can discard responses that arrive after
//! the week or filter has already moved on; mutations carry an operation id
//! so the view can roll back the matching optimistic change on failure.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration as StdDuration;

use chrono::{NaiveDate, NaiveTime};

use super::{AppointmentStore, DateRange, StoreError};
use crate::models::appointment::{Appointment, AppointmentStatus};
use crate::models::staff::{Staff, StaffFilter};

/// Bounded retry for mutations on transient failures.
const MUTATION_MAX_RETRIES: usize = 2;
const MUTATION_RETRY_DELAY_MS: u64 = 400;

#[derive(Debug)]
pub enum StoreRequest {
    FetchWeek {
        generation: u64,
        range: DateRange,
        staff: StaffFilter,
    },
    FetchStaff {
        generation: u64,
    },
    UpdateStatus {
        op_id: u64,
        appointment_id: String,
        status: AppointmentStatus,
    },
    Reschedule {
        op_id: u64,
        appointment_id: String,
        day: NaiveDate,
        time: NaiveTime,
    },
}

#[derive(Debug)]
pub enum StoreEvent {
    WeekLoaded {
        generation: u64,
        result: Result<Vec<Appointment>, StoreError>,
    },
    StaffLoaded {
        generation: u64,
        result: Result<Vec<Staff>, StoreError>,
    },
    MutationFinished {
        op_id: u64,
        result: Result<(), StoreError>,
    },
}

pub struct StoreWorker {
    requests: Option<Sender<StoreRequest>>,
    events: Receiver<StoreEvent>,
    handle: Option<JoinHandle<()>>,
}

impl StoreWorker {
    /// Spawn the worker thread around a store implementation.
    pub fn spawn(store: Arc<dyn AppointmentStore>) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<StoreRequest>();
        let (event_tx, event_rx) = mpsc::channel::<StoreEvent>();

        let handle = thread::Builder::new()
            .name("store-worker".to_string())
            .spawn(move || run(store, request_rx, event_tx))
            .expect("failed to spawn store worker thread");

        Self {
            requests: Some(request_tx),
            events: event_rx,
            handle: Some(handle),
        }
    }

    pub fn send(&self, request: StoreRequest) {
        if let Some(tx) = &self.requests {
            if tx.send(request).is_err() {
                log::error!("store worker is gone, request dropped");
            }
        }
    }

    /// Drain every completion that arrived since the last frame.
    pub fn poll(&self) -> Vec<StoreEvent> {
        self.events.try_iter().collect()
    }
}

impl Drop for StoreWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("store worker thread panicked");
            }
        }
    }
}

fn run(
    store: Arc<dyn AppointmentStore>,
    requests: Receiver<StoreRequest>,
    events: Sender<StoreEvent>,
) {
    for request in requests.iter() {
        let event = match request {
            StoreRequest::FetchWeek {
                generation,
                range,
                staff,
            } => StoreEvent::WeekLoaded {
                generation,
                result: store.fetch_appointments(range, &staff),
            },
            StoreRequest::FetchStaff { generation } => StoreEvent::StaffLoaded {
                generation,
                result: store.fetch_staff(),
            },
            StoreRequest::UpdateStatus {
                op_id,
                appointment_id,
                status,
            } => StoreEvent::MutationFinished {
                op_id,
                result: with_retries(|| store.update_status(&appointment_id, status)),
            },
            StoreRequest::Reschedule {
                op_id,
                appointment_id,
                day,
                time,
            } => StoreEvent::MutationFinished {
                op_id,
                result: with_retries(|| store.reschedule(&appointment_id, day, time)),
            },
        };

        if events.send(event).is_ok() {
            continue;
        }
        // Receiver gone: the app is shutting down.
        break;
    }
}

fn with_retries(call: impl Fn() -> Result<(), StoreError>) -> Result<(), StoreError> {
    let mut last_error = None;

    for attempt in 0..=MUTATION_MAX_RETRIES {
        match call() {
            Ok(()) => return Ok(()),
            Err(err) => {
                let retryable = err.is_transient() && attempt < MUTATION_MAX_RETRIES;
                if retryable {
                    log::warn!("store mutation attempt {} failed: {}", attempt + 1, err);
                    thread::sleep(StdDuration::from_millis(MUTATION_RETRY_DELAY_MS));
                    last_error = Some(err);
                } else {
                    return Err(err);
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| StoreError::Network("unknown store error".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MockAppointmentStore;
    use std::time::Duration;

    fn wait_events(worker: &StoreWorker, want: usize) -> Vec<StoreEvent> {
        let mut collected = Vec::new();
        for _ in 0..50 {
            collected.extend(worker.poll());
            if collected.len() >= want {
                break;
            }
            thread::sleep(Duration::from_millis(20));
        }
        collected
    }

    #[test]
    fn test_fetch_week_reports_generation() {
        let mut store = MockAppointmentStore::new();
        store
            .expect_fetch_appointments()
            .returning(|_, _| Ok(Vec::new()));

        let worker = StoreWorker::spawn(Arc::new(store));
        let range = DateRange::week_of(NaiveDate::from_ymd_opt(2025, 6, 8).unwrap());
        worker.send(StoreRequest::FetchWeek {
            generation: 7,
            range,
            staff: StaffFilter::All,
        });

        let events = wait_events(&worker, 1);
        assert!(matches!(
            events.as_slice(),
            [StoreEvent::WeekLoaded {
                generation: 7,
                result: Ok(_)
            }]
        ));
    }

    #[test]
    fn test_mutation_retries_transient_failure() {
        let mut store = MockAppointmentStore::new();
        let mut calls = 0;
        store.expect_update_status().returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Err(StoreError::Http(503))
            } else {
                Ok(())
            }
        });

        let worker = StoreWorker::spawn(Arc::new(store));
        worker.send(StoreRequest::UpdateStatus {
            op_id: 1,
            appointment_id: "apt-1".to_string(),
            status: AppointmentStatus::Done,
        });

        let events = wait_events(&worker, 1);
        assert!(matches!(
            events.as_slice(),
            [StoreEvent::MutationFinished {
                op_id: 1,
                result: Ok(())
            }]
        ));
    }

    #[test]
    fn test_mutation_does_not_retry_client_error() {
        let mut store = MockAppointmentStore::new();
        store
            .expect_update_status()
            .times(1)
            .returning(|_, _| Err(StoreError::Http(404)));

        let worker = StoreWorker::spawn(Arc::new(store));
        worker.send(StoreRequest::UpdateStatus {
            op_id: 2,
            appointment_id: "apt-9".to_string(),
            status: AppointmentStatus::Canceled,
        });

        let events = wait_events(&worker, 1);
        assert!(matches!(
            events.as_slice(),
            [StoreEvent::MutationFinished {
                op_id: 2,
                result: Err(StoreError::Http(404))
            }]
        ));
    }

    #[test]
    fn test_mutation_gives_up_after_bounded_retries() {
        let mut store = MockAppointmentStore::new();
        store
            .expect_reschedule()
            .times(MUTATION_MAX_RETRIES + 1)
            .returning(|_, _, _| Err(StoreError::Network("connection reset".to_string())));

        let worker = StoreWorker::spawn(Arc::new(store));
        worker.send(StoreRequest::Reschedule {
            op_id: 3,
            appointment_id: "apt-3".to_string(),
            day: NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
            time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        });

        let events = wait_events(&worker, 1);
        assert!(matches!(
            events.as_slice(),
            [StoreEvent::MutationFinished {
                op_id: 3,
                result: Err(StoreError::Network(_))
            }]
        ));
    }
}
