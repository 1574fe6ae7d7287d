//! HTTPS JSON adapter for the hosted scheduling backend.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use super::{AppointmentStore, DateRange, StoreError};
use crate::models::appointment::{Appointment, AppointmentStatus};
use crate::models::staff::{Staff, StaffFilter};

pub struct RemoteStore {
    client: Client,
    base_url: String,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self, StoreError> {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();

        if !(base_url.starts_with("https://") || base_url.starts_with("http://localhost")) {
            return Err(StoreError::Config(
                "backend URL must use HTTPS (plain HTTP is allowed for localhost only)"
                    .to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| StoreError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, StoreError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(StoreError::Http(status.as_u16()));
        }

        response
            .json::<T>()
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn patch_json(&self, url: &str, body: serde_json::Value) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(url)
            .json(&body)
            .send()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Http(status.as_u16()));
        }

        Ok(())
    }
}

impl AppointmentStore for RemoteStore {
    fn fetch_appointments(
        &self,
        range: DateRange,
        staff: &StaffFilter,
    ) -> Result<Vec<Appointment>, StoreError> {
        let mut url = format!(
            "{}/appointments?from={}&to={}",
            self.base_url, range.start, range.end
        );
        if let StaffFilter::One(id) = staff {
            url.push_str(&format!("&staff_id={id}"));
        }

        let rows: Vec<AppointmentRow> = self.get_json(&url)?;

        // Individually malformed records are skipped, never allowed to take
        // the whole grid down with them.
        let mut appointments = Vec::with_capacity(rows.len());
        for row in rows {
            match row.into_model() {
                Ok(appointment) => appointments.push(appointment),
                Err(err) => log::warn!("skipping malformed appointment record: {err}"),
            }
        }
        Ok(appointments)
    }

    fn update_status(&self, id: &str, status: AppointmentStatus) -> Result<(), StoreError> {
        let url = format!("{}/appointments/{}/status", self.base_url, id);
        self.patch_json(&url, json!({ "status": status.as_str() }))
    }

    fn reschedule(&self, id: &str, day: NaiveDate, time: NaiveTime) -> Result<(), StoreError> {
        let url = format!("{}/appointments/{}/schedule", self.base_url, id);
        self.patch_json(
            &url,
            json!({
                "date": day.to_string(),
                "start_time": time.format("%H:%M").to_string(),
            }),
        )
    }

    fn fetch_staff(&self) -> Result<Vec<Staff>, StoreError> {
        let url = format!("{}/staff", self.base_url);
        let rows: Vec<StaffRow> = self.get_json(&url)?;
        Ok(rows
            .into_iter()
            .map(|row| Staff::new(row.id, row.display_name))
            .collect())
    }
}

/// Wire shape of one appointment record.
#[derive(Debug, Deserialize)]
struct AppointmentRow {
    id: String,
    client_name: String,
    service_name: String,
    date: NaiveDate,
    start_time: String,
    duration_minutes: u32,
    staff_id: String,
    status: String,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Local>>,
    #[serde(default)]
    updated_at: Option<DateTime<Local>>,
}

impl AppointmentRow {
    fn into_model(self) -> Result<Appointment, StoreError> {
        let start = parse_start_time(&self.start_time)
            .ok_or_else(|| StoreError::Decode(format!("bad start_time '{}'", self.start_time)))?;

        // Unknown statuses render as Pending rather than dropping the record.
        let status = AppointmentStatus::from_wire(&self.status).unwrap_or_else(|| {
            log::warn!(
                "appointment {} has unrecognized status '{}', treating as pending",
                self.id,
                self.status
            );
            AppointmentStatus::Pending
        });

        let appointment = Appointment {
            id: self.id,
            client_name: self.client_name,
            service_name: self.service_name,
            date: self.date,
            start,
            duration_minutes: self.duration_minutes,
            staff_id: self.staff_id,
            status,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };

        appointment
            .validate()
            .map_err(StoreError::Decode)?;
        Ok(appointment)
    }
}

#[derive(Debug, Deserialize)]
struct StaffRow {
    id: String,
    display_name: String,
}

fn parse_start_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}
