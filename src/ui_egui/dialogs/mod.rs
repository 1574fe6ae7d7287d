pub mod appointment_details;
