pub mod landing_report;
pub mod telemetry;
