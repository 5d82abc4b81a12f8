//! ActiveCore: gym membership backend.
//!
//! Members register, pay for subscription windows (manually recorded or
//! through the PayMongo gateway), check in by QR code, climb a reward
//! ladder, and generate Filipino-cuisine weekly meal plans with an AI
//! assist that falls back to a deterministic rotation. A background
//! sweep emails members who have gone quiet.
//!
//! Layout follows ports-and-adapters:
//! - `domain`: pure types and rules, no IO
//! - `ports`: traits the application depends on
//! - `application`: use cases orchestrating several ports
//! - `adapters`: Postgres, JWT, OpenAI, PayMongo, Resend, HTTP
//! - `config`: environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
