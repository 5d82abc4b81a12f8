//! PayMongo gateway adapter.

mod client;
mod webhook;

pub use client::{parse_webhook_event, PayMongoClient};
pub use webhook::WebhookVerifier;
