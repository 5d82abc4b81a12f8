//! Adapters: concrete implementations of the ports.
//!
//! Postgres persistence, JWT auth, the OpenAI meal-plan provider, the
//! PayMongo gateway, Resend email, and the HTTP surface.

pub mod auth;
pub mod email;
pub mod http;
pub mod openai;
pub mod paymongo;
pub mod postgres;
