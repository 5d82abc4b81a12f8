//! Application services: the use cases behind the HTTP surface that
//! need more than one port to do their job.

pub mod inactivity;
pub mod meal_plans;
pub mod payments;

pub use inactivity::{InactivitySweep, SweepReport};
pub use meal_plans::{GenerateOutcome, MealPlanService, PlanSource};
pub use payments::{PaymentReceipt, PaymentService, WebhookOutcome};
