//! Ports: async trait seams between the application and the outside
//! world. Adapters implement them; handlers and services depend on them.

mod attendance_repository;
mod dish_catalog;
mod email_sender;
mod meal_plan_ai;
mod meal_plan_repository;
mod notification_log;
mod password_hasher;
mod payment_gateway;
mod payment_repository;
mod reward_repository;
mod token_service;
mod user_repository;

pub use attendance_repository::{AttendanceRepository, CheckIn, CheckInWithMember};
pub use dish_catalog::DishCatalog;
pub use email_sender::EmailSender;
pub use meal_plan_ai::{AiError, MealPlanAi};
pub use meal_plan_repository::{MealPlanRepository, PlanSummary, StoredPlan};
pub use notification_log::NotificationLog;
pub use password_hasher::PasswordHasher;
pub use payment_gateway::{
    CheckoutRequest, CheckoutSource, GatewayEvent, GatewayEventKind, PaymentGateway,
};
pub use payment_repository::{
    NewPayment, PaymentRecord, PaymentRepository, PaymentSummary, PaymentWithMember,
};
pub use reward_repository::{RewardClaim, RewardRepository};
pub use token_service::TokenService;
pub use user_repository::{
    InactiveMember, MemberRecord, MemberSummary, MemberUpdate, NewMember, UserRepository,
};
