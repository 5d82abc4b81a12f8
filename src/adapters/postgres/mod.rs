//! PostgreSQL adapters (sqlx).

mod attendance_repository;
mod dish_catalog;
mod meal_plan_repository;
mod notification_log;
mod payment_repository;
mod reward_repository;
mod user_repository;

pub use attendance_repository::PgAttendanceRepository;
pub use dish_catalog::PgDishCatalog;
pub use meal_plan_repository::PgMealPlanRepository;
pub use notification_log::PgNotificationLog;
pub use payment_repository::PgPaymentRepository;
pub use reward_repository::PgRewardRepository;
pub use user_repository::PgUserRepository;
