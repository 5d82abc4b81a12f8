//! HTTP API integration tests.
//!
//! Builds the full router on in-memory ports and drives it with
//! `tower::ServiceExt::oneshot`, covering auth enforcement,
//! registration, check-ins, reward claims, and the webhook contract.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use activecore::adapters::auth::MockTokenService;
use activecore::adapters::http::{router, AppState};
use activecore::application::{InactivitySweep, MealPlanService, PaymentService};
use activecore::config::NotificationConfig;
use activecore::domain::mealplan::{Dish, BUILTIN_DISHES};
use activecore::domain::{
    CurrentUser, DomainError, ErrorCode, MemberStatus, MembershipType, PaymentState, Role,
    SubscriptionWindow,
};
use activecore::ports::{
    AttendanceRepository, CheckIn, CheckInWithMember, CheckoutRequest, CheckoutSource,
    DishCatalog, EmailSender, GatewayEvent, GatewayEventKind, InactiveMember, MealPlanAi,
    MealPlanRepository, MemberRecord, MemberSummary, MemberUpdate, NewMember, NewPayment,
    NotificationLog, PasswordHasher, PaymentGateway, PaymentRecord, PaymentRepository,
    PaymentSummary, PaymentWithMember, PlanSummary, RewardClaim, RewardRepository, StoredPlan,
    TokenService, UserRepository,
};
use activecore::ports::AiError;

const MEMBER_TOKEN: &str = "member-token";
const ADMIN_TOKEN: &str = "admin-token";
const MEMBER_ID: i64 = 1;
const ADMIN_ID: i64 = 2;

// ===== In-memory ports =====

#[derive(Default)]
struct MemoryUsers {
    rows: Mutex<Vec<MemberRecord>>,
    next_id: AtomicI64,
}

impl MemoryUsers {
    fn seed(&self, record: MemberRecord) {
        let mut rows = self.rows.lock().unwrap();
        self.next_id.fetch_max(record.id, Ordering::SeqCst);
        rows.push(record);
    }

    fn get(&self, id: i64) -> Option<MemberRecord> {
        self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn create(&self, member: &NewMember) -> Result<i64, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.email == member.email) {
            return Err(DomainError::new(
                ErrorCode::EmailTaken,
                "Email already registered",
            ));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        rows.push(MemberRecord {
            id,
            email: member.email.clone(),
            password_hash: member.password_hash.clone(),
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            phone: member.phone.clone(),
            gender: member.gender.clone(),
            date_of_birth: member.date_of_birth,
            role: member.role,
            status: member.status,
            membership_type: member.membership_type,
            membership_price: member.membership_price,
            join_date: member.window.start,
            subscription_start: Some(member.window.start),
            subscription_end: Some(member.window.end),
            payment_state: member.payment_state,
            emergency_contact: member.emergency_contact.clone(),
            address: member.address.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<MemberRecord>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MemberRecord>, DomainError> {
        Ok(self.get(id))
    }

    async fn list(&self) -> Result<Vec<MemberSummary>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .map(|r| MemberSummary {
                id: r.id,
                email: r.email.clone(),
                first_name: r.first_name.clone(),
                last_name: r.last_name.clone(),
                phone: r.phone.clone(),
                status: r.status,
                membership_type: r.membership_type,
                membership_price: r.membership_price,
                join_date: r.join_date,
                subscription_end: r.subscription_end,
                payment_state: r.payment_state,
                total_payments: 0,
            })
            .collect())
    }

    async fn update(&self, id: i64, changes: &MemberUpdate) -> Result<(), DomainError> {
        if changes.is_empty() {
            return Err(DomainError::validation("No fields to update"));
        }
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::new(ErrorCode::MemberNotFound, "Member not found"))?;
        if let Some(email) = &changes.email {
            row.email = email.clone();
        }
        if let Some(status) = changes.status {
            row.status = status;
        }
        Ok(())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::new(ErrorCode::MemberNotFound, "Member not found"))?;
        row.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(DomainError::new(
                ErrorCode::MemberNotFound,
                "Member not found",
            ));
        }
        Ok(())
    }

    async fn activate_subscription(
        &self,
        id: i64,
        membership_type: MembershipType,
        price: f64,
        window: SubscriptionWindow,
    ) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::new(ErrorCode::MemberNotFound, "Member not found"))?;
        row.membership_type = membership_type;
        row.membership_price = price;
        row.subscription_start = Some(window.start);
        row.subscription_end = Some(window.end);
        row.payment_state = PaymentState::Paid;
        row.status = MemberStatus::Active;
        Ok(())
    }

    async fn list_inactive(
        &self,
        _threshold_days: i64,
    ) -> Result<Vec<InactiveMember>, DomainError> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct MemoryPayments {
    rows: Mutex<Vec<PaymentRecord>>,
    next_id: AtomicI64,
}

impl MemoryPayments {
    fn seed(&self, record: PaymentRecord) {
        let mut rows = self.rows.lock().unwrap();
        self.next_id.fetch_max(record.id, Ordering::SeqCst);
        rows.push(record);
    }

    fn state_of(&self, id: i64) -> Option<PaymentState> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.state)
    }

    fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl PaymentRepository for MemoryPayments {
    async fn insert(&self, payment: &NewPayment) -> Result<i64, DomainError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.rows.lock().unwrap().push(PaymentRecord {
            id,
            user_id: payment.user_id,
            amount: payment.amount,
            method: payment.method.clone(),
            membership_type: payment.membership_type,
            state: payment.state,
            transaction_id: payment.transaction_id.clone(),
            subscription_start: payment.window.map(|w| w.start),
            subscription_end: payment.window.map(|w| w.end),
            notes: payment.notes.clone(),
            payment_date: Utc::now(),
        });
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<PaymentWithMember>, DomainError> {
        Ok(Vec::new())
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<PaymentRecord>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn summary(&self) -> Result<PaymentSummary, DomainError> {
        Ok(PaymentSummary::default())
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.transaction_id.as_deref() == Some(transaction_id))
            .cloned())
    }

    async fn mark_state(&self, id: i64, state: PaymentState) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::new(ErrorCode::PaymentNotFound, "Payment not found"))?;
        row.state = state;
        Ok(())
    }
}

#[derive(Default)]
struct MemoryAttendance {
    rows: Mutex<Vec<CheckIn>>,
    next_id: AtomicI64,
}

impl MemoryAttendance {
    fn seed_days(&self, user_id: i64, days_back: i64) {
        let mut rows = self.rows.lock().unwrap();
        for offset in 0..days_back {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            rows.push(CheckIn {
                id,
                user_id,
                check_in_time: Utc::now() - Duration::days(offset + 1),
                location: "Main Gym".to_string(),
            });
        }
    }
}

#[async_trait]
impl AttendanceRepository for MemoryAttendance {
    async fn has_checked_in_on(&self, user_id: i64, day: NaiveDate) -> Result<bool, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.user_id == user_id && r.check_in_time.date_naive() == day))
    }

    async fn insert(
        &self,
        user_id: i64,
        check_in_time: DateTime<Utc>,
        location: &str,
    ) -> Result<i64, DomainError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.rows.lock().unwrap().push(CheckIn {
            id,
            user_id,
            check_in_time,
            location: location.to_string(),
        });
        Ok(id)
    }

    async fn history_for_user(&self, user_id: i64) -> Result<Vec<CheckIn>, DomainError> {
        let mut rows: Vec<CheckIn> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.check_in_time.cmp(&a.check_in_time));
        Ok(rows)
    }

    async fn count_for_user(&self, user_id: i64) -> Result<i64, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .count() as i64)
    }

    async fn list_for_day(&self, _day: NaiveDate) -> Result<Vec<CheckInWithMember>, DomainError> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct MemoryRewards {
    claims: Mutex<HashMap<i64, Vec<RewardClaim>>>,
}

#[async_trait]
impl RewardRepository for MemoryRewards {
    async fn claims_for_user(&self, user_id: i64) -> Result<Vec<RewardClaim>, DomainError> {
        Ok(self
            .claims
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn has_claimed(&self, user_id: i64, reward_id: i64) -> Result<bool, DomainError> {
        Ok(self
            .claims
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|claims| claims.iter().any(|c| c.reward_id == reward_id))
            .unwrap_or(false))
    }

    async fn insert_claim(&self, user_id: i64, reward_id: i64) -> Result<(), DomainError> {
        self.claims
            .lock()
            .unwrap()
            .entry(user_id)
            .or_default()
            .push(RewardClaim {
                reward_id,
                claimed_at: Utc::now(),
            });
        Ok(())
    }
}

#[derive(Default)]
struct MemoryPlans {
    rows: Mutex<Vec<StoredPlan>>,
    next_id: AtomicI64,
}

#[async_trait]
impl MealPlanRepository for MemoryPlans {
    async fn ensure_preference(
        &self,
        _user_id: i64,
        _preferences: &Value,
    ) -> Result<Option<i64>, DomainError> {
        Ok(None)
    }

    async fn insert(
        &self,
        user_id: i64,
        _preference_id: Option<i64>,
        name: &str,
        data: &Value,
    ) -> Result<i64, DomainError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.rows.lock().unwrap().push(StoredPlan {
            id,
            user_id,
            name: name.to_string(),
            data: data.clone(),
            generated_at: Some(Utc::now()),
            updated_at: None,
        });
        Ok(id)
    }

    async fn update(&self, plan_id: i64, name: &str, data: &Value) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == plan_id)
            .ok_or_else(|| DomainError::new(ErrorCode::PlanNotFound, "Plan not found"))?;
        row.name = name.to_string();
        row.data = data.clone();
        row.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<PlanSummary>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| PlanSummary {
                id: r.id,
                name: r.name.clone(),
                generated_at: r.generated_at,
            })
            .collect())
    }

    async fn find(&self, plan_id: i64) -> Result<Option<StoredPlan>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == plan_id)
            .cloned())
    }

    async fn delete(&self, plan_id: i64) -> Result<(), DomainError> {
        self.rows.lock().unwrap().retain(|r| r.id != plan_id);
        Ok(())
    }
}

struct BuiltinCatalog;

#[async_trait]
impl DishCatalog for BuiltinCatalog {
    async fn all(&self) -> Result<Vec<Dish>, DomainError> {
        Ok(BUILTIN_DISHES.clone())
    }
}

struct DisabledAi;

#[async_trait]
impl MealPlanAi for DisabledAi {
    fn is_available(&self) -> bool {
        false
    }

    async fn complete(&self, _prompt: &str) -> Result<String, AiError> {
        Err(AiError::Disabled)
    }
}

#[derive(Default)]
struct RecordingEmail {
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl EmailSender for RecordingEmail {
    async fn send(&self, to: &str, subject: &str, _html: &str) -> Result<(), DomainError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string()));
        Ok(())
    }
}

#[derive(Default)]
struct MemoryNotificationLog;

#[async_trait]
impl NotificationLog for MemoryNotificationLog {
    async fn was_notified_within(
        &self,
        _user_id: i64,
        _kind: &str,
        _days: i64,
    ) -> Result<bool, DomainError> {
        Ok(false)
    }

    async fn record(&self, _user_id: i64, _kind: &str) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Reversible stand-in for argon2; fast and deterministic.
struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("hashed::{}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("hashed::{}", password))
    }
}

const VALID_SIGNATURE: &str = "sha256=valid";

/// Gateway that accepts one fixed signature and parses a flat test
/// payload: `{"type": "...", "sourceId": "..."}`.
struct StaticGateway;

#[async_trait]
impl PaymentGateway for StaticGateway {
    async fn create_source(
        &self,
        _request: &CheckoutRequest,
    ) -> Result<CheckoutSource, DomainError> {
        Ok(CheckoutSource {
            source_id: "src_test_1".to_string(),
            checkout_url: "https://checkout.test/src_test_1".to_string(),
        })
    }

    fn verify_signature(&self, _payload: &[u8], signature_header: &str) -> bool {
        signature_header == VALID_SIGNATURE
    }

    fn parse_event(&self, payload: &[u8]) -> Result<GatewayEvent, DomainError> {
        let value: Value = serde_json::from_slice(payload)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        let kind = match value["type"].as_str() {
            Some("payment.paid") => GatewayEventKind::PaymentPaid,
            Some("source.chargeable") => GatewayEventKind::SourceChargeable,
            Some("payment.failed") => GatewayEventKind::PaymentFailed,
            Some(other) => GatewayEventKind::Other(other.to_string()),
            None => return Err(DomainError::validation("Missing event type")),
        };
        Ok(GatewayEvent {
            kind,
            resource_id: value["sourceId"].as_str().map(String::from),
        })
    }
}

// ===== Test harness =====

struct TestBackend {
    app: Router,
    users: Arc<MemoryUsers>,
    payments: Arc<MemoryPayments>,
    attendance: Arc<MemoryAttendance>,
}

fn member_record(id: i64, email: &str, role: Role) -> MemberRecord {
    let today = Utc::now().date_naive();
    MemberRecord {
        id,
        email: email.to_string(),
        password_hash: "hashed::sekret123".to_string(),
        first_name: "Ana".to_string(),
        last_name: "Reyes".to_string(),
        phone: None,
        gender: None,
        date_of_birth: None,
        role,
        status: MemberStatus::Active,
        membership_type: MembershipType::Monthly,
        membership_price: 1500.0,
        join_date: today,
        subscription_start: Some(today),
        subscription_end: MembershipType::Monthly
            .subscription_window(today)
            .end
            .into(),
        payment_state: PaymentState::Paid,
        emergency_contact: None,
        address: None,
        created_at: Utc::now(),
    }
}

fn backend() -> TestBackend {
    let users = Arc::new(MemoryUsers::default());
    users.seed(member_record(MEMBER_ID, "ana@example.com", Role::Member));
    users.seed(member_record(ADMIN_ID, "admin@example.com", Role::Admin));

    let payments = Arc::new(MemoryPayments::default());
    let attendance = Arc::new(MemoryAttendance::default());
    let rewards = Arc::new(MemoryRewards::default());
    let email = Arc::new(RecordingEmail::default());

    let tokens: Arc<dyn TokenService> = Arc::new(
        MockTokenService::new()
            .with_user(MEMBER_TOKEN, CurrentUser::new(MEMBER_ID, Role::Member))
            .with_user(ADMIN_TOKEN, CurrentUser::new(ADMIN_ID, Role::Admin)),
    );

    let payment_service = Arc::new(PaymentService::new(
        users.clone(),
        payments.clone(),
        Arc::new(StaticGateway),
    ));
    let meal_plans = Arc::new(MealPlanService::new(
        Arc::new(BuiltinCatalog),
        Arc::new(DisabledAi),
        Arc::new(MemoryPlans::default()),
    ));
    let sweep = Arc::new(InactivitySweep::new(
        users.clone(),
        Arc::new(MemoryNotificationLog),
        email.clone(),
        &NotificationConfig::default(),
    ));

    let state = AppState {
        users: users.clone(),
        payments: payments.clone(),
        attendance: attendance.clone(),
        rewards,
        email,
        hasher: Arc::new(PlainHasher),
        tokens,
        payment_service,
        meal_plans,
        sweep,
        checkout_success_url: "https://app.test/success".to_string(),
        checkout_failed_url: "https://app.test/failed".to_string(),
    };

    TestBackend {
        app: router(state),
        users,
        payments,
        attendance,
    }
}

fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(path: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ===== Probes and auth enforcement =====

#[tokio::test]
async fn ping_is_public() {
    let backend = backend();
    let response = backend.app.oneshot(get("/api/ping", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn profile_requires_token() {
    let backend = backend();
    let response = backend
        .app
        .oneshot(get("/api/user/profile", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let backend = backend();
    let response = backend
        .app
        .oneshot(get("/api/user/profile", Some("not-a-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn member_cannot_use_admin_routes() {
    let backend = backend();
    let response = backend
        .app
        .oneshot(get("/api/members/", Some(MEMBER_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_lists_members() {
    let backend = backend();
    let response = backend
        .app
        .oneshot(get("/api/members/", Some(ADMIN_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

// ===== Registration and login =====

#[tokio::test]
async fn register_then_duplicate_email() {
    let backend = backend();
    let payload = json!({
        "email": "new@example.com",
        "password": "longenough",
        "firstName": "Ben",
        "lastName": "Cruz",
        "membershipType": "monthly"
    });

    let response = backend
        .app
        .clone()
        .oneshot(post_json("/api/register", None, payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = backend
        .app
        .oneshot(post_json("/api/register", None, payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "EMAIL_TAKEN");
}

#[tokio::test]
async fn login_issues_token_and_rejects_bad_password() {
    let backend = backend();

    let response = backend
        .app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            None,
            json!({ "email": "Ana@Example.com", "password": "sekret123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["token"], format!("mock-token-{}", MEMBER_ID));
    assert_eq!(body["user"]["email"], "ana@example.com");

    let response = backend
        .app
        .oneshot(post_json(
            "/api/auth/login",
            None,
            json!({ "email": "ana@example.com", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ===== Attendance =====

#[tokio::test]
async fn check_in_once_per_day() {
    let backend = backend();
    let payload = json!({ "qrToken": "ACTIVECORE_GYM_20260829120000_A1B2C3" });

    let response = backend
        .app
        .clone()
        .oneshot(post_json(
            "/api/attendance/checkin",
            Some(MEMBER_TOKEN),
            payload.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = backend
        .app
        .oneshot(post_json(
            "/api/attendance/checkin",
            Some(MEMBER_TOKEN),
            payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "DUPLICATE_CHECK_IN");
}

#[tokio::test]
async fn foreign_qr_code_rejected() {
    let backend = backend();
    let response = backend
        .app
        .oneshot(post_json(
            "/api/attendance/checkin",
            Some(MEMBER_TOKEN),
            json!({ "qrToken": "SOME_OTHER_GYM_123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "INVALID_QR_CODE");
}

#[tokio::test]
async fn history_reports_streak() {
    let backend = backend();
    backend.attendance.seed_days(MEMBER_ID, 3);

    let response = backend
        .app
        .oneshot(get("/api/attendance/history", Some(MEMBER_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["stats"]["totalCheckIns"], 3);
    assert_eq!(body["stats"]["currentStreak"], 3);
}

// ===== Rewards =====

#[tokio::test]
async fn reward_claim_flow() {
    let backend = backend();
    backend.attendance.seed_days(MEMBER_ID, 3);

    // Bronze unlocks at 3 check-ins.
    let claim = json!({ "rewardId": 1 });
    let response = backend
        .app
        .clone()
        .oneshot(post_json("/api/rewards/claim", Some(MEMBER_TOKEN), claim.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["points"], 10);

    let response = backend
        .app
        .clone()
        .oneshot(post_json("/api/rewards/claim", Some(MEMBER_TOKEN), claim))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "REWARD_ALREADY_CLAIMED");

    // Silver needs 7.
    let response = backend
        .app
        .oneshot(post_json(
            "/api/rewards/claim",
            Some(MEMBER_TOKEN),
            json!({ "rewardId": 2 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "INSUFFICIENT_ATTENDANCE");
}

// ===== Meal planner =====

#[tokio::test]
async fn regenerate_meal_honors_exclusion_list() {
    let backend = backend();

    // Exclude the whole catalog; the replacement must be an alternate
    // serving rather than a bounce back to an excluded dish.
    let exclude: Vec<String> = BUILTIN_DISHES.iter().map(|d| d.name.clone()).collect();
    let response = backend
        .app
        .oneshot(post_json(
            "/api/meal-planner/regenerate",
            Some(MEMBER_TOKEN),
            json!({ "currentMeal": "Chicken Adobo", "excludeMealNames": exclude }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["source"], "fallback");
    let name = body["meal"]["name"].as_str().unwrap();
    assert!(name.ends_with("(Alt)"), "unexpected replacement: {}", name);
}

#[tokio::test]
async fn meal_plan_falls_back_without_ai() {
    let backend = backend();
    let response = backend
        .app
        .oneshot(post_json(
            "/api/meal-planner/generate",
            Some(MEMBER_TOKEN),
            json!({ "goal": "muscle_gain" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["saved"], true);
    assert_eq!(body["weekPlan"].as_array().map(Vec::len), Some(7));
}

// ===== Webhook contract =====

fn seed_pending_payment(backend: &TestBackend, source_id: &str) -> i64 {
    let id = 41;
    backend.payments.seed(PaymentRecord {
        id,
        user_id: MEMBER_ID,
        amount: 1500.0,
        method: "gcash".to_string(),
        membership_type: MembershipType::Monthly,
        state: PaymentState::Pending,
        transaction_id: Some(source_id.to_string()),
        subscription_start: None,
        subscription_end: None,
        notes: None,
        payment_date: Utc::now(),
    });
    id
}

#[tokio::test]
async fn webhook_bad_signature_is_a_200_noop() {
    let backend = backend();
    let payment_id = seed_pending_payment(&backend, "src_test_9");

    let mut request = post_json(
        "/api/payments/paymongo/webhook",
        None,
        json!({ "type": "payment.paid", "sourceId": "src_test_9" }),
    );
    request
        .headers_mut()
        .insert("paymongo-signature", "sha256=forged".parse().unwrap());

    let response = backend.app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["received"], true);
    assert_eq!(
        backend.payments.state_of(payment_id),
        Some(PaymentState::Pending)
    );
}

#[tokio::test]
async fn webhook_paid_event_activates_subscription() {
    let backend = backend();
    let payment_id = seed_pending_payment(&backend, "src_test_9");

    let mut request = post_json(
        "/api/payments/paymongo/webhook",
        None,
        json!({ "type": "payment.paid", "sourceId": "src_test_9" }),
    );
    request
        .headers_mut()
        .insert("paymongo-signature", VALID_SIGNATURE.parse().unwrap());

    let response = backend.app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        backend.payments.state_of(payment_id),
        Some(PaymentState::Paid)
    );

    let member = backend.users.get(MEMBER_ID).unwrap();
    assert_eq!(member.payment_state, PaymentState::Paid);
    assert!(member.subscription_end.is_some());
}

#[tokio::test]
async fn webhook_unknown_event_kind_ignored() {
    let backend = backend();
    let payment_id = seed_pending_payment(&backend, "src_test_9");

    let mut request = post_json(
        "/api/payments/paymongo/webhook",
        None,
        json!({ "type": "source.expired", "sourceId": "src_test_9" }),
    );
    request
        .headers_mut()
        .insert("paymongo-signature", VALID_SIGNATURE.parse().unwrap());

    let response = backend.app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        backend.payments.state_of(payment_id),
        Some(PaymentState::Pending)
    );
    assert_eq!(backend.payments.count(), 1);
}

// ===== Gateway checkout =====

#[tokio::test]
async fn create_source_records_pending_payment() {
    let backend = backend();
    let response = backend
        .app
        .oneshot(post_json(
            "/api/payments/paymongo/create-source",
            Some(MEMBER_TOKEN),
            json!({ "amount": 1500.0, "membershipType": "monthly" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["sourceId"], "src_test_1");
    assert_eq!(backend.payments.count(), 1);
}
