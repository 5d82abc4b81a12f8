//! Inactivity notification sweep.
//!
//! Finds members who have not checked in within the threshold, emails
//! each one a nudge, and logs the notification so the next sweep does
//! not repeat it until the cooldown lapses.

use std::sync::Arc;
use std::time::Duration;

use crate::config::NotificationConfig;
use crate::domain::DomainError;
use crate::ports::{EmailSender, InactiveMember, NotificationLog, UserRepository};

const NOTIFICATION_KIND: &str = "inactivity_reminder";

/// What a sweep did.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct SweepReport {
    pub candidates: usize,
    pub notified: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct InactivitySweep {
    users: Arc<dyn UserRepository>,
    log: Arc<dyn NotificationLog>,
    email: Arc<dyn EmailSender>,
    threshold_days: i64,
    interval: Duration,
}

impl InactivitySweep {
    pub fn new(
        users: Arc<dyn UserRepository>,
        log: Arc<dyn NotificationLog>,
        email: Arc<dyn EmailSender>,
        config: &NotificationConfig,
    ) -> Self {
        Self {
            users,
            log,
            email,
            threshold_days: config.inactive_threshold_days,
            interval: Duration::from_secs(config.sweep_interval_hours * 3600),
        }
    }

    /// Run one sweep. `threshold_override` lets the admin endpoint use a
    /// custom window without touching the scheduled sweep's setting.
    pub async fn run_once(
        &self,
        threshold_override: Option<i64>,
    ) -> Result<SweepReport, DomainError> {
        let threshold = threshold_override.unwrap_or(self.threshold_days).max(1);
        let inactive = self.users.list_inactive(threshold).await?;

        let mut report = SweepReport {
            candidates: inactive.len(),
            ..Default::default()
        };
        for member in &inactive {
            // The same threshold doubles as the re-notification cooldown.
            let already = self
                .log
                .was_notified_within(member.id, NOTIFICATION_KIND, threshold)
                .await?;
            if already {
                report.skipped += 1;
                continue;
            }

            let subject = "We miss you at the gym!";
            let html = reminder_body(member, threshold);
            match self.email.send(&member.email, subject, &html).await {
                Ok(()) => {
                    self.log.record(member.id, NOTIFICATION_KIND).await?;
                    report.notified += 1;
                }
                Err(e) => {
                    tracing::warn!(member_id = member.id, "Reminder email failed: {}", e);
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            candidates = report.candidates,
            notified = report.notified,
            skipped = report.skipped,
            failed = report.failed,
            "Inactivity sweep complete"
        );
        Ok(report)
    }

    /// Spawn the periodic sweep loop. The first pass runs shortly after
    /// startup so a restart does not delay reminders by a full interval.
    pub fn spawn(self: Arc<Self>) {
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            loop {
                if let Err(e) = self.run_once(None).await {
                    tracing::error!("Inactivity sweep failed: {}", e);
                }
                tokio::time::sleep(self.interval).await;
            }
        });
    }
}

fn reminder_body(member: &InactiveMember, threshold: i64) -> String {
    let last_seen = member
        .last_check_in
        .map(|t| format!("Your last check-in was {}.", t.format("%B %e, %Y")))
        .unwrap_or_else(|| "We have not seen you check in yet.".to_string());
    format!(
        "<p>Hi {},</p>\
         <p>It has been over {} days since your last gym visit. {}</p>\
         <p>Drop by this week and keep your streak alive. Your next reward \
         might be closer than you think!</p>\
         <p>- The ActiveCore Team</p>",
        member.first_name, threshold, last_seen
    )
}
