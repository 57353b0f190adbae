//! Webhook notifications for calendar changes.
//!
//! Posts a JSON payload to a configured webhook whenever an exam is
//! registered or a confirmed slot is removed. Delivery is best-effort: the
//! calling layer logs failures and carries on, the calendar mutation itself
//! is never rolled back.

use chrono::NaiveDate;
use reqwest::Client;
use serde_json::json;
use url::Url;

use crate::catalog::Exam;
use crate::config::NotifyConfig;
use crate::error::NotifyError;

pub struct Notifier {
    webhook_url: Url,
    client: Client,
}

impl Notifier {
    /// Build a notifier from config. Returns `None` when notifications are
    /// disabled; a present-but-malformed URL is an error.
    pub fn from_config(config: &NotifyConfig) -> Result<Option<Self>, NotifyError> {
        if !config.enabled {
            return Ok(None);
        }
        let webhook_url = Url::parse(&config.webhook_url)
            .map_err(|e| NotifyError::InvalidUrl(format!("{}: {e}", config.webhook_url)))?;
        Ok(Some(Self {
            webhook_url,
            client: Client::new(),
        }))
    }

    /// Announce a newly registered exam.
    pub async fn exam_registered(&self, subject: &str, exam: &Exam) -> Result<(), NotifyError> {
        let slots: Vec<_> = exam
            .slots
            .iter()
            .map(|s| json!({ "date": s.date, "time": s.time }))
            .collect();
        self.post(json!({
            "event": "exam_registered",
            "subject": subject,
            "exam_type": exam.exam_type.as_deref().unwrap_or("ordinary"),
            "duration": exam.duration.to_string(),
            "slots": slots,
        }))
        .await
    }

    /// Announce a removed exam slot.
    pub async fn slot_removed(
        &self,
        subject: &str,
        date: NaiveDate,
        time: &str,
    ) -> Result<(), NotifyError> {
        self.post(json!({
            "event": "slot_removed",
            "subject": subject,
            "date": date,
            "time": time,
        }))
        .await
    }

    async fn post(&self, body: serde_json::Value) -> Result<(), NotifyError> {
        let resp = self
            .client
            .post(self.webhook_url.clone())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}
