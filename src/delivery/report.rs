//! Delivery outcomes and the handle returned by a trigger.

use tokio::task::JoinHandle;
use tracing::warn;

/// What happened to one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The subscriber answered. Any status, including non-2xx.
    Delivered {
        /// HTTP status code returned by the subscriber
        status: u16,
        /// Response body, as text
        body: String,
    },
    /// The request could not be completed (connection, timeout, bad URL).
    Failed(String),
}

/// Result of delivering one notification to one callback URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    url: String,
    outcome: DeliveryOutcome,
}

impl DeliveryReport {
    pub(crate) fn new(url: impl Into<String>, outcome: DeliveryOutcome) -> Self {
        Self {
            url: url.into(),
            outcome,
        }
    }

    /// The callback URL this report is for.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The outcome of the attempt.
    pub fn outcome(&self) -> &DeliveryOutcome {
        &self.outcome
    }

    /// Whether the subscriber answered with a 2xx status.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, DeliveryOutcome::Delivered { status, .. } if (200..300).contains(&status))
    }
}

/// In-flight deliveries started by one trigger.
///
/// Dropping a `Dispatch` detaches its tasks; they keep running to completion.
#[derive(Debug)]
pub struct Dispatch {
    path: String,
    handles: Vec<JoinHandle<DeliveryReport>>,
}

impl Dispatch {
    pub(crate) fn new(path: String, handles: Vec<JoinHandle<DeliveryReport>>) -> Self {
        Self { path, handles }
    }

    /// Normalized path the recipients were looked up under.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of deliveries started.
    pub fn recipients(&self) -> usize {
        self.handles.len()
    }

    /// Wait for every delivery and collect the reports.
    ///
    /// Reports come back in registration order, regardless of which delivery
    /// finished first. A delivery task that panicked is left out.
    pub async fn join(self) -> Vec<DeliveryReport> {
        let mut reports = Vec::with_capacity(self.handles.len());
        for handle in self.handles {
            match handle.await {
                Ok(report) => reports.push(report),
                Err(e) => warn!(path = %self.path, error = %e, "delivery task did not complete"),
            }
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_requires_2xx() {
        let ok = DeliveryReport::new(
            "http://a",
            DeliveryOutcome::Delivered {
                status: 204,
                body: String::new(),
            },
        );
        assert!(ok.is_success());

        let rejected = DeliveryReport::new(
            "http://a",
            DeliveryOutcome::Delivered {
                status: 500,
                body: "boom".to_string(),
            },
        );
        assert!(!rejected.is_success());

        let failed = DeliveryReport::new("http://a", DeliveryOutcome::Failed("refused".into()));
        assert!(!failed.is_success());
    }

    #[tokio::test]
    async fn test_join_preserves_spawn_order() {
        let handles = vec![
            tokio::spawn(async {
                tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                DeliveryReport::new("first", DeliveryOutcome::Failed("x".into()))
            }),
            tokio::spawn(async { DeliveryReport::new("second", DeliveryOutcome::Failed("y".into())) }),
        ];
        let dispatch = Dispatch::new("/p".to_string(), handles);
        assert_eq!(dispatch.recipients(), 2);
        assert_eq!(dispatch.path(), "/p");

        let urls: Vec<_> = dispatch
            .join()
            .await
            .into_iter()
            .map(|r| r.url().to_string())
            .collect();
        assert_eq!(urls, vec!["first", "second"]);
    }
}
