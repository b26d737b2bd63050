use relwatch_core::config::Footer;
use relwatch_core::detect::Change;
use relwatch_core::ApplicationDescriptor;
use relwatch_fetch::{FetchError, StatusSource};
use relwatch_notify::{compose, Notifier, WebhookPayload};
use relwatch_store::StatusStore;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{error, info, warn};

/// Why one application's step failed. Nothing was persisted for it.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("saving status failed: {0:#}")]
    Store(anyhow::Error),
}

/// What happened for one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Unchanged,
    Notified,
    /// Change detected, delivery failed, record persisted anyway.
    DeliveryFailed(String),
}

/// One application's result within a pass.
#[derive(Debug)]
pub struct AppReport {
    pub app_id: String,
    pub result: Result<PollOutcome, PollError>,
}

/// Summary of a full pass.
#[derive(Debug, Default)]
pub struct PassReport {
    pub apps: Vec<AppReport>,
}

impl PassReport {
    pub fn notified(&self) -> usize {
        self.count(|r| matches!(r, Ok(PollOutcome::Notified)))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|r| matches!(r, Ok(PollOutcome::Unchanged)))
    }

    pub fn delivery_failures(&self) -> usize {
        self.count(|r| matches!(r, Ok(PollOutcome::DeliveryFailed(_))))
    }

    pub fn errors(&self) -> usize {
        self.count(|r| r.is_err())
    }

    fn count(&self, pred: impl Fn(&Result<PollOutcome, PollError>) -> bool) -> usize {
        self.apps.iter().filter(|a| pred(&a.result)).count()
    }
}

/// Runs fetch → detect → compose → deliver → persist per application.
pub struct Poller<'a, S: StatusSource, N: Notifier> {
    source: &'a S,
    notifier: &'a N,
    store: &'a StatusStore,
    footer: &'a Footer,
}

impl<'a, S: StatusSource, N: Notifier> Poller<'a, S, N> {
    pub fn new(source: &'a S, notifier: &'a N, store: &'a StatusStore, footer: &'a Footer) -> Self {
        Self {
            source,
            notifier,
            store,
            footer,
        }
    }

    /// One sequential pass in configuration order. Failures stay per application.
    pub fn run(&self, apps: &[ApplicationDescriptor]) -> PassReport {
        let mut report = PassReport::default();
        for app in apps {
            let result = self.poll_app(app);
            match &result {
                Ok(PollOutcome::Unchanged) => info!(app_id = %app.id, "unchanged"),
                Ok(PollOutcome::Notified) => info!(app_id = %app.id, "change notified"),
                Ok(PollOutcome::DeliveryFailed(e)) => {
                    warn!(app_id = %app.id, error = %e, "change recorded, notification not delivered")
                }
                Err(PollError::Fetch(e)) => {
                    error!(app_id = %app.id, kind = e.kind(), error = %e, "fetch failed")
                }
                Err(e) => error!(app_id = %app.id, error = %e, "poll failed"),
            }
            report.apps.push(AppReport {
                app_id: app.id.clone(),
                result,
            });
        }
        info!(
            apps = report.apps.len(),
            notified = report.notified(),
            unchanged = report.unchanged(),
            delivery_failures = report.delivery_failures(),
            errors = report.errors(),
            "pass complete"
        );
        report
    }

    /// Process one application. Never panics; errors come back as values.
    pub fn poll_app(&self, app: &ApplicationDescriptor) -> Result<PollOutcome, PollError> {
        let current = self.source.fetch(&app.id)?;

        if !self.store.has_changed(&app.id, &current) {
            // keep the file format current even when nothing changed
            self.store
                .save(&app.id, &current)
                .map_err(PollError::Store)?;
            return Ok(PollOutcome::Unchanged);
        }

        let prior = self.store.get(&app.id);
        let change = Change::classify(prior.as_ref(), &current);
        let embed = compose(
            app,
            self.footer,
            prior.as_ref(),
            &current,
            &change,
            OffsetDateTime::now_utc(),
        );
        let delivery = self
            .notifier
            .deliver(&app.webhook_url, &WebhookPayload::from(embed));

        // persisted regardless of delivery so a failed POST is not re-sent every run
        self.store
            .save(&app.id, &current)
            .map_err(PollError::Store)?;

        Ok(match delivery {
            Ok(()) => PollOutcome::Notified,
            Err(e) => PollOutcome::DeliveryFailed(format!("{e:#}")),
        })
    }
}
