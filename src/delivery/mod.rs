//! Webhook delivery: the outbound client, per-delivery reports and the
//! dispatcher that fans notifications out to subscribers.

mod client;
mod dispatcher;
mod report;

pub use client::{DEFAULT_DELIVERY_TIMEOUT, WebhookClient, WebhookClientBuilder};
pub use dispatcher::NotificationDispatcher;
pub use report::{DeliveryOutcome, DeliveryReport, Dispatch};
