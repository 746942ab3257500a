//! Order lifecycle actions.
//!
//! Advancement follows the legal path `pending → confirmed → dispatched →
//! delivered` with cancellation available only from `pending`. Preconditions
//! (legality, the expected-date requirement for confirmation) are enforced
//! here at the caller side; the mutator itself writes whatever it is told.

use crate::core::mutate::Mutator;
use crate::entities::{DataSource, FieldPatch, Order, OrderStatus, Record, RecordKey};
use crate::errors::{Error, Result};
use crate::notify::{DeliveryOutcome, SmsGateway, SmsTransport};
use crate::store::RemoteStore;
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{info, warn};

fn order_key(order_id: &str) -> RecordKey {
    RecordKey::new(DataSource::Orders, order_id)
}

/// Deterministic installation-form link for an order, derived from the
/// record key and the configured base URL.
#[must_use]
pub fn form_link(base_url: &str, order_id: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), order_id)
}

/// Advances an order to `next`, stamping `<status>At` and synthesizing the
/// form link on dispatch.
///
/// # Errors
/// * [`Error::NotFound`]: the order is not mirrored.
/// * [`Error::Validation`]: the transition is illegal, or `confirmed` was
///   requested without a non-empty expected date. No write is attempted.
/// * [`Error::RemoteWrite`]: the store rejected the patch; local state was
///   rolled back.
pub async fn advance<S: RemoteStore>(
    mutator: &Mutator<S>,
    form_link_base: &str,
    order_id: &str,
    next: OrderStatus,
    now: DateTime<Utc>,
) -> Result<Record> {
    let key = order_key(order_id);
    let Some(Record::Order(order)) = mutator.current(&key).await else {
        return Err(Error::NotFound {
            collection: key.source,
            key: key.id,
        });
    };

    if !order.status.can_advance_to(next) {
        return Err(Error::Validation {
            message: format!("cannot move order from {} to {}", order.status, next),
        });
    }
    if next == OrderStatus::Confirmed && !order.has_expected_date() {
        return Err(Error::Validation {
            message: "an expected date must be set before confirming".to_string(),
        });
    }

    let mut patch = FieldPatch::new()
        .set("status", json!(next))
        .set(next.timestamp_field(), json!(now));
    if next == OrderStatus::Dispatched {
        patch = patch.set("formLink", json!(form_link(form_link_base, order_id)));
    }

    info!("advancing order {} from {} to {}", order_id, order.status, next);
    mutator.apply(&key, patch).await
}

/// Confirms a pending order and, only once the confirmation has committed,
/// texts the customer. A failed or rolled-back advance never reaches the
/// gateway; a failed text never un-confirms the order.
///
/// # Errors
/// Same as [`advance`]; the delivery outcome is never an error.
pub async fn confirm<S: RemoteStore, T: SmsTransport>(
    mutator: &Mutator<S>,
    gateway: &SmsGateway<T>,
    form_link_base: &str,
    order_id: &str,
    now: DateTime<Utc>,
) -> Result<(Record, DeliveryOutcome)> {
    let record = advance(mutator, form_link_base, order_id, OrderStatus::Confirmed, now).await?;
    let outcome = if let Record::Order(order) = &record {
        notify_confirmation(gateway, order).await
    } else {
        DeliveryOutcome::default()
    };
    Ok((record, outcome))
}

/// Success-only side effect of confirmation: texts the customer their
/// confirmation and expected date. Fire-and-forget: the outcome is logged
/// and returned but never fails the already-committed confirmation.
pub async fn notify_confirmation<T: SmsTransport>(
    gateway: &SmsGateway<T>,
    order: &Order,
) -> DeliveryOutcome {
    let expected = order.expected_date.as_deref().unwrap_or("soon");
    let message = format!(
        "Your order {} for {} is confirmed. Expected delivery: {}.",
        order.id, order.product, expected
    );
    let outcome = gateway
        .send_bulk(std::slice::from_ref(&order.customer_phone), &message)
        .await;
    if outcome.failed > 0 {
        warn!(
            "confirmation SMS for order {} reached {} of {} recipients",
            order.id, outcome.delivered, outcome.total()
        );
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use crate::test_utils::{ScriptedTransport, seeded_order_mutator};
    use chrono::TimeZone;

    const BASE: &str = "https://forms.example.com/install";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 28, 10, 30, 0).unwrap()
    }

    fn gateway_over(transport: ScriptedTransport) -> SmsGateway<ScriptedTransport> {
        SmsGateway::new(
            transport,
            GatewayConfig {
                enabled: true,
                ..GatewayConfig::default()
            },
        )
    }

    #[tokio::test]
    async fn test_confirm_requires_expected_date() {
        let (mutator, store) = seeded_order_mutator("pending", None).await;

        let err = advance(&mutator, BASE, "o1", OrderStatus::Confirmed, now())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        // No write was attempted: the stored status is untouched.
        let stored = store.stored(DataSource::Orders, "o1").await.unwrap();
        assert_eq!(stored["status"], json!("pending"));
        assert!(stored.get("confirmedAt").is_none());
    }

    #[tokio::test]
    async fn test_confirm_stamps_timestamp() {
        let (mutator, store) = seeded_order_mutator("pending", Some("2026-09-05")).await;

        let updated = advance(&mutator, BASE, "o1", OrderStatus::Confirmed, now())
            .await
            .unwrap();
        let Record::Order(order) = updated else {
            panic!("expected order");
        };
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.confirmed_at, Some(now()));

        let stored = store.stored(DataSource::Orders, "o1").await.unwrap();
        assert_eq!(stored["status"], json!("confirmed"));
        assert!(stored.get("confirmedAt").is_some());
    }

    #[tokio::test]
    async fn test_dispatch_synthesizes_deterministic_form_link() {
        let (mutator, _store) = seeded_order_mutator("confirmed", Some("2026-09-05")).await;

        let updated = advance(&mutator, BASE, "o1", OrderStatus::Dispatched, now())
            .await
            .unwrap();
        let Record::Order(order) = updated else {
            panic!("expected order");
        };
        assert_eq!(
            order.form_link.as_deref(),
            Some("https://forms.example.com/install/o1")
        );
        assert_eq!(form_link(BASE, "o1"), form_link(BASE, "o1"));
        // Trailing slash on the base makes no difference.
        assert_eq!(form_link("https://x.test/", "k"), "https://x.test/k");
    }

    #[tokio::test]
    async fn test_cancel_only_from_pending() {
        let (mutator, _store) = seeded_order_mutator("pending", None).await;
        let updated = advance(&mutator, BASE, "o1", OrderStatus::Cancelled, now())
            .await
            .unwrap();
        let Record::Order(order) = updated else {
            panic!("expected order");
        };
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert_eq!(order.cancelled_at, Some(now()));

        let (mutator, _store) = seeded_order_mutator("confirmed", Some("2026-09-05")).await;
        let err = advance(&mutator, BASE, "o1", OrderStatus::Cancelled, now())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn test_skipping_a_stage_is_rejected() {
        let (mutator, _store) = seeded_order_mutator("pending", Some("2026-09-05")).await;
        let err = advance(&mutator, BASE, "o1", OrderStatus::Delivered, now())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn test_confirm_texts_customer_after_commit() {
        let (mutator, _store) = seeded_order_mutator("pending", Some("2026-09-05")).await;
        let gateway = gateway_over(ScriptedTransport::with_bodies(vec![Ok(
            "status: SMS-SHOOT ok".to_string(),
        )]));

        let (record, outcome) = confirm(&mutator, &gateway, BASE, "o1", now())
            .await
            .unwrap();
        let Record::Order(order) = record else {
            panic!("expected order");
        };
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(outcome.delivered, 1);
        assert_eq!(gateway.transport().remaining().await, 0);
    }

    #[tokio::test]
    async fn test_confirm_rollback_sends_no_sms() {
        let (mutator, store) = seeded_order_mutator("pending", Some("2026-09-05")).await;
        store.fail_next_update("store offline").await;
        let gateway = gateway_over(ScriptedTransport::with_bodies(vec![Ok(
            "status: SMS-SHOOT ok".to_string(),
        )]));

        let err = confirm(&mutator, &gateway, BASE, "o1", now())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::RemoteWrite { .. }));
        // The gateway was never reached: the scripted response is untouched.
        assert_eq!(gateway.transport().remaining().await, 1);
    }

    #[tokio::test]
    async fn test_failed_text_keeps_order_confirmed() {
        let (mutator, store) = seeded_order_mutator("pending", Some("2026-09-05")).await;
        let gateway = gateway_over(ScriptedTransport::with_bodies(vec![Err(
            "connect timeout".to_string(),
        )]));

        let (record, outcome) = confirm(&mutator, &gateway, BASE, "o1", now())
            .await
            .unwrap();
        let Record::Order(order) = record else {
            panic!("expected order");
        };
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(outcome.failed, 1);

        let stored = store.stored(DataSource::Orders, "o1").await.unwrap();
        assert_eq!(stored["status"], json!("confirmed"));
    }

    #[tokio::test]
    async fn test_failed_advance_rolls_back_status() {
        let (mutator, store) = seeded_order_mutator("pending", Some("2026-09-05")).await;
        store.fail_next_update("store offline").await;

        let err = advance(&mutator, BASE, "o1", OrderStatus::Confirmed, now())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::RemoteWrite { .. }));

        let Some(Record::Order(order)) = mutator.current(&order_key("o1")).await else {
            panic!("expected order");
        };
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.confirmed_at.is_none());
    }
}
