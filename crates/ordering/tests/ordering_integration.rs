//! Integration tests for the ordering context.
//!
//! Payments is replaced by an in-memory stub; payment outcomes are simulated
//! by publishing on the `payments` topic directly.

use std::sync::Arc;

use async_trait::async_trait;
use common::Amount;
use domain::{EventSourcedRepository, MaterializedViewRepository, Repository};
use event_log::{EventEnvelope, EventLog, HandlerError, InProcessEventLog};
use ordering::acl::payments::{PAYMENTS_TOPIC, PaymentRef, PaymentService};
use ordering::{
    ORDERING_TOPIC, OnlineOrder, OnlineOrderState, OnlineOrderType, OrderingError,
    OrderingService, Pizza, PizzaSize,
};
use tokio::sync::RwLock;

#[derive(Default)]
struct StubPaymentState {
    created: Vec<(PaymentRef, Amount)>,
    requested: Vec<PaymentRef>,
}

/// In-memory stand-in for the Payments context.
#[derive(Clone, Default)]
struct StubPaymentService {
    state: Arc<RwLock<StubPaymentState>>,
    fail: bool,
}

impl StubPaymentService {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    async fn created(&self) -> Vec<(PaymentRef, Amount)> {
        self.state.read().await.created.clone()
    }

    async fn requested(&self) -> Vec<PaymentRef> {
        self.state.read().await.requested.clone()
    }
}

#[async_trait]
impl PaymentService for StubPaymentService {
    async fn create_payment_of(&self, amount: Amount) -> Result<PaymentRef, HandlerError> {
        if self.fail {
            return Err("payments unavailable".into());
        }
        let payment_ref = PaymentRef::generate();
        self.state
            .write()
            .await
            .created
            .push((payment_ref.clone(), amount));
        Ok(payment_ref)
    }

    async fn request_payment_for(&self, payment_ref: &PaymentRef) -> Result<(), HandlerError> {
        self.state.write().await.requested.push(payment_ref.clone());
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Strategy {
    MaterializedView,
    EventSourced,
}

struct TestHarness {
    log: Arc<InProcessEventLog>,
    service: OrderingService,
    payments: StubPaymentService,
}

impl TestHarness {
    async fn new(strategy: Strategy) -> Self {
        Self::with_payments(strategy, StubPaymentService::default()).await
    }

    async fn with_payments(strategy: Strategy, payments: StubPaymentService) -> Self {
        let log = Arc::new(InProcessEventLog::new());
        let orders: Arc<dyn Repository<OnlineOrder>> = match strategy {
            Strategy::MaterializedView => {
                Arc::new(MaterializedViewRepository::new(log.clone(), ORDERING_TOPIC).await)
            }
            Strategy::EventSourced => {
                Arc::new(EventSourcedRepository::new(log.clone(), ORDERING_TOPIC))
            }
        };
        let service = OrderingService::new(log.clone(), orders, Arc::new(payments.clone()));
        service.subscribe().await;
        Self {
            log,
            service,
            payments,
        }
    }

    async fn publish_payment_successful(&self, payment_ref: &PaymentRef) {
        let event = EventEnvelope::builder()
            .event_type("PaymentSuccessful")
            .aggregate_ref(payment_ref.as_str())
            .aggregate_type("Payment")
            .payload_raw(serde_json::json!({
                "type": "PaymentSuccessful",
                "reference": payment_ref.as_str(),
            }))
            .build()
            .unwrap();
        self.log.publish(&PAYMENTS_TOPIC, event).await.unwrap();
    }

    async fn ordering_event_types(&self) -> Vec<String> {
        self.log
            .events_by(&ORDERING_TOPIC)
            .await
            .into_iter()
            .map(|event| event.event_type)
            .collect()
    }
}

async fn assert_pickup_order_is_paid(strategy: Strategy) {
    let harness = TestHarness::new(strategy).await;
    let service = &harness.service;

    let reference = service.create_order(OnlineOrderType::Pickup).await.unwrap();
    service
        .add_pizza(&reference, Pizza::of(PizzaSize::Medium))
        .await
        .unwrap();
    service.submit_order(&reference).await.unwrap();

    let order = service.find_by_ref(&reference).await.unwrap().unwrap();
    assert_eq!(order.state(), OnlineOrderState::Submitted);
    assert_eq!(order.pizzas(), &[Pizza::of(PizzaSize::Medium)]);

    let payment_ref = service.request_payment(&reference).await.unwrap();
    assert_eq!(
        harness.payments.created().await,
        vec![(payment_ref.clone(), Amount::of(10, 0))]
    );
    assert_eq!(harness.payments.requested().await, vec![payment_ref.clone()]);

    let assigned = harness
        .log
        .events_by(&ORDERING_TOPIC)
        .await
        .into_iter()
        .find(|event| event.event_type == "PaymentRefAssigned")
        .unwrap();
    assert_eq!(assigned.aggregate_ref, reference.as_str());
    assert_eq!(assigned.payload["payment_ref"], payment_ref.as_str());

    harness.publish_payment_successful(&payment_ref).await;

    let order = service.find_by_ref(&reference).await.unwrap().unwrap();
    assert!(order.is_paid());
    assert_eq!(order.payment_ref(), &payment_ref);
    assert_eq!(
        harness.ordering_event_types().await,
        vec![
            "OnlineOrderAdded",
            "OnlineOrderPizzaAdded",
            "OnlineOrderSubmitted",
            "PaymentRefAssigned",
            "OnlineOrderPaid",
        ]
    );
}

mod order_lifecycle {
    use super::*;

    #[tokio::test]
    async fn pickup_order_is_paid_with_materialized_view() {
        assert_pickup_order_is_paid(Strategy::MaterializedView).await;
    }

    #[tokio::test]
    async fn pickup_order_is_paid_with_event_sourcing() {
        assert_pickup_order_is_paid(Strategy::EventSourced).await;
    }

    #[tokio::test]
    async fn find_by_payment_ref_locates_the_order() {
        for strategy in [Strategy::MaterializedView, Strategy::EventSourced] {
            let harness = TestHarness::new(strategy).await;
            let service = &harness.service;
            let reference = service.create_order(OnlineOrderType::Delivery).await.unwrap();
            service
                .add_pizza(&reference, Pizza::of(PizzaSize::Large))
                .await
                .unwrap();
            service.submit_order(&reference).await.unwrap();
            let payment_ref = service.request_payment(&reference).await.unwrap();

            let found = service.find_by_payment_ref(&payment_ref).await.unwrap().unwrap();
            assert_eq!(found.reference(), &reference);
            assert_eq!(found.order_type(), OnlineOrderType::Delivery);

            assert!(
                service
                    .find_by_payment_ref(&PaymentRef::generate())
                    .await
                    .unwrap()
                    .is_none()
            );
        }
    }
}

mod guards {
    use super::*;

    #[tokio::test]
    async fn request_payment_before_submit_creates_no_payment() {
        let harness = TestHarness::new(Strategy::MaterializedView).await;
        let service = &harness.service;
        let reference = service.create_order(OnlineOrderType::Pickup).await.unwrap();

        let result = service.request_payment(&reference).await;

        assert!(matches!(
            result,
            Err(OrderingError::InvalidStateTransition {
                current_state: OnlineOrderState::New,
                ..
            })
        ));
        assert!(harness.payments.created().await.is_empty());
    }

    #[tokio::test]
    async fn submit_without_pizzas_fails_and_keeps_state() {
        let harness = TestHarness::new(Strategy::EventSourced).await;
        let service = &harness.service;
        let reference = service.create_order(OnlineOrderType::Pickup).await.unwrap();

        let result = service.submit_order(&reference).await;

        assert!(matches!(result, Err(OrderingError::NoPizzas)));
        let order = service.find_by_ref(&reference).await.unwrap().unwrap();
        assert_eq!(order.state(), OnlineOrderState::New);
        assert_eq!(harness.ordering_event_types().await, vec!["OnlineOrderAdded"]);
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let harness = TestHarness::new(Strategy::MaterializedView).await;
        let missing = ordering::OnlineOrderRef::generate();

        let result = harness
            .service
            .add_pizza(&missing, Pizza::of(PizzaSize::Small))
            .await;

        assert!(matches!(result, Err(OrderingError::NotFound(r)) if r == missing));
        assert!(harness.service.find_by_ref(&missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failed_payment_creation_leaves_order_unassigned() {
        let harness =
            TestHarness::with_payments(Strategy::MaterializedView, StubPaymentService::failing())
                .await;
        let service = &harness.service;
        let reference = service.create_order(OnlineOrderType::Pickup).await.unwrap();
        service
            .add_pizza(&reference, Pizza::of(PizzaSize::Small))
            .await
            .unwrap();
        service.submit_order(&reference).await.unwrap();

        let result = service.request_payment(&reference).await;

        assert!(matches!(result, Err(OrderingError::PaymentService(_))));
        let order = service.find_by_ref(&reference).await.unwrap().unwrap();
        assert!(order.payment_ref().is_identity());
    }
}

mod payment_events {
    use super::*;

    #[tokio::test]
    async fn unrelated_payment_success_is_ignored() {
        let harness = TestHarness::new(Strategy::MaterializedView).await;
        let service = &harness.service;
        let reference = service.create_order(OnlineOrderType::Pickup).await.unwrap();

        harness
            .publish_payment_successful(&PaymentRef::generate())
            .await;

        let order = service.find_by_ref(&reference).await.unwrap().unwrap();
        assert_eq!(order.state(), OnlineOrderState::New);
    }

    #[tokio::test]
    async fn other_payment_events_are_ignored() {
        let harness = TestHarness::new(Strategy::EventSourced).await;
        let event = EventEnvelope::builder()
            .event_type("PaymentRequested")
            .aggregate_ref("P-1")
            .aggregate_type("Payment")
            .payload_raw(serde_json::json!({"type": "PaymentRequested", "reference": "P-1"}))
            .build()
            .unwrap();

        harness.log.publish(&PAYMENTS_TOPIC, event).await.unwrap();

        assert_eq!(harness.log.number_of_subscribers(&PAYMENTS_TOPIC).await, 1);
    }
}
