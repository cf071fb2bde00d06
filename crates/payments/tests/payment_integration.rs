//! Integration tests for the payments context.

use std::sync::Arc;

use common::Amount;
use domain::{EventSourcedRepository, MaterializedViewRepository, Repository};
use event_log::{EventLog, InProcessEventLog};
use payments::{
    AutoPaymentProcessor, PAYMENT_PROCESSOR_TOPIC, PAYMENTS_TOPIC, Payment, PaymentProcessor,
    PaymentProcessorEvent, PaymentRef, PaymentService, PaymentState, PaymentStatus, PaymentsError,
    RecordingPaymentProcessor,
};

#[derive(Clone, Copy)]
enum Strategy {
    MaterializedView,
    EventSourced,
}

const STRATEGIES: [Strategy; 2] = [Strategy::MaterializedView, Strategy::EventSourced];

async fn payment_repository(
    strategy: Strategy,
    log: &Arc<InProcessEventLog>,
) -> Arc<dyn Repository<Payment>> {
    match strategy {
        Strategy::MaterializedView => {
            Arc::new(MaterializedViewRepository::new(log.clone(), PAYMENTS_TOPIC).await)
        }
        Strategy::EventSourced => Arc::new(EventSourcedRepository::new(log.clone(), PAYMENTS_TOPIC)),
    }
}

async fn service_with(
    strategy: Strategy,
    log: &Arc<InProcessEventLog>,
    processor: Arc<dyn PaymentProcessor>,
) -> PaymentService {
    let payments = payment_repository(strategy, log).await;
    let service = PaymentService::new(log.clone(), payments, processor);
    service.subscribe().await;
    service
}

async fn report(log: &InProcessEventLog, payment_ref: &PaymentRef, status: PaymentStatus) {
    let event = PaymentProcessorEvent::PaymentProcessed {
        payment_ref: payment_ref.clone(),
        status,
    };
    log.publish(&PAYMENT_PROCESSOR_TOPIC, event.to_envelope().unwrap())
        .await
        .unwrap();
}

async fn payment_event_types(log: &InProcessEventLog) -> Vec<String> {
    log.events_by(&PAYMENTS_TOPIC)
        .await
        .into_iter()
        .map(|event| event.event_type)
        .collect()
}

#[tokio::test]
async fn declined_payment_fails_and_cannot_be_requested_again() {
    for strategy in STRATEGIES {
        let log = Arc::new(InProcessEventLog::new());
        let processor = RecordingPaymentProcessor::new();
        let service = service_with(strategy, &log, Arc::new(processor.clone())).await;

        let reference = service.create_payment_of(Amount::of(10, 0)).await.unwrap();
        service.request_payment_for(&reference).await.unwrap();
        assert_eq!(processor.requested().await, vec![reference.clone()]);

        report(&log, &reference, PaymentStatus::Failed).await;

        let payment = service.find_by_ref(&reference).await.unwrap().unwrap();
        assert_eq!(payment.state(), PaymentState::Failed);

        let again = service.request_payment_for(&reference).await;
        assert!(matches!(
            again,
            Err(PaymentsError::InvalidStateTransition {
                current_state: PaymentState::Failed,
                ..
            })
        ));
        assert_eq!(processor.requested().await.len(), 1);
        assert_eq!(
            payment_event_types(&log).await,
            vec!["PaymentAdded", "PaymentRequested", "PaymentFailed"]
        );
    }
}

#[tokio::test]
async fn approved_payment_is_successful() {
    for strategy in STRATEGIES {
        let log = Arc::new(InProcessEventLog::new());
        let processor = RecordingPaymentProcessor::new();
        let service = service_with(strategy, &log, Arc::new(processor)).await;

        let reference = service.create_payment_of(Amount::of(22, 0)).await.unwrap();
        service.request_payment_for(&reference).await.unwrap();
        report(&log, &reference, PaymentStatus::Successful).await;

        let payment = service.find_by_ref(&reference).await.unwrap().unwrap();
        assert!(payment.is_successful());
        assert_eq!(payment.amount(), Amount::of(22, 0));
    }
}

#[tokio::test]
async fn auto_processor_settles_during_the_request() {
    let log = Arc::new(InProcessEventLog::new());
    let processor = AutoPaymentProcessor::approving(log.clone());
    let service = service_with(Strategy::MaterializedView, &log, Arc::new(processor)).await;

    let reference = service.create_payment_of(Amount::of(8, 0)).await.unwrap();
    service.request_payment_for(&reference).await.unwrap();

    let payment = service.find_by_ref(&reference).await.unwrap().unwrap();
    assert!(payment.is_successful());
    assert_eq!(
        payment_event_types(&log).await,
        vec!["PaymentAdded", "PaymentRequested", "PaymentSuccessful"]
    );
}

#[tokio::test]
async fn outcome_before_request_is_rejected() {
    let log = Arc::new(InProcessEventLog::new());
    let service = service_with(
        Strategy::EventSourced,
        &log,
        Arc::new(RecordingPaymentProcessor::new()),
    )
    .await;
    let reference = service.create_payment_of(Amount::of(8, 0)).await.unwrap();

    let event = PaymentProcessorEvent::PaymentProcessed {
        payment_ref: reference.clone(),
        status: PaymentStatus::Successful,
    };
    let result = log
        .publish(&PAYMENT_PROCESSOR_TOPIC, event.to_envelope().unwrap())
        .await;

    assert!(result.is_err());
    let payment = service.find_by_ref(&reference).await.unwrap().unwrap();
    assert_eq!(payment.state(), PaymentState::New);
}

#[tokio::test]
async fn unknown_payment_outcome_is_ignored() {
    let log = Arc::new(InProcessEventLog::new());
    let _service = service_with(
        Strategy::MaterializedView,
        &log,
        Arc::new(RecordingPaymentProcessor::new()),
    )
    .await;

    report(&log, &PaymentRef::generate(), PaymentStatus::Successful).await;

    assert!(log.events_by(&PAYMENTS_TOPIC).await.is_empty());
}

#[tokio::test]
async fn zero_amount_is_rejected_and_nothing_is_published() {
    let log = Arc::new(InProcessEventLog::new());
    let service = service_with(
        Strategy::MaterializedView,
        &log,
        Arc::new(RecordingPaymentProcessor::new()),
    )
    .await;

    let result = service.create_payment_of(Amount::zero()).await;

    assert!(matches!(result, Err(PaymentsError::ZeroAmount)));
    assert!(log.events_by(&PAYMENTS_TOPIC).await.is_empty());
}

#[tokio::test]
async fn requesting_an_unknown_payment_is_not_found() {
    let log = Arc::new(InProcessEventLog::new());
    let service = service_with(
        Strategy::EventSourced,
        &log,
        Arc::new(RecordingPaymentProcessor::new()),
    )
    .await;
    let missing = PaymentRef::generate();

    let result = service.request_payment_for(&missing).await;

    assert!(matches!(result, Err(PaymentsError::NotFound(r)) if r == missing));
}
