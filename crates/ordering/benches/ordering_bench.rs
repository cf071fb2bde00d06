use std::sync::Arc;

use async_trait::async_trait;
use common::Amount;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use domain::{EventSourcedRepository, MaterializedViewRepository, Repository};
use event_log::{HandlerError, InProcessEventLog};
use ordering::acl::payments::{PaymentRef, PaymentService};
use ordering::{
    ORDERING_TOPIC, OnlineOrder, OnlineOrderRef, OnlineOrderType, OrderingService, Pizza,
    PizzaSize,
};

struct NoopPayments;

#[async_trait]
impl PaymentService for NoopPayments {
    async fn create_payment_of(&self, _amount: Amount) -> Result<PaymentRef, HandlerError> {
        Ok(PaymentRef::generate())
    }

    async fn request_payment_for(&self, _payment_ref: &PaymentRef) -> Result<(), HandlerError> {
        Ok(())
    }
}

async fn order_with_pizzas(service: &OrderingService, pizzas: usize) -> OnlineOrderRef {
    let reference = service.create_order(OnlineOrderType::Delivery).await.unwrap();
    for _ in 0..pizzas {
        service
            .add_pizza(&reference, Pizza::of(PizzaSize::Medium))
            .await
            .unwrap();
    }
    reference
}

fn bench_find_by_ref(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("ordering/find_by_ref");

    for pizzas in [1usize, 10, 100] {
        let log = Arc::new(InProcessEventLog::new());
        let (view, sourced) = rt.block_on(async {
            let view: Arc<dyn Repository<OnlineOrder>> =
                Arc::new(MaterializedViewRepository::new(log.clone(), ORDERING_TOPIC).await);
            let sourced: Arc<dyn Repository<OnlineOrder>> =
                Arc::new(EventSourcedRepository::new(log.clone(), ORDERING_TOPIC));
            (view, sourced)
        });
        let service = OrderingService::new(log.clone(), view.clone(), Arc::new(NoopPayments));
        let reference = rt.block_on(order_with_pizzas(&service, pizzas));

        group.bench_with_input(
            BenchmarkId::new("materialized_view", pizzas),
            &reference,
            |b, reference| {
                b.iter(|| {
                    rt.block_on(async { view.find_by_ref(reference).await.unwrap() });
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("event_sourced", pizzas),
            &reference,
            |b, reference| {
                b.iter(|| {
                    rt.block_on(async { sourced.find_by_ref(reference).await.unwrap() });
                });
            },
        );
    }

    group.finish();
}

fn bench_order_to_payment(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("ordering/create_add_submit_pay", |b| {
        b.iter(|| {
            rt.block_on(async {
                let log = Arc::new(InProcessEventLog::new());
                let orders =
                    Arc::new(MaterializedViewRepository::new(log.clone(), ORDERING_TOPIC).await);
                let service = OrderingService::new(log, orders, Arc::new(NoopPayments));
                let reference = order_with_pizzas(&service, 2).await;
                service.submit_order(&reference).await.unwrap();
                service.request_payment(&reference).await.unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_find_by_ref, bench_order_to_payment);
criterion_main!(benches);
