//! Adapters implementing each context's ACL contracts on top of the real
//! services of the other contexts.
//!
//! References cross a boundary as their string value; everything else is
//! translated field by field.

use async_trait::async_trait;
use common::{Amount, Ref};
use event_log::HandlerError;

/// Ordering's view of Payments.
pub struct PaymentsForOrdering(pub payments::PaymentService);

#[async_trait]
impl ordering::acl::payments::PaymentService for PaymentsForOrdering {
    async fn create_payment_of(
        &self,
        amount: Amount,
    ) -> Result<ordering::acl::payments::PaymentRef, HandlerError> {
        let reference = self.0.create_payment_of(amount).await?;
        Ok(translate_ref(&reference))
    }

    async fn request_payment_for(
        &self,
        payment_ref: &ordering::acl::payments::PaymentRef,
    ) -> Result<(), HandlerError> {
        self.0
            .request_payment_for(&translate_ref(payment_ref))
            .await?;
        Ok(())
    }
}

/// Kitchen's view of Ordering.
pub struct OrderingForKitchen(pub ordering::OrderingService);

#[async_trait]
impl kitchen::acl::ordering::OrderingService for OrderingForKitchen {
    async fn find_by_ref(
        &self,
        reference: &kitchen::acl::ordering::OnlineOrderRef,
    ) -> Result<Option<kitchen::acl::ordering::OnlineOrder>, HandlerError> {
        let order = self.0.find_by_ref(&translate_ref(reference)).await?;
        Ok(order.map(|order| kitchen::acl::ordering::OnlineOrder {
            reference: translate_ref(order.reference()),
            pizzas: order
                .pizzas()
                .iter()
                .map(|pizza| kitchen_size(pizza.size))
                .collect(),
        }))
    }
}

/// Delivery's view of Kitchen.
pub struct KitchenForDelivery(pub kitchen::KitchenService);

#[async_trait]
impl delivery::acl::kitchen::KitchenService for KitchenForDelivery {
    async fn find_kitchen_order_by_ref(
        &self,
        reference: &delivery::acl::kitchen::KitchenOrderRef,
    ) -> Result<Option<delivery::acl::kitchen::KitchenOrder>, HandlerError> {
        let order = self
            .0
            .find_kitchen_order_by_ref(&translate_ref(reference))
            .await?;
        Ok(order.map(|order| delivery::acl::kitchen::KitchenOrder {
            reference: translate_ref(order.reference()),
            online_order_ref: translate_ref(order.online_order_ref()),
            pizzas: order
                .pizzas()
                .iter()
                .map(|size| delivery::Pizza {
                    size: delivery_size(*size),
                })
                .collect(),
        }))
    }
}

/// Delivery's view of Ordering.
pub struct OrderingForDelivery(pub ordering::OrderingService);

#[async_trait]
impl delivery::acl::ordering::OrderingService for OrderingForDelivery {
    async fn find_by_ref(
        &self,
        reference: &delivery::acl::ordering::OnlineOrderRef,
    ) -> Result<Option<delivery::acl::ordering::OnlineOrder>, HandlerError> {
        let order = self.0.find_by_ref(&translate_ref(reference)).await?;
        Ok(order.map(|order| delivery::acl::ordering::OnlineOrder {
            reference: translate_ref(order.reference()),
            order_type: match order.order_type() {
                ordering::OnlineOrderType::Delivery => {
                    delivery::acl::ordering::OnlineOrderType::Delivery
                }
                ordering::OnlineOrderType::Pickup => {
                    delivery::acl::ordering::OnlineOrderType::Pickup
                }
            },
        }))
    }
}

/// Re-types a reference for another context.
pub fn translate_ref<S: Ref, T: Ref>(reference: &S) -> T {
    T::from_string(reference.as_str().to_string())
}

fn kitchen_size(size: ordering::PizzaSize) -> kitchen::PizzaSize {
    match size {
        ordering::PizzaSize::Small => kitchen::PizzaSize::Small,
        ordering::PizzaSize::Medium => kitchen::PizzaSize::Medium,
        ordering::PizzaSize::Large => kitchen::PizzaSize::Large,
    }
}

fn delivery_size(size: kitchen::PizzaSize) -> delivery::PizzaSize {
    match size {
        kitchen::PizzaSize::Small => delivery::PizzaSize::Small,
        kitchen::PizzaSize::Medium => delivery::PizzaSize::Medium,
        kitchen::PizzaSize::Large => delivery::PizzaSize::Large,
    }
}
