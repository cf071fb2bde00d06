use async_trait::async_trait;
use domain::{Repository, RepositoryExt};

use crate::DeliveryOrder;
use crate::acl::kitchen::KitchenOrderRef;

/// Delivery order finders, available on every `Repository<DeliveryOrder>`.
#[async_trait]
pub trait DeliveryOrderRepository: Repository<DeliveryOrder> {
    async fn find_by_kitchen_order_ref(
        &self,
        kitchen_order_ref: &KitchenOrderRef,
    ) -> domain::Result<Option<DeliveryOrder>> {
        self.find_first(|order: &DeliveryOrder| order.kitchen_order_ref() == kitchen_order_ref)
            .await
    }
}

impl<T: Repository<DeliveryOrder> + ?Sized> DeliveryOrderRepository for T {}
