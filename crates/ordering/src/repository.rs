use async_trait::async_trait;
use domain::{Repository, RepositoryExt};

use crate::OnlineOrder;
use crate::acl::payments::PaymentRef;

/// Online-order specific finders, available on every `Repository<OnlineOrder>`.
#[async_trait]
pub trait OnlineOrderRepository: Repository<OnlineOrder> {
    /// Finds the order a payment was created for.
    async fn find_by_payment_ref(
        &self,
        payment_ref: &PaymentRef,
    ) -> domain::Result<Option<OnlineOrder>> {
        self.find_first(|order: &OnlineOrder| order.payment_ref() == payment_ref)
            .await
    }
}

impl<T: Repository<OnlineOrder> + ?Sized> OnlineOrderRepository for T {}
