use async_trait::async_trait;
use domain::{Repository, RepositoryExt};

use crate::acl::ordering::OnlineOrderRef;
use crate::{KitchenOrder, KitchenOrderRef, Pizza};

/// Kitchen order finders, available on every `Repository<KitchenOrder>`.
#[async_trait]
pub trait KitchenOrderRepository: Repository<KitchenOrder> {
    async fn find_by_online_order_ref(
        &self,
        online_order_ref: &OnlineOrderRef,
    ) -> domain::Result<Option<KitchenOrder>> {
        self.find_first(|order: &KitchenOrder| order.online_order_ref() == online_order_ref)
            .await
    }
}

impl<T: Repository<KitchenOrder> + ?Sized> KitchenOrderRepository for T {}

/// Pizza finders, available on every `Repository<Pizza>`.
#[async_trait]
pub trait PizzaRepository: Repository<Pizza> {
    /// Pizzas of a kitchen order, in the order they were added.
    async fn find_by_kitchen_order_ref(
        &self,
        kitchen_order_ref: &KitchenOrderRef,
    ) -> domain::Result<Vec<Pizza>> {
        self.find_where(|pizza: &Pizza| pizza.kitchen_order_ref() == kitchen_order_ref)
            .await
    }
}

impl<T: Repository<Pizza> + ?Sized> PizzaRepository for T {}
