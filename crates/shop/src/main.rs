//! Runs one pizza order through every context and logs what happened.

use ordering::{OnlineOrderType, Pizza, PizzaSize};
use payments::PaymentStatus;
use shop::adapters::translate_ref;
use shop::{Config, PizzaShop, ShopError};

#[tokio::main]
async fn main() -> Result<(), ShopError> {
    // 1. Configuration and tracing
    let config = Config::from_env()?;
    shop::init_tracing(&config);

    // 2. Wire the contexts
    let shop = PizzaShop::build(config).await?;

    // 3. Customer orders and pays
    let ordering = shop.ordering();
    let order_ref = ordering.create_order(OnlineOrderType::Delivery).await?;
    ordering
        .add_pizza(&order_ref, Pizza::of(PizzaSize::Medium))
        .await?;
    ordering
        .add_pizza(&order_ref, Pizza::of(PizzaSize::Large))
        .await?;
    ordering.submit_order(&order_ref).await?;
    let payment_ref = ordering.request_payment(&order_ref).await?;

    // 4. Settle by hand when no automatic processor is configured
    let payment_ref: payments::PaymentRef = translate_ref(&payment_ref);
    if shop.requested_payments().await.contains(&payment_ref) {
        shop.report_payment(&payment_ref, PaymentStatus::Successful)
            .await?;
    }

    let Some(kitchen_order) = shop
        .kitchen()
        .find_kitchen_order_by_online_order_ref(&translate_ref(&order_ref))
        .await?
    else {
        tracing::warn!(%order_ref, "order was not paid; nothing to cook");
        shop.shutdown().await;
        return Ok(());
    };

    // 5. Kitchen prepares, bakes and assembles
    let kitchen = shop.kitchen();
    kitchen.start_order_prep(kitchen_order.reference()).await?;
    let pizzas = kitchen
        .find_pizzas_by_kitchen_order_ref(kitchen_order.reference())
        .await?;
    for pizza in &pizzas {
        kitchen.finish_pizza_prep(pizza.reference()).await?;
    }
    for pizza in &pizzas {
        kitchen.remove_pizza_from_oven(pizza.reference()).await?;
    }
    kitchen.finish_order_assembly(kitchen_order.reference()).await?;

    // 6. Delivery picked it up
    if let Some(delivery_order) = shop
        .delivery()
        .find_delivery_order_by_kitchen_order_ref(&translate_ref(kitchen_order.reference()))
        .await?
    {
        tracing::info!(
            delivery_order_ref = %delivery_order.reference(),
            %order_ref,
            pizzas = delivery_order.pizzas().len(),
            "order out for delivery"
        );
    }

    shop.shutdown().await;
    Ok(())
}
