mod common;

use assert_matches::assert_matches;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use workshop_api::{
    errors::ServiceError,
    services::work_orders::{AddItemRequest, UpdateItemRequest},
};

use common::{seed_customer, seed_item, seed_order, seed_vehicle, setup};

#[tokio::test]
async fn adding_an_item_defaults_to_the_sale_price() {
    let ctx = setup().await;
    let customer = seed_customer(&ctx).await;
    let vehicle = seed_vehicle(&ctx, customer.id, "ABC1D23").await;
    let item = seed_item(&ctx, "FLT-01", 10, dec!(25.00)).await;
    let order = seed_order(&ctx, vehicle.id, customer.id).await;

    let line = ctx
        .work_orders
        .add_item(
            order.id,
            AddItemRequest {
                inventory_item_id: item.id,
                quantity: 2,
                unit_price: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(line.unit_price, dec!(25.00));
    assert_eq!(line.total_price, dec!(50.00));
    assert_eq!(ctx.inventory.get_item(item.id).await.unwrap().quantity, 8);

    let updated = ctx.work_orders.get(order.id).await.unwrap();
    assert_eq!(updated.parts_value, dec!(50.00));
    assert_eq!(updated.total_value, dec!(50.00));
}

#[tokio::test]
async fn a_supplied_positive_price_overrides_the_sale_price() {
    let ctx = setup().await;
    let customer = seed_customer(&ctx).await;
    let vehicle = seed_vehicle(&ctx, customer.id, "ABC1D23").await;
    let item = seed_item(&ctx, "FLT-01", 10, dec!(25.00)).await;
    let order = seed_order(&ctx, vehicle.id, customer.id).await;

    let line = ctx
        .work_orders
        .add_item(
            order.id,
            AddItemRequest {
                inventory_item_id: item.id,
                quantity: 1,
                unit_price: Some(dec!(19.90)),
            },
        )
        .await
        .unwrap();
    assert_eq!(line.unit_price, dec!(19.90));

    // Zero is treated as absent.
    let defaulted = ctx
        .work_orders
        .add_item(
            order.id,
            AddItemRequest {
                inventory_item_id: item.id,
                quantity: 1,
                unit_price: Some(Decimal::ZERO),
            },
        )
        .await
        .unwrap();
    assert_eq!(defaulted.unit_price, dec!(25.00));
}

#[tokio::test]
async fn insufficient_stock_reports_requested_and_available() {
    let ctx = setup().await;
    let customer = seed_customer(&ctx).await;
    let vehicle = seed_vehicle(&ctx, customer.id, "ABC1D23").await;
    let item = seed_item(&ctx, "FLT-01", 3, dec!(25.00)).await;
    let order = seed_order(&ctx, vehicle.id, customer.id).await;

    let result = ctx
        .work_orders
        .add_item(
            order.id,
            AddItemRequest {
                inventory_item_id: item.id,
                quantity: 5,
                unit_price: None,
            },
        )
        .await;

    assert_matches!(
        result,
        Err(ServiceError::InsufficientStock {
            requested: 5,
            available: 3,
            ..
        })
    );

    // The failed add left no trace.
    assert_eq!(ctx.inventory.get_item(item.id).await.unwrap().quantity, 3);
    let order_after = ctx.work_orders.get(order.id).await.unwrap();
    assert_eq!(order_after.parts_value, Decimal::ZERO);
    assert!(ctx.work_orders.list_items(order.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn updating_quantity_adjusts_stock_by_the_delta() {
    let ctx = setup().await;
    let customer = seed_customer(&ctx).await;
    let vehicle = seed_vehicle(&ctx, customer.id, "ABC1D23").await;
    let item = seed_item(&ctx, "FLT-01", 10, dec!(25.00)).await;
    let order = seed_order(&ctx, vehicle.id, customer.id).await;

    let line = ctx
        .work_orders
        .add_item(
            order.id,
            AddItemRequest {
                inventory_item_id: item.id,
                quantity: 3,
                unit_price: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(ctx.inventory.get_item(item.id).await.unwrap().quantity, 7);

    // Reduce 3 -> 1: two units return to stock.
    let reduced = ctx
        .work_orders
        .update_item(
            order.id,
            line.id,
            UpdateItemRequest {
                quantity: 1,
                unit_price: dec!(25.00),
            },
        )
        .await
        .unwrap();
    assert_eq!(reduced.total_price, dec!(25.00));
    assert_eq!(ctx.inventory.get_item(item.id).await.unwrap().quantity, 9);

    let order_after = ctx.work_orders.get(order.id).await.unwrap();
    assert_eq!(order_after.parts_value, dec!(25.00));

    // Increase 1 -> 5: four more units reserved.
    ctx.work_orders
        .update_item(
            order.id,
            line.id,
            UpdateItemRequest {
                quantity: 5,
                unit_price: dec!(25.00),
            },
        )
        .await
        .unwrap();
    assert_eq!(ctx.inventory.get_item(item.id).await.unwrap().quantity, 5);

    // An increase beyond stock fails atomically.
    let result = ctx
        .work_orders
        .update_item(
            order.id,
            line.id,
            UpdateItemRequest {
                quantity: 11,
                unit_price: dec!(25.00),
            },
        )
        .await;
    assert_matches!(result, Err(ServiceError::InsufficientStock { .. }));
    assert_eq!(ctx.inventory.get_item(item.id).await.unwrap().quantity, 5);

    let items = ctx.work_orders.list_items(order.id).await.unwrap();
    assert_eq!(items[0].item.quantity, 5);
}

#[tokio::test]
async fn removing_an_item_restores_stock_and_floors_the_parts_value() {
    let ctx = setup().await;
    let customer = seed_customer(&ctx).await;
    let vehicle = seed_vehicle(&ctx, customer.id, "ABC1D23").await;
    let item = seed_item(&ctx, "FLT-01", 10, dec!(25.00)).await;
    let order = seed_order(&ctx, vehicle.id, customer.id).await;

    let line = ctx
        .work_orders
        .add_item(
            order.id,
            AddItemRequest {
                inventory_item_id: item.id,
                quantity: 4,
                unit_price: None,
            },
        )
        .await
        .unwrap();

    ctx.work_orders.remove_item(order.id, line.id).await.unwrap();

    assert_eq!(ctx.inventory.get_item(item.id).await.unwrap().quantity, 10);
    let order_after = ctx.work_orders.get(order.id).await.unwrap();
    assert_eq!(order_after.parts_value, Decimal::ZERO);
    assert_eq!(order_after.total_value, Decimal::ZERO);
    assert!(ctx.work_orders.list_items(order.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn items_are_listed_in_insertion_order_with_their_parts() {
    let ctx = setup().await;
    let customer = seed_customer(&ctx).await;
    let vehicle = seed_vehicle(&ctx, customer.id, "ABC1D23").await;
    let first = seed_item(&ctx, "FLT-01", 10, dec!(25.00)).await;
    let second = seed_item(&ctx, "OIL-01", 10, dec!(40.00)).await;
    let order = seed_order(&ctx, vehicle.id, customer.id).await;

    for item_id in [first.id, second.id] {
        ctx.work_orders
            .add_item(
                order.id,
                AddItemRequest {
                    inventory_item_id: item_id,
                    quantity: 1,
                    unit_price: None,
                },
            )
            .await
            .unwrap();
    }

    let items = ctx.work_orders.list_items(order.id).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].item.inventory_item_id, first.id);
    assert_eq!(items[1].item.inventory_item_id, second.id);
    assert_eq!(
        items[0].inventory_item.as_ref().map(|i| i.code.as_str()),
        Some("FLT-01")
    );

    let order_after = ctx.work_orders.get(order.id).await.unwrap();
    assert_eq!(order_after.parts_value, dec!(65.00));
}

#[tokio::test]
async fn items_of_another_order_are_not_reachable() {
    let ctx = setup().await;
    let customer = seed_customer(&ctx).await;
    let vehicle = seed_vehicle(&ctx, customer.id, "ABC1D23").await;
    let item = seed_item(&ctx, "FLT-01", 10, dec!(25.00)).await;
    let first = seed_order(&ctx, vehicle.id, customer.id).await;
    let second = seed_order(&ctx, vehicle.id, customer.id).await;

    let line = ctx
        .work_orders
        .add_item(
            first.id,
            AddItemRequest {
                inventory_item_id: item.id,
                quantity: 1,
                unit_price: None,
            },
        )
        .await
        .unwrap();

    assert_matches!(
        ctx.work_orders.remove_item(second.id, line.id).await,
        Err(ServiceError::NotFound(_))
    );
    assert_matches!(
        ctx.work_orders
            .update_item(
                second.id,
                line.id,
                UpdateItemRequest {
                    quantity: 2,
                    unit_price: dec!(25.00),
                },
            )
            .await,
        Err(ServiceError::NotFound(_))
    );
}

#[tokio::test]
async fn unknown_order_and_unknown_part_are_distinct_failures() {
    let ctx = setup().await;
    let customer = seed_customer(&ctx).await;
    let vehicle = seed_vehicle(&ctx, customer.id, "ABC1D23").await;
    let order = seed_order(&ctx, vehicle.id, customer.id).await;

    assert_matches!(
        ctx.work_orders
            .add_item(
                999,
                AddItemRequest {
                    inventory_item_id: 1,
                    quantity: 1,
                    unit_price: None,
                },
            )
            .await,
        Err(ServiceError::NotFound(_))
    );

    assert_matches!(
        ctx.work_orders
            .add_item(
                order.id,
                AddItemRequest {
                    inventory_item_id: 999,
                    quantity: 1,
                    unit_price: None,
                },
            )
            .await,
        Err(ServiceError::NotFound(_))
    );

    assert_matches!(
        ctx.work_orders.list_items(999).await,
        Err(ServiceError::NotFound(_))
    );
}
