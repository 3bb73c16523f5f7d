mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;

use workshop_api::{
    errors::ServiceError,
    services::inventory::{self, UpdateInventoryItemRequest},
    services::work_orders::AddItemRequest,
};

use common::{seed_customer, seed_item, seed_order, seed_vehicle, setup};

#[tokio::test]
async fn reserve_is_a_single_conditional_decrement() {
    let ctx = setup().await;
    let item = seed_item(&ctx, "FLT-01", 5, dec!(25.00)).await;

    inventory::reserve(&*ctx.db, item.id, 5).await.unwrap();
    assert_eq!(ctx.inventory.get_item(item.id).await.unwrap().quantity, 0);

    // Stock is exhausted; further reservations fail and leave zero intact.
    let result = inventory::reserve(&*ctx.db, item.id, 1).await;
    assert_matches!(
        result,
        Err(ServiceError::InsufficientStock {
            requested: 1,
            available: 0,
            ..
        })
    );
    assert_eq!(ctx.inventory.get_item(item.id).await.unwrap().quantity, 0);
}

#[tokio::test]
async fn release_restores_stock_and_reports_missing_items() {
    let ctx = setup().await;
    let item = seed_item(&ctx, "FLT-01", 2, dec!(25.00)).await;

    inventory::release(&*ctx.db, item.id, 3).await.unwrap();
    assert_eq!(ctx.inventory.get_item(item.id).await.unwrap().quantity, 5);

    assert_matches!(
        inventory::release(&*ctx.db, 999, 1).await,
        Err(ServiceError::NotFound(_))
    );
    assert_matches!(
        inventory::reserve(&*ctx.db, 999, 1).await,
        Err(ServiceError::NotFound(_))
    );
}

#[tokio::test]
async fn concurrent_reservations_cannot_overdraw_stock() {
    let ctx = setup().await;
    let customer = seed_customer(&ctx).await;
    let vehicle = seed_vehicle(&ctx, customer.id, "ABC1D23").await;
    let item = seed_item(&ctx, "FLT-01", 10, dec!(25.00)).await;
    let first = seed_order(&ctx, vehicle.id, customer.id).await;
    let second = seed_order(&ctx, vehicle.id, customer.id).await;

    // Both ask for 6 out of 10; at most one can win.
    let (a, b) = tokio::join!(
        ctx.work_orders.add_item(
            first.id,
            AddItemRequest {
                inventory_item_id: item.id,
                quantity: 6,
                unit_price: None,
            },
        ),
        ctx.work_orders.add_item(
            second.id,
            AddItemRequest {
                inventory_item_id: item.id,
                quantity: 6,
                unit_price: None,
            },
        ),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|&&ok| ok).count();
    assert_eq!(successes, 1);
    assert_eq!(ctx.inventory.get_item(item.id).await.unwrap().quantity, 4);
}

#[tokio::test]
async fn low_stock_listing_tracks_the_minimum() {
    let ctx = setup().await;
    // minimum_stock is 2 in the seed helper.
    let low = seed_item(&ctx, "FLT-01", 1, dec!(25.00)).await;
    let _ok = seed_item(&ctx, "OIL-01", 8, dec!(40.00)).await;

    let listed = ctx.inventory.list_low_stock().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, low.id);
    assert!(listed[0].needs_restock());
}

#[tokio::test]
async fn catalogue_crud_guards_codes_and_quantities() {
    let ctx = setup().await;
    let item = seed_item(&ctx, "FLT-01", 5, dec!(25.00)).await;

    // Duplicate code rejected.
    let duplicate = ctx
        .inventory
        .create_item(workshop_api::services::inventory::CreateInventoryItemRequest {
            name: "Another filter".to_string(),
            code: "FLT-01".to_string(),
            category: None,
            quantity: 1,
            minimum_stock: 1,
            cost_price: dec!(1.00),
            sale_price: dec!(2.00),
            supplier: None,
            status: None,
            notes: None,
        })
        .await;
    assert_matches!(duplicate, Err(ServiceError::ValidationError(_)));

    // Stocktaking may rewrite the quantity, but never below zero.
    let negative = ctx
        .inventory
        .update_item(
            item.id,
            UpdateInventoryItemRequest {
                name: item.name.clone(),
                category: item.category.clone(),
                quantity: -1,
                minimum_stock: item.minimum_stock,
                cost_price: item.cost_price,
                sale_price: item.sale_price,
                supplier: None,
                status: None,
                notes: None,
            },
        )
        .await;
    assert_matches!(negative, Err(ServiceError::ValidationError(_)));

    let found = ctx.inventory.find_by_code("FLT-01").await.unwrap();
    assert_eq!(found.id, item.id);

    ctx.inventory.delete_item(item.id).await.unwrap();
    assert_matches!(
        ctx.inventory.get_item(item.id).await,
        Err(ServiceError::NotFound(_))
    );
}
