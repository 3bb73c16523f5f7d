use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::{CaseStatement, Expr, OnConflict, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::{
        customer::Entity as CustomerEntity,
        employee::Entity as EmployeeEntity,
        inventory_item::{Entity as InventoryItemEntity, Model as InventoryItemModel},
        vehicle::Entity as VehicleEntity,
        work_order::{self, Entity as WorkOrderEntity, Model as WorkOrderModel, WorkOrderStatus},
        work_order_counter,
        work_order_item::{
            self, Entity as WorkOrderItemEntity, Model as WorkOrderItemModel,
        },
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::inventory,
};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateWorkOrderRequest {
    #[validate(range(min = 1, message = "Vehicle is required"))]
    pub vehicle_id: i32,
    #[validate(range(min = 1, message = "Customer is required"))]
    pub customer_id: i32,
    pub employee_id: Option<i32>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub entry_date: Option<DateTime<Utc>>,
    pub expected_completion: Option<DateTime<Utc>>,
    pub diagnosis: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

/// Mutable business fields of a work order. Identifiers, the entry date and
/// item-derived totals are never overwritten from caller input.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateWorkOrderRequest {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub expected_completion: Option<DateTime<Utc>>,
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub service_value: Decimal,
    #[serde(default)]
    pub discount_value: Decimal,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub performed_services: Option<String>,
    pub status: Option<WorkOrderStatus>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddItemRequest {
    #[validate(range(min = 1, message = "Inventory item is required"))]
    pub inventory_item_id: i32,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    /// Unit price; when absent or not positive the inventory item's sale
    /// price is used.
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateItemRequest {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// A line item joined with a snapshot of its inventory item.
#[derive(Debug, Serialize, ToSchema)]
pub struct WorkOrderItemView {
    #[serde(flatten)]
    pub item: WorkOrderItemModel,
    pub inventory_item: Option<InventoryItemModel>,
}

/// Orchestrates the work order lifecycle: creation, mutation, status
/// transitions and line item accounting, with stock adjustments delegated to
/// the inventory ledger. Every multi-step operation runs inside a single
/// transaction; locks are taken inventory item first, work order second.
#[derive(Clone)]
pub struct WorkOrderService {
    db: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl WorkOrderService {
    pub fn new(db: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, request), fields(vehicle_id = request.vehicle_id, customer_id = request.customer_id))]
    pub async fn create(
        &self,
        request: CreateWorkOrderRequest,
    ) -> Result<WorkOrderModel, ServiceError> {
        request.validate()?;

        let txn = self.db.begin().await?;

        let vehicle = VehicleEntity::find_by_id(request.vehicle_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Vehicle {} not found", request.vehicle_id))
            })?;

        CustomerEntity::find_by_id(request.customer_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Customer {} not found", request.customer_id))
            })?;

        if let Some(employee_id) = request.employee_id {
            EmployeeEntity::find_by_id(employee_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Employee {} not found", employee_id))
                })?;
        }

        if vehicle.customer_id != request.customer_id {
            return Err(ServiceError::InvalidRelationship(format!(
                "Vehicle {} does not belong to customer {}",
                request.vehicle_id, request.customer_id
            )));
        }

        let entry_date = request.entry_date.unwrap_or_else(Utc::now);
        let order_number = next_order_number(&txn, Utc::now().date_naive()).await?;

        let order = work_order::ActiveModel {
            vehicle_id: Set(request.vehicle_id),
            customer_id: Set(request.customer_id),
            employee_id: Set(request.employee_id),
            order_number: Set(order_number.clone()),
            entry_date: Set(entry_date),
            expected_completion: Set(request.expected_completion),
            completion_date: Set(None),
            status: Set(WorkOrderStatus::Open),
            description: Set(request.description),
            diagnosis: Set(request.diagnosis),
            parts_value: Set(Decimal::ZERO),
            service_value: Set(Decimal::ZERO),
            discount_value: Set(Decimal::ZERO),
            total_value: Set(Decimal::ZERO),
            payment_method: Set(request.payment_method),
            notes: Set(request.notes),
            performed_services: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(work_order_id = order.id, order_number = %order.order_number, "Work order created");
        self.emit(Event::WorkOrderCreated {
            work_order_id: order.id,
            order_number,
        })
        .await;

        Ok(order)
    }

    pub async fn get(&self, id: i32) -> Result<WorkOrderModel, ServiceError> {
        WorkOrderEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Work order {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<WorkOrderModel>, u64), ServiceError> {
        let paginator = WorkOrderEntity::find()
            .order_by_desc(work_order::Column::EntryDate)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((orders, total))
    }

    /// Updates the mutable business fields of a non-terminal work order. A
    /// supplied status that differs from the current one goes through the
    /// state machine before being applied.
    #[instrument(skip(self, request), fields(work_order_id = id))]
    pub async fn update(
        &self,
        id: i32,
        request: UpdateWorkOrderRequest,
    ) -> Result<WorkOrderModel, ServiceError> {
        request.validate()?;
        if request.service_value < Decimal::ZERO || request.discount_value < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Service and discount values cannot be negative".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let existing = WorkOrderEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Work order {} not found", id)))?;

        if existing.status.is_terminal() {
            return Err(ServiceError::OrderLocked(format!(
                "Work order {} is {} and can no longer be modified",
                id, existing.status
            )));
        }

        let old_status = existing.status;
        let mut new_status = old_status;
        let mut stock_restored = false;

        if let Some(requested) = request.status {
            if requested != old_status {
                if !old_status.can_transition_to(requested) {
                    return Err(ServiceError::InvalidTransition {
                        from: old_status,
                        to: requested,
                    });
                }
                if requested == WorkOrderStatus::Cancelled {
                    restore_items_to_stock(&txn, id).await?;
                    stock_restored = true;
                }
                new_status = requested;
            }
        }

        // The total derives from the parts value as the database holds it at
        // write time, not from the row read above; a line-item operation
        // committing in between cannot be overwritten with a stale sum. The
        // discount bound is enforced against the same live value.
        let live_total = Expr::col(work_order::Column::PartsValue)
            .add(request.service_value)
            .sub(request.discount_value);

        let now = Utc::now();
        let mut update = WorkOrderEntity::update_many()
            .col_expr(
                work_order::Column::ExpectedCompletion,
                Expr::value(request.expected_completion),
            )
            .col_expr(
                work_order::Column::Description,
                Expr::value(request.description),
            )
            .col_expr(work_order::Column::Diagnosis, Expr::value(request.diagnosis))
            .col_expr(
                work_order::Column::ServiceValue,
                Expr::value(request.service_value),
            )
            .col_expr(
                work_order::Column::DiscountValue,
                Expr::value(request.discount_value),
            )
            .col_expr(work_order::Column::TotalValue, live_total.clone())
            .col_expr(
                work_order::Column::PaymentMethod,
                Expr::value(request.payment_method),
            )
            .col_expr(work_order::Column::Notes, Expr::value(request.notes))
            .col_expr(
                work_order::Column::PerformedServices,
                Expr::value(request.performed_services),
            )
            .col_expr(work_order::Column::Status, Expr::value(new_status))
            .col_expr(work_order::Column::UpdatedAt, Expr::value(Some(now)));

        if new_status == WorkOrderStatus::Completed && existing.completion_date.is_none() {
            update = update.col_expr(
                work_order::Column::CompletionDate,
                Expr::value(Some(now)),
            );
        }

        let result = update
            .filter(work_order::Column::Id.eq(id))
            .filter(Expr::expr(live_total).gte(Decimal::ZERO))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::ValidationError(
                "Discount cannot exceed the sum of parts and service values".to_string(),
            ));
        }

        let updated = WorkOrderEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Work order {} not found", id)))?;
        txn.commit().await?;

        if new_status != old_status {
            self.emit(Event::WorkOrderStatusChanged {
                work_order_id: id,
                old_status,
                new_status,
            })
            .await;
            if stock_restored {
                self.emit(Event::WorkOrderCancelled { work_order_id: id }).await;
            }
        }

        Ok(updated)
    }

    /// Applies a status transition. A no-op transition (new status equals the
    /// current one) succeeds without re-triggering side effects.
    #[instrument(skip(self), fields(work_order_id = id, new_status = %new_status))]
    pub async fn change_status(
        &self,
        id: i32,
        new_status: WorkOrderStatus,
    ) -> Result<WorkOrderModel, ServiceError> {
        let txn = self.db.begin().await?;

        let order = WorkOrderEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Work order {} not found", id)))?;

        let old_status = order.status;
        if old_status == new_status {
            txn.commit().await?;
            return Ok(order);
        }

        // Decided on the row loaded inside this transaction, so a completion
        // committed a moment earlier still reports the order as locked rather
        // than as a transition failure.
        if old_status == WorkOrderStatus::Completed && new_status == WorkOrderStatus::Cancelled {
            return Err(ServiceError::OrderLocked(format!(
                "Work order {} is already concluida and cannot be cancelled",
                id
            )));
        }

        if !old_status.can_transition_to(new_status) {
            return Err(ServiceError::InvalidTransition {
                from: old_status,
                to: new_status,
            });
        }

        if new_status == WorkOrderStatus::Cancelled {
            restore_items_to_stock(&txn, id).await?;
        }

        let completion_date = order.completion_date;
        let mut active: work_order::ActiveModel = order.into();
        active.status = Set(new_status);
        if new_status == WorkOrderStatus::Completed && completion_date.is_none() {
            active.completion_date = Set(Some(Utc::now()));
        }

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(work_order_id = id, from = %old_status, to = %new_status, "Work order status changed");
        self.emit(Event::WorkOrderStatusChanged {
            work_order_id: id,
            old_status,
            new_status,
        })
        .await;
        if new_status == WorkOrderStatus::Cancelled {
            self.emit(Event::WorkOrderCancelled { work_order_id: id }).await;
        }

        Ok(updated)
    }

    /// Marks the work order as completed; must currently be in progress.
    pub async fn complete(&self, id: i32) -> Result<WorkOrderModel, ServiceError> {
        self.change_status(id, WorkOrderStatus::Completed).await
    }

    /// Cancels the work order, restoring every line item's quantity to stock.
    /// Historical totals are preserved on the order; only stock is restored.
    #[instrument(skip(self), fields(work_order_id = id))]
    pub async fn cancel(&self, id: i32) -> Result<WorkOrderModel, ServiceError> {
        self.change_status(id, WorkOrderStatus::Cancelled).await
    }

    /// Hard-deletes a work order. Only `aberta` and `cancelada` orders may be
    /// deleted; items are removed by cascade.
    #[instrument(skip(self), fields(work_order_id = id))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let order = self.get(id).await?;

        if matches!(
            order.status,
            WorkOrderStatus::Completed | WorkOrderStatus::InProgress
        ) {
            return Err(ServiceError::OrderLocked(format!(
                "Work order {} is {} and cannot be deleted",
                id, order.status
            )));
        }

        work_order::ActiveModel::from(order).delete(&*self.db).await?;
        info!(work_order_id = id, "Work order deleted");
        self.emit(Event::WorkOrderDeleted { work_order_id: id }).await;
        Ok(())
    }

    /// Adds a line item, reserving stock and increasing the order's parts
    /// value by the line total, all within one transaction.
    #[instrument(skip(self, request), fields(work_order_id = order_id, inventory_item_id = request.inventory_item_id))]
    pub async fn add_item(
        &self,
        order_id: i32,
        request: AddItemRequest,
    ) -> Result<WorkOrderItemModel, ServiceError> {
        request.validate()?;

        let txn = self.db.begin().await?;

        let order = find_unlocked_order(&txn, order_id).await?;

        let inventory_item = InventoryItemEntity::find_by_id(request.inventory_item_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Inventory item {} not found",
                    request.inventory_item_id
                ))
            })?;

        let unit_price = match request.unit_price {
            Some(price) if price > Decimal::ZERO => price,
            _ => inventory_item.sale_price,
        };
        let line_total = Decimal::from(request.quantity) * unit_price;

        // Inventory row first, work order row second.
        inventory::reserve(&txn, request.inventory_item_id, request.quantity).await?;

        let item = work_order_item::ActiveModel {
            work_order_id: Set(order.id),
            inventory_item_id: Set(request.inventory_item_id),
            quantity: Set(request.quantity),
            unit_price: Set(unit_price),
            total_price: Set(line_total),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        apply_parts_delta(&txn, order_id, line_total).await?;

        txn.commit().await?;

        info!(
            work_order_id = order_id,
            item_id = item.id,
            quantity = request.quantity,
            "Item added to work order"
        );
        self.emit(Event::ItemAddedToWorkOrder {
            work_order_id: order_id,
            inventory_item_id: request.inventory_item_id,
            quantity: request.quantity,
        })
        .await;

        Ok(item)
    }

    /// Updates a line item's quantity and unit price. Stock is adjusted by
    /// the quantity delta; the order's parts value by the line total delta.
    #[instrument(skip(self, request), fields(work_order_id = order_id, item_id = item_id))]
    pub async fn update_item(
        &self,
        order_id: i32,
        item_id: i32,
        request: UpdateItemRequest,
    ) -> Result<WorkOrderItemModel, ServiceError> {
        request.validate()?;
        if request.unit_price <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Unit price must be positive".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        find_unlocked_order(&txn, order_id).await?;
        let current = find_order_item(&txn, order_id, item_id).await?;

        let delta = request.quantity - current.quantity;
        if delta > 0 {
            inventory::reserve(&txn, current.inventory_item_id, delta).await?;
        } else if delta < 0 {
            inventory::release(&txn, current.inventory_item_id, -delta).await?;
        }

        let old_total = current.total_price;
        let new_total = Decimal::from(request.quantity) * request.unit_price;

        let mut active: work_order_item::ActiveModel = current.into();
        active.quantity = Set(request.quantity);
        active.unit_price = Set(request.unit_price);
        active.total_price = Set(new_total);
        let updated = active.update(&txn).await?;

        apply_parts_delta(&txn, order_id, new_total - old_total).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Removes a line item, restoring its full quantity to stock and
    /// subtracting its line total from the order's parts value (floored at
    /// zero).
    #[instrument(skip(self), fields(work_order_id = order_id, item_id = item_id))]
    pub async fn remove_item(&self, order_id: i32, item_id: i32) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;

        find_unlocked_order(&txn, order_id).await?;
        let item = find_order_item(&txn, order_id, item_id).await?;

        inventory::release(&txn, item.inventory_item_id, item.quantity).await?;
        subtract_parts_floored(&txn, order_id, item.total_price).await?;

        let inventory_item_id = item.inventory_item_id;
        let quantity = item.quantity;
        work_order_item::ActiveModel::from(item).delete(&txn).await?;

        txn.commit().await?;

        info!(work_order_id = order_id, item_id = item_id, "Item removed from work order");
        self.emit(Event::ItemRemovedFromWorkOrder {
            work_order_id: order_id,
            inventory_item_id,
            quantity,
        })
        .await;

        Ok(())
    }

    /// Lists the order's items in insertion order, each joined with its
    /// inventory item snapshot.
    pub async fn list_items(&self, order_id: i32) -> Result<Vec<WorkOrderItemView>, ServiceError> {
        // Existence check keeps NotFound distinct from an empty order.
        self.get(order_id).await?;

        let rows = WorkOrderItemEntity::find()
            .filter(work_order_item::Column::WorkOrderId.eq(order_id))
            .order_by_asc(work_order_item::Column::Id)
            .find_also_related(InventoryItemEntity)
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(item, inventory_item)| WorkOrderItemView {
                item,
                inventory_item,
            })
            .collect())
    }

    pub async fn find_by_customer(
        &self,
        customer_id: i32,
    ) -> Result<Vec<WorkOrderModel>, ServiceError> {
        CustomerEntity::find_by_id(customer_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", customer_id)))?;

        Ok(WorkOrderEntity::find()
            .filter(work_order::Column::CustomerId.eq(customer_id))
            .order_by_desc(work_order::Column::EntryDate)
            .all(&*self.db)
            .await?)
    }

    pub async fn find_by_vehicle(
        &self,
        vehicle_id: i32,
    ) -> Result<Vec<WorkOrderModel>, ServiceError> {
        VehicleEntity::find_by_id(vehicle_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Vehicle {} not found", vehicle_id)))?;

        Ok(WorkOrderEntity::find()
            .filter(work_order::Column::VehicleId.eq(vehicle_id))
            .order_by_desc(work_order::Column::EntryDate)
            .all(&*self.db)
            .await?)
    }

    pub async fn find_by_status(
        &self,
        status: WorkOrderStatus,
    ) -> Result<Vec<WorkOrderModel>, ServiceError> {
        Ok(WorkOrderEntity::find()
            .filter(work_order::Column::Status.eq(status))
            .order_by_desc(work_order::Column::EntryDate)
            .all(&*self.db)
            .await?)
    }

    pub async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkOrderModel>, ServiceError> {
        if start > end {
            return Err(ServiceError::ValidationError(
                "Start date must not be after end date".to_string(),
            ));
        }

        Ok(WorkOrderEntity::find()
            .filter(work_order::Column::EntryDate.gte(start))
            .filter(work_order::Column::EntryDate.lte(end))
            .order_by_desc(work_order::Column::EntryDate)
            .all(&*self.db)
            .await?)
    }

    pub async fn find_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<WorkOrderModel, ServiceError> {
        if order_number.is_empty() {
            return Err(ServiceError::ValidationError(
                "Order number is required".to_string(),
            ));
        }

        WorkOrderEntity::find()
            .filter(work_order::Column::OrderNumber.eq(order_number))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Work order {} not found", order_number))
            })
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "Failed to send event");
            }
        }
    }
}

/// Loads a work order and rejects the operation when it is in a terminal
/// state.
async fn find_unlocked_order(
    txn: &DatabaseTransaction,
    order_id: i32,
) -> Result<WorkOrderModel, ServiceError> {
    let order = WorkOrderEntity::find_by_id(order_id)
        .one(txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Work order {} not found", order_id)))?;

    if order.status.is_terminal() {
        return Err(ServiceError::OrderLocked(format!(
            "Work order {} is {} and its items can no longer change",
            order_id, order.status
        )));
    }

    Ok(order)
}

async fn find_order_item(
    txn: &DatabaseTransaction,
    order_id: i32,
    item_id: i32,
) -> Result<WorkOrderItemModel, ServiceError> {
    WorkOrderItemEntity::find_by_id(item_id)
        .filter(work_order_item::Column::WorkOrderId.eq(order_id))
        .one(txn)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!(
                "Item {} is not part of work order {}",
                item_id, order_id
            ))
        })
}

/// Shifts the order's parts value by `delta` and recomputes the total, both
/// evaluated inside the database so concurrent item operations on the same
/// order cannot lose updates.
async fn apply_parts_delta(
    txn: &DatabaseTransaction,
    order_id: i32,
    delta: Decimal,
) -> Result<(), ServiceError> {
    let result = WorkOrderEntity::update_many()
        .col_expr(
            work_order::Column::PartsValue,
            Expr::col(work_order::Column::PartsValue).add(delta),
        )
        .col_expr(
            work_order::Column::TotalValue,
            Expr::col(work_order::Column::PartsValue)
                .add(delta)
                .add(Expr::col(work_order::Column::ServiceValue))
                .sub(Expr::col(work_order::Column::DiscountValue)),
        )
        .col_expr(
            work_order::Column::UpdatedAt,
            Expr::value(Some(Utc::now())),
        )
        .filter(work_order::Column::Id.eq(order_id))
        .exec(txn)
        .await?;

    if result.rows_affected == 0 {
        return Err(ServiceError::NotFound(format!(
            "Work order {} not found",
            order_id
        )));
    }

    Ok(())
}

/// Subtracts a removed item's line total from the parts value, floored at
/// zero so rounding or inconsistent prior state cannot accumulate a negative
/// parts value.
async fn subtract_parts_floored(
    txn: &DatabaseTransaction,
    order_id: i32,
    amount: Decimal,
) -> Result<(), ServiceError> {
    let floored_parts = || -> SimpleExpr {
        CaseStatement::new()
            .case(
                Expr::col(work_order::Column::PartsValue).gte(amount),
                Expr::col(work_order::Column::PartsValue).sub(amount),
            )
            .finally(Expr::value(Decimal::ZERO))
            .into()
    };

    let result = WorkOrderEntity::update_many()
        .col_expr(work_order::Column::PartsValue, floored_parts())
        .col_expr(
            work_order::Column::TotalValue,
            floored_parts()
                .add(Expr::col(work_order::Column::ServiceValue))
                .sub(Expr::col(work_order::Column::DiscountValue)),
        )
        .col_expr(
            work_order::Column::UpdatedAt,
            Expr::value(Some(Utc::now())),
        )
        .filter(work_order::Column::Id.eq(order_id))
        .exec(txn)
        .await?;

    if result.rows_affected == 0 {
        return Err(ServiceError::NotFound(format!(
            "Work order {} not found",
            order_id
        )));
    }

    Ok(())
}

/// Returns every line item's quantity to its inventory item. Called on entry
/// to `cancelada`, before the status itself is committed. Order totals are
/// left untouched; cancellation affects stock, not the historical record.
async fn restore_items_to_stock(
    txn: &DatabaseTransaction,
    order_id: i32,
) -> Result<(), ServiceError> {
    let items = WorkOrderItemEntity::find()
        .filter(work_order_item::Column::WorkOrderId.eq(order_id))
        .all(txn)
        .await?;

    for item in items {
        inventory::release(txn, item.inventory_item_id, item.quantity).await?;
    }

    Ok(())
}

/// Produces the next order number for `day` from the atomic per-day counter:
/// `OS<year><month:2><day:2>-<sequence:4>`. The counter upsert takes a row
/// lock, so concurrent creates serialize on it and can never observe the same
/// sequence value.
async fn next_order_number<C>(conn: &C, day: NaiveDate) -> Result<String, ServiceError>
where
    C: ConnectionTrait,
{
    work_order_counter::Entity::insert(work_order_counter::ActiveModel {
        day: Set(day),
        value: Set(1),
    })
    .on_conflict(
        OnConflict::column(work_order_counter::Column::Day)
            .value(
                work_order_counter::Column::Value,
                Expr::col(work_order_counter::Column::Value).add(1),
            )
            .to_owned(),
    )
    .exec_without_returning(conn)
    .await?;

    let counter = work_order_counter::Entity::find_by_id(day)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::InternalError("Work order counter row missing after upsert".to_string())
        })?;

    Ok(format!(
        "OS{}{:02}{:02}-{:04}",
        day.year(),
        day.month(),
        day.day(),
        counter.value
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_number_format_embeds_date_and_sequence() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let formatted = format!("OS{}{:02}{:02}-{:04}", day.year(), day.month(), day.day(), 7);
        assert_eq!(formatted, "OS20240601-0007");
    }

    #[test]
    fn line_total_is_quantity_times_unit_price() {
        use rust_decimal_macros::dec;
        let total = Decimal::from(3) * dec!(12.50);
        assert_eq!(total, dec!(37.50));
    }
}
