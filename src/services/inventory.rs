use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::inventory_item::{self, Entity as InventoryItemEntity, Model as InventoryItemModel},
    errors::ServiceError,
};

/// Decrements an inventory item's on-hand quantity as part of a work order
/// operation. The stock check and the decrement are a single conditional
/// UPDATE, so two concurrent reservations against the same item can never
/// both pass the check and overdraw it. Must be called inside the caller's
/// transaction, before any work order row is written, so that lock
/// acquisition is always inventory item first, work order second.
pub async fn reserve<C>(conn: &C, item_id: i32, quantity: i32) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    let result = InventoryItemEntity::update_many()
        .col_expr(
            inventory_item::Column::Quantity,
            Expr::col(inventory_item::Column::Quantity).sub(quantity),
        )
        .col_expr(
            inventory_item::Column::UpdatedAt,
            Expr::value(Some(Utc::now())),
        )
        .filter(inventory_item::Column::Id.eq(item_id))
        .filter(inventory_item::Column::Quantity.gte(quantity))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let item = InventoryItemEntity::find_by_id(item_id)
            .one(conn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Inventory item {} not found", item_id))
            })?;
        return Err(ServiceError::InsufficientStock {
            item_id,
            requested: quantity,
            available: item.quantity,
        });
    }

    Ok(())
}

/// Increments an inventory item's on-hand quantity (item removal, quantity
/// reduction, or work order cancellation). Unconditional counterpart of
/// [`reserve`]; same transactional and ordering requirements apply.
pub async fn release<C>(conn: &C, item_id: i32, quantity: i32) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    let result = InventoryItemEntity::update_many()
        .col_expr(
            inventory_item::Column::Quantity,
            Expr::col(inventory_item::Column::Quantity).add(quantity),
        )
        .col_expr(
            inventory_item::Column::UpdatedAt,
            Expr::value(Some(Utc::now())),
        )
        .filter(inventory_item::Column::Id.eq(item_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(ServiceError::NotFound(format!(
            "Inventory item {} not found",
            item_id
        )));
    }

    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateInventoryItemRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Code is required"))]
    pub code: String,
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default = "default_minimum_stock")]
    pub minimum_stock: i32,
    #[serde(default)]
    pub cost_price: Decimal,
    #[serde(default)]
    pub sale_price: Decimal,
    pub supplier: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

fn default_minimum_stock() -> i32 {
    5
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateInventoryItemRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    pub category: Option<String>,
    /// Direct quantity edits are allowed here for stocktaking; order-driven
    /// changes go exclusively through [`reserve`] / [`release`].
    pub quantity: i32,
    pub minimum_stock: i32,
    pub cost_price: Decimal,
    pub sale_price: Decimal,
    pub supplier: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// CRUD over the parts catalogue. Stock movements driven by work orders do
/// not go through this service; see [`reserve`] and [`release`].
#[derive(Clone)]
pub struct InventoryService {
    db: Arc<DbPool>,
}

impl InventoryService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(code = %request.code))]
    pub async fn create_item(
        &self,
        request: CreateInventoryItemRequest,
    ) -> Result<InventoryItemModel, ServiceError> {
        request.validate()?;
        if request.quantity < 0 {
            return Err(ServiceError::ValidationError(
                "Quantity cannot be negative".to_string(),
            ));
        }
        if request.cost_price < Decimal::ZERO || request.sale_price < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Prices cannot be negative".to_string(),
            ));
        }

        let existing = InventoryItemEntity::find()
            .filter(inventory_item::Column::Code.eq(request.code.clone()))
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Inventory code {} is already in use",
                request.code
            )));
        }

        let item = inventory_item::ActiveModel {
            name: Set(request.name),
            code: Set(request.code),
            category: Set(request.category),
            quantity: Set(request.quantity),
            minimum_stock: Set(request.minimum_stock),
            cost_price: Set(request.cost_price),
            sale_price: Set(request.sale_price),
            supplier: Set(request.supplier),
            status: Set(request.status),
            notes: Set(request.notes),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!(item_id = item.id, "Inventory item created");
        Ok(item)
    }

    pub async fn get_item(&self, id: i32) -> Result<InventoryItemModel, ServiceError> {
        InventoryItemEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Inventory item {} not found", id)))
    }

    pub async fn find_by_code(&self, code: &str) -> Result<InventoryItemModel, ServiceError> {
        if code.is_empty() {
            return Err(ServiceError::ValidationError(
                "Inventory code is required".to_string(),
            ));
        }
        InventoryItemEntity::find()
            .filter(inventory_item::Column::Code.eq(code))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Inventory item {} not found", code)))
    }

    #[instrument(skip(self))]
    pub async fn list_items(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<InventoryItemModel>, u64), ServiceError> {
        let paginator = InventoryItemEntity::find()
            .order_by_asc(inventory_item::Column::Name)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((items, total))
    }

    /// Items whose on-hand quantity fell below their minimum stock.
    pub async fn list_low_stock(&self) -> Result<Vec<InventoryItemModel>, ServiceError> {
        let items = InventoryItemEntity::find()
            .filter(
                Expr::col(inventory_item::Column::Quantity)
                    .lt(Expr::col(inventory_item::Column::MinimumStock)),
            )
            .order_by_asc(inventory_item::Column::Name)
            .all(&*self.db)
            .await?;
        Ok(items)
    }

    #[instrument(skip(self, request), fields(item_id = id))]
    pub async fn update_item(
        &self,
        id: i32,
        request: UpdateInventoryItemRequest,
    ) -> Result<InventoryItemModel, ServiceError> {
        request.validate()?;
        if request.quantity < 0 {
            return Err(ServiceError::ValidationError(
                "Quantity cannot be negative".to_string(),
            ));
        }
        if request.cost_price < Decimal::ZERO || request.sale_price < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Prices cannot be negative".to_string(),
            ));
        }

        let item = self.get_item(id).await?;

        let mut active: inventory_item::ActiveModel = item.into();
        active.name = Set(request.name);
        active.category = Set(request.category);
        active.quantity = Set(request.quantity);
        active.minimum_stock = Set(request.minimum_stock);
        active.cost_price = Set(request.cost_price);
        active.sale_price = Set(request.sale_price);
        active.supplier = Set(request.supplier);
        active.status = Set(request.status);
        active.notes = Set(request.notes);

        Ok(active.update(&*self.db).await?)
    }

    #[instrument(skip(self), fields(item_id = id))]
    pub async fn delete_item(&self, id: i32) -> Result<(), ServiceError> {
        let item = self.get_item(id).await?;
        inventory_item::ActiveModel::from(item)
            .delete(&*self.db)
            .await?;
        info!(item_id = id, "Inventory item deleted");
        Ok(())
    }
}
