use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A stocked part. `quantity` is adjusted by the inventory ledger in lockstep
/// with work order item operations and must never go negative through them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate, ToSchema)]
#[schema(as = InventoryItem)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[sea_orm(unique)]
    #[validate(length(min = 1, max = 100, message = "Code is required"))]
    pub code: String,

    pub category: Option<String>,
    pub quantity: i32,
    pub minimum_stock: i32,
    pub cost_price: Decimal,
    pub sale_price: Decimal,
    pub supplier: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// True when on-hand quantity fell below the configured minimum.
    pub fn needs_restock(&self) -> bool {
        self.quantity < self.minimum_stock
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::work_order_item::Entity")]
    WorkOrderItems,
}

impl Related<super::work_order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkOrderItems.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        let now = Utc::now();

        if insert {
            if let ActiveValue::NotSet = active_model.created_at {
                active_model.created_at = Set(now);
            }
        }
        active_model.updated_at = Set(Some(now));

        Ok(active_model)
    }
}
