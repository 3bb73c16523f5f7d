use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

/// Lifecycle status of a work order. The wire representation uses the
/// Portuguese tokens expected by existing clients; matching is exact and
/// case-sensitive.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum WorkOrderStatus {
    #[sea_orm(string_value = "aberta")]
    #[serde(rename = "aberta")]
    #[strum(serialize = "aberta")]
    Open,

    #[sea_orm(string_value = "emandamento")]
    #[serde(rename = "emandamento")]
    #[strum(serialize = "emandamento")]
    InProgress,

    #[sea_orm(string_value = "concluida")]
    #[serde(rename = "concluida")]
    #[strum(serialize = "concluida")]
    Completed,

    #[sea_orm(string_value = "cancelada")]
    #[serde(rename = "cancelada")]
    #[strum(serialize = "cancelada")]
    Cancelled,
}

impl WorkOrderStatus {
    /// Terminal statuses admit no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Valid-transition table. A self-transition is always permitted as a
    /// no-op validity check.
    pub fn can_transition_to(&self, to: WorkOrderStatus) -> bool {
        if *self == to {
            return true;
        }
        matches!(
            (self, to),
            (Self::Open, Self::InProgress)
                | (Self::Open, Self::Cancelled)
                | (Self::InProgress, Self::Completed)
                | (Self::InProgress, Self::Cancelled)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate, ToSchema)]
#[schema(as = WorkOrder)]
#[sea_orm(table_name = "work_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub vehicle_id: i32,
    pub customer_id: i32,
    pub employee_id: Option<i32>,

    #[sea_orm(unique)]
    #[validate(length(max = 20, message = "Order number must be at most 20 characters"))]
    pub order_number: String,

    pub entry_date: DateTime<Utc>,
    pub expected_completion: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
    pub status: WorkOrderStatus,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub diagnosis: Option<String>,

    // Monetary fields are derived; callers never set them directly.
    pub parts_value: Decimal,
    pub service_value: Decimal,
    pub discount_value: Decimal,
    pub total_value: Decimal,

    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub performed_services: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id"
    )]
    Vehicle,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
    #[sea_orm(has_many = "super::work_order_item::Entity")]
    Items,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::work_order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn transition_table_allows_only_forward_moves() {
        use WorkOrderStatus::*;

        let allowed = [
            (Open, InProgress),
            (Open, Cancelled),
            (InProgress, Completed),
            (InProgress, Cancelled),
        ];

        for from in WorkOrderStatus::iter() {
            for to in WorkOrderStatus::iter() {
                let expected = from == to || allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "transition {} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn terminal_statuses_admit_no_different_target() {
        use WorkOrderStatus::*;
        for terminal in [Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for to in WorkOrderStatus::iter() {
                if to != terminal {
                    assert!(!terminal.can_transition_to(to));
                }
            }
        }
        assert!(!Open.is_terminal());
        assert!(!InProgress.is_terminal());
    }

    #[test]
    fn status_tokens_are_exact_and_case_sensitive() {
        assert_eq!(
            WorkOrderStatus::from_str("aberta").unwrap(),
            WorkOrderStatus::Open
        );
        assert_eq!(
            WorkOrderStatus::from_str("emandamento").unwrap(),
            WorkOrderStatus::InProgress
        );
        assert_eq!(WorkOrderStatus::Completed.to_string(), "concluida");
        assert_eq!(WorkOrderStatus::Cancelled.to_string(), "cancelada");
        assert!(WorkOrderStatus::from_str("Aberta").is_err());
        assert!(WorkOrderStatus::from_str("open").is_err());
    }
}
