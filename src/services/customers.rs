use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::{
        customer::{self, Entity as CustomerEntity, Model as CustomerModel},
        vehicle::{self, Entity as VehicleEntity, Model as VehicleModel},
        work_order::{self, Entity as WorkOrderEntity},
    },
    errors::ServiceError,
};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CustomerRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Service for managing customers.
#[derive(Clone)]
pub struct CustomerService {
    db: Arc<DbPool>,
}

impl CustomerService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: CustomerRequest) -> Result<CustomerModel, ServiceError> {
        request.validate()?;

        let customer = customer::ActiveModel {
            name: Set(request.name),
            email: Set(request.email),
            phone: Set(request.phone),
            address: Set(request.address),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!(customer_id = customer.id, "Customer created");
        Ok(customer)
    }

    pub async fn get(&self, id: i32) -> Result<CustomerModel, ServiceError> {
        CustomerEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<CustomerModel>, u64), ServiceError> {
        let paginator = CustomerEntity::find()
            .order_by_asc(customer::Column::Name)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await?;
        let customers = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((customers, total))
    }

    #[instrument(skip(self, request), fields(customer_id = id))]
    pub async fn update(
        &self,
        id: i32,
        request: CustomerRequest,
    ) -> Result<CustomerModel, ServiceError> {
        request.validate()?;

        let customer = self.get(id).await?;

        let mut active: customer::ActiveModel = customer.into();
        active.name = Set(request.name);
        active.email = Set(request.email);
        active.phone = Set(request.phone);
        active.address = Set(request.address);
        active.updated_at = Set(Some(chrono::Utc::now()));

        Ok(active.update(&*self.db).await?)
    }

    /// Deletes a customer. Refused while vehicles or work orders still point
    /// at it, to keep the history intact.
    #[instrument(skip(self), fields(customer_id = id))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let customer = self.get(id).await?;

        let vehicle_count = VehicleEntity::find()
            .filter(vehicle::Column::CustomerId.eq(id))
            .count(&*self.db)
            .await?;
        if vehicle_count > 0 {
            return Err(ServiceError::InvalidRelationship(format!(
                "Customer {} still has {} vehicle(s)",
                id, vehicle_count
            )));
        }

        let order_count = WorkOrderEntity::find()
            .filter(work_order::Column::CustomerId.eq(id))
            .count(&*self.db)
            .await?;
        if order_count > 0 {
            return Err(ServiceError::InvalidRelationship(format!(
                "Customer {} still has {} work order(s)",
                id, order_count
            )));
        }

        customer::ActiveModel::from(customer)
            .delete(&*self.db)
            .await?;
        info!(customer_id = id, "Customer deleted");
        Ok(())
    }

    /// Vehicles registered to the customer.
    pub async fn vehicles(&self, id: i32) -> Result<Vec<VehicleModel>, ServiceError> {
        self.get(id).await?;

        Ok(VehicleEntity::find()
            .filter(vehicle::Column::CustomerId.eq(id))
            .order_by_asc(vehicle::Column::LicensePlate)
            .all(&*self.db)
            .await?)
    }
}
