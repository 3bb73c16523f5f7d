use chrono::Utc;
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
        customer::Entity as CustomerEntity,
        vehicle::{self, Entity as VehicleEntity, Model as VehicleModel},
        work_order::{self, Entity as WorkOrderEntity},
    },
    errors::ServiceError,
};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct VehicleRequest {
    #[validate(range(min = 1, message = "Customer is required"))]
    pub customer_id: i32,
    #[validate(length(min = 1, max = 10, message = "License plate is required"))]
    pub license_plate: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub model_year: Option<String>,
}

/// Service for managing vehicles. Every vehicle belongs to a customer.
#[derive(Clone)]
pub struct VehicleService {
    db: Arc<DbPool>,
}

impl VehicleService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(license_plate = %request.license_plate))]
    pub async fn create(&self, request: VehicleRequest) -> Result<VehicleModel, ServiceError> {
        request.validate()?;

        CustomerEntity::find_by_id(request.customer_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Customer {} not found", request.customer_id))
            })?;

        if self
            .find_by_plate_opt(&request.license_plate)
            .await?
            .is_some()
        {
            return Err(ServiceError::ValidationError(format!(
                "License plate {} is already registered",
                request.license_plate
            )));
        }

        let vehicle = vehicle::ActiveModel {
            customer_id: Set(request.customer_id),
            license_plate: Set(request.license_plate),
            make: Set(request.make),
            model: Set(request.model),
            color: Set(request.color),
            model_year: Set(request.model_year),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!(vehicle_id = vehicle.id, "Vehicle created");
        Ok(vehicle)
    }

    pub async fn get(&self, id: i32) -> Result<VehicleModel, ServiceError> {
        VehicleEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Vehicle {} not found", id)))
    }

    pub async fn find_by_plate(&self, plate: &str) -> Result<VehicleModel, ServiceError> {
        if plate.is_empty() {
            return Err(ServiceError::ValidationError(
                "License plate is required".to_string(),
            ));
        }
        self.find_by_plate_opt(plate)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Vehicle {} not found", plate)))
    }

    async fn find_by_plate_opt(&self, plate: &str) -> Result<Option<VehicleModel>, ServiceError> {
        Ok(VehicleEntity::find()
            .filter(vehicle::Column::LicensePlate.eq(plate))
            .one(&*self.db)
            .await?)
    }

    pub async fn find_by_customer(
        &self,
        customer_id: i32,
    ) -> Result<Vec<VehicleModel>, ServiceError> {
        CustomerEntity::find_by_id(customer_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", customer_id)))?;

        Ok(VehicleEntity::find()
            .filter(vehicle::Column::CustomerId.eq(customer_id))
            .order_by_asc(vehicle::Column::LicensePlate)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<VehicleModel>, u64), ServiceError> {
        let paginator = VehicleEntity::find()
            .order_by_asc(vehicle::Column::LicensePlate)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await?;
        let vehicles = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((vehicles, total))
    }

    #[instrument(skip(self, request), fields(vehicle_id = id))]
    pub async fn update(
        &self,
        id: i32,
        request: VehicleRequest,
    ) -> Result<VehicleModel, ServiceError> {
        request.validate()?;

        let vehicle = self.get(id).await?;

        CustomerEntity::find_by_id(request.customer_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Customer {} not found", request.customer_id))
            })?;

        if let Some(other) = self.find_by_plate_opt(&request.license_plate).await? {
            if other.id != id {
                return Err(ServiceError::ValidationError(format!(
                    "License plate {} is already registered",
                    request.license_plate
                )));
            }
        }

        let mut active: vehicle::ActiveModel = vehicle.into();
        active.customer_id = Set(request.customer_id);
        active.license_plate = Set(request.license_plate);
        active.make = Set(request.make);
        active.model = Set(request.model);
        active.color = Set(request.color);
        active.model_year = Set(request.model_year);
        active.updated_at = Set(Some(Utc::now()));

        Ok(active.update(&*self.db).await?)
    }

    /// Deletes a vehicle. Refused while work orders reference it.
    #[instrument(skip(self), fields(vehicle_id = id))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let vehicle = self.get(id).await?;

        let order_count = WorkOrderEntity::find()
            .filter(work_order::Column::VehicleId.eq(id))
            .count(&*self.db)
            .await?;
        if order_count > 0 {
            return Err(ServiceError::InvalidRelationship(format!(
                "Vehicle {} still has {} work order(s)",
                id, order_count
            )));
        }

        vehicle::ActiveModel::from(vehicle).delete(&*self.db).await?;
        info!(vehicle_id = id, "Vehicle deleted");
        Ok(())
    }
}
