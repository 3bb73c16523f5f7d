use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
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
        employee::{self, Entity as EmployeeEntity, Model as EmployeeModel},
        work_order::{self, Entity as WorkOrderEntity},
    },
    errors::ServiceError,
};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct EmployeeRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "Phone is required"))]
    pub phone: String,
    pub secondary_phone: Option<String>,
    #[validate(length(min = 11, max = 14, message = "CPF must have 11 to 14 characters"))]
    pub cpf: String,
    pub address: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<Decimal>,
    pub role: Option<String>,
    pub notes: Option<String>,
}

/// Service for managing employees.
#[derive(Clone)]
pub struct EmployeeService {
    db: Arc<DbPool>,
}

impl EmployeeService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: EmployeeRequest) -> Result<EmployeeModel, ServiceError> {
        request.validate()?;
        if let Some(salary) = request.salary {
            if salary < Decimal::ZERO {
                return Err(ServiceError::ValidationError(
                    "Salary cannot be negative".to_string(),
                ));
            }
        }

        if self.find_by_cpf(&request.cpf).await?.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "CPF {} is already registered",
                request.cpf
            )));
        }

        let employee = employee::ActiveModel {
            name: Set(request.name),
            phone: Set(request.phone),
            secondary_phone: Set(request.secondary_phone),
            cpf: Set(request.cpf),
            address: Set(request.address),
            birth_date: Set(request.birth_date),
            hire_date: Set(request.hire_date),
            salary: Set(request.salary),
            role: Set(request.role),
            notes: Set(request.notes),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!(employee_id = employee.id, "Employee created");
        Ok(employee)
    }

    pub async fn get(&self, id: i32) -> Result<EmployeeModel, ServiceError> {
        EmployeeEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Employee {} not found", id)))
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<EmployeeModel>, ServiceError> {
        Ok(EmployeeEntity::find()
            .filter(employee::Column::Cpf.eq(cpf))
            .one(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<EmployeeModel>, u64), ServiceError> {
        let paginator = EmployeeEntity::find()
            .order_by_asc(employee::Column::Name)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await?;
        let employees = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((employees, total))
    }

    #[instrument(skip(self, request), fields(employee_id = id))]
    pub async fn update(
        &self,
        id: i32,
        request: EmployeeRequest,
    ) -> Result<EmployeeModel, ServiceError> {
        request.validate()?;
        if let Some(salary) = request.salary {
            if salary < Decimal::ZERO {
                return Err(ServiceError::ValidationError(
                    "Salary cannot be negative".to_string(),
                ));
            }
        }

        let employee = self.get(id).await?;

        if let Some(other) = self.find_by_cpf(&request.cpf).await? {
            if other.id != id {
                return Err(ServiceError::ValidationError(format!(
                    "CPF {} is already registered",
                    request.cpf
                )));
            }
        }

        let mut active: employee::ActiveModel = employee.into();
        active.name = Set(request.name);
        active.phone = Set(request.phone);
        active.secondary_phone = Set(request.secondary_phone);
        active.cpf = Set(request.cpf);
        active.address = Set(request.address);
        active.birth_date = Set(request.birth_date);
        active.hire_date = Set(request.hire_date);
        active.salary = Set(request.salary);
        active.role = Set(request.role);
        active.notes = Set(request.notes);
        active.updated_at = Set(Some(Utc::now()));

        Ok(active.update(&*self.db).await?)
    }

    /// Deletes an employee. Refused while work orders are assigned to them.
    #[instrument(skip(self), fields(employee_id = id))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let employee = self.get(id).await?;

        let order_count = WorkOrderEntity::find()
            .filter(work_order::Column::EmployeeId.eq(id))
            .count(&*self.db)
            .await?;
        if order_count > 0 {
            return Err(ServiceError::InvalidRelationship(format!(
                "Employee {} is still assigned to {} work order(s)",
                id, order_count
            )));
        }

        employee::ActiveModel::from(employee)
            .delete(&*self.db)
            .await?;
        info!(employee_id = id, "Employee deleted");
        Ok(())
    }
}
