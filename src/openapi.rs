use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{auth, entities, errors, handlers, services};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Workshop API",
        description = r#"
REST backend for a vehicle repair shop: customers, vehicles, employees,
inventory and work orders.

All endpoints except `/health` and `/api/v1/auth/{register,login}` require a
bearer token:

```
Authorization: Bearer <your-jwt-token>
```

Work order statuses use the tokens `aberta`, `emandamento`, `concluida` and
`cancelada`; matching is exact and case-sensitive.
"#
    ),
    components(schemas(
        errors::ErrorResponse,
        entities::work_order::WorkOrderStatus,
        entities::work_order::Model,
        entities::work_order_item::Model,
        entities::inventory_item::Model,
        entities::customer::Model,
        entities::vehicle::Model,
        entities::employee::Model,
        entities::user::Model,
        services::work_orders::CreateWorkOrderRequest,
        services::work_orders::UpdateWorkOrderRequest,
        services::work_orders::AddItemRequest,
        services::work_orders::UpdateItemRequest,
        services::work_orders::WorkOrderItemView,
        services::inventory::CreateInventoryItemRequest,
        services::inventory::UpdateInventoryItemRequest,
        services::customers::CustomerRequest,
        services::vehicles::VehicleRequest,
        services::employees::EmployeeRequest,
        handlers::work_orders::StatusChangeRequest,
        auth::RegisterRequest,
        auth::LoginRequest,
        auth::TokenResponse,
    )),
    tags(
        (name = "auth", description = "Registration and token issuance"),
        (name = "customers", description = "Customer management"),
        (name = "vehicles", description = "Vehicle management"),
        (name = "employees", description = "Employee management"),
        (name = "inventory", description = "Parts catalogue and stock"),
        (name = "work-orders", description = "Work order lifecycle and line items"),
    )
)]
pub struct ApiDoc;

/// Mounts Swagger UI backed by the generated document.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
