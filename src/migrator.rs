//! Programmatic schema migrations, run at startup when `auto_migrate` is set
//! and by the integration test harness against SQLite.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_customers_table::Migration),
            Box::new(m20240601_000002_create_vehicles_table::Migration),
            Box::new(m20240601_000003_create_employees_table::Migration),
            Box::new(m20240601_000004_create_users_table::Migration),
            Box::new(m20240601_000005_create_inventory_items_table::Migration),
            Box::new(m20240601_000006_create_work_orders_table::Migration),
            Box::new(m20240601_000007_create_work_order_items_table::Migration),
            Box::new(m20240601_000008_create_work_order_counters_table::Migration),
        ]
    }
}

mod m20240601_000001_create_customers_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000001_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Customers::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Customers::Email).string_len(100))
                        .col(ColumnDef::new(Customers::Phone).string_len(20))
                        .col(ColumnDef::new(Customers::Address).string())
                        .col(
                            ColumnDef::new(Customers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Customers::UpdatedAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Customers {
        Table,
        Id,
        Name,
        Email,
        Phone,
        Address,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240601_000002_create_vehicles_table {
    use super::m20240601_000001_create_customers_table::Customers;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000002_create_vehicles_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Vehicles::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Vehicles::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Vehicles::CustomerId).integer().not_null())
                        .col(
                            ColumnDef::new(Vehicles::LicensePlate)
                                .string_len(10)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Vehicles::Make).string_len(50))
                        .col(ColumnDef::new(Vehicles::Model).string_len(100))
                        .col(ColumnDef::new(Vehicles::Color).string_len(30))
                        .col(ColumnDef::new(Vehicles::ModelYear).string_len(10))
                        .col(
                            ColumnDef::new(Vehicles::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Vehicles::UpdatedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_vehicles_customer")
                                .from(Vehicles::Table, Vehicles::CustomerId)
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_vehicles_customer_id")
                        .table(Vehicles::Table)
                        .col(Vehicles::CustomerId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Vehicles::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Vehicles {
        Table,
        Id,
        CustomerId,
        LicensePlate,
        Make,
        Model,
        Color,
        ModelYear,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240601_000003_create_employees_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000003_create_employees_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Employees::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Employees::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Employees::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Employees::Phone).string_len(20).not_null())
                        .col(ColumnDef::new(Employees::SecondaryPhone).string_len(20))
                        .col(
                            ColumnDef::new(Employees::Cpf)
                                .string_len(14)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Employees::Address).string())
                        .col(ColumnDef::new(Employees::BirthDate).date())
                        .col(ColumnDef::new(Employees::HireDate).date())
                        .col(ColumnDef::new(Employees::Salary).decimal_len(10, 2))
                        .col(ColumnDef::new(Employees::Role).string_len(50))
                        .col(ColumnDef::new(Employees::Notes).text())
                        .col(
                            ColumnDef::new(Employees::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Employees::UpdatedAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Employees::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Employees {
        Table,
        Id,
        Name,
        Phone,
        SecondaryPhone,
        Cpf,
        Address,
        BirthDate,
        HireDate,
        Salary,
        Role,
        Notes,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240601_000004_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000004_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Users::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Users::Name).string_len(100).not_null())
                        .col(
                            ColumnDef::new(Users::Email)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(
                            ColumnDef::new(Users::Role)
                                .string_len(20)
                                .not_null()
                                .default("user"),
                        )
                        .col(
                            ColumnDef::new(Users::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Users {
        Table,
        Id,
        Name,
        Email,
        PasswordHash,
        Role,
        Active,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240601_000005_create_inventory_items_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000005_create_inventory_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryItems::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::Name)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::Code)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(InventoryItems::Category).string_len(50))
                        .col(
                            ColumnDef::new(InventoryItems::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::MinimumStock)
                                .integer()
                                .not_null()
                                .default(5),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::CostPrice)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::SalePrice)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(InventoryItems::Supplier).string_len(100))
                        .col(ColumnDef::new(InventoryItems::Status).string_len(20))
                        .col(ColumnDef::new(InventoryItems::Notes).text())
                        .col(
                            ColumnDef::new(InventoryItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryItems::UpdatedAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum InventoryItems {
        Table,
        Id,
        Name,
        Code,
        Category,
        Quantity,
        MinimumStock,
        CostPrice,
        SalePrice,
        Supplier,
        Status,
        Notes,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240601_000006_create_work_orders_table {
    use super::m20240601_000001_create_customers_table::Customers;
    use super::m20240601_000002_create_vehicles_table::Vehicles;
    use super::m20240601_000003_create_employees_table::Employees;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000006_create_work_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(WorkOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WorkOrders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(WorkOrders::VehicleId).integer().not_null())
                        .col(ColumnDef::new(WorkOrders::CustomerId).integer().not_null())
                        .col(ColumnDef::new(WorkOrders::EmployeeId).integer())
                        .col(
                            ColumnDef::new(WorkOrders::OrderNumber)
                                .string_len(20)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::EntryDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::ExpectedCompletion).timestamp_with_time_zone(),
                        )
                        .col(ColumnDef::new(WorkOrders::CompletionDate).timestamp_with_time_zone())
                        .col(
                            ColumnDef::new(WorkOrders::Status)
                                .string_len(20)
                                .not_null()
                                .default("aberta"),
                        )
                        .col(ColumnDef::new(WorkOrders::Description).text().not_null())
                        .col(ColumnDef::new(WorkOrders::Diagnosis).text())
                        .col(
                            ColumnDef::new(WorkOrders::PartsValue)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::ServiceValue)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::DiscountValue)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::TotalValue)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(WorkOrders::PaymentMethod).string_len(50))
                        .col(ColumnDef::new(WorkOrders::Notes).text())
                        .col(ColumnDef::new(WorkOrders::PerformedServices).text())
                        .col(
                            ColumnDef::new(WorkOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(WorkOrders::UpdatedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_work_orders_vehicle")
                                .from(WorkOrders::Table, WorkOrders::VehicleId)
                                .to(Vehicles::Table, Vehicles::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_work_orders_customer")
                                .from(WorkOrders::Table, WorkOrders::CustomerId)
                                .to(Customers::Table, Customers::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_work_orders_employee")
                                .from(WorkOrders::Table, WorkOrders::EmployeeId)
                                .to(Employees::Table, Employees::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_work_orders_status")
                        .table(WorkOrders::Table)
                        .col(WorkOrders::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_work_orders_customer_id")
                        .table(WorkOrders::Table)
                        .col(WorkOrders::CustomerId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_work_orders_vehicle_id")
                        .table(WorkOrders::Table)
                        .col(WorkOrders::VehicleId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WorkOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum WorkOrders {
        Table,
        Id,
        VehicleId,
        CustomerId,
        EmployeeId,
        OrderNumber,
        EntryDate,
        ExpectedCompletion,
        CompletionDate,
        Status,
        Description,
        Diagnosis,
        PartsValue,
        ServiceValue,
        DiscountValue,
        TotalValue,
        PaymentMethod,
        Notes,
        PerformedServices,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240601_000007_create_work_order_items_table {
    use super::m20240601_000005_create_inventory_items_table::InventoryItems;
    use super::m20240601_000006_create_work_orders_table::WorkOrders;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000007_create_work_order_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(WorkOrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WorkOrderItems::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(WorkOrderItems::WorkOrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrderItems::InventoryItemId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(WorkOrderItems::Quantity).integer().not_null())
                        .col(
                            ColumnDef::new(WorkOrderItems::UnitPrice)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrderItems::TotalPrice)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrderItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(WorkOrderItems::UpdatedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_work_order_items_work_order")
                                .from(WorkOrderItems::Table, WorkOrderItems::WorkOrderId)
                                .to(WorkOrders::Table, WorkOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_work_order_items_inventory_item")
                                .from(WorkOrderItems::Table, WorkOrderItems::InventoryItemId)
                                .to(InventoryItems::Table, InventoryItems::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_work_order_items_work_order_id")
                        .table(WorkOrderItems::Table)
                        .col(WorkOrderItems::WorkOrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WorkOrderItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum WorkOrderItems {
        Table,
        Id,
        WorkOrderId,
        InventoryItemId,
        Quantity,
        UnitPrice,
        TotalPrice,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240601_000008_create_work_order_counters_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000008_create_work_order_counters_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(WorkOrderCounters::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WorkOrderCounters::Day)
                                .date()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(WorkOrderCounters::Value)
                                .integer()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WorkOrderCounters::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum WorkOrderCounters {
        Table,
        Day,
        Value,
    }
}
