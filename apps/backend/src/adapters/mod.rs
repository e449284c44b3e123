//! Database adapters: thin SeaORM wrappers returning `DbErr`.

pub mod items_sea;
