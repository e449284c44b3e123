pub mod items;

pub use items::Entity as Items;
