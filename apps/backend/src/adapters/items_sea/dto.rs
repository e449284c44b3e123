//! DTOs for items_sea adapter.

/// DTO for inserting a new item.
#[derive(Debug, Clone)]
pub struct ItemCreate {
    pub id: String,
    pub name: String,
    pub value: Option<i32>,
    pub description: Option<String>,
    pub created_by: String,
}

impl ItemCreate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: None,
            description: None,
            created_by: created_by.into(),
        }
    }

    pub fn with_value(mut self, value: Option<i32>) -> Self {
        self.value = value;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}
