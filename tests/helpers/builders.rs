use homestead::storage;
use sea_orm::DatabaseConnection;

/// Builder for creating test property records
pub struct PropertyBuilder {
    name: String,
    description: String,
}

impl PropertyBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: "A test property".to_string(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub async fn create(self, db: &DatabaseConnection) -> storage::Property {
        storage::create_property(
            db,
            storage::NewProperty {
                name: self.name,
                description: self.description,
            },
        )
        .await
        .expect("Failed to create test property")
    }
}
