use crate::entities;
use crate::errors::HomesteadError;
use crate::settings::Database as DbCfg;
use base64ct::Encoding;
use chrono::Utc;
use rand::RngCore;
use sea_orm::{
    ActiveModelTrait, Database, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

/// A stored property record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProperty {
    pub name: String,
    pub description: String,
}

/// Partial update; unset fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl From<entities::property::Model> for Property {
    fn from(model: entities::property::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn init(cfg: &DbCfg) -> Result<DatabaseConnection, HomesteadError> {
    let db = Database::connect(&cfg.url).await?;
    Ok(db)
}

pub async fn create_property(
    db: &DatabaseConnection,
    input: NewProperty,
) -> Result<Property, HomesteadError> {
    if input.name.trim().is_empty() {
        return Err(HomesteadError::BadRequest("name must not be empty".into()));
    }
    if input.description.trim().is_empty() {
        return Err(HomesteadError::BadRequest(
            "description must not be empty".into(),
        ));
    }

    let id = random_id();
    let now = Utc::now().timestamp_millis();

    let property = entities::property::ActiveModel {
        id: Set(id.clone()),
        name: Set(input.name.clone()),
        description: Set(input.description.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    property.insert(db).await?;

    Ok(Property {
        id,
        name: input.name,
        description: input.description,
        created_at: now,
        updated_at: now,
    })
}

pub async fn get_property(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<Property>, HomesteadError> {
    use entities::property::Entity;

    let model = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(Property::from))
}

pub async fn list_properties(db: &DatabaseConnection) -> Result<Vec<Property>, HomesteadError> {
    use entities::property::{Column, Entity};

    let models = Entity::find()
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(models.into_iter().map(Property::from).collect())
}

/// Apply a partial update. `created_at` is never touched; `updated_at` is
/// refreshed on every call. Returns `None` when the id does not exist.
pub async fn update_property(
    db: &DatabaseConnection,
    id: &str,
    changes: PropertyChanges,
) -> Result<Option<Property>, HomesteadError> {
    use entities::property::Entity;

    if matches!(&changes.name, Some(n) if n.trim().is_empty()) {
        return Err(HomesteadError::BadRequest("name must not be empty".into()));
    }
    if matches!(&changes.description, Some(d) if d.trim().is_empty()) {
        return Err(HomesteadError::BadRequest(
            "description must not be empty".into(),
        ));
    }

    let Some(model) = Entity::find_by_id(id.to_string()).one(db).await? else {
        return Ok(None);
    };

    let mut property: entities::property::ActiveModel = model.into();
    if let Some(name) = changes.name {
        property.name = Set(name);
    }
    if let Some(description) = changes.description {
        property.description = Set(description);
    }
    property.updated_at = Set(Utc::now().timestamp_millis());

    let updated = property.update(db).await?;
    Ok(Some(updated.into()))
}

/// Returns true if a record was deleted.
pub async fn delete_property(db: &DatabaseConnection, id: &str) -> Result<bool, HomesteadError> {
    use entities::property::Entity;

    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

fn random_id() -> String {
    let mut bytes = [0u8; 24];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64ct::Base64UrlUnpadded::encode_string(&bytes)
}
