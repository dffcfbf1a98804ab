use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use serde::Serialize;

use crate::{dates, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "admin")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub password_algorithm: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<String, errors::ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() { return Err(errors::ModelError::Validation("name is required".into())); }
    if trimmed.len() > 128 { return Err(errors::ModelError::Validation("name is too long (<=128)".into())); }
    Ok(trimmed.to_string())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    password_hash: String,
    algorithm: &str,
) -> Result<Model, errors::ModelError> {
    let name = validate_name(name)?;
    if password_hash.trim().is_empty() {
        return Err(errors::ModelError::Validation("password hash required".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        password_hash: Set(password_hash),
        password_algorithm: Set(algorithm.to_string()),
        created_at: Set(dates::now()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::from_db(e, "admin name already taken"))
}

pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
