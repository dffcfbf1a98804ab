use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{dates, errors};

/// A service request from the public form; not linked to any bike record.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub bike: Option<String>,
    pub service: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: Option<String>,
    email: Option<String>,
    contact: Option<String>,
    bike: Option<String>,
    service: Option<String>,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        email: Set(email),
        contact: Set(contact),
        bike: Set(bike),
        service: Set(service),
        created_at: Set(dates::now()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
