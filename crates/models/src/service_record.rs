//! A repair visit. Always owned by exactly one bike (`bike_id`) and ordered
//! within that bike by `position`.
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{bike, bill, dates, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub bike_id: Uuid,
    pub service_name: String,
    pub date_of_service: DateTimeWithTimeZone,
    #[serde(rename = "bill")]
    pub bill_id: Option<Uuid>,
    #[serde(skip)]
    pub position: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Bike, Bill }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Bike => Entity::belongs_to(bike::Entity)
                .from(Column::BikeId)
                .to(bike::Column::Id)
                .into(),
            Relation::Bill => Entity::belongs_to(bill::Entity)
                .from(Column::BillId)
                .to(bill::Column::Id)
                .into(),
        }
    }
}

impl Related<bike::Entity> for Entity {
    fn to() -> RelationDef { Relation::Bike.def() }
}

impl Related<bill::Entity> for Entity {
    fn to() -> RelationDef { Relation::Bill.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_service_name(name: &str) -> Result<String, errors::ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() { return Err(errors::ModelError::Validation("serviceName is required".into())); }
    if trimmed.len() > 128 { return Err(errors::ModelError::Validation("serviceName is too long (<=128)".into())); }
    Ok(trimmed.to_string())
}

/// Position right after the bike's current last service.
pub async fn next_position<C: ConnectionTrait>(db: &C, bike_id: Uuid) -> Result<i32, errors::ModelError> {
    let last = Entity::find()
        .filter(Column::BikeId.eq(bike_id))
        .order_by_desc(Column::Position)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(last.map_or(0, |s| s.position + 1))
}

/// Append a service at the end of the bike's list.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    bike_id: Uuid,
    service_name: &str,
    date_of_service: Option<DateTimeWithTimeZone>,
    bill_id: Option<Uuid>,
) -> Result<Model, errors::ModelError> {
    let service_name = validate_service_name(service_name)?;
    let position = next_position(db, bike_id).await?;
    let now = dates::now();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        bike_id: Set(bike_id),
        service_name: Set(service_name),
        date_of_service: Set(date_of_service.unwrap_or(now)),
        bill_id: Set(bill_id),
        position: Set(position),
        created_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Services of a bike in list order.
pub async fn list_for_bike<C: ConnectionTrait>(db: &C, bike_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::BikeId.eq(bike_id))
        .order_by_asc(Column::Position)
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
