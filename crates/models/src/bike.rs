use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{dates, errors, service_record};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bike")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub bike_no: String,
    pub owner: String,
    pub contact_no: String,
    pub date_of_reg: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Services,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Services => Entity::has_many(service_record::Entity).into() }
    }
}

impl Related<service_record::Entity> for Entity {
    fn to() -> RelationDef { Relation::Services.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_bike_no(bike_no: &str) -> Result<String, errors::ModelError> {
    let trimmed = bike_no.trim();
    if trimmed.is_empty() { return Err(errors::ModelError::Validation("bikeNo is required".into())); }
    if trimmed.len() > 32 { return Err(errors::ModelError::Validation("bikeNo is too long (<=32)".into())); }
    Ok(trimmed.to_string())
}

pub fn validate_owner(owner: &str) -> Result<String, errors::ModelError> {
    let trimmed = owner.trim();
    if trimmed.is_empty() { return Err(errors::ModelError::Validation("owner is required".into())); }
    if trimmed.len() > 128 { return Err(errors::ModelError::Validation("owner is too long (<=128)".into())); }
    Ok(trimmed.to_string())
}

/// Exactly ten ASCII digits.
pub fn validate_contact_no(contact_no: &str) -> Result<String, errors::ModelError> {
    let trimmed = contact_no.trim();
    if trimmed.len() != 10 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(errors::ModelError::Validation("contactNo must be exactly 10 digits".into()));
    }
    Ok(trimmed.to_string())
}

pub fn parse_date_of_reg(raw: &str) -> Result<Date, errors::ModelError> {
    dates::parse_date("dateOfReg", raw)
}

/// Insert an already validated bike.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    bike_no: &str,
    owner: &str,
    contact_no: &str,
    date_of_reg: Date,
) -> Result<Model, errors::ModelError> {
    let bike_no = validate_bike_no(bike_no)?;
    let owner = validate_owner(owner)?;
    let contact_no = validate_contact_no(contact_no)?;
    let now = dates::now();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        bike_no: Set(bike_no),
        owner: Set(owner),
        contact_no: Set(contact_no),
        date_of_reg: Set(date_of_reg),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::from_db(e, "bikeNo already registered"))
}
