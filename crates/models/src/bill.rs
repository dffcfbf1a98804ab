use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{bill_entry, dates, errors, service_record};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bill")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub bill_date: DateTimeWithTimeZone,
    /// Caller-supplied; entry mutations never rewrite it.
    pub total_amount: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Entries, Service }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Entries => Entity::has_many(bill_entry::Entity).into(),
            Relation::Service => Entity::has_one(service_record::Entity).into(),
        }
    }
}

impl Related<bill_entry::Entity> for Entity {
    fn to() -> RelationDef { Relation::Entries.def() }
}

impl Related<service_record::Entity> for Entity {
    fn to() -> RelationDef { Relation::Service.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_total_amount(amount: f64) -> Result<f64, errors::ModelError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(errors::ModelError::Validation("totalAmount must be a non-negative number".into()));
    }
    if amount > bill_entry::MAX_AMOUNT * bill_entry::MAX_QUANTITY {
        return Err(errors::ModelError::Validation("totalAmount is too large".into()));
    }
    Ok(amount)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    bill_date: Option<DateTimeWithTimeZone>,
    total_amount: f64,
) -> Result<Model, errors::ModelError> {
    let total_amount = validate_total_amount(total_amount)?;
    let now = dates::now();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        bill_date: Set(bill_date.unwrap_or(now)),
        total_amount: Set(total_amount),
        created_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
