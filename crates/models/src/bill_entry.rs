use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{bill, dates, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bill_entry")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub bill_id: Uuid,
    pub description: String,
    pub amount: f64,
    pub quantity: f64,
    #[serde(skip)]
    pub position: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Bill }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Bill => Entity::belongs_to(bill::Entity)
                .from(Column::BillId)
                .to(bill::Column::Id)
                .into(),
        }
    }
}

impl Related<bill::Entity> for Entity {
    fn to() -> RelationDef { Relation::Bill.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_description(description: &str) -> Result<String, errors::ModelError> {
    let trimmed = description.trim();
    if trimmed.is_empty() { return Err(errors::ModelError::Validation("description is required".into())); }
    if trimmed.len() > 256 { return Err(errors::ModelError::Validation("description is too long (<=256)".into())); }
    Ok(trimmed.to_string())
}

/// Largest absolute line amount accepted.
pub const MAX_AMOUNT: f64 = 1e12;
/// Largest quantity accepted; with `MAX_AMOUNT` keeps `amount * quantity` finite.
pub const MAX_QUANTITY: f64 = 1e6;

pub fn validate_amount(amount: f64) -> Result<f64, errors::ModelError> {
    if !amount.is_finite() { return Err(errors::ModelError::Validation("amount must be a number".into())); }
    if amount.abs() > MAX_AMOUNT {
        return Err(errors::ModelError::Validation(format!("amount must be within ±{MAX_AMOUNT}")));
    }
    Ok(amount)
}

pub fn validate_quantity(quantity: f64) -> Result<f64, errors::ModelError> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(errors::ModelError::Validation("quantity must be a positive number".into()));
    }
    if quantity > MAX_QUANTITY {
        return Err(errors::ModelError::Validation(format!("quantity must be at most {MAX_QUANTITY}")));
    }
    Ok(quantity)
}

/// Sum of `amount * quantity`.
pub fn entries_total(entries: &[Model]) -> f64 {
    entries.iter().map(|e| e.amount * e.quantity).sum()
}

/// Append an entry at the end of the bill's list.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    bill_id: Uuid,
    description: &str,
    amount: f64,
    quantity: f64,
) -> Result<Model, errors::ModelError> {
    let description = validate_description(description)?;
    let amount = validate_amount(amount)?;
    let quantity = validate_quantity(quantity)?;
    let last = Entity::find()
        .filter(Column::BillId.eq(bill_id))
        .order_by_desc(Column::Position)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        bill_id: Set(bill_id),
        description: Set(description),
        amount: Set(amount),
        quantity: Set(quantity),
        position: Set(last.map_or(0, |e| e.position + 1)),
        created_at: Set(dates::now()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Entries of the given bills, each bill's entries in list order.
pub async fn list_for_bills<C: ConnectionTrait>(db: &C, bill_ids: Vec<Uuid>) -> Result<Vec<Model>, errors::ModelError> {
    if bill_ids.is_empty() { return Ok(Vec::new()); }
    Entity::find()
        .filter(Column::BillId.is_in(bill_ids))
        .order_by_asc(Column::BillId)
        .order_by_asc(Column::Position)
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
