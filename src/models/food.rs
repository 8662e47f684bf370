use sea_orm::DeriveIden;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifiers of the `foods` table
#[derive(DeriveIden, Clone, Copy, Debug)]
pub enum Foods {
    Table,
    #[sea_orm(iden = "ITEM_ID")]
    ItemId,
    #[sea_orm(iden = "ITEM_NAME")]
    ItemName,
    #[sea_orm(iden = "ITEM_UNIT")]
    ItemUnit,
    #[sea_orm(iden = "COMPANY_ID")]
    CompanyId,
}

/// A food item as stored in the `foods` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Food {
    #[schema(example = "9")]
    pub item_id: String,
    #[schema(example = "Biryani")]
    pub item_name: String,
    #[schema(example = "Pcs")]
    pub item_unit: String,
    #[schema(example = "99")]
    pub company_id: String,
}

/// Body of `POST /food`
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewFood {
    #[schema(example = "9")]
    pub item_id: String,
    #[schema(example = "Biryani")]
    pub item_name: String,
    #[schema(example = "Pcs")]
    pub item_unit: String,
    #[schema(example = "99")]
    pub company_id: String,
}

/// Body of `PUT /food`: renames an item
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FoodNameUpdate {
    #[schema(example = "9")]
    pub item_id: String,
    #[schema(example = "Icecream")]
    pub item_name: String,
}

/// Body of `PATCH /foods`: changes the unit of an item
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FoodUnitUpdate {
    #[schema(example = "9")]
    pub item_id: String,
    #[schema(example = "Ltr")]
    pub item_unit: String,
}
