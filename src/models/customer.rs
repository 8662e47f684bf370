use sea_orm::{sea_query::Order, DeriveIden};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Identifiers of the `customer` table
#[derive(DeriveIden, Clone, Copy, Debug)]
pub enum CustomerTable {
    #[sea_orm(iden = "customer")]
    Table,
    #[sea_orm(iden = "CUST_CODE")]
    CustCode,
    #[sea_orm(iden = "OUTSTANDING_AMT")]
    OutstandingAmt,
}

/// A customer row. Columns beyond these two are returned verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Customer {
    #[schema(example = "C00013")]
    pub cust_code: String,
    #[schema(example = 6000.0)]
    pub outstanding_amt: f64,
}

/// Ordering of customers by outstanding amount
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize, ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum SortDirection {
    #[strum(serialize = "ASC")]
    #[serde(rename = "ASC")]
    Ascending,
    #[strum(serialize = "DESC")]
    #[serde(rename = "DESC")]
    Descending,
}

impl SortDirection {
    pub const ALLOWED: [&'static str; 2] = ["ASC", "DESC"];
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => Order::Asc,
            SortDirection::Descending => Order::Desc,
        }
    }
}
