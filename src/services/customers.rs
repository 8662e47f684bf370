use crate::db::{self, DbPool};
use crate::errors::ServiceError;
use crate::models::{CustomerTable, SortDirection};
use sea_orm::{
    sea_query::{Asterisk, Expr, Query},
    ConnectionTrait, JsonValue,
};
use tracing::instrument;

/// `SELECT * FROM customer`
#[instrument(skip(db))]
pub async fn list_customers(db: &DbPool) -> Result<Vec<JsonValue>, ServiceError> {
    let query = Query::select()
        .column(Asterisk)
        .from(CustomerTable::Table)
        .to_owned();
    let stmt = db.get_database_backend().build(&query);
    db::fetch_rows(db, "list_customers", stmt).await
}

/// Rows whose `CUST_CODE` equals `code`; empty when there is none.
#[instrument(skip(db))]
pub async fn get_customer(db: &DbPool, code: &str) -> Result<Vec<JsonValue>, ServiceError> {
    let query = Query::select()
        .column(Asterisk)
        .from(CustomerTable::Table)
        .and_where(Expr::col(CustomerTable::CustCode).eq(code))
        .to_owned();
    let stmt = db.get_database_backend().build(&query);
    db::fetch_rows(db, "get_customer", stmt).await
}

/// Every customer ordered by `OUTSTANDING_AMT`.
#[instrument(skip(db))]
pub async fn list_customers_by_outstanding(
    db: &DbPool,
    direction: SortDirection,
) -> Result<Vec<JsonValue>, ServiceError> {
    let query = Query::select()
        .column(Asterisk)
        .from(CustomerTable::Table)
        .order_by(CustomerTable::OutstandingAmt, direction.into())
        .to_owned();
    let stmt = db.get_database_backend().build(&query);
    db::fetch_rows(db, "list_customers_by_outstanding", stmt).await
}
