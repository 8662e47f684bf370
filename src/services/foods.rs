use super::build_error;
use crate::db::{self, DbPool, WriteOutcome};
use crate::errors::ServiceError;
use crate::models::{FoodNameUpdate, FoodUnitUpdate, Foods, NewFood};
use sea_orm::{
    sea_query::{Asterisk, Expr, Query},
    ConnectionTrait, JsonValue, SqlErr,
};
use tracing::instrument;

/// `SELECT * FROM foods`
#[instrument(skip(db))]
pub async fn list_foods(db: &DbPool) -> Result<Vec<JsonValue>, ServiceError> {
    let query = Query::select()
        .column(Asterisk)
        .from(Foods::Table)
        .to_owned();
    let stmt = db.get_database_backend().build(&query);
    db::fetch_rows(db, "list_foods", stmt).await
}

/// Inserts one row; a duplicate `ITEM_ID` is reported as a conflict.
#[instrument(skip(db), fields(item_id = %food.item_id))]
pub async fn insert_food(db: &DbPool, food: NewFood) -> Result<WriteOutcome, ServiceError> {
    let item_id = food.item_id.clone();
    let mut query = Query::insert();
    query
        .into_table(Foods::Table)
        .columns([Foods::ItemId, Foods::ItemName, Foods::ItemUnit, Foods::CompanyId])
        .values([
            food.item_id.into(),
            food.item_name.into(),
            food.item_unit.into(),
            food.company_id.into(),
        ])
        .map_err(build_error)?;
    let stmt = db.get_database_backend().build(&query);

    match db::execute(db, "insert_food", stmt).await {
        Err(ServiceError::DatabaseError(err)) => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Err(ServiceError::Conflict(format!(
                "food item {} already exists",
                item_id
            ))),
            _ => Err(ServiceError::DatabaseError(err)),
        },
        other => other,
    }
}

/// `UPDATE foods SET ITEM_NAME = ? WHERE ITEM_ID = ?`
#[instrument(skip(db), fields(item_id = %update.item_id))]
pub async fn rename_food(
    db: &DbPool,
    update: FoodNameUpdate,
) -> Result<WriteOutcome, ServiceError> {
    let query = Query::update()
        .table(Foods::Table)
        .value(Foods::ItemName, update.item_name)
        .and_where(Expr::col(Foods::ItemId).eq(update.item_id))
        .to_owned();
    let stmt = db.get_database_backend().build(&query);
    db::execute(db, "rename_food", stmt).await
}

/// `UPDATE foods SET ITEM_UNIT = ? WHERE ITEM_ID = ?`
#[instrument(skip(db), fields(item_id = %update.item_id))]
pub async fn change_food_unit(
    db: &DbPool,
    update: FoodUnitUpdate,
) -> Result<WriteOutcome, ServiceError> {
    let query = Query::update()
        .table(Foods::Table)
        .value(Foods::ItemUnit, update.item_unit)
        .and_where(Expr::col(Foods::ItemId).eq(update.item_id))
        .to_owned();
    let stmt = db.get_database_backend().build(&query);
    db::execute(db, "change_food_unit", stmt).await
}

/// `DELETE FROM foods WHERE ITEM_ID = ?`
#[instrument(skip(db))]
pub async fn delete_food(db: &DbPool, item_id: &str) -> Result<WriteOutcome, ServiceError> {
    let query = Query::delete()
        .from_table(Foods::Table)
        .and_where(Expr::col(Foods::ItemId).eq(item_id))
        .to_owned();
    let stmt = db.get_database_backend().build(&query);
    db::execute(db, "delete_food", stmt).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, DbErr, MockDatabase, MockExecResult, Transaction};

    fn exec_ok(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn insert_binds_every_column() {
        let db = MockDatabase::new(DbBackend::MySql)
            .append_exec_results([exec_ok(1)])
            .into_connection();

        let outcome = insert_food(
            &db,
            NewFood {
                item_id: "9".into(),
                item_name: "Biryani".into(),
                item_unit: "Pcs".into(),
                company_id: "99".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(outcome.affected_rows, 1);

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DbBackend::MySql,
                "INSERT INTO `foods` (`ITEM_ID`, `ITEM_NAME`, `ITEM_UNIT`, `COMPANY_ID`) VALUES (?, ?, ?, ?)",
                ["9".into(), "Biryani".into(), "Pcs".into(), "99".into()]
            )]
        );
    }

    #[tokio::test]
    async fn updates_touch_a_single_column() {
        let db = MockDatabase::new(DbBackend::MySql)
            .append_exec_results([exec_ok(1), exec_ok(1)])
            .into_connection();

        rename_food(
            &db,
            FoodNameUpdate {
                item_id: "9".into(),
                item_name: "Icecream".into(),
            },
        )
        .await
        .unwrap();
        change_food_unit(
            &db,
            FoodUnitUpdate {
                item_id: "9".into(),
                item_unit: "Ltr".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(
            db.into_transaction_log(),
            [
                Transaction::from_sql_and_values(
                    DbBackend::MySql,
                    "UPDATE `foods` SET `ITEM_NAME` = ? WHERE `ITEM_ID` = ?",
                    ["Icecream".into(), "9".into()]
                ),
                Transaction::from_sql_and_values(
                    DbBackend::MySql,
                    "UPDATE `foods` SET `ITEM_UNIT` = ? WHERE `ITEM_ID` = ?",
                    ["Ltr".into(), "9".into()]
                ),
            ]
        );
    }

    #[tokio::test]
    async fn delete_binds_the_id() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([exec_ok(0)])
            .into_connection();

        let outcome = delete_food(&db, "9; DROP TABLE foods").await.unwrap();
        assert_eq!(outcome.affected_rows, 0);
        assert_eq!(outcome.insert_id, None);

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DbBackend::Postgres,
                r#"DELETE FROM "foods" WHERE "ITEM_ID" = $1"#,
                ["9; DROP TABLE foods".into()]
            )]
        );
    }

    #[tokio::test]
    async fn list_selects_every_column() {
        let db = MockDatabase::new(DbBackend::MySql)
            .append_query_results([Vec::<std::collections::BTreeMap<&str, sea_orm::Value>>::new()])
            .into_connection();

        let rows = list_foods(&db).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DbBackend::MySql,
                "SELECT * FROM `foods`",
                []
            )]
        );
    }

    #[tokio::test]
    async fn insert_failure_stays_a_backend_error() {
        let db = MockDatabase::new(DbBackend::MySql)
            .append_exec_errors([DbErr::Custom("lost connection".into())])
            .into_connection();

        let err = insert_food(
            &db,
            NewFood {
                item_id: "1".into(),
                item_name: "Tea".into(),
                item_unit: "Cup".into(),
                company_id: "1".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::DatabaseError(_)));
    }
}
