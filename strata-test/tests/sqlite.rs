use chrono::NaiveDate;
use strata::{
    ddl::{Column, ColumnType, DatabaseOptions, Index, Table},
    error::Error,
    LedgerEntry,
};
use strata_test::run_test;

fn users() -> Table {
    Table::new("users")
        .column(Column::new("email", ColumnType::String))
        .column(Column::new("age", ColumnType::Integer).default_value(0))
        .index(Index::new(["email"]).unique())
        .index(Index::new(["age"]))
}

#[tokio::test]
async fn test_ledger_ensured_on_open() {
    run_test(|adapter| async move {
        assert!(adapter.has_table("strata_log").await.unwrap());
        assert!(adapter.ledger().versions().await.unwrap().is_empty());

        // Idempotent
        adapter.ledger().ensure().await.unwrap();
    })
    .await;
}

#[tokio::test]
async fn test_table_lifecycle() {
    run_test(|adapter| async move {
        assert!(!adapter.has_table("users").await.unwrap());

        adapter.create_table(&users()).await.unwrap();
        assert!(adapter.has_table("users").await.unwrap());
        assert!(adapter.has_table("USERS").await.unwrap());
        assert!(adapter.has_column("users", "id").await.unwrap());
        assert!(adapter.has_column("users", "Email").await.unwrap());
        assert!(adapter.has_index("users", &["email"]).await.unwrap());
        assert!(adapter.has_index("users", &["age"]).await.unwrap());

        adapter.rename_table("users", "people").await.unwrap();
        assert!(!adapter.has_table("users").await.unwrap());
        assert!(adapter.has_table("people").await.unwrap());

        adapter.drop_table("people").await.unwrap();
        assert!(!adapter.has_table("people").await.unwrap());

        let res = adapter.drop_table("people").await;
        assert!(matches!(res, Err(Error::Execution(_))));
    })
    .await;
}

#[tokio::test]
async fn test_column_lifecycle() {
    run_test(|adapter| async move {
        adapter.create_table(&users()).await.unwrap();

        adapter
            .add_column("users", &Column::new("nick", ColumnType::String).null(true))
            .await
            .unwrap();
        assert!(adapter.has_column("users", "nick").await.unwrap());

        adapter
            .rename_column("users", "nick", "nickname")
            .await
            .unwrap();
        assert!(!adapter.has_column("users", "nick").await.unwrap());
        let column = adapter
            .inspector()
            .column("users", "nickname")
            .await
            .unwrap()
            .unwrap();
        assert!(column.nullable);
        assert_eq!(column.ty, "VARCHAR(255)");

        let res = adapter.rename_column("users", "missing", "other").await;
        assert!(matches!(res, Err(Error::ColumnNotFound(_))));

        adapter.drop_column("users", "nickname").await.unwrap();
        assert!(!adapter.has_column("users", "nickname").await.unwrap());
    })
    .await;
}

#[tokio::test]
async fn test_index_lifecycle() {
    run_test(|adapter| async move {
        adapter
            .create_table(
                &Table::new("events")
                    .column(Column::new("kind", ColumnType::String))
                    .column(Column::new("at", ColumnType::DateTime))
                    .column(Column::new("source", ColumnType::String)),
            )
            .await
            .unwrap();
        assert!(!adapter.has_index("events", &["kind"]).await.unwrap());

        adapter
            .add_index("events", &Index::new(["kind", "at", "source"]))
            .await
            .unwrap();
        assert!(adapter.has_index("events", &["at", "kind"]).await.unwrap());

        let indexes = adapter.inspector().indexes("events").await.unwrap();
        assert_eq!(indexes.len(), 1);
        assert_eq!(indexes[0].name, "events_kind_at_source_index");
        assert_eq!(indexes[0].columns, vec!["kind", "at", "source"]);

        let res = adapter.drop_index("events", &["kind", "at"]).await;
        assert!(matches!(res, Err(Error::IndexNotFound(_))));

        adapter
            .drop_index("events", &["source", "kind", "at"])
            .await
            .unwrap();
        assert!(!adapter.has_index("events", &["kind"]).await.unwrap());

        adapter
            .add_index("events", &Index::new(["source"]).unique().name("events_source"))
            .await
            .unwrap();
        let indexes = adapter.inspector().indexes("events").await.unwrap();
        assert!(indexes[0].unique);

        adapter
            .drop_index_by_name("events", "events_source")
            .await
            .unwrap();
        assert!(!adapter.has_index("events", &["source"]).await.unwrap());
    })
    .await;
}

#[tokio::test]
async fn test_ledger_records() {
    run_test(|adapter| async move {
        let at = |h: u32| {
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        let ledger = adapter.ledger();

        for version in [20240301120000u64, 20240101000000] {
            ledger
                .record(&LedgerEntry {
                    version,
                    start_time: at(9),
                    end_time: at(10),
                })
                .await
                .unwrap();
        }

        assert_eq!(
            ledger.versions().await.unwrap(),
            vec![20240101000000, 20240301120000]
        );
        let entries = ledger.entries().await.unwrap();
        assert_eq!(entries[1].start_time, at(9));
        assert_eq!(entries[1].end_time, at(10));

        assert!(ledger.remove(20240101000000).await.unwrap());
        assert!(!ledger.remove(20240101000000).await.unwrap());
        assert_eq!(ledger.versions().await.unwrap(), vec![20240301120000]);
    })
    .await;
}

#[tokio::test]
async fn test_databases_unsupported() {
    run_test(|adapter| async move {
        let res = adapter
            .create_database("shop", &DatabaseOptions::default())
            .await;
        assert!(matches!(res, Err(Error::Unsupported(_))));

        let res = adapter.drop_database("shop").await;
        assert!(matches!(res, Err(Error::Unsupported(_))));
    })
    .await;
}

#[tokio::test]
async fn test_schema_qualified_names() {
    run_test(|adapter| async move {
        adapter
            .create_table(
                &Table::new("main.users")
                    .column(Column::new("email", ColumnType::String))
                    .column(Column::new("age", ColumnType::Integer).null(true))
                    .index(Index::new(["age"])),
            )
            .await
            .unwrap();
        assert!(adapter.has_table("main.users").await.unwrap());
        assert!(adapter.has_column("main.users", "email").await.unwrap());
        assert!(adapter.has_index("main.users", &["age"]).await.unwrap());

        adapter
            .add_index("main.users", &Index::new(["email"]).unique())
            .await
            .unwrap();
        assert!(adapter.has_index("main.users", &["email"]).await.unwrap());
        adapter
            .drop_index("main.users", &["email"])
            .await
            .unwrap();
        assert!(!adapter.has_index("main.users", &["email"]).await.unwrap());

        adapter
            .rename_column("main.users", "email", "mail")
            .await
            .unwrap();
        assert!(adapter.has_column("main.users", "mail").await.unwrap());

        adapter
            .rename_table("main.users", "main.people")
            .await
            .unwrap();
        assert!(adapter.has_table("main.people").await.unwrap());
        assert!(!adapter.has_table("main.users").await.unwrap());

        adapter.drop_table("main.people").await.unwrap();
        assert!(!adapter.has_table("people").await.unwrap());
    })
    .await;
}
