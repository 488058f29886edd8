use inkwell::{
    Catalog, Change, Config, Error, LogicalType, MemoryConnection, RelationShape, Session,
    StorageType, WriteTarget, reconcile,
};

const DB: &str = "local::DuckDuckDatabase";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("inkwell=debug")
        .with_test_writer()
        .try_init();
}

fn shape(columns: &[(&str, LogicalType)]) -> RelationShape {
    columns.iter().cloned().collect()
}

fn column_names(session: &Session, schema: &str, table: &str) -> Vec<String> {
    session
        .catalog(DB)
        .and_then(|c| c.database().get_table(schema, table))
        .map(|t| t.column_names().into_iter().map(String::from).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_new_schema_emits_schema_and_table_ddl() {
    init_tracing();
    let mut session = Session::default();
    let conn = MemoryConnection::new();

    let result = session
        .write(
            &conn,
            &[DB, "s1", "t1"],
            &shape(&[("a", LogicalType::Integer), ("b", LogicalType::string())]),
        )
        .await
        .unwrap();

    assert!(matches!(result.change, Some(Change::CreateSchema(_))));
    assert_eq!(result.statements.len(), 2);
    assert_eq!(result.statements, conn.executed());
    insta::assert_snapshot!(conn.executed().join("\n"), @r"
    DROP SCHEMA IF EXISTS s1; CREATE SCHEMA s1;
    CREATE OR REPLACE TABLE s1.t1 (a INTEGER, b VARCHAR(1024));
    ");
}

#[tokio::test]
async fn test_two_segment_path_uses_default_schema() {
    let relation = shape(&[("x", LogicalType::Float)]);

    let mut short = Session::default();
    let short_conn = MemoryConnection::new();
    short.write(&short_conn, &[DB, "t1"], &relation).await.unwrap();

    let mut long = Session::default();
    let long_conn = MemoryConnection::new();
    long.write(&long_conn, &[DB, "default", "t1"], &relation)
        .await
        .unwrap();

    assert_eq!(short_conn.executed(), long_conn.executed());
    assert_eq!(
        short.catalog(DB).unwrap().database(),
        long.catalog(DB).unwrap().database()
    );
}

#[tokio::test]
async fn test_default_schema_is_quoted_everywhere() {
    let mut session = Session::default();
    let conn = MemoryConnection::new();

    session
        .write(&conn, &[DB, "t1"], &shape(&[("a", LogicalType::Boolean)]))
        .await
        .unwrap();
    session
        .write(&conn, &[DB, "t1"], &shape(&[("b", LogicalType::Date)]))
        .await
        .unwrap();

    insta::assert_snapshot!(conn.executed().join("\n"), @r#"
    DROP SCHEMA IF EXISTS "default"; CREATE SCHEMA "default";
    CREATE OR REPLACE TABLE "default".t1 (a BOOLEAN);
    ALTER TABLE "default".t1 ADD COLUMN IF NOT EXISTS b DATE;
    "#);
}

#[tokio::test]
async fn test_incremental_write_appends_missing_columns_in_order() {
    init_tracing();
    let mut session = Session::default();
    let conn = MemoryConnection::new();
    let path = [DB, "s1", "t1"];

    session
        .write(
            &conn,
            &path,
            &shape(&[("a", LogicalType::Integer), ("b", LogicalType::Integer)]),
        )
        .await
        .unwrap();
    conn.take();

    let result = session
        .write(
            &conn,
            &path,
            &shape(&[
                ("b", LogicalType::Integer),
                (
                    "c",
                    LogicalType::Decimal {
                        precision: Some(10),
                        scale: Some(2),
                    },
                ),
                ("d", LogicalType::DateTime),
            ]),
        )
        .await
        .unwrap();

    insta::assert_snapshot!(result.statements.join("\n"), @r"
    ALTER TABLE s1.t1 ADD COLUMN IF NOT EXISTS c DECIMAL(10,2);
    ALTER TABLE s1.t1 ADD COLUMN IF NOT EXISTS d TIMESTAMP;
    ");
    assert_eq!(column_names(&session, "s1", "t1"), vec!["a", "b", "c", "d"]);

    let compiled = session.compiled(DB).unwrap();
    let d = compiled.resolve_column("s1", "t1", "d").unwrap();
    assert_eq!(d.ordinal, 3);
    assert_eq!(d.data_type, StorageType::Timestamp);
    assert_eq!(d.logical_type, LogicalType::DateTime);
    assert!(d.nullable);
}

#[tokio::test]
async fn test_repeated_write_is_a_noop() {
    let mut session = Session::default();
    let conn = MemoryConnection::new();
    let relation = shape(&[("a", LogicalType::Integer), ("b", LogicalType::Number)]);

    session.write(&conn, &[DB, "s1", "t1"], &relation).await.unwrap();
    let before = session.catalog(DB).unwrap().database().clone();
    conn.take();

    let result = session.write(&conn, &[DB, "s1", "t1"], &relation).await.unwrap();
    assert!(result.is_noop());
    assert!(result.statements.is_empty());
    assert!(conn.executed().is_empty());
    assert_eq!(session.catalog(DB).unwrap().database(), &before);
}

#[tokio::test]
async fn test_new_table_in_existing_schema() {
    let mut session = Session::default();
    let conn = MemoryConnection::new();

    session
        .write(&conn, &[DB, "s1", "t1"], &shape(&[("a", LogicalType::Integer)]))
        .await
        .unwrap();
    conn.take();

    let result = session
        .write(&conn, &[DB, "s1", "t2"], &shape(&[("z", LogicalType::StrictTime)]))
        .await
        .unwrap();

    assert!(matches!(result.change, Some(Change::CreateTable { .. })));
    insta::assert_snapshot!(
        result.statements.join("\n"),
        @"CREATE OR REPLACE TABLE s1.t2 (z TIME);"
    );

    let schema = session.catalog(DB).unwrap().database().get_schema("s1").unwrap();
    let tables: Vec<&str> = schema.iter_tables().map(|t| t.name.as_str()).collect();
    assert_eq!(tables, vec!["t1", "t2"]);
}

#[tokio::test]
async fn test_type_conflict_keeps_existing_type() {
    init_tracing();
    let mut session = Session::default();
    let conn = MemoryConnection::new();

    session
        .write(&conn, &[DB, "s1", "t1"], &shape(&[("a", LogicalType::Integer)]))
        .await
        .unwrap();
    conn.take();

    let result = session
        .write(&conn, &[DB, "s1", "t1"], &shape(&[("a", LogicalType::string())]))
        .await
        .unwrap();

    assert!(result.is_noop());
    assert!(conn.executed().is_empty());
    assert_eq!(result.type_conflicts.len(), 1);
    let conflict = &result.type_conflicts[0];
    assert_eq!(conflict.column, "a");
    assert_eq!(conflict.existing, StorageType::Integer);
    assert_eq!(conflict.requested, StorageType::Varchar { size: 1024 });

    let column = session
        .compiled(DB)
        .unwrap()
        .resolve_column("s1", "t1", "a")
        .unwrap();
    assert_eq!(column.data_type, StorageType::Integer);
}

#[tokio::test]
async fn test_unsupported_type_changes_nothing() {
    let mut session = Session::default();
    let conn = MemoryConnection::new();

    session
        .write(&conn, &[DB, "s1", "t1"], &shape(&[("a", LogicalType::Integer)]))
        .await
        .unwrap();
    let before = session.catalog(DB).unwrap().database().clone();
    conn.take();

    let err = session
        .write(
            &conn,
            &[DB, "s1", "t1"],
            &shape(&[
                ("b", LogicalType::Integer),
                ("person", LogicalType::Named("model::Person".into())),
            ]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnsupportedType { ref column, .. } if column == "person"));
    assert!(conn.executed().is_empty());
    assert_eq!(session.catalog(DB).unwrap().database(), &before);
}

#[tokio::test]
async fn test_failed_first_write_registers_no_catalog() {
    let mut session = Session::default();
    let conn = MemoryConnection::new();

    let err = session
        .write(
            &conn,
            &[DB, "s1", "t1"],
            &shape(&[("person", LogicalType::Named("model::Person".into()))]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedType { .. }));
    assert!(session.catalog(DB).is_none());

    let err = session
        .write(&conn, &[DB, "s1", "t1"], &RelationShape::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EmptyRelation));
    assert!(session.catalog(DB).is_none());

    assert_eq!(session.iter_catalogs().count(), 0);
    assert!(conn.executed().is_empty());
}

#[tokio::test]
async fn test_target_for_another_database_is_rejected() {
    let mut catalog = Catalog::empty("db_a");
    let conn = MemoryConnection::new();
    let target = WriteTarget::new("db_b", "s1", "t1");

    let err = reconcile(
        &mut catalog,
        &conn,
        &target,
        &shape(&[("a", LogicalType::Integer)]),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        Error::CatalogMismatch { ref catalog, ref target } if catalog == "db_a" && target == "db_b"
    ));
    assert_eq!(catalog.database().iter_schemas().count(), 0);
    assert!(conn.executed().is_empty());
}

#[tokio::test]
async fn test_bad_paths_change_nothing() {
    let mut session = Session::default();
    let conn = MemoryConnection::new();
    let relation = shape(&[("a", LogicalType::Integer)]);

    let err = session.write(&conn, &[DB], &relation).await.unwrap_err();
    assert!(matches!(err, Error::InvalidTargetPath { .. }));

    let err = session
        .write(&conn, &[DB, "s1", "t1", "extra"], &relation)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidTargetPath { .. }));

    let err = session
        .write(&conn, &["local::Elsewhere", "t1"], &relation)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownTarget { .. }));

    assert!(conn.executed().is_empty());
    assert_eq!(session.iter_catalogs().count(), 0);
}

#[tokio::test]
async fn test_configured_targets_and_default_schema() {
    let config = Config {
        targets: Some(vec!["analytics::Warehouse".to_string()]),
        default_schema: Some("main".to_string()),
    };
    let mut session = Session::new(config);
    let conn = MemoryConnection::new();

    session
        .write(
            &conn,
            &["analytics::Warehouse", "t1"],
            &shape(&[("a", LogicalType::Integer)]),
        )
        .await
        .unwrap();
    assert_eq!(
        conn.executed()[0],
        "DROP SCHEMA IF EXISTS main; CREATE SCHEMA main;"
    );

    let err = session
        .write(&conn, &[DB, "t1"], &shape(&[("a", LogicalType::Integer)]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownTarget { .. }));
}

#[tokio::test]
async fn test_ddl_failure_stops_remaining_statements() {
    init_tracing();
    let mut session = Session::default();
    let setup = MemoryConnection::new();
    session
        .write(&setup, &[DB, "s1", "t1"], &shape(&[("a", LogicalType::Integer)]))
        .await
        .unwrap();

    let conn = MemoryConnection::rejecting("ADD COLUMN IF NOT EXISTS c");
    let err = session
        .write(
            &conn,
            &[DB, "s1", "t1"],
            &shape(&[
                ("b", LogicalType::Integer),
                ("c", LogicalType::Integer),
                ("d", LogicalType::Integer),
            ]),
        )
        .await
        .unwrap_err();

    match err {
        Error::DdlExecution { statement, .. } => {
            assert_eq!(statement, "ALTER TABLE s1.t1 ADD COLUMN IF NOT EXISTS c INTEGER;")
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        conn.executed(),
        vec!["ALTER TABLE s1.t1 ADD COLUMN IF NOT EXISTS b INTEGER;"]
    );

    // The catalog is not rolled back.
    assert_eq!(column_names(&session, "s1", "t1"), vec!["a", "b", "c", "d"]);
    assert!(session.catalog(DB).unwrap().is_consistent());
}

#[tokio::test]
async fn test_models_stay_in_lockstep() {
    let mut session = Session::default();
    let conn = MemoryConnection::new();
    let writes: [(&[&str], RelationShape); 4] = [
        (&[DB, "t1"], shape(&[("a", LogicalType::Integer)])),
        (&[DB, "s1", "t1"], shape(&[("a", LogicalType::Boolean)])),
        (&[DB, "s1", "t2"], shape(&[("x", LogicalType::StrictDate)])),
        (
            &[DB, "t1"],
            shape(&[
                ("a", LogicalType::Integer),
                (
                    "b",
                    LogicalType::Decimal {
                        precision: Some(5),
                        scale: Some(1),
                    },
                ),
            ]),
        ),
    ];

    for (path, relation) in &writes {
        session.write(&conn, *path, relation).await.unwrap();
        assert!(session.catalog(DB).unwrap().is_consistent());
    }

    let relation = session
        .compiled(DB)
        .unwrap()
        .table("default", "t1")
        .unwrap()
        .relation_type();
    assert_eq!(
        relation,
        vec![
            ("a", &LogicalType::Integer),
            (
                "b",
                &LogicalType::Decimal {
                    precision: Some(5),
                    scale: Some(1)
                }
            ),
        ]
    );
}

#[tokio::test]
async fn test_plan_is_a_dry_run() {
    let mut session = Session::default();
    let conn = MemoryConnection::new();
    session
        .write(&conn, &[DB, "s1", "t1"], &shape(&[("a", LogicalType::Integer)]))
        .await
        .unwrap();
    let before = session.catalog(DB).unwrap().database().clone();

    let plan = session
        .plan(
            &[DB, "s1", "t1"],
            &shape(&[("a", LogicalType::Integer), ("b", LogicalType::Float)]),
        )
        .unwrap();
    assert_eq!(
        plan.to_sql(),
        vec!["ALTER TABLE s1.t1 ADD COLUMN IF NOT EXISTS b DOUBLE;"]
    );
    insta::assert_snapshot!(plan.change.unwrap().to_string(), @"+ s1.t1.b: DOUBLE (nullable)");
    assert_eq!(session.catalog(DB).unwrap().database(), &before);
}
