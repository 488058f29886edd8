use super::*;
use inkwell_sql::render;

#[test]
fn test_primitive_type_mapping() {
    let cases = [
        (LogicalType::Boolean, "BOOLEAN"),
        (LogicalType::Integer, "INTEGER"),
        (LogicalType::Float, "DOUBLE"),
        (LogicalType::Number, "DOUBLE"),
        (LogicalType::decimal(), "DECIMAL(18,3)"),
        (
            LogicalType::Decimal {
                precision: Some(10),
                scale: Some(2),
            },
            "DECIMAL(10,2)",
        ),
        (LogicalType::string(), "VARCHAR(1024)"),
        (
            LogicalType::String {
                max_length: Some(200),
            },
            "VARCHAR(200)",
        ),
        (LogicalType::Date, "DATE"),
        (LogicalType::StrictDate, "DATE"),
        (LogicalType::DateTime, "TIMESTAMP"),
        (LogicalType::StrictTime, "TIME"),
    ];

    for (logical, expected) in cases {
        let storage = logical.to_storage_type().unwrap();
        assert_eq!(storage.to_sql_text(), expected, "mapping {logical}");
    }
}

#[test]
fn test_type_mapping_is_deterministic() {
    let types = [
        LogicalType::Integer,
        LogicalType::decimal(),
        LogicalType::string(),
        LogicalType::DateTime,
    ];
    for ty in types {
        let first = ty.to_storage_type().unwrap().to_sql_text();
        for _ in 0..8 {
            assert_eq!(ty.to_storage_type().unwrap().to_sql_text(), first);
        }
    }
}

#[test]
fn test_decimal_precision_without_scale() {
    let ty = LogicalType::Decimal {
        precision: Some(2),
        scale: None,
    };
    assert_eq!(
        ty.to_storage_type().unwrap(),
        StorageType::Decimal {
            precision: 2,
            scale: 2
        }
    );
}

#[test]
fn test_named_type_is_unsupported() {
    let ty = LogicalType::Named("model::Person".to_string());
    let err = ty.to_storage_type().unwrap_err();
    assert_eq!(err.logical_type, ty);
    assert!(err.to_string().contains("model::Person"));
}

#[test]
fn test_out_of_range_decimal_is_unsupported() {
    let too_wide = LogicalType::Decimal {
        precision: Some(39),
        scale: Some(0),
    };
    assert!(too_wide.to_storage_type().is_err());

    let bad_scale = LogicalType::Decimal {
        precision: Some(4),
        scale: Some(5),
    };
    assert!(bad_scale.to_storage_type().is_err());

    let empty_string = LogicalType::String {
        max_length: Some(0),
    };
    assert!(empty_string.to_storage_type().is_err());
}

#[test]
fn test_storage_to_logical() {
    assert_eq!(StorageType::BigInt.to_logical_type(), LogicalType::Integer);
    assert_eq!(StorageType::Double.to_logical_type(), LogicalType::Float);
    assert_eq!(StorageType::Date.to_logical_type(), LogicalType::StrictDate);
    assert_eq!(
        StorageType::Char { size: 3 }.to_logical_type(),
        LogicalType::String {
            max_length: Some(3)
        }
    );
    assert_eq!(StorageType::Json.to_logical_type(), LogicalType::string());
    assert_eq!(StorageType::Json.to_sql_text(), "JSON");
}

#[test]
fn test_table_column_order_and_uniqueness() {
    let mut table = Table::with_columns(
        "t1",
        [
            Column::nullable("a", StorageType::Integer),
            Column::nullable("b", StorageType::Double),
            Column::nullable("a", StorageType::Boolean),
        ],
    );
    assert_eq!(table.column_names(), vec!["a", "b"]);
    assert_eq!(
        table.get_column("a").unwrap().data_type,
        StorageType::Integer
    );

    assert!(table.add_column(Column::nullable("c", StorageType::Date)));
    assert!(!table.add_column(Column::nullable("b", StorageType::Date)));
    assert_eq!(table.column_names(), vec!["a", "b", "c"]);
    assert_eq!(table.get_column("b").unwrap().data_type, StorageType::Double);
}

#[test]
fn test_put_table_replaces_in_place() {
    let mut schema = Schema::new("s1");
    schema.put_table(Table::new("first"));
    schema.put_table(Table::new("second"));

    let mut updated = Table::new("first");
    updated.add_column(Column::nullable("x", StorageType::Integer));
    schema.put_table(updated);

    let names: Vec<&str> = schema.iter_tables().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second"]);
    assert!(schema.get_table("first").unwrap().has_column("x"));
}

#[test]
fn test_database_lookup() {
    let mut db = Database::new("local::DuckDuckDatabase");
    let mut schema = Schema::new("s1");
    schema.put_table(Table::new("t1"));
    db.put_schema(schema);

    assert!(db.get_table("s1", "t1").is_some());
    assert!(db.get_table("s1", "t2").is_none());
    assert!(db.get_table("s2", "t1").is_none());
}

#[test]
fn test_table_ddl() {
    let table = Table::with_columns(
        "t1",
        [
            Column::nullable("id", StorageType::Integer),
            Column::nullable("name", StorageType::Varchar { size: 1024 }),
        ],
    );

    assert_eq!(
        render(&table.to_create_table_stmt("default")),
        "CREATE OR REPLACE TABLE \"default\".t1 (id INTEGER, name VARCHAR(1024));"
    );

    let col = Column::nullable("score", StorageType::Double);
    assert_eq!(
        render(&col.to_add_column_stmt("s1", "t1")),
        "ALTER TABLE s1.t1 ADD COLUMN IF NOT EXISTS score DOUBLE;"
    );

    assert_eq!(
        render(&Schema::new("s1").to_create_schema_stmt()),
        "DROP SCHEMA IF EXISTS s1; CREATE SCHEMA s1;"
    );
}
