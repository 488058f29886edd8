//! Logical (compiler-side) and storage (DuckDB) column types, and the
//! mapping between them.

use std::fmt;

use thiserror::Error;

/// Width given to `VARCHAR` columns when the logical string has no bound.
pub const DEFAULT_VARCHAR_SIZE: u32 = 1024;

/// Precision given to `DECIMAL` columns when the logical decimal has none.
///
/// Matches DuckDB's own default for a bare `DECIMAL`.
pub const DEFAULT_DECIMAL_PRECISION: u8 = 18;

/// Scale given to `DECIMAL` columns when the logical decimal has none.
pub const DEFAULT_DECIMAL_SCALE: u8 = 3;

/// Widest `DECIMAL` DuckDB accepts.
pub const MAX_DECIMAL_PRECISION: u8 = 38;

/// The type of a column in a computed relation, as seen by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Boolean,
    Integer,
    Float,
    /// Any numeric value. Stored as a double.
    Number,
    Decimal {
        precision: Option<u8>,
        scale: Option<u8>,
    },
    String {
        max_length: Option<u32>,
    },
    /// A date that may carry a time component in the compiler's model.
    Date,
    StrictDate,
    DateTime,
    StrictTime,
    /// Any non-primitive type (class, enumeration, nested relation...).
    Named(String),
}

impl LogicalType {
    /// An unbounded string.
    pub fn string() -> Self {
        LogicalType::String { max_length: None }
    }

    /// A decimal with default precision and scale.
    pub fn decimal() -> Self {
        LogicalType::Decimal {
            precision: None,
            scale: None,
        }
    }

    /// Map this logical type to the storage type used for new columns.
    ///
    /// Fails for types with no storage representation: named types, and
    /// decimals whose precision/scale DuckDB cannot hold.
    pub fn to_storage_type(&self) -> Result<StorageType, UnsupportedTypeError> {
        let storage = match self {
            LogicalType::Boolean => StorageType::Boolean,
            LogicalType::Integer => StorageType::Integer,
            LogicalType::Float | LogicalType::Number => StorageType::Double,
            LogicalType::Decimal { precision, scale } => {
                let precision = precision.unwrap_or(DEFAULT_DECIMAL_PRECISION);
                let scale = scale.unwrap_or(DEFAULT_DECIMAL_SCALE.min(precision));
                if precision == 0 || precision > MAX_DECIMAL_PRECISION {
                    return Err(self.unsupported("decimal precision must be between 1 and 38"));
                }
                if scale > precision {
                    return Err(self.unsupported("decimal scale exceeds precision"));
                }
                StorageType::Decimal { precision, scale }
            }
            LogicalType::String { max_length } => {
                let size = max_length.unwrap_or(DEFAULT_VARCHAR_SIZE);
                if size == 0 {
                    return Err(self.unsupported("string width must be positive"));
                }
                StorageType::Varchar { size }
            }
            LogicalType::Date | LogicalType::StrictDate => StorageType::Date,
            LogicalType::DateTime => StorageType::Timestamp,
            LogicalType::StrictTime => StorageType::Time,
            LogicalType::Named(_) => {
                return Err(self.unsupported("only primitive types can be stored"));
            }
        };
        Ok(storage)
    }

    fn unsupported(&self, reason: &'static str) -> UnsupportedTypeError {
        UnsupportedTypeError {
            logical_type: self.clone(),
            reason,
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::Boolean => write!(f, "Boolean"),
            LogicalType::Integer => write!(f, "Integer"),
            LogicalType::Float => write!(f, "Float"),
            LogicalType::Number => write!(f, "Number"),
            LogicalType::Decimal {
                precision: Some(p),
                scale: Some(s),
            } => write!(f, "Decimal({}, {})", p, s),
            LogicalType::Decimal {
                precision: Some(p),
                scale: None,
            } => write!(f, "Decimal({})", p),
            LogicalType::Decimal { .. } => write!(f, "Decimal"),
            LogicalType::String {
                max_length: Some(n),
            } => write!(f, "String({})", n),
            LogicalType::String { max_length: None } => write!(f, "String"),
            LogicalType::Date => write!(f, "Date"),
            LogicalType::StrictDate => write!(f, "StrictDate"),
            LogicalType::DateTime => write!(f, "DateTime"),
            LogicalType::StrictTime => write!(f, "StrictTime"),
            LogicalType::Named(name) => write!(f, "{}", name),
        }
    }
}

/// A logical type with no storage representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("type `{logical_type}` has no storage representation: {reason}")]
pub struct UnsupportedTypeError {
    pub logical_type: LogicalType,
    pub reason: &'static str,
}

/// DuckDB column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageType {
    /// BOOLEAN
    Boolean,
    /// TINYINT (1 byte)
    TinyInt,
    /// SMALLINT (2 bytes)
    SmallInt,
    /// INTEGER (4 bytes)
    Integer,
    /// BIGINT (8 bytes)
    BigInt,
    /// FLOAT (4 bytes floating point)
    Float,
    /// DOUBLE (8 bytes floating point)
    Double,
    /// DECIMAL(precision, scale)
    Decimal { precision: u8, scale: u8 },
    /// VARCHAR(size)
    Varchar { size: u32 },
    /// CHAR(size)
    Char { size: u32 },
    /// DATE
    Date,
    /// TIME
    Time,
    /// TIMESTAMP
    Timestamp,
    /// JSON
    Json,
}

impl StorageType {
    /// The DuckDB text of this type, as embedded in DDL.
    pub fn to_sql_text(&self) -> String {
        self.to_string()
    }

    /// Map this storage type back to the logical type the compiler sees when
    /// it reads the column.
    pub fn to_logical_type(&self) -> LogicalType {
        match self {
            StorageType::Boolean => LogicalType::Boolean,
            StorageType::TinyInt
            | StorageType::SmallInt
            | StorageType::Integer
            | StorageType::BigInt => LogicalType::Integer,
            StorageType::Float | StorageType::Double => LogicalType::Float,
            StorageType::Decimal { precision, scale } => LogicalType::Decimal {
                precision: Some(*precision),
                scale: Some(*scale),
            },
            StorageType::Varchar { size } | StorageType::Char { size } => LogicalType::String {
                max_length: Some(*size),
            },
            StorageType::Date => LogicalType::StrictDate,
            StorageType::Time => LogicalType::StrictTime,
            StorageType::Timestamp => LogicalType::DateTime,
            StorageType::Json => LogicalType::String { max_length: None },
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageType::Boolean => write!(f, "BOOLEAN"),
            StorageType::TinyInt => write!(f, "TINYINT"),
            StorageType::SmallInt => write!(f, "SMALLINT"),
            StorageType::Integer => write!(f, "INTEGER"),
            StorageType::BigInt => write!(f, "BIGINT"),
            StorageType::Float => write!(f, "FLOAT"),
            StorageType::Double => write!(f, "DOUBLE"),
            StorageType::Decimal { precision, scale } => {
                write!(f, "DECIMAL({},{})", precision, scale)
            }
            StorageType::Varchar { size } => write!(f, "VARCHAR({})", size),
            StorageType::Char { size } => write!(f, "CHAR({})", size),
            StorageType::Date => write!(f, "DATE"),
            StorageType::Time => write!(f, "TIME"),
            StorageType::Timestamp => write!(f, "TIMESTAMP"),
            StorageType::Json => write!(f, "JSON"),
        }
    }
}
