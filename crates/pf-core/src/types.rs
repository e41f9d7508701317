//! Scalar type system for catalog-resolved and declared column types.
//!
//! Warehouse catalogs report types as free-form strings; this module
//! normalizes them into [`SqlType`] and maps them onto the coarser
//! [`FieldType`] used to classify dimensions.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Valid bit widths for integer types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntBitWidth {
    /// 8-bit (TINYINT)
    I8,
    /// 16-bit (SMALLINT)
    I16,
    /// 32-bit (INTEGER)
    I32,
    /// 64-bit (BIGINT)
    I64,
}

/// Valid bit widths for floating-point types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FloatBitWidth {
    /// 32-bit (FLOAT / REAL)
    F32,
    /// 64-bit (DOUBLE)
    F64,
}

/// SQL data types normalized from warehouse catalog strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlType {
    /// Boolean (BOOL, BOOLEAN)
    Boolean,
    /// Integer types: TINYINT(8), SMALLINT(16), INT(32), BIGINT(64)
    Integer { bits: IntBitWidth },
    /// Floating-point: FLOAT(32), DOUBLE(64)
    Float { bits: FloatBitWidth },
    /// Exact numeric with optional precision and scale
    Decimal {
        precision: Option<u16>,
        scale: Option<u16>,
    },
    /// Character/string types with optional max length
    String { max_length: Option<u32> },
    /// DATE
    Date,
    /// TIME
    Time,
    /// TIMESTAMP / DATETIME
    Timestamp,
    /// INTERVAL
    Interval,
    /// BINARY / BLOB
    Binary,
    /// JSON
    Json,
    /// Array type (INTEGER[], VARCHAR[], ...)
    Array(Box<SqlType>),
    /// Type could not be determined; carries the original string
    Unknown(String),
}

/// Coarse field classification used for dimensions and metric columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Textual values (also the fallback for exotic types)
    String,
    /// Any numeric type
    Number,
    /// Booleans
    Boolean,
    /// Calendar dates
    Date,
    /// Points in time
    Timestamp,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Number => write!(f, "number"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Date => write!(f, "date"),
            FieldType::Timestamp => write!(f, "timestamp"),
        }
    }
}

impl SqlType {
    /// Returns true if this is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SqlType::Integer { .. } | SqlType::Float { .. } | SqlType::Decimal { .. }
        )
    }

    /// Returns true if this is a string type
    pub fn is_string(&self) -> bool {
        matches!(self, SqlType::String { .. })
    }

    /// Returns true if this type is unknown
    pub fn is_unknown(&self) -> bool {
        matches!(self, SqlType::Unknown(_))
    }

    /// Classify this type for dimension/metric field typing.
    pub fn field_type(&self) -> FieldType {
        match self {
            SqlType::Boolean => FieldType::Boolean,
            t if t.is_numeric() => FieldType::Number,
            SqlType::Date => FieldType::Date,
            SqlType::Timestamp => FieldType::Timestamp,
            _ => FieldType::String,
        }
    }

    /// Check if two types are compatible as join keys.
    ///
    /// Numeric types are mutually compatible, string types are compatible
    /// with each other, Date/Timestamp are compatible, and Unknown is
    /// compatible with anything.
    pub fn is_compatible_with(&self, other: &SqlType) -> bool {
        if self.is_unknown() || other.is_unknown() {
            return true;
        }
        if self.is_numeric() && other.is_numeric() {
            return true;
        }
        matches!(
            (self, other),
            (SqlType::Boolean, SqlType::Boolean)
                | (SqlType::String { .. }, SqlType::String { .. })
                | (SqlType::Date, SqlType::Date)
                | (SqlType::Time, SqlType::Time)
                | (SqlType::Timestamp, SqlType::Timestamp)
                | (SqlType::Date, SqlType::Timestamp)
                | (SqlType::Timestamp, SqlType::Date)
                | (SqlType::Binary, SqlType::Binary)
                | (SqlType::Json, SqlType::Json)
                | (SqlType::Json, SqlType::String { .. })
                | (SqlType::String { .. }, SqlType::Json)
                | (SqlType::Interval, SqlType::Interval)
        ) || matches!((self, other),
            (SqlType::Array(a), SqlType::Array(b)) if a.is_compatible_with(b)
        )
    }

    /// Human-readable display name
    pub fn display_name(&self) -> Cow<'static, str> {
        match self {
            SqlType::Boolean => Cow::Borrowed("BOOLEAN"),
            SqlType::Integer {
                bits: IntBitWidth::I8,
            } => Cow::Borrowed("TINYINT"),
            SqlType::Integer {
                bits: IntBitWidth::I16,
            } => Cow::Borrowed("SMALLINT"),
            SqlType::Integer {
                bits: IntBitWidth::I32,
            } => Cow::Borrowed("INTEGER"),
            SqlType::Integer {
                bits: IntBitWidth::I64,
            } => Cow::Borrowed("BIGINT"),
            SqlType::Float {
                bits: FloatBitWidth::F32,
            } => Cow::Borrowed("FLOAT"),
            SqlType::Float {
                bits: FloatBitWidth::F64,
            } => Cow::Borrowed("DOUBLE"),
            SqlType::Decimal {
                precision: Some(p),
                scale: Some(s),
            } => Cow::Owned(format!("DECIMAL({p},{s})")),
            SqlType::Decimal {
                precision: Some(p), ..
            } => Cow::Owned(format!("DECIMAL({p})")),
            SqlType::Decimal { .. } => Cow::Borrowed("DECIMAL"),
            SqlType::String {
                max_length: Some(n),
            } => Cow::Owned(format!("VARCHAR({n})")),
            SqlType::String { .. } => Cow::Borrowed("VARCHAR"),
            SqlType::Date => Cow::Borrowed("DATE"),
            SqlType::Time => Cow::Borrowed("TIME"),
            SqlType::Timestamp => Cow::Borrowed("TIMESTAMP"),
            SqlType::Interval => Cow::Borrowed("INTERVAL"),
            SqlType::Binary => Cow::Borrowed("BINARY"),
            SqlType::Json => Cow::Borrowed("JSON"),
            SqlType::Array(inner) => Cow::Owned(format!("{}[]", inner.display_name())),
            SqlType::Unknown(reason) => Cow::Owned(format!("UNKNOWN({reason})")),
        }
    }
}

impl std::fmt::Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Parse a raw bit-width integer into an IntBitWidth, if valid
fn parse_int_bit_width(bits: u16) -> Option<IntBitWidth> {
    match bits {
        8 => Some(IntBitWidth::I8),
        16 => Some(IntBitWidth::I16),
        32 => Some(IntBitWidth::I32),
        64 => Some(IntBitWidth::I64),
        _ => None,
    }
}

/// Parse a SQL type string (from a declared `data_type` or a warehouse
/// catalog) into SqlType
pub fn parse_sql_type(s: &str) -> SqlType {
    let upper = s.trim().to_uppercase();
    let upper = upper.as_str();

    match upper {
        "BOOL" | "BOOLEAN" => SqlType::Boolean,

        "TINYINT" | "INT1" => SqlType::Integer {
            bits: IntBitWidth::I8,
        },
        "SMALLINT" | "INT2" => SqlType::Integer {
            bits: IntBitWidth::I16,
        },
        "INT" | "INTEGER" | "INT4" => SqlType::Integer {
            bits: IntBitWidth::I32,
        },
        "BIGINT" | "INT8" | "LONG" => SqlType::Integer {
            bits: IntBitWidth::I64,
        },

        "FLOAT" | "REAL" | "FLOAT4" => SqlType::Float {
            bits: FloatBitWidth::F32,
        },
        "DOUBLE" | "DOUBLE PRECISION" | "FLOAT8" => SqlType::Float {
            bits: FloatBitWidth::F64,
        },

        "DECIMAL" | "NUMERIC" => SqlType::Decimal {
            precision: None,
            scale: None,
        },

        "VARCHAR" | "TEXT" | "STRING" | "CHAR" | "CHARACTER VARYING" => {
            SqlType::String { max_length: None }
        }

        "DATE" => SqlType::Date,
        "TIME" => SqlType::Time,
        "TIMESTAMP" | "DATETIME" | "TIMESTAMPTZ" | "TIMESTAMP WITH TIME ZONE" => SqlType::Timestamp,
        "INTERVAL" => SqlType::Interval,
        "BLOB" | "BINARY" | "BYTEA" | "VARBINARY" => SqlType::Binary,

        "JSON" | "JSONB" | "VARIANT" => SqlType::Json,

        _ => {
            if let Some(inner) = try_parse_parameterized(s) {
                return inner;
            }
            SqlType::Unknown(s.to_string())
        }
    }
}

/// Try to parse parameterized type strings like `VARCHAR(255)`,
/// `DECIMAL(10,2)`, `NUMBER(38,0)`, `INTEGER[]`
fn try_parse_parameterized(s: &str) -> Option<SqlType> {
    let trimmed = s.trim();
    let upper = trimmed.to_uppercase();

    if upper.ends_with("[]") {
        let inner_str = &trimmed[..trimmed.len() - 2];
        return Some(SqlType::Array(Box::new(parse_sql_type(inner_str))));
    }

    let open = upper.find('(')?;
    let close = upper.rfind(')')?;
    let base = upper[..open].trim();
    let params = &upper[open + 1..close];

    match base {
        "VARCHAR" | "CHAR" | "CHARACTER VARYING" | "TEXT" => {
            let len: u32 = params.trim().parse().ok()?;
            Some(SqlType::String {
                max_length: Some(len),
            })
        }
        "DECIMAL" | "NUMERIC" | "NUMBER" => {
            let parts: Vec<&str> = params.split(',').collect();
            let precision: u16 = parts.first()?.trim().parse().ok()?;
            let scale: Option<u16> = parts.get(1).and_then(|s| s.trim().parse().ok());
            Some(SqlType::Decimal {
                precision: Some(precision),
                scale,
            })
        }
        "INT" | "INTEGER" => {
            let raw_bits: u16 = params.trim().parse().ok()?;
            let bits = parse_int_bit_width(raw_bits)?;
            Some(SqlType::Integer { bits })
        }
        _ => None,
    }
}
