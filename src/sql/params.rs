//! Convert serde_json::Value to types that sqlx can bind.

use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::mysql::{MySql, MySqlTypeInfo};
use sqlx::Database;

/// A value that can be bound to a MySQL query. Converts from serde_json::Value.
#[derive(Clone, Debug)]
pub enum MySqlBindValue {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(String),
    Json(Value),
}

impl MySqlBindValue {
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => MySqlBindValue::Null,
            Value::Bool(b) => MySqlBindValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    MySqlBindValue::I64(i)
                } else if let Some(u) = n.as_u64() {
                    MySqlBindValue::U64(u)
                } else {
                    MySqlBindValue::F64(n.as_f64().unwrap_or(0.0))
                }
            }
            Value::String(s) => MySqlBindValue::String(s.clone()),
            Value::Array(_) | Value::Object(_) => MySqlBindValue::Json(v.clone()),
        }
    }
}

impl<'q> Encode<'q, MySql> for MySqlBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <MySql as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            MySqlBindValue::Null => <Option<i64> as Encode<MySql>>::encode_by_ref(&None, buf)?,
            MySqlBindValue::Bool(b) => <bool as Encode<MySql>>::encode_by_ref(b, buf)?,
            MySqlBindValue::I64(n) => <i64 as Encode<MySql>>::encode_by_ref(n, buf)?,
            MySqlBindValue::U64(n) => <u64 as Encode<MySql>>::encode_by_ref(n, buf)?,
            MySqlBindValue::F64(n) => <f64 as Encode<MySql>>::encode_by_ref(n, buf)?,
            MySqlBindValue::String(s) => {
                let s_ref: &str = s.as_str();
                <&str as Encode<MySql>>::encode_by_ref(&s_ref, buf)?
            }
            MySqlBindValue::Json(v) => <Value as Encode<MySql>>::encode_by_ref(v, buf)?,
        })
    }

    // The wire type must follow the encoded variant, not the blanket TEXT.
    fn produces(&self) -> Option<MySqlTypeInfo> {
        Some(match self {
            MySqlBindValue::Null => <str as sqlx::Type<MySql>>::type_info(),
            MySqlBindValue::Bool(_) => <bool as sqlx::Type<MySql>>::type_info(),
            MySqlBindValue::I64(_) => <i64 as sqlx::Type<MySql>>::type_info(),
            MySqlBindValue::U64(_) => <u64 as sqlx::Type<MySql>>::type_info(),
            MySqlBindValue::F64(_) => <f64 as sqlx::Type<MySql>>::type_info(),
            MySqlBindValue::String(_) => <str as sqlx::Type<MySql>>::type_info(),
            MySqlBindValue::Json(_) => <Value as sqlx::Type<MySql>>::type_info(),
        })
    }
}

impl sqlx::Type<MySql> for MySqlBindValue {
    fn type_info() -> MySqlTypeInfo {
        <str as sqlx::Type<MySql>>::type_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_values_map_to_native_variants() {
        assert!(matches!(MySqlBindValue::from_json(&Value::Null), MySqlBindValue::Null));
        assert!(matches!(MySqlBindValue::from_json(&json!(true)), MySqlBindValue::Bool(true)));
        assert!(matches!(MySqlBindValue::from_json(&json!(-3)), MySqlBindValue::I64(-3)));
        assert!(matches!(
            MySqlBindValue::from_json(&json!(u64::MAX)),
            MySqlBindValue::U64(u64::MAX)
        ));
        assert!(matches!(MySqlBindValue::from_json(&json!(1.5)), MySqlBindValue::F64(_)));
        assert!(matches!(
            MySqlBindValue::from_json(&json!("O+")),
            MySqlBindValue::String(s) if s == "O+"
        ));
    }

    #[test]
    fn compound_values_bind_as_json() {
        assert!(matches!(
            MySqlBindValue::from_json(&json!({"a": 1})),
            MySqlBindValue::Json(_)
        ));
        assert!(matches!(
            MySqlBindValue::from_json(&json!([1, 2])),
            MySqlBindValue::Json(_)
        ));
    }
}
