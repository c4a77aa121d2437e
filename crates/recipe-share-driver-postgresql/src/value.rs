use tokio_postgres::types::{private::BytesMut, to_sql_checked, IsNull, ToSql, Type};
use uuid::Uuid;

/// A statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Uuid(Uuid),
    UuidList(Vec<Uuid>),
    Text(Option<String>),
    I32(Option<i32>),
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(Some(value))
    }
}

impl From<Option<String>> for Value {
    fn from(value: Option<String>) -> Self {
        Value::Text(value)
    }
}

impl From<Option<i32>> for Value {
    fn from(value: Option<i32>) -> Self {
        Value::I32(value)
    }
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn std::error::Error + Sync + Send>>
    where
        Self: Sized,
    {
        match self {
            Value::Uuid(value) => value.to_sql(ty, out),
            Value::UuidList(values) => values.to_sql(ty, out),
            Value::Text(value) => value.to_sql(ty, out),
            Value::I32(value) => value.to_sql(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool
    where
        Self: Sized,
    {
        <Uuid as ToSql>::accepts(ty)
            || <Vec<Uuid> as ToSql>::accepts(ty)
            || <String as ToSql>::accepts(ty)
            || <i32 as ToSql>::accepts(ty)
    }

    to_sql_checked!();
}
