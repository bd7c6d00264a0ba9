use crate::gateway::{Compare, FieldPredicate, GatewayError, SortSpec};
use chrono::{SecondsFormat, Utc};
use rand::Rng;
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, Select};
use serde_json::Value as Json;
use std::str::FromStr;

/// 24 lowercase hex characters, the id shape the hosted API hands out.
pub fn new_record_id() -> String {
    let mut rng = rand::thread_rng();
    (0..12)
        .map(|_| format!("{:02x}", rng.gen::<u8>()))
        .collect()
}

pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn column<E>(name: &str) -> Result<E::Column, GatewayError>
where
    E: EntityTrait,
    E::Column: FromStr,
{
    E::Column::from_str(name).map_err(|_| GatewayError::UnknownField(name.to_string()))
}

fn db_value(v: &Json) -> sea_orm::Value {
    match v {
        Json::String(s) => s.clone().into(),
        Json::Bool(b) => (*b).into(),
        Json::Number(n) => match n.as_i64() {
            Some(i) => i.into(),
            None => n.as_f64().unwrap_or_default().into(),
        },
        Json::Null => Option::<String>::None.into(),
        other => other.to_string().into(),
    }
}

/// Adds the predicates and sort order to a select, resolving field names
/// against the entity's columns.
pub fn apply_query<E>(
    mut select: Select<E>,
    predicates: &[FieldPredicate],
    sort: &SortSpec,
) -> Result<Select<E>, GatewayError>
where
    E: EntityTrait,
    E::Column: FromStr,
{
    for p in predicates {
        let col = column::<E>(&p.field)?;
        let value = db_value(&p.value);
        select = match p.op {
            Compare::Eq => select.filter(col.eq(value)),
            Compare::Gte => select.filter(col.gte(value)),
        };
    }
    if let Some(field) = sort.field() {
        let col = column::<E>(field)?;
        let order = if sort.is_descending() {
            Order::Desc
        } else {
            Order::Asc
        };
        select = select.order_by(col, order);
    }
    Ok(select)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_are_24_hex_chars() {
        let id = new_record_id();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(id, new_record_id());
    }

    #[test]
    fn timestamps_are_utc_rfc3339() {
        let ts = now_rfc3339();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
