//! Dynamic WHERE/ORDER BY rendering from the core filter types.
//!
//! Field names always come from repository-internal constants, never
//! from request input, so pushing them unescaped is safe.

use sqlx::{Postgres, QueryBuilder};

use gramdrive_core::types::{FilterField, FilterOp, FilterValue, SortField};

/// Append a `WHERE` clause built from the given filters.
pub fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &[FilterField]) {
    for (i, filter) in filters.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(filter.field.as_str());

        match filter.op {
            FilterOp::IsNull => {
                qb.push(" IS NULL");
            }
            FilterOp::IsNotNull => {
                qb.push(" IS NOT NULL");
            }
            FilterOp::Eq | FilterOp::Ne => {
                qb.push(match filter.op {
                    FilterOp::Eq => " = ",
                    _ => " <> ",
                });
                push_value(qb, &filter.value);
            }
        }
    }
}

/// Append an `ORDER BY` clause from the given sort fields.
pub fn push_order(qb: &mut QueryBuilder<'_, Postgres>, sorts: &[SortField]) {
    for (i, sort) in sorts.iter().enumerate() {
        qb.push(if i == 0 { " ORDER BY " } else { ", " });
        qb.push(sort.field.as_str());
        qb.push(" ");
        qb.push(sort.direction.as_sql());
    }
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &FilterValue) {
    match value {
        FilterValue::String(s) => {
            qb.push_bind(s.clone());
        }
        FilterValue::Integer(n) => {
            qb.push_bind(*n);
        }
        FilterValue::Boolean(b) => {
            qb.push_bind(*b);
        }
        FilterValue::Uuid(u) => {
            qb.push_bind(*u);
        }
        FilterValue::Null => {
            qb.push("NULL");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gramdrive_core::types::FilterField;
    use uuid::Uuid;

    #[test]
    fn test_push_filters_renders_where_and_and() {
        let mut qb = QueryBuilder::new("SELECT * FROM items");
        push_filters(
            &mut qb,
            &[
                FilterField::eq_int("user_id", 7),
                FilterField::is_null("parent_id"),
            ],
        );
        assert_eq!(
            qb.into_sql(),
            "SELECT * FROM items WHERE user_id = $1 AND parent_id IS NULL"
        );
    }

    #[test]
    fn test_push_filters_binds_uuid() {
        let mut qb = QueryBuilder::new("SELECT * FROM items");
        push_filters(&mut qb, &[FilterField::eq_uuid("parent_id", Uuid::nil())]);
        assert_eq!(
            qb.into_sql(),
            "SELECT * FROM items WHERE parent_id = $1"
        );
    }

    #[test]
    fn test_push_order_renders_multiple_keys() {
        let mut qb = QueryBuilder::new("SELECT * FROM items");
        push_order(
            &mut qb,
            &[SortField::desc("kind"), SortField::desc("created_at")],
        );
        assert_eq!(
            qb.into_sql(),
            "SELECT * FROM items ORDER BY kind DESC, created_at DESC"
        );
    }
}
