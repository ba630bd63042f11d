use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, Statement, Value};

use crate::db::variant::SchemaVariant;
use crate::models::profile::{ProfileSummary, ProfileSummaryRow};
use crate::models::search::{SearchCriteria, non_blank};

pub struct SearchRepository {
    conn: DatabaseConnection,
}

impl SearchRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Profiles matching every present criterion, read from the tables of
    /// the given variant. Results are ordered by user id.
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        variant: SchemaVariant,
    ) -> Result<Vec<ProfileSummary>> {
        let (sql, values) = build_query(criteria, variant);
        tracing::debug!(%variant, %sql, "Running profile search");

        let backend = self.conn.get_database_backend();
        let rows = ProfileSummaryRow::find_by_statement(Statement::from_sql_and_values(
            backend, sql, values,
        ))
        .all(&self.conn)
        .await
        .context("Failed to search profiles")?;

        rows.into_iter().map(ProfileSummary::try_from).collect()
    }
}

fn build_query(criteria: &SearchCriteria, variant: SchemaVariant) -> (String, Vec<Value>) {
    let info = variant.table("user_info");
    let settings = variant.table("user_settings");

    let mut predicates: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(name) = non_blank(criteria.name.as_deref()) {
        predicates.push("ui.name = ?");
        values.push(name.into());
    }
    if let Some(surname) = non_blank(criteria.surname.as_deref()) {
        predicates.push("ui.surname = ?");
        values.push(surname.into());
    }
    if let Some(age_from) = criteria.age_from {
        predicates.push("ui.age >= ?");
        values.push(age_from.into());
    }
    if let Some(age_to) = criteria.age_to {
        predicates.push("ui.age <= ?");
        values.push(age_to.into());
    }
    if let Some(gender) = criteria.gender {
        predicates.push("ui.gender = ?");
        values.push(gender.as_str().into());
    }
    if let Some(city) = non_blank(criteria.city.as_deref()) {
        predicates.push("ui.city = ?");
        values.push(city.into());
    }

    let mut sql = format!(
        "SELECT us.username, ui.user_id, ui.name, ui.surname, ui.age, ui.gender, ui.city \
         FROM {info} ui INNER JOIN {settings} us ON us.id = ui.user_id"
    );
    if !predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&predicates.join(" AND "));
    }
    sql.push_str(" ORDER BY ui.user_id");

    (sql, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;

    #[test]
    fn empty_criteria_has_no_where_clause() {
        let (sql, values) = build_query(&SearchCriteria::default(), SchemaVariant::Plain);
        assert!(!sql.contains("WHERE"));
        assert!(sql.contains("FROM user_info ui"));
        assert!(values.is_empty());
    }

    #[test]
    fn values_are_bound_not_inlined() {
        let criteria = SearchCriteria {
            name: Some("O'Brien".to_string()),
            surname: Some("   ".to_string()),
            age_from: Some(20),
            gender: Some(Gender::Female),
            ..SearchCriteria::default()
        };
        let (sql, values) = build_query(&criteria, SchemaVariant::CompositeIndex);

        assert!(sql.contains("FROM user_info_wci ui"));
        assert!(sql.contains("user_settings_wci us"));
        assert!(!sql.contains("O'Brien"));
        assert!(!sql.contains("ui.surname"));
        assert_eq!(
            sql.matches('?').count(),
            values.len(),
            "one placeholder per bound value"
        );
        assert_eq!(values.len(), 3);
    }
}
