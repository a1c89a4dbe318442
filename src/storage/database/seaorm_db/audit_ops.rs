use crate::authz::audit::{AuditEntry, AuditFilter, NewAuditEntry};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, audit_log};
use super::types::SeaOrmDatabase;

/// Position of the last row of a page: `(timestamp, id)`
pub type AuditCursor = (DateTime<Utc>, i64);

const LIKE_ESCAPE: char = '\\';

/// Lower-cased `%text%` pattern matching `text` literally
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.to_lowercase().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Translate a filter into a WHERE condition
fn filter_condition(filter: &AuditFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(actor) = &filter.actor {
        condition = condition.add(audit_log::Column::ActorUsername.eq(actor.as_str()));
    }
    if let Some(action) = &filter.action {
        condition = condition.add(audit_log::Column::Action.eq(action.as_str()));
    }
    if let Some(entity_type) = &filter.entity_type {
        condition = condition.add(audit_log::Column::EntityType.eq(entity_type.as_str()));
    }
    if let Some(from) = filter.from {
        condition = condition.add(audit_log::Column::Timestamp.gte(from));
    }
    if let Some(to) = filter.to {
        condition = condition.add(audit_log::Column::Timestamp.lte(to));
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = contains_pattern(search);
        let mut any = Condition::any();
        for column in [
            audit_log::Column::ActorUsername,
            audit_log::Column::Action,
            audit_log::Column::EntityType,
            audit_log::Column::Details,
        ] {
            any = any.add(
                Expr::expr(Func::lower(Expr::col(column)))
                    .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
            );
        }
        condition = condition.add(any);
    }

    condition
}

/// Rows strictly after the cursor in newest-first order
fn after_cursor(cursor: AuditCursor) -> Condition {
    let (timestamp, id) = cursor;
    Condition::any()
        .add(audit_log::Column::Timestamp.lt(timestamp))
        .add(
            Condition::all()
                .add(audit_log::Column::Timestamp.eq(timestamp))
                .add(audit_log::Column::Id.lt(id)),
        )
}

impl SeaOrmDatabase {
    /// Append one audit entry
    pub async fn insert_audit_entry(
        &self,
        entry: &NewAuditEntry,
        timestamp: DateTime<Utc>,
    ) -> Result<AuditEntry> {
        debug!(
            "Recording audit entry {} by {}",
            entry.action, entry.actor_username
        );

        let model = audit_log::ActiveModel {
            actor_user_id: Set(entry.actor_user_id),
            actor_username: Set(entry.actor_username.clone()),
            action: Set(entry.action.clone()),
            entity_type: Set(entry.entity_type.clone()),
            entity_id: Set(entry.entity_id),
            details: Set(entry.details.clone()),
            timestamp: Set(timestamp),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(model.to_domain())
    }

    /// One page of matching entries, newest first, strictly after `cursor`
    pub async fn audit_page(
        &self,
        filter: &AuditFilter,
        cursor: Option<AuditCursor>,
        page_size: u64,
    ) -> Result<Vec<AuditEntry>> {
        let mut condition = filter_condition(filter);
        if let Some(cursor) = cursor {
            condition = condition.add(after_cursor(cursor));
        }

        let models = entities::AuditLog::find()
            .filter(condition)
            .order_by_desc(audit_log::Column::Timestamp)
            .order_by_desc(audit_log::Column::Id)
            .limit(page_size)
            .all(&self.db)
            .await?;

        debug!("Fetched audit page of {} entries", models.len());
        Ok(models.iter().map(audit_log::Model::to_domain).collect())
    }

    /// Count entries matching a filter
    pub async fn count_audit_entries(&self, filter: &AuditFilter) -> Result<u64> {
        let count = entities::AuditLog::find()
            .filter(filter_condition(filter))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    /// Delete entries strictly older than `cutoff`
    pub async fn delete_audit_entries_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        debug!("Deleting audit entries older than {}", cutoff);

        let result = entities::AuditLog::delete_many()
            .filter(audit_log::Column::Timestamp.lt(cutoff))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
