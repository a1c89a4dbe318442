//! Audit ledger integration tests

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::database::{test_config, test_epoch};
    use crate::common::fixtures::{AuditEntryFactory, is_newest_first};
    use crate::common::TestSystem;
    use chrono::Duration;
    use futures::TryStreamExt;
    use institute_authz::authz::audit::actions;
    use institute_authz::{AuditEntry, AuditFilter, AuditLedger, AuditLedgerExt};

    /// Five entries one hour apart, starting at the epoch
    async fn seed(system: &TestSystem) -> Vec<AuditEntry> {
        let ledger = &system.authz.ledger;
        let rows = [
            (1, "alice", actions::CREATE_ROLE, "Created role LIBRARIAN"),
            (2, "bob", actions::REQUEST_GATE_PASS, "Weekend pass requested"),
            (1, "alice", actions::ASSIGN_ROLE, "Assigned role LIBRARIAN to bob"),
            (3, "carol", actions::APPROVE_GATE_PASS, "Approved weekend pass for bob"),
            (1, "alice", actions::DELETE_ROLE, "Deleted role LIBRARIAN"),
        ];

        let mut recorded = Vec::new();
        for (user_id, username, action, details) in rows {
            let entry = AuditEntryFactory::create(user_id, username, action, details);
            recorded.push(assert_ok!(ledger.record(entry).await));
            system.clock.advance(Duration::hours(1));
        }
        recorded
    }

    async fn collect(system: &TestSystem, filter: AuditFilter) -> Vec<AuditEntry> {
        assert_ok!(system.authz.ledger.query(filter).try_collect().await)
    }

    #[tokio::test]
    async fn test_record_stamps_clock_time() {
        let system = TestSystem::new().await;
        let recorded = seed(&system).await;

        assert_eq!(recorded[0].timestamp, test_epoch());
        assert_eq!(recorded[4].timestamp, test_epoch() + Duration::hours(4));
        assert!(recorded.windows(2).all(|pair| pair[0].id < pair[1].id));
    }

    #[tokio::test]
    async fn test_query_all_is_newest_first() {
        let system = TestSystem::new().await;
        seed(&system).await;

        let entries: Vec<_> = assert_ok!(system.authz.ledger.query_all(None).try_collect().await);
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].action, actions::DELETE_ROLE);
        let timestamps: Vec<_> = entries.iter().map(|e| e.timestamp).collect();
        assert!(is_newest_first(&timestamps));

        let capped: Vec<_> = assert_ok!(system.authz.ledger.query_all(Some(2)).try_collect().await);
        assert_eq!(capped.len(), 2);
        assert_eq!(capped[1].action, actions::APPROVE_GATE_PASS);
    }

    #[tokio::test]
    async fn test_filters() {
        let system = TestSystem::new().await;
        seed(&system).await;

        let by_actor = collect(&system, AuditFilter::default().actor("alice")).await;
        assert_eq!(by_actor.len(), 3);
        assert!(by_actor.iter().all(|e| e.actor_username == "alice"));

        let by_action = collect(&system, AuditFilter::default().action(actions::REQUEST_GATE_PASS)).await;
        assert_eq!(by_action.len(), 1);
        assert_eq!(by_action[0].actor_username, "bob");

        let combined = collect(
            &system,
            AuditFilter::default().actor("alice").action(actions::ASSIGN_ROLE),
        )
        .await;
        assert_eq!(combined.len(), 1);

        let nobody = collect(&system, AuditFilter::default().actor("mallory")).await;
        assert!(nobody.is_empty());
    }

    #[tokio::test]
    async fn test_date_range_is_inclusive() {
        let system = TestSystem::new().await;
        seed(&system).await;
        let start = test_epoch() + Duration::hours(1);
        let end = test_epoch() + Duration::hours(3);

        let entries: Vec<_> = assert_ok!(
            system
                .authz
                .ledger
                .query_by_date_range(start, end)
                .try_collect()
                .await
        );
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].timestamp, end);
        assert_eq!(entries[2].timestamp, start);

        let inverted = collect(&system, AuditFilter::default().between(end, start)).await;
        assert!(inverted.is_empty());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let system = TestSystem::new().await;
        seed(&system).await;

        let entries = collect(&system, AuditFilter::default().search("WEEKEND")).await;
        assert_eq!(entries.len(), 2);

        let by_name = collect(&system, AuditFilter::default().search("CaRoL")).await;
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].action, actions::APPROVE_GATE_PASS);
    }

    #[tokio::test]
    async fn test_stream_spans_pages() {
        let mut config = test_config();
        config.settings.audit.page_size = 2;
        let system = TestSystem::with_config(config).await;
        let recorded = seed(&system).await;

        let entries = collect(&system, AuditFilter::default()).await;
        let ids: Vec<_> = entries.iter().map(|e| e.id).collect();
        let expected: Vec<_> = recorded.iter().rev().map(|e| e.id).collect();
        assert_eq!(ids, expected);

        let limited = collect(&system, AuditFilter::default().limit(3)).await;
        assert_eq!(limited.len(), 3);
    }

    #[tokio::test]
    async fn test_same_timestamp_ties_break_on_id() {
        let system = TestSystem::new().await;
        let ledger = &system.authz.ledger;
        for n in 0..3 {
            let details = format!("burst {}", n);
            assert_ok!(
                ledger
                    .record(AuditEntryFactory::create(1, "alice", actions::LOGIN, &details))
                    .await
            );
        }

        let entries = collect(&system, AuditFilter::default()).await;
        assert!(entries.windows(2).all(|pair| pair[0].id > pair[1].id));
    }

    #[tokio::test]
    async fn test_count_ignores_limit() {
        let system = TestSystem::new().await;
        seed(&system).await;

        let count = assert_ok!(
            system
                .authz
                .ledger
                .count(AuditFilter::default().actor("alice").limit(1))
                .await
        );
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_purge_removes_strictly_older_entries() {
        let system = TestSystem::new().await;
        seed(&system).await;
        let ledger = &system.authz.ledger;

        let cutoff = test_epoch() + Duration::hours(2);
        let removed = assert_ok!(ledger.purge_before(cutoff).await);
        assert_eq!(removed, 2);

        let remaining = collect(&system, AuditFilter::default()).await;
        assert_eq!(remaining.len(), 3);
        assert!(remaining.iter().all(|e| e.timestamp >= cutoff));

        assert_eq!(assert_ok!(ledger.purge_before(cutoff).await), 0);
    }

    #[tokio::test]
    async fn test_purge_older_than_days() {
        let system = TestSystem::new().await;
        seed(&system).await;

        system.clock.set(test_epoch() + Duration::days(30) + Duration::hours(2));
        let removed = assert_ok!(system.authz.ledger.purge_older_than(30).await);
        assert_eq!(removed, 2);
    }
}
