//! Audited policy administration tests

#[cfg(test)]
mod tests {
    use crate::common::TestSystem;
    use crate::common::database::test_epoch;
    use crate::common::fixtures::{AuditEntryFactory, permission_ids};
    use crate::{assert_err, assert_ok};
    use chrono::Duration;
    use futures::TryStreamExt;
    use institute_authz::authz::audit::{actions, entity_types};
    use institute_authz::authz::catalog::codes;
    use institute_authz::{AuditEntry, AuditFilter, AuditLedger, AuthzError, NewRole, UpdateRole};

    async fn entries_for(system: &TestSystem, action: &str) -> Vec<AuditEntry> {
        assert_ok!(
            system
                .authz
                .ledger
                .query(AuditFilter::default().action(action))
                .try_collect()
                .await
        )
    }

    #[tokio::test]
    async fn test_create_role_is_audited() {
        let system = TestSystem::new().await;
        let admin = system.login_admin().await;

        let role = assert_ok!(
            system
                .authz
                .admin
                .create_role(&admin, NewRole::new("LIBRARIAN", "Librarian"))
                .await
        );

        let entries = entries_for(&system, actions::CREATE_ROLE).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].actor_username, "admin");
        assert_eq!(entries[0].actor_user_id, admin.user_id());
        assert_eq!(entries[0].entity_type.as_deref(), Some(entity_types::ROLE));
        assert_eq!(entries[0].entity_id, Some(i64::from(role.id)));
    }

    #[tokio::test]
    async fn test_forbidden_touches_nothing() {
        let system = TestSystem::new().await;
        let student = system.login_as("sam", codes::roles::STUDENT).await;

        let err = assert_err!(
            system
                .authz
                .admin
                .create_role(&student, NewRole::new("LIBRARIAN", "Librarian"))
                .await
        );
        assert!(matches!(err, AuthzError::Forbidden { ref permission, .. } if permission == codes::MANAGE_ROLES));

        let missing = assert_err!(system.authz.roles.get_by_code("LIBRARIAN").await);
        assert!(matches!(missing, AuthzError::NotFound(_)));
        assert!(entries_for(&system, actions::CREATE_ROLE).await.is_empty());

        let err = match system.authz.admin.audit_entries(&student, AuditFilter::default()) {
            Ok(_) => panic!("Expected Forbidden for the audit stream"),
            Err(e) => e,
        };
        assert!(matches!(err, AuthzError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_closed_session_is_refused() {
        let system = TestSystem::new().await;
        let admin = system.login_admin().await;
        system.authz.sessions.logout().await;

        let err = assert_err!(
            system
                .authz
                .admin
                .create_role(&admin, NewRole::new("LIBRARIAN", "Librarian"))
                .await
        );
        assert!(matches!(err, AuthzError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_role_lifecycle_leaves_one_entry_per_mutation() {
        let system = TestSystem::new().await;
        let admin = system.login_admin().await;
        let catalog = assert_ok!(system.authz.catalog.list_all().await);
        let policy = &system.authz.admin;

        let role = assert_ok!(policy.create_role(&admin, NewRole::new("LIBRARIAN", "Librarian")).await);

        let mut update = UpdateRole::from(&role);
        update.name = "Head Librarian".to_string();
        assert_ok!(policy.update_role(&admin, update).await);

        let granted = permission_ids(&catalog, &[codes::VIEW_LIBRARY, codes::MANAGE_LIBRARY]);
        let role = assert_ok!(policy.set_role_permissions(&admin, role.id, &granted).await);
        assert_eq!(role.permission_ids(), granted);

        assert_ok!(policy.delete_role(&admin, role.id).await);

        for action in [
            actions::CREATE_ROLE,
            actions::UPDATE_ROLE,
            actions::SET_ROLE_PERMISSIONS,
            actions::DELETE_ROLE,
        ] {
            assert_eq!(entries_for(&system, action).await.len(), 1, "{}", action);
        }
    }

    #[tokio::test]
    async fn test_failed_mutation_is_not_audited() {
        let system = TestSystem::new().await;
        let admin = system.login_admin().await;
        let policy = &system.authz.admin;
        let faculty = assert_ok!(system.authz.roles.get_by_code(codes::roles::FACULTY).await);

        let err = assert_err!(policy.delete_role(&admin, faculty.id).await);
        assert!(matches!(err, AuthzError::SystemRoleImmutable(_)));

        let role = assert_ok!(policy.create_role(&admin, NewRole::new("LIBRARIAN", "Librarian")).await);
        assert_ok!(system.authz.directory.create_user("libby", Some(role.id)).await);
        let err = assert_err!(policy.delete_role(&admin, role.id).await);
        assert!(matches!(err, AuthzError::HasDependents { .. }));

        assert!(entries_for(&system, actions::DELETE_ROLE).await.is_empty());
    }

    #[tokio::test]
    async fn test_assign_role_to_user() {
        let system = TestSystem::new().await;
        let admin = system.login_admin().await;
        let warden = assert_ok!(system.authz.roles.get_by_code(codes::roles::WARDEN).await);
        let account = assert_ok!(system.authz.directory.create_user("wanda", None).await);

        let updated = assert_ok!(
            system
                .authz
                .admin
                .assign_role_to_user(&admin, account.id, warden.id)
                .await
        );
        assert_eq!(updated.role_id, Some(warden.id));

        let entries = entries_for(&system, actions::ASSIGN_ROLE).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_type.as_deref(), Some(entity_types::USER));
        assert_eq!(entries[0].entity_id, Some(i64::from(account.id)));

        let err = assert_err!(
            system
                .authz
                .admin
                .assign_role_to_user(&admin, account.id, 999_999)
                .await
        );
        assert!(matches!(err, AuthzError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_purge_records_itself_and_keeps_recent_entries() {
        let system = TestSystem::new().await;
        let ledger = &system.authz.ledger;
        for n in 0..3 {
            let details = format!("old request {}", n);
            assert_ok!(
                ledger
                    .record(AuditEntryFactory::create(2, "bob", actions::REQUEST_GATE_PASS, &details))
                    .await
            );
        }

        system.clock.set(test_epoch() + Duration::days(400));
        let admin = system.login_admin().await;

        let removed = assert_ok!(system.authz.admin.purge_audit_older_than(&admin, 365).await);
        assert_eq!(removed, 3);

        let purges = entries_for(&system, actions::PURGE_AUDIT_LOG).await;
        assert_eq!(purges.len(), 1);
        assert_eq!(purges[0].entity_type.as_deref(), Some(entity_types::AUDIT_LOG));
        assert!(entries_for(&system, actions::REQUEST_GATE_PASS).await.is_empty());
        assert_eq!(entries_for(&system, actions::LOGIN).await.len(), 1);
    }

    #[tokio::test]
    async fn test_purge_with_oversized_age_removes_nothing() {
        let system = TestSystem::new().await;
        assert_ok!(
            system
                .authz
                .ledger
                .record(AuditEntryFactory::create(2, "bob", actions::REQUEST_GATE_PASS, "pass"))
                .await
        );
        let admin = system.login_admin().await;

        let removed = assert_ok!(system.authz.admin.purge_audit_older_than(&admin, u32::MAX).await);
        assert_eq!(removed, 0);
        assert_eq!(entries_for(&system, actions::REQUEST_GATE_PASS).await.len(), 1);
        assert_eq!(entries_for(&system, actions::PURGE_AUDIT_LOG).await.len(), 1);
    }

    #[tokio::test]
    async fn test_purge_requires_permission() {
        let system = TestSystem::new().await;
        let finance = system.login_as("fran", codes::roles::FINANCE).await;

        let err = assert_err!(system.authz.admin.purge_audit_older_than(&finance, 0).await);
        assert!(matches!(err, AuthzError::Forbidden { .. }));
        assert!(entries_for(&system, actions::PURGE_AUDIT_LOG).await.is_empty());
    }

    #[tokio::test]
    async fn test_admin_reads_the_ledger() {
        let system = TestSystem::new().await;
        let admin = system.login_admin().await;

        let entries: Vec<_> = assert_ok!(
            assert_ok!(system.authz.admin.audit_entries(&admin, AuditFilter::default().actor("admin")))
                .try_collect()
                .await
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, actions::LOGIN);

        let count = assert_ok!(
            system
                .authz
                .admin
                .count_audit_entries(&admin, AuditFilter::default())
                .await
        );
        assert_eq!(count, 1);
    }
}
