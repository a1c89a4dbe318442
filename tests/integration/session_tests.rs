//! Session integration tests

#[cfg(test)]
mod tests {
    use crate::common::TestSystem;
    use crate::common::fixtures::permission_ids;
    use crate::{assert_err, assert_ok};
    use futures::TryStreamExt;
    use institute_authz::authz::audit::actions;
    use institute_authz::authz::catalog::codes;
    use institute_authz::{AuditLedgerExt, AuthenticatedUser, AuthzError, NewRole};

    #[tokio::test]
    async fn test_session_reflects_role_permissions() {
        let system = TestSystem::new().await;
        let session = system.login_as("fiona", codes::roles::FACULTY).await;

        assert!(session.has_permission(codes::MANAGE_GRADES));
        assert!(session.has_any_permission(&[codes::MANAGE_FEES, codes::VIEW_COURSES]));
        assert!(!session.has_all_permissions(&[codes::VIEW_COURSES, codes::MANAGE_FEES]));
        assert!(session.is_role(codes::roles::FACULTY));

        let err = assert_err!(session.require(codes::MANAGE_ROLES));
        assert!(matches!(err, AuthzError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_snapshot_ignores_later_role_changes() {
        let system = TestSystem::new().await;
        let catalog = assert_ok!(system.authz.catalog.list_all().await);
        let roles = &system.authz.roles;

        let role = assert_ok!(roles.create(NewRole::new("LIBRARIAN", "Librarian")).await);
        let granted = permission_ids(&catalog, &[codes::VIEW_LIBRARY, codes::MANAGE_LIBRARY]);
        assert_ok!(roles.set_permissions(role.id, &granted).await);

        let account = assert_ok!(system.authz.directory.create_user("libby", Some(role.id)).await);
        let user = AuthenticatedUser::new(account.id, "libby", "LIBRARIAN");
        let before = assert_ok!(system.authz.sessions.login(user.clone()).await);
        assert!(before.has_permission(codes::MANAGE_LIBRARY));

        let reduced = permission_ids(&catalog, &[codes::VIEW_LIBRARY]);
        assert_ok!(roles.set_permissions(role.id, &reduced).await);

        assert!(before.has_permission(codes::MANAGE_LIBRARY));

        let after = assert_ok!(system.authz.sessions.login(user).await);
        assert!(!after.has_permission(codes::MANAGE_LIBRARY));
        assert!(after.has_permission(codes::VIEW_LIBRARY));
    }

    #[tokio::test]
    async fn test_implications_expand_transitively() {
        let system = TestSystem::with_implications(&[
            (codes::MANAGE_GRADES, &[codes::VIEW_GRADES_REPORT]),
            (codes::VIEW_GRADES_REPORT, &[codes::VIEW_ATTENDANCE_REPORT]),
        ])
        .await;

        let session = system.login_as("fiona", codes::roles::FACULTY).await;
        assert!(session.has_permission(codes::VIEW_GRADES_REPORT));
        assert!(session.has_permission(codes::VIEW_ATTENDANCE_REPORT));

        let student = system.login_as("sam", codes::roles::STUDENT).await;
        assert!(!student.has_permission(codes::VIEW_GRADES_REPORT));
    }

    #[tokio::test]
    async fn test_login_with_unknown_role() {
        let system = TestSystem::new().await;
        let err = assert_err!(
            system
                .authz
                .sessions
                .login(AuthenticatedUser::new(42, "ghost", "ALUMNI"))
                .await
        );
        assert!(matches!(err, AuthzError::UnknownRole(role) if role == "ALUMNI"));
        assert!(system.authz.sessions.current().is_none());
    }

    #[tokio::test]
    async fn test_rejected_login_ends_previous_session() {
        let system = TestSystem::new().await;
        let admin = system.login_admin().await;

        let err = assert_err!(
            system
                .authz
                .sessions
                .login(AuthenticatedUser::new(42, "ghost", "ALUMNI"))
                .await
        );
        assert!(matches!(err, AuthzError::UnknownRole(_)));
        assert!(admin.is_closed());
        assert!(!admin.has_permission(codes::MANAGE_ROLES));
        assert!(system.authz.sessions.current().is_none());
    }

    #[tokio::test]
    async fn test_relogin_closes_previous_session() {
        let system = TestSystem::new().await;
        let first = system.login_as("fiona", codes::roles::FACULTY).await;
        let second = system.login_as("sam", codes::roles::STUDENT).await;

        assert!(first.is_closed());
        assert!(!first.has_permission(codes::VIEW_COURSES));
        assert!(first.effective_permissions().is_empty());

        let current = system.authz.sessions.current().expect("a current session");
        assert_eq!(current.username(), second.username());
    }

    #[tokio::test]
    async fn test_logout_fails_closed_and_is_audited() {
        let system = TestSystem::new().await;
        let session = system.login_admin().await;
        assert!(session.has_permission(codes::MANAGE_ROLES));

        let closed = system.authz.sessions.logout().await.expect("an open session");
        assert!(closed.is_closed());
        assert!(!session.has_permission(codes::MANAGE_ROLES));
        assert!(system.authz.sessions.current().is_none());
        assert!(system.authz.sessions.logout().await.is_none());

        let entries: Vec<_> = assert_ok!(
            system
                .authz
                .ledger
                .query_by_actor("admin")
                .try_collect()
                .await
        );
        let recorded: Vec<&str> = entries.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(recorded, vec![actions::LOGOUT, actions::LOGIN]);
    }
}
