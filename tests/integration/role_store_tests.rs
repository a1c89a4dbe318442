//! Role store integration tests

#[cfg(test)]
mod tests {
    use crate::common::TestSystem;
    use crate::common::fixtures::permission_ids;
    use crate::{assert_err, assert_ok};
    use institute_authz::authz::UserDirectory;
    use institute_authz::authz::catalog::codes;
    use institute_authz::{AuthzError, NewRole, UpdateRole};
    use std::collections::BTreeSet;

    #[tokio::test]
    async fn test_bootstrap_installs_system_roles() {
        let system = TestSystem::new().await;
        let roles = assert_ok!(system.authz.roles.list_all().await);

        for code in [
            codes::roles::ADMIN,
            codes::roles::FACULTY,
            codes::roles::STUDENT,
            codes::roles::WARDEN,
            codes::roles::FINANCE,
            codes::roles::EXAM_COORD,
        ] {
            let role = roles
                .iter()
                .find(|r| r.code == code)
                .unwrap_or_else(|| panic!("missing system role {}", code));
            assert!(role.is_system_role);
        }

        let catalog = assert_ok!(system.authz.catalog.list_all().await);
        let admin = assert_ok!(system.authz.roles.get_by_code(codes::roles::ADMIN).await);
        assert_eq!(admin.permissions.len(), catalog.len());
    }

    #[tokio::test]
    async fn test_create_and_duplicate_code() {
        let system = TestSystem::new().await;
        let roles = &system.authz.roles;

        let created = assert_ok!(
            roles
                .create(NewRole::new("LIBRARIAN", "Librarian").with_description("Runs the library"))
                .await
        );
        assert!(!created.is_system_role);
        assert!(created.permissions.is_empty());

        let err = assert_err!(roles.create(NewRole::new("LIBRARIAN", "Second")).await);
        assert!(matches!(err, AuthzError::DuplicateCode(code) if code == "LIBRARIAN"));
    }

    #[tokio::test]
    async fn test_set_permissions_replaces_the_whole_set() {
        let system = TestSystem::new().await;
        let roles = &system.authz.roles;
        let catalog = assert_ok!(system.authz.catalog.list_all().await);

        let role = assert_ok!(roles.create(NewRole::new("LIBRARIAN", "Librarian")).await);
        let first = permission_ids(&catalog, &[codes::VIEW_LIBRARY, codes::MANAGE_LIBRARY]);
        let role = assert_ok!(roles.set_permissions(role.id, &first).await);
        assert_eq!(role.permission_ids(), first);

        let second = permission_ids(&catalog, &[codes::VIEW_STUDENTS]);
        let role = assert_ok!(roles.set_permissions(role.id, &second).await);
        assert_eq!(role.permission_ids(), second);
        assert!(!role.has_permission(codes::MANAGE_LIBRARY));

        let cleared = assert_ok!(roles.set_permissions(role.id, &BTreeSet::new()).await);
        assert!(cleared.permissions.is_empty());
    }

    #[tokio::test]
    async fn test_set_permissions_with_unknown_id_changes_nothing() {
        let system = TestSystem::new().await;
        let roles = &system.authz.roles;
        let catalog = assert_ok!(system.authz.catalog.list_all().await);

        let role = assert_ok!(roles.create(NewRole::new("LIBRARIAN", "Librarian")).await);
        let granted = permission_ids(&catalog, &[codes::VIEW_LIBRARY]);
        assert_ok!(roles.set_permissions(role.id, &granted).await);

        let mut bad = granted.clone();
        bad.insert(999_999);
        let err = assert_err!(roles.set_permissions(role.id, &bad).await);
        assert!(matches!(err, AuthzError::NotFound(_)));

        let reloaded = assert_ok!(roles.get_by_id(role.id).await);
        assert_eq!(reloaded.permission_ids(), granted);
    }

    #[tokio::test]
    async fn test_system_roles_are_protected() {
        let system = TestSystem::new().await;
        let roles = &system.authz.roles;
        let faculty = assert_ok!(roles.get_by_code(codes::roles::FACULTY).await);

        let err = assert_err!(roles.delete(faculty.id).await);
        assert!(matches!(err, AuthzError::SystemRoleImmutable(_)));

        let err = assert_err!(roles.set_permissions(faculty.id, &BTreeSet::new()).await);
        assert!(matches!(err, AuthzError::SystemRoleImmutable(_)));

        let mut rename = UpdateRole::from(&faculty);
        rename.code = "TEACHER".to_string();
        let err = assert_err!(roles.update(rename).await);
        assert!(matches!(err, AuthzError::SystemRoleImmutable(_)));

        let mut relabel = UpdateRole::from(&faculty);
        relabel.name = "Teaching Staff".to_string();
        let updated = assert_ok!(roles.update(relabel).await);
        assert_eq!(updated.name, "Teaching Staff");
        assert_eq!(updated.permission_ids(), faculty.permission_ids());
    }

    #[tokio::test]
    async fn test_update_to_taken_code() {
        let system = TestSystem::new().await;
        let roles = &system.authz.roles;

        let role = assert_ok!(roles.create(NewRole::new("LIBRARIAN", "Librarian")).await);
        let mut update = UpdateRole::from(&role);
        update.code = codes::roles::WARDEN.to_string();

        let err = assert_err!(roles.update(update).await);
        assert!(matches!(err, AuthzError::DuplicateCode(_)));
    }

    #[tokio::test]
    async fn test_delete_with_dependents() {
        let system = TestSystem::new().await;
        let roles = &system.authz.roles;
        let directory = &system.authz.directory;

        let role = assert_ok!(roles.create(NewRole::new("LIBRARIAN", "Librarian")).await);
        let student = assert_ok!(roles.get_by_code(codes::roles::STUDENT).await);
        let account = assert_ok!(directory.create_user("libby", Some(role.id)).await);

        let err = assert_err!(roles.delete(role.id).await);
        assert!(matches!(err, AuthzError::HasDependents { users: 1, .. }));
        assert_ok!(roles.get_by_id(role.id).await);

        assert_ok!(directory.assign_role(account.id, student.id).await);

        let deleted = assert_ok!(roles.delete(role.id).await);
        assert_eq!(deleted.code, "LIBRARIAN");
        let err = assert_err!(roles.get_by_id(role.id).await);
        assert!(matches!(err, AuthzError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_role_for_user() {
        let system = TestSystem::new().await;
        let warden = assert_ok!(system.authz.roles.get_by_code(codes::roles::WARDEN).await);
        let account = assert_ok!(system.authz.directory.create_user("wanda", Some(warden.id)).await);

        let role = assert_ok!(system.authz.roles.get_for_user(account.id).await);
        assert_eq!(role.code, codes::roles::WARDEN);

        let unassigned = assert_ok!(system.authz.directory.create_user("nobody", None).await);
        let err = assert_err!(system.authz.roles.get_for_user(unassigned.id).await);
        assert!(matches!(err, AuthzError::NotFound(_)));
    }
}
