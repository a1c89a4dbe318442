//! Idempotent installation of the default catalog and system roles

use crate::authz::roles::NewRole;
use crate::config::AuthzConfig;
use crate::storage::database::Database;
use crate::utils::clock::Clock;
use crate::utils::error::{AuthzError, Result};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info, warn};

use super::defaults::{DEFAULT_PERMISSIONS, SYSTEM_ROLES};

/// What a bootstrap run installed or found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Catalog size after seeding
    pub permissions: usize,
    /// System roles synchronised
    pub system_roles: usize,
    /// Implication table codes missing from the catalog
    pub unknown_implication_codes: Vec<String>,
}

/// Seed the catalog and system roles, then sanity-check the implication table
///
/// Safe to run on every start: existing rows are refreshed, never duplicated.
pub async fn bootstrap(db: &Database, clock: &dyn Clock, config: &AuthzConfig) -> Result<BootstrapReport> {
    let mut report = BootstrapReport::default();

    if config.seed_defaults {
        info!("Seeding permission catalog and system roles");

        for def in DEFAULT_PERMISSIONS {
            db.upsert_permission(def.code, def.name, def.category, None)
                .await?;
        }

        let catalog = db.list_permissions().await?;
        let ids: HashMap<&str, i32> = catalog.iter().map(|p| (p.code.as_str(), p.id)).collect();

        for def in SYSTEM_ROLES {
            let grants: BTreeSet<i32> = match def.grants {
                None => catalog.iter().map(|p| p.id).collect(),
                Some(codes) => codes
                    .iter()
                    .map(|code| {
                        ids.get(code).copied().ok_or_else(|| {
                            AuthzError::internal(format!(
                                "system role {} grants uncatalogued {}",
                                def.code, code
                            ))
                        })
                    })
                    .collect::<Result<_>>()?,
            };

            let role = db
                .sync_system_role(
                    &NewRole {
                        code: def.code.to_string(),
                        name: def.name.to_string(),
                        description: Some(def.description.to_string()),
                    },
                    &grants,
                    clock.now(),
                )
                .await?;
            debug!(
                "System role {} holds {} permissions",
                role.code,
                role.permissions.len()
            );
            report.system_roles += 1;
        }
    }

    let known: HashSet<String> = db
        .list_permissions()
        .await?
        .into_iter()
        .map(|p| p.code)
        .collect();
    report.permissions = known.len();

    let mut unknown: BTreeSet<String> = BTreeSet::new();
    for (code, implied) in &config.implications {
        for candidate in std::iter::once(code).chain(implied.iter()) {
            if !known.contains(candidate) {
                unknown.insert(candidate.clone());
            }
        }
    }
    for code in &unknown {
        warn!("Implication table references unknown permission {}", code);
    }
    report.unknown_implication_codes = unknown.into_iter().collect();

    info!(
        "Bootstrap complete: {} permissions, {} system roles",
        report.permissions, report.system_roles
    );
    Ok(report)
}
