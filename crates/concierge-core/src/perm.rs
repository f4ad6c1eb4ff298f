//! Granting the settings change permission to a group

use serde::Serialize;

use concierge_types::auth_adapter::AuthAdapter;

use crate::prelude::*;

/// App label of the permission record, created by schema initialisation
pub const CHANGE_PERM_APP_LABEL: &str = "settings";
pub const CHANGE_PERM_CODENAME: &str = "change_config";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantResult {
	/// The group or the permission record does not exist
	NotFound,
	AlreadyGranted,
	Granted,
}

impl std::fmt::Display for GrantResult {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			GrantResult::NotFound => "not_found",
			GrantResult::AlreadyGranted => "already_granted",
			GrantResult::Granted => "granted",
		})
	}
}

/// Grant the change permission to `group_name` unless it already has it
///
/// Missing records are reported through the result, not as errors. The
/// permission itself is never created here.
pub async fn grant_change_permission(
	auth: &dyn AuthAdapter,
	group_name: &str,
) -> ClResult<GrantResult> {
	let Some(group) = auth.find_group(group_name).await? else {
		debug!("Group '{}' not found", group_name);
		return Ok(GrantResult::NotFound);
	};
	let Some(perm) = auth.find_permission(CHANGE_PERM_APP_LABEL, CHANGE_PERM_CODENAME).await?
	else {
		warn!("Permission {}.{} not found", CHANGE_PERM_APP_LABEL, CHANGE_PERM_CODENAME);
		return Ok(GrantResult::NotFound);
	};

	let granted = auth.list_group_permissions(group.group_id).await?;
	if granted.iter().any(|p| p.perm_id == perm.perm_id) {
		return Ok(GrantResult::AlreadyGranted);
	}

	auth.add_group_permission(group.group_id, perm.perm_id).await?;
	info!(group = %group.name, "Granted {}.{}", CHANGE_PERM_APP_LABEL, CHANGE_PERM_CODENAME);
	Ok(GrantResult::Granted)
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use concierge_types::auth_adapter::{Group, Permission};
	use concierge_types::types::{GroupId, PermId};
	use parking_lot::Mutex;

	#[derive(Debug, Default)]
	struct MemoryAuth {
		groups: Vec<Group>,
		perms: Vec<Permission>,
		links: Mutex<Vec<(GroupId, PermId)>>,
	}

	#[async_trait]
	impl AuthAdapter for MemoryAuth {
		async fn find_group(&self, name: &str) -> ClResult<Option<Group>> {
			Ok(self.groups.iter().find(|g| g.name.eq_ignore_ascii_case(name)).cloned())
		}

		async fn create_group(&self, _name: &str) -> ClResult<Group> {
			Err(Error::Internal("read-only".into()))
		}

		async fn find_permission(
			&self,
			app_label: &str,
			codename: &str,
		) -> ClResult<Option<Permission>> {
			Ok(self
				.perms
				.iter()
				.find(|p| p.app_label.as_ref() == app_label && p.codename.as_ref() == codename)
				.cloned())
		}

		async fn list_group_permissions(&self, group_id: GroupId) -> ClResult<Vec<Permission>> {
			let links = self.links.lock();
			Ok(self
				.perms
				.iter()
				.filter(|p| links.contains(&(group_id, p.perm_id)))
				.cloned()
				.collect())
		}

		async fn add_group_permission(&self, group_id: GroupId, perm_id: PermId) -> ClResult<()> {
			let mut links = self.links.lock();
			if !links.contains(&(group_id, perm_id)) {
				links.push((group_id, perm_id));
			}
			Ok(())
		}
	}

	fn staff() -> Group {
		Group { group_id: GroupId(1), name: "Staff".into() }
	}

	fn change_perm() -> Permission {
		Permission {
			perm_id: PermId(7),
			app_label: CHANGE_PERM_APP_LABEL.into(),
			codename: CHANGE_PERM_CODENAME.into(),
			name: "Can change config".into(),
		}
	}

	#[tokio::test]
	async fn test_grant_is_idempotent() {
		let auth = MemoryAuth { groups: vec![staff()], perms: vec![change_perm()], ..Default::default() };

		assert_eq!(grant_change_permission(&auth, "staff").await.unwrap(), GrantResult::Granted);
		assert_eq!(
			grant_change_permission(&auth, "staff").await.unwrap(),
			GrantResult::AlreadyGranted
		);
		assert_eq!(auth.links.lock().len(), 1);
	}

	#[tokio::test]
	async fn test_grant_missing_group() {
		let auth = MemoryAuth { perms: vec![change_perm()], ..Default::default() };
		assert_eq!(grant_change_permission(&auth, "staff").await.unwrap(), GrantResult::NotFound);
	}

	#[tokio::test]
	async fn test_grant_missing_permission() {
		let auth = MemoryAuth { groups: vec![staff()], ..Default::default() };
		assert_eq!(grant_change_permission(&auth, "staff").await.unwrap(), GrantResult::NotFound);
		assert!(auth.links.lock().is_empty());
	}

	#[test]
	fn test_grant_result_serialization() {
		assert_eq!(serde_json::to_string(&GrantResult::AlreadyGranted).unwrap(), "\"already_granted\"");
		assert_eq!(GrantResult::Granted.to_string(), "granted");
	}
}

// vim: ts=4
