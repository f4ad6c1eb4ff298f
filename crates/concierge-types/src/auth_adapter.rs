//! Adapter for user groups and their permissions
//!
//! Only the slice of an auth store the settings module needs: resolving a
//! group by name, resolving a permission by `(app_label, codename)`, and
//! linking the two.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::types::{GroupId, PermId};

#[derive(Debug, Clone)]
pub struct Group {
	pub group_id: GroupId,
	pub name: Box<str>,
}

#[derive(Debug, Clone)]
pub struct Permission {
	pub perm_id: PermId,
	pub app_label: Box<str>,
	pub codename: Box<str>,
	pub name: Box<str>,
}

#[async_trait]
pub trait AuthAdapter: Debug + Send + Sync {
	/// Find a group by name, case-insensitively
	async fn find_group(&self, name: &str) -> ClResult<Option<Group>>;

	async fn create_group(&self, name: &str) -> ClResult<Group>;

	async fn find_permission(&self, app_label: &str, codename: &str)
	-> ClResult<Option<Permission>>;

	async fn list_group_permissions(&self, group_id: GroupId) -> ClResult<Vec<Permission>>;

	/// Link a permission to a group. Linking twice is not an error.
	async fn add_group_permission(&self, group_id: GroupId, perm_id: PermId) -> ClResult<()>;
}

// vim: ts=4
