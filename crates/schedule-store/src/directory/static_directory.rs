use std::collections::HashMap;

use futures::future::BoxFuture;
use schedule_core::config::MembershipConfig;

use super::MembershipDirectory;
use crate::error::StoreResult;
use crate::model::classroom::Classroom;

/// Membership directory backed by a fixed table, usually from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    memberships: HashMap<(String, String), Vec<Classroom>>,
}

impl StaticDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(memberships: &[MembershipConfig]) -> Self {
        memberships.iter().fold(Self::new(), |directory, m| {
            directory.with_membership(
                &m.tenant_id,
                &m.user_id,
                Classroom::new(m.classroom_id.clone(), m.name.clone()),
            )
        })
    }

    /// Adds `classroom` to the classrooms of `user_id` within `tenant_id`.
    #[must_use]
    pub fn with_membership(mut self, tenant_id: &str, user_id: &str, classroom: Classroom) -> Self {
        let classrooms = self
            .memberships
            .entry((tenant_id.to_string(), user_id.to_string()))
            .or_default();
        if !classrooms
            .iter()
            .any(|c| c.classroom_id == classroom.classroom_id)
        {
            classrooms.push(classroom);
        }
        self
    }
}

impl MembershipDirectory for StaticDirectory {
    fn classrooms_for_user<'a>(
        &'a self,
        tenant_id: &'a str,
        user_id: &'a str,
    ) -> BoxFuture<'a, StoreResult<Vec<Classroom>>> {
        let classrooms = self
            .memberships
            .get(&(tenant_id.to_string(), user_id.to_string()))
            .cloned()
            .unwrap_or_default();

        Box::pin(futures::future::ready(Ok(classrooms)))
    }
}
