//! In-memory append-only session store.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::types::{TraceRecord, Turn, UserId, UserProfile};
use crate::traits::SessionStore;

/// Process-lifetime in-memory implementation of [`SessionStore`].
///
/// Each record is appended under a write lock as a single atomic step and
/// never mutated afterwards, so concurrent requests can interleave appends
/// without corrupting the stores. Nothing is persisted across restarts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    turns: RwLock<Vec<Turn>>,
    trace: RwLock<Vec<TraceRecord>>,
    profiles: RwLock<BTreeMap<String, UserProfile>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_profiles<T>(&self, f: impl FnOnce(&mut BTreeMap<String, UserProfile>) -> T) -> T {
        match self.profiles.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poison_error) => {
                tracing::error!("Profile store lock poisoned, using recovered data");
                f(&mut poison_error.into_inner())
            }
        }
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn append_turn(&self, turn: Turn) {
        match self.turns.write() {
            Ok(mut guard) => guard.push(turn),
            Err(poison_error) => {
                tracing::error!("Turn store lock poisoned, using recovered data");
                poison_error.into_inner().push(turn);
            }
        }
    }

    async fn append_trace(&self, record: TraceRecord) {
        match self.trace.write() {
            Ok(mut guard) => guard.push(record),
            Err(poison_error) => {
                tracing::error!("Trace store lock poisoned, using recovered data");
                poison_error.into_inner().push(record);
            }
        }
    }

    async fn turns(&self) -> Vec<Turn> {
        match self.turns.read() {
            Ok(guard) => guard.clone(),
            Err(poison_error) => poison_error.into_inner().clone(),
        }
    }

    async fn trace(&self, user: Option<UserId>) -> Vec<TraceRecord> {
        let records = match self.trace.read() {
            Ok(guard) => guard.clone(),
            Err(poison_error) => poison_error.into_inner().clone(),
        };
        match user {
            Some(user) => records.into_iter().filter(|r| r.user == user).collect(),
            None => records,
        }
    }

    async fn ensure_profile(&self, user: UserId, persona: String) {
        self.with_profiles(|profiles| {
            profiles
                .entry(user.as_str().to_string())
                .or_insert_with(|| UserProfile::new(persona));
        });
    }

    async fn bump_turn_count(&self, user: UserId) {
        self.with_profiles(|profiles| {
            if let Some(profile) = profiles.get_mut(user.as_str()) {
                profile.history_count += 1;
            }
        });
    }

    async fn bump_concepts(&self, user: UserId, terms: Vec<String>) {
        self.with_profiles(|profiles| {
            if let Some(profile) = profiles.get_mut(user.as_str()) {
                for term in terms {
                    *profile.concept_counts.entry(term).or_insert(0) += 1;
                }
            }
        });
    }

    async fn profile(&self, user: UserId) -> Option<UserProfile> {
        match self.profiles.read() {
            Ok(guard) => guard.get(user.as_str()).cloned(),
            Err(poison_error) => poison_error.into_inner().get(user.as_str()).cloned(),
        }
    }

    async fn profiles(&self) -> BTreeMap<String, UserProfile> {
        match self.profiles.read() {
            Ok(guard) => guard.clone(),
            Err(poison_error) => poison_error.into_inner().clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::store::Role;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn user(token: &str) -> UserId {
        UserId::from_token(token).unwrap()
    }

    fn record_for(user: &UserId) -> TraceRecord {
        TraceRecord {
            id: Uuid::new_v4(),
            student_claim: "claim".to_string(),
            interpretation: "(auto)".to_string(),
            detected_issue: "(none)".to_string(),
            detected_fallacies: vec![],
            confidence: None,
            follow_up: "Why?".to_string(),
            ts: Utc::now(),
            user: user.clone(),
        }
    }

    #[tokio::test]
    async fn test_append_and_read_turns() {
        let store = MemoryStore::new();
        let alice = user("alice-token");
        store
            .append_turn(Turn::new(Role::Student, "claim", alice.clone()))
            .await;
        store.append_turn(Turn::new(Role::Ai, "Why?", alice)).await;

        let turns = store.turns().await;
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::Student);
        assert_eq!(turns[1].role, Role::Ai);
    }

    #[tokio::test]
    async fn test_trace_filters_by_user() {
        let store = MemoryStore::new();
        let alice = user("alice-token");
        let bob = user("bob-token");
        store.append_trace(record_for(&alice)).await;
        store.append_trace(record_for(&bob)).await;
        store.append_trace(record_for(&alice)).await;

        assert_eq!(store.trace(Some(alice)).await.len(), 2);
        assert_eq!(store.trace(Some(bob)).await.len(), 1);
        assert_eq!(store.trace(None).await.len(), 3);
    }

    #[tokio::test]
    async fn test_ensure_profile_idempotent() {
        let store = MemoryStore::new();
        let alice = user("alice-token");
        store
            .ensure_profile(alice.clone(), "Socrates".to_string())
            .await;
        store
            .ensure_profile(alice.clone(), "Plato".to_string())
            .await;

        let profile = store.profile(alice).await.unwrap();
        // First contact wins; later personas do not overwrite.
        assert_eq!(profile.persona, "Socrates");
        assert_eq!(profile.history_count, 0);
    }

    #[tokio::test]
    async fn test_bump_turn_count_isolated_per_user() {
        let store = MemoryStore::new();
        let alice = user("alice-token");
        let bob = user("bob-token");
        store
            .ensure_profile(alice.clone(), "Socrates".to_string())
            .await;
        store
            .ensure_profile(bob.clone(), "Plato".to_string())
            .await;

        store.bump_turn_count(alice.clone()).await;
        store.bump_turn_count(alice.clone()).await;

        assert_eq!(store.profile(alice).await.unwrap().history_count, 2);
        assert_eq!(store.profile(bob).await.unwrap().history_count, 0);
    }

    #[tokio::test]
    async fn test_bump_concepts_accumulates() {
        let store = MemoryStore::new();
        let alice = user("alice-token");
        store
            .ensure_profile(alice.clone(), "Socrates".to_string())
            .await;

        store
            .bump_concepts(
                alice.clone(),
                vec!["Justice".to_string(), "Virtue".to_string()],
            )
            .await;
        store
            .bump_concepts(alice.clone(), vec!["Justice".to_string()])
            .await;

        let profile = store.profile(alice).await.unwrap();
        assert_eq!(profile.concept_counts["Justice"], 2);
        assert_eq!(profile.concept_counts["Virtue"], 1);
    }

    #[tokio::test]
    async fn test_bump_without_profile_is_noop() {
        let store = MemoryStore::new();
        let ghost = user("ghost-token");
        store.bump_turn_count(ghost.clone()).await;
        store
            .bump_concepts(ghost.clone(), vec!["Void".to_string()])
            .await;
        assert!(store.profile(ghost).await.is_none());
    }

    #[tokio::test]
    async fn test_profiles_snapshot() {
        let store = MemoryStore::new();
        store
            .ensure_profile(user("alice-token"), "Socrates".to_string())
            .await;
        let profiles = store.profiles().await;
        assert_eq!(profiles.len(), 1);
        assert!(profiles.contains_key("alice-to"));
    }
}
