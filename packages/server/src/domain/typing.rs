//! Typing aggregator.
//!
//! Entries are keyed by connection id and projected to display names only when
//! a snapshot is taken, so two participants sharing a name never clear each
//! other's indicator.

use super::{registry::ConnectionRegistry, value_object::ConnectionId};

/// Connections currently composing a message, in the order they started.
#[derive(Debug, Clone, Default)]
pub struct TypingSet {
    typing: Vec<ConnectionId>,
}

impl TypingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a typing signal from `connection_id`.
    ///
    /// Returns `false` without touching the set when the connection has no
    /// participant in `registry`. A repeated "started" keeps its first position.
    pub fn set_typing(
        &mut self,
        registry: &ConnectionRegistry,
        connection_id: &ConnectionId,
        is_typing: bool,
    ) -> bool {
        if !registry.contains(connection_id) {
            return false;
        }

        if is_typing {
            if !self.typing.contains(connection_id) {
                self.typing.push(connection_id.clone());
            }
        } else {
            self.typing.retain(|id| id != connection_id);
        }
        true
    }

    /// Forget `connection_id` regardless of its previous state.
    pub fn clear_for(&mut self, connection_id: &ConnectionId) {
        self.typing.retain(|id| id != connection_id);
    }

    pub fn is_typing(&self, connection_id: &ConnectionId) -> bool {
        self.typing.contains(connection_id)
    }

    /// Display names of typing participants in start order, duplicates collapsed.
    pub fn snapshot(&self, registry: &ConnectionRegistry) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.typing.len());
        for id in &self.typing {
            let Some(participant) = registry.find(id) else {
                continue;
            };
            let name = participant.name.as_str();
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{DisplayName, Timestamp};

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn registry_with(entries: &[(&str, &str)]) -> ConnectionRegistry {
        let mut registry = ConnectionRegistry::new();
        for (conn, who) in entries {
            registry
                .join(id(conn), DisplayName::new(who).unwrap(), Timestamp::new(0))
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_start_then_stop_removes_name() {
        // テスト項目: 入力開始後に入力停止すると名前が消える
        // given (前提条件):
        let registry = registry_with(&[("c1", "alice")]);
        let mut typing = TypingSet::new();

        // when (操作):
        typing.set_typing(&registry, &id("c1"), true);
        let after_start = typing.snapshot(&registry);
        typing.set_typing(&registry, &id("c1"), false);
        let after_stop = typing.snapshot(&registry);

        // then (期待する結果):
        assert_eq!(after_start, vec!["alice".to_string()]);
        assert!(after_stop.is_empty());
    }

    #[test]
    fn test_unknown_connection_is_noop() {
        // テスト項目: 未登録の接続からの入力通知は無視される
        // given (前提条件):
        let registry = registry_with(&[("c1", "alice")]);
        let mut typing = TypingSet::new();

        // when (操作):
        let resolved = typing.set_typing(&registry, &id("ghost"), true);

        // then (期待する結果):
        assert!(!resolved);
        assert!(!typing.is_typing(&id("ghost")));
        assert!(typing.snapshot(&registry).is_empty());
    }

    #[test]
    fn test_snapshot_keeps_start_order() {
        // テスト項目: スナップショットは入力開始順で、再度の開始でも順序が変わらない
        // given (前提条件):
        let registry = registry_with(&[("c1", "alice"), ("c2", "bob"), ("c3", "carol")]);
        let mut typing = TypingSet::new();

        // when (操作):
        typing.set_typing(&registry, &id("c2"), true);
        typing.set_typing(&registry, &id("c1"), true);
        typing.set_typing(&registry, &id("c2"), true);

        // then (期待する結果):
        assert_eq!(
            typing.snapshot(&registry),
            vec!["bob".to_string(), "alice".to_string()]
        );
    }

    #[test]
    fn test_clear_for_removes_regardless_of_state() {
        // テスト項目: clear_for は入力状態に関係なく削除する
        // given (前提条件):
        let registry = registry_with(&[("c1", "alice"), ("c2", "bob")]);
        let mut typing = TypingSet::new();
        typing.set_typing(&registry, &id("c1"), true);

        // when (操作):
        typing.clear_for(&id("c1"));
        typing.clear_for(&id("c2"));

        // then (期待する結果):
        assert!(!typing.is_typing(&id("c1")));
        assert!(!typing.is_typing(&id("c2")));
    }

    #[test]
    fn test_same_name_participants_do_not_interfere() {
        // テスト項目: 同名の参加者が入力停止しても、もう一方の入力表示は残る
        // given (前提条件):
        let registry = registry_with(&[("c1", "alice"), ("c2", "alice")]);
        let mut typing = TypingSet::new();
        typing.set_typing(&registry, &id("c1"), true);
        typing.set_typing(&registry, &id("c2"), true);

        // when (操作):
        let both = typing.snapshot(&registry);
        typing.set_typing(&registry, &id("c1"), false);
        let one = typing.snapshot(&registry);

        // then (期待する結果):
        assert_eq!(both, vec!["alice".to_string()]);
        assert_eq!(one, vec!["alice".to_string()]);
        assert!(typing.is_typing(&id("c2")));
    }
}
