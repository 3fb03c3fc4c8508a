//! Value objects for the game domain.

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// Upper bound on the length of a player identifier
const MAX_PLAYER_ID_LEN: usize = 64;

/// Identity of a connected player.
///
/// One identifier is minted per WebSocket connection, so the same value
/// also names the connection when pushing messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyPlayerId);
        }
        if value.len() > MAX_PLAYER_ID_LEN {
            return Err(ValueObjectError::PlayerIdTooLong {
                max: MAX_PLAYER_ID_LEN,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }

    /// Mint a fresh identifier for a new connection
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for PlayerId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display name shown to every player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerName(String);

impl PlayerName {
    /// Name for the n-th player to join the session (1-origin)
    pub fn numbered(join_number: usize) -> Self {
        Self(format!("プレイヤー {}", join_number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unix timestamp in JST (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_accepts_non_empty_value() {
        // テスト項目: 空でない文字列から PlayerId が生成できる
        // given (前提条件):
        let value = "alice".to_string();

        // when (操作):
        let result = PlayerId::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_player_id_rejects_blank_value() {
        // テスト項目: 空白のみの文字列は PlayerId として拒否される
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = PlayerId::try_from(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyPlayerId));
    }

    #[test]
    fn test_player_id_rejects_too_long_value() {
        // テスト項目: 上限を超える長さの文字列は拒否される
        // given (前提条件):
        let value = "a".repeat(MAX_PLAYER_ID_LEN + 1);

        // when (操作):
        let result = PlayerId::new(value);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::PlayerIdTooLong {
                max: MAX_PLAYER_ID_LEN,
                actual: MAX_PLAYER_ID_LEN + 1,
            })
        );
    }

    #[test]
    fn test_generated_player_ids_are_unique() {
        // テスト項目: 接続ごとに生成される PlayerId は重複しない
        // given (前提条件):

        // when (操作):
        let first = PlayerId::generate();
        let second = PlayerId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
        assert!(PlayerId::new(first.into_string()).is_ok());
    }

    #[test]
    fn test_numbered_player_name() {
        // テスト項目: 参加順の番号から表示名が作られる
        // given (前提条件):
        let join_number = 3;

        // when (操作):
        let name = PlayerName::numbered(join_number);

        // then (期待する結果):
        assert_eq!(name.as_str(), "プレイヤー 3");
    }
}
