use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Roster entry. The engine treats `uid` as an opaque selection token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "UID", alias = "uid", deserialize_with = "uid_text")]
    pub uid: String,
    #[serde(
        rename = "name",
        alias = "player",
        alias = "player_name",
        alias = "player-name"
    )]
    pub name: String,
}

impl Player {
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
        }
    }
}

// Some exports publish numeric UIDs.
fn uid_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "UID must be a string or a number, got {other}"
        ))),
    }
}

pub fn parse_roster(text: &str) -> Result<Vec<Player>, crate::FetchError> {
    serde_json::from_str(text).map_err(|e| crate::FetchError::Format(format!("roster: {e}")))
}

#[cfg(test)]
mod tests {
    use super::{Player, parse_roster};
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_aliases_and_numeric_uids() {
        let players = parse_roster(
            r#"[
                {"UID": "0001", "name": "alice"},
                {"uid": 42, "player": "bob"},
                {"UID": "x9", "player-name": "carol"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            players,
            vec![
                Player::new("0001", "alice"),
                Player::new("42", "bob"),
                Player::new("x9", "carol"),
            ]
        );
    }

    #[test]
    fn rejects_records_without_uid() {
        assert!(parse_roster(r#"[{"name": "nobody"}]"#).is_err());
        assert!(parse_roster(r#"[{"UID": true, "name": "bool"}]"#).is_err());
    }
}
