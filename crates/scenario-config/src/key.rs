//! Scenario identity

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Primary key of a scenario node: `(sceneId, subsceneId)`
///
/// Displayed and parsed as `scene:subscene`, e.g. `1:2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioKey {
    /// Scene number
    pub scene_id: u32,
    /// Subscene number within the scene
    pub subscene_id: u32,
}

impl ScenarioKey {
    /// Create a key
    #[inline]
    #[must_use]
    pub const fn new(scene_id: u32, subscene_id: u32) -> Self {
        Self {
            scene_id,
            subscene_id,
        }
    }
}

impl Display for ScenarioKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scene_id, self.subscene_id)
    }
}

impl FromStr for ScenarioKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scene, subscene) = s
            .trim()
            .split_once([':', '.'])
            .ok_or_else(|| KeyParseError(s.to_string()))?;
        let scene_id = scene.parse().map_err(|_| KeyParseError(s.to_string()))?;
        let subscene_id = subscene.parse().map_err(|_| KeyParseError(s.to_string()))?;
        Ok(Self::new(scene_id, subscene_id))
    }
}

impl From<(u32, u32)> for ScenarioKey {
    fn from((scene_id, subscene_id): (u32, u32)) -> Self {
        Self::new(scene_id, subscene_id)
    }
}

/// Key string is not `scene:subscene`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid scenario key '{0}' (expected scene:subscene)")]
pub struct KeyParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display_and_parse() {
        let key = ScenarioKey::new(1, 2);
        assert_eq!(key.to_string(), "1:2");
        assert_eq!("1:2".parse::<ScenarioKey>().unwrap(), key);
        assert_eq!("1.2".parse::<ScenarioKey>().unwrap(), key);
    }

    #[test]
    fn key_parse_rejects_garbage() {
        for bad in ["", "1", "a:b", "1:-2", "1:2:3"] {
            assert!(bad.parse::<ScenarioKey>().is_err(), "{bad}");
        }
    }

    #[test]
    fn key_orders_by_scene_then_subscene() {
        let mut keys = vec![
            ScenarioKey::new(2, 0),
            ScenarioKey::new(1, 5),
            ScenarioKey::new(1, 1),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![ScenarioKey::new(1, 1), ScenarioKey::new(1, 5), ScenarioKey::new(2, 0)]
        );
    }

    #[test]
    fn key_serializes_camel_case() {
        let json = serde_json::to_value(ScenarioKey::new(3, 4)).unwrap();
        assert_eq!(json, serde_json::json!({"sceneId": 3, "subsceneId": 4}));
    }
}
