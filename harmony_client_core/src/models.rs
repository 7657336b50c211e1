//! Value objects owned by the Harmony service
//!
//! Everything here is immutable once fetched. Identifiers are assigned by the
//! service; the client never invents one.

use serde::{Deserialize, Deserializer, Serialize};

/// Number of CID characters shown in listings
pub const SHORT_CID_LEN: usize = 12;

/// A compute container as reported by Harmony
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(deserialize_with = "de::id")]
    pub machine_id: String,
    pub name: String,
    pub hostname: String,
    pub image: String,
    #[serde(default)]
    pub entry_point: String,
    #[serde(default)]
    pub enabled: bool,
    /// Runtime instance id, empty until the container has been started
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub cid: String,
}

impl Container {
    /// The CID cut down to its first twelve characters
    pub fn short_cid(&self) -> &str {
        match self.cid.char_indices().nth(SHORT_CID_LEN) {
            Some((idx, _)) => &self.cid[..idx],
            None => &self.cid,
        }
    }

    /// Whether this container is the one that `request` asked for
    pub fn matches(&self, request: &NewContainer) -> bool {
        self.machine_id == request.machine_id
            && self.name == request.name
            && self.hostname == request.hostname
            && self.image == request.image
    }
}

/// A request to create a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContainer {
    pub machine_id: String,
    pub name: String,
    pub hostname: String,
    pub image: String,
    pub entry_point: String,
    pub enabled: bool,
}

/// A machine hosting containers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub name: String,
    pub hostname: String,
    #[serde(default, deserialize_with = "de::id_list")]
    pub container_ids: Vec<String>,
}

/// Body of an enabled-flag update
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct EnabledUpdate {
    pub enabled: bool,
}

/// Harmony wraps every payload in a `data` member
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: Option<T>,
}

mod de {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    impl From<RawId> for String {
        fn from(raw: RawId) -> Self {
            match raw {
                RawId::Text(s) => s,
                RawId::Number(n) => n.to_string(),
            }
        }
    }

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        RawId::deserialize(deserializer).map(String::from)
    }

    pub fn id_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let raw: Option<Vec<RawId>> = Option::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .map(String::from)
            .collect())
    }

    pub fn nullable_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}
