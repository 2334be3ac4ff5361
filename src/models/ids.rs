// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Serde helpers for backend identifiers.
//!
//! Records may carry `_id`, `id`, or both (Mongoose with virtuals). `_id`
//! wins when both are present.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

/// Accept an optional identifier sent either as a JSON string or a JSON number.
pub(crate) fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(RawId::into_string))
}

#[derive(Debug, thiserror::Error)]
#[error("record has neither `_id` nor `id`")]
pub struct MissingId;

/// Both identifier spellings as read off the wire.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireId {
    #[serde(rename = "_id", default, deserialize_with = "optional_string_or_number")]
    mongo: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    id: Option<String>,
}

impl WireId {
    pub(crate) fn resolve(self) -> Result<String, MissingId> {
        self.mongo.or(self.id).ok_or(MissingId)
    }
}
