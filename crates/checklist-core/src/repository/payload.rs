//! Persisted Payload Formats
//!
//! Three shapes have lived under the storage key over time:
//! - v0: `["text", ...]`
//! - v1: `[{"text": "...", "checked": bool}, ...]` (no ids)
//! - v2: `[{"id": n, "text": "...", "checked": bool}, ...]`
//!
//! Decoding always yields v2 items. Only v2 is ever encoded.

use std::collections::HashSet;

use serde::Deserialize;

use crate::domain::{DomainError, DomainResult, Item, ItemId};

/// Shape a payload was read in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// Bare strings
    LegacyText,
    /// Records without ids
    Unidentified,
    /// Records with ids
    Current,
}

impl PayloadFormat {
    pub fn needs_migration(self) -> bool {
        self != PayloadFormat::Current
    }
}

/// Result of decoding a raw payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub items: Vec<Item>,
    pub format: PayloadFormat,
}

impl Decoded {
    pub(crate) fn empty() -> Self {
        Self {
            items: Vec::new(),
            format: PayloadFormat::Current,
        }
    }
}

#[derive(Deserialize)]
struct StoredRecord {
    #[serde(default)]
    id: Option<ItemId>,
    text: String,
    #[serde(default)]
    checked: bool,
}

/// Structured records are tried first, bare strings second.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPayload {
    Records(Vec<StoredRecord>),
    Legacy(Vec<String>),
}

/// Decode a raw payload, upgrading older shapes
pub fn decode(raw: &str) -> DomainResult<Decoded> {
    if raw.trim().is_empty() {
        return Ok(Decoded::empty());
    }

    let payload: StoredPayload = serde_json::from_str(raw).map_err(|e| {
        DomainError::CorruptState(format!("payload is neither item records nor strings: {}", e))
    })?;

    match payload {
        StoredPayload::Records(records) => decode_records(records),
        StoredPayload::Legacy(texts) => decode_legacy(texts),
    }
}

/// Encode items in the current format
pub fn encode(items: &[Item]) -> DomainResult<String> {
    Ok(serde_json::to_string(items)?)
}

fn decode_records(records: Vec<StoredRecord>) -> DomainResult<Decoded> {
    let mut taken = HashSet::new();
    for id in records.iter().filter_map(|r| r.id) {
        if !taken.insert(id) {
            return Err(DomainError::CorruptState(format!("duplicate item id {}", id)));
        }
    }

    if records.iter().all(|r| r.id.is_some()) {
        let items = records
            .into_iter()
            .filter_map(|record| {
                record.id.map(|id| Item {
                    id,
                    text: record.text,
                    checked: record.checked,
                })
            })
            .collect();
        return Ok(Decoded {
            items,
            format: PayloadFormat::Current,
        });
    }

    let mut fresh = FreshIds::new(taken);
    let items = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let id = match record.id {
                Some(id) => id,
                None => fresh.assign(index)?,
            };
            Ok(Item {
                id,
                text: record.text,
                checked: record.checked,
            })
        })
        .collect::<DomainResult<Vec<_>>>()?;

    Ok(Decoded {
        items,
        format: PayloadFormat::Unidentified,
    })
}

fn decode_legacy(texts: Vec<String>) -> DomainResult<Decoded> {
    let mut fresh = FreshIds::new(HashSet::new());
    let mut items = Vec::with_capacity(texts.len());
    for (index, text) in texts.into_iter().enumerate() {
        if text.trim().is_empty() {
            log::warn!("Dropping blank legacy entry at position {}", index);
            continue;
        }
        items.push(Item::new(fresh.assign(index)?, text));
    }

    Ok(Decoded {
        items,
        format: PayloadFormat::LegacyText,
    })
}

/// Hands out positional ids, skipping any already present in the payload
struct FreshIds {
    taken: HashSet<ItemId>,
    /// `None` once the id space above the largest taken id is used up
    next_free: Option<ItemId>,
}

impl FreshIds {
    fn new(taken: HashSet<ItemId>) -> Self {
        let next_free = match taken.iter().max() {
            Some(max) => max.checked_add(1),
            None => Some(0),
        };
        Self { taken, next_free }
    }

    fn assign(&mut self, index: usize) -> DomainResult<ItemId> {
        let positional = ItemId::try_from(index).ok().filter(|id| !self.taken.contains(id));
        let id = match positional {
            Some(id) => id,
            None => self.next_unused()?,
        };
        self.taken.insert(id);
        Ok(id)
    }

    fn next_unused(&mut self) -> DomainResult<ItemId> {
        loop {
            let candidate = self.next_free.ok_or_else(|| {
                DomainError::CorruptState("no free item id left to migrate records".to_string())
            })?;
            self.next_free = candidate.checked_add(1);
            if !self.taken.contains(&candidate) {
                return Ok(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_payload_is_empty_current() {
        assert_eq!(decode("").unwrap(), Decoded::empty());
        assert_eq!(decode("  \n").unwrap(), Decoded::empty());
    }

    #[test]
    fn empty_array_is_current() {
        let decoded = decode("[]").unwrap();
        assert!(decoded.items.is_empty());
        assert_eq!(decoded.format, PayloadFormat::Current);
    }

    #[test]
    fn current_records_parse_directly() {
        let decoded =
            decode(r#"[{"id":42,"text":"a","checked":true},{"id":7,"text":"b","checked":false}]"#).unwrap();
        assert_eq!(decoded.format, PayloadFormat::Current);
        assert!(!decoded.format.needs_migration());
        assert_eq!(
            decoded.items,
            vec![
                Item { id: 42, text: "a".into(), checked: true },
                Item { id: 7, text: "b".into(), checked: false },
            ]
        );
    }

    #[test]
    fn legacy_strings_get_positional_ids() {
        let decoded = decode(r#"["buy milk", "walk dog"]"#).unwrap();
        assert_eq!(decoded.format, PayloadFormat::LegacyText);
        assert!(decoded.format.needs_migration());
        assert_eq!(decoded.items, vec![Item::new(0, "buy milk"), Item::new(1, "walk dog")]);
    }

    #[test]
    fn legacy_blank_entries_are_dropped() {
        let decoded = decode(r#"["a", "   ", "b"]"#).unwrap();
        let texts: Vec<_> = decoded.items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert_eq!(decoded.items[1].id, 2);
    }

    #[test]
    fn records_without_ids_keep_checked() {
        let decoded = decode(r#"[{"text":"a","checked":true},{"text":"b"}]"#).unwrap();
        assert_eq!(decoded.format, PayloadFormat::Unidentified);
        assert_eq!(
            decoded.items,
            vec![
                Item { id: 0, text: "a".into(), checked: true },
                Item { id: 1, text: "b".into(), checked: false },
            ]
        );
    }

    #[test]
    fn mixed_records_avoid_taken_ids() {
        let decoded = decode(r#"[{"text":"a"},{"id":0,"text":"b"},{"text":"c"}]"#).unwrap();
        let ids: Vec<_> = decoded.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 0, 2]);
    }

    #[test]
    fn positional_collision_moves_past_max() {
        let decoded = decode(r#"[{"id":1,"text":"a"},{"text":"b"},{"id":5,"text":"c"}]"#).unwrap();
        let ids: Vec<_> = decoded.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 6, 5]);
    }

    #[test]
    fn max_id_in_current_payload_loads() {
        let decoded = decode(r#"[{"id":9223372036854775807,"text":"a","checked":false}]"#).unwrap();
        assert_eq!(decoded.format, PayloadFormat::Current);
        assert_eq!(decoded.items[0].id, ItemId::MAX);
    }

    #[test]
    fn max_id_beside_unidentified_records_migrates() {
        let decoded =
            decode(r#"[{"id":9223372036854775807,"text":"a"},{"id":0,"text":"x"},{"text":"b"}]"#).unwrap();
        let ids: Vec<_> = decoded.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![ItemId::MAX, 0, 2]);
    }

    #[test]
    fn exhausted_id_space_is_corrupt() {
        let err =
            decode(r#"[{"text":"b"},{"id":0,"text":"x"},{"id":9223372036854775807,"text":"a"}]"#).unwrap_err();
        assert!(err.is_corrupt_state());
    }

    #[test]
    fn duplicate_ids_are_corrupt() {
        let err = decode(r#"[{"id":1,"text":"a"},{"id":1,"text":"b"}]"#).unwrap_err();
        assert!(err.is_corrupt_state());
    }

    #[test]
    fn unreadable_payloads_are_corrupt() {
        for raw in ["not json {{{", "null", "{}", "42", r#"["a", {"text":"b"}]"#, r#"[1, 2]"#] {
            let err = decode(raw).unwrap_err();
            assert!(err.is_corrupt_state(), "expected corrupt state for {}", raw);
        }
    }

    #[test]
    fn encode_writes_current_shape() {
        let raw = encode(&[Item::new(3, "x")]).unwrap();
        assert_eq!(raw, r#"[{"id":3,"text":"x","checked":false}]"#);
        assert_eq!(decode(&raw).unwrap().format, PayloadFormat::Current);
    }
}
