//! JSON catalog parser.
//!
//! This module converts the page payload into a validated [`Catalog`].
//! It is the only place where malformed offer records are detected;
//! everything downstream assumes well-formed data.

use crate::model::{
    Catalog, CatalogError, HistoryEntry, Offer, Platform, PlatformId, Record, Store, StoreName,
};
use crate::view_state::locale_compare;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{info, warn};

// Rate field names, used in error reports
const FIELD_VALUE: &str = "value";
const FIELD_VALUE_SPECIFIC: &str = "value_specific";

// Integral floats beyond this lose precision as i64 ids
const MAX_FLOAT_ID: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    synced_at: Option<Value>,
    #[serde(default)]
    platforms: Option<Vec<RawPlatform>>,
    stores: Vec<RawStore>,
}

#[derive(Debug, Deserialize)]
struct RawPlatform {
    id: Value,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawStore {
    #[serde(default, alias = "store_id")]
    id: Option<i64>,
    #[serde(default, alias = "store_name")]
    name: Option<String>,
    #[serde(default, alias = "store_url")]
    url: Option<String>,
    #[serde(default)]
    offers: Option<Vec<RawRecord>>,
    #[serde(default)]
    history: Option<Vec<RawRecord>>,
}

/// Current offer or history entry.
///
/// Id and rate fields stay as raw JSON so type errors can name the store
/// and record they belong to.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    platform_id: Option<Value>,
    #[serde(default)]
    platform_name: Option<String>,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    value_specific: Option<Value>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "date")]
    date_start: Option<Value>,
    #[serde(default)]
    date_end: Option<Value>,
    #[serde(default, alias = "partnership_url")]
    url: Option<String>,
}

/// Fields shared by offers and history entries, after validation.
struct RecordFields {
    platform_id: PlatformId,
    platform_name: String,
    value: f64,
    value_specific: Option<f64>,
    description: Option<String>,
    date_start: Option<DateTime<Utc>>,
    date_end: Option<DateTime<Utc>>,
    url: Option<String>,
}

/// Store and record a validation error is reported against.
struct RecordContext<'a> {
    store: &'a StoreName,
    record: Record,
}

impl RecordContext<'_> {
    fn store(&self) -> String {
        self.store.to_string()
    }

    fn platform_id(&self, raw: Option<Value>) -> Result<PlatformId, CatalogError> {
        let raw = raw.ok_or_else(|| CatalogError::MissingPlatformId {
            store: self.store(),
            record: self.record,
        })?;
        parse_platform_id(&raw).ok_or_else(|| CatalogError::InvalidPlatformId {
            store: self.store(),
            record: self.record,
            raw: raw_text(&raw),
        })
    }

    /// Rates must be JSON numbers, finite and non-negative. `-0.0` is
    /// normalized to `0.0`.
    fn rate(&self, field: &'static str, raw: Value) -> Result<f64, CatalogError> {
        let value = match &raw {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
        .ok_or_else(|| CatalogError::InvalidValueType {
            store: self.store(),
            record: self.record,
            field,
            raw: raw.to_string(),
        })?;

        if value.is_finite() && value >= 0.0 {
            Ok(value + 0.0)
        } else {
            Err(CatalogError::InvalidValue {
                store: self.store(),
                record: self.record,
                field,
                value,
            })
        }
    }

    fn fields(&self, raw: RawRecord) -> Result<RecordFields, CatalogError> {
        let platform_id = self.platform_id(raw.platform_id)?;
        let value = raw.value.ok_or_else(|| CatalogError::MissingValue {
            store: self.store(),
            record: self.record,
        })?;
        let value = self.rate(FIELD_VALUE, value)?;
        let value_specific = raw
            .value_specific
            .map(|v| self.rate(FIELD_VALUE_SPECIFIC, v))
            .transpose()?;

        Ok(RecordFields {
            platform_id,
            platform_name: raw.platform_name.unwrap_or_default(),
            value,
            value_specific,
            description: raw.description.filter(|d| !d.trim().is_empty()),
            date_start: raw.date_start.and_then(|v| self.timestamp("date_start", v)),
            date_end: raw.date_end.and_then(|v| self.timestamp("date_end", v)),
            url: raw.url.filter(|u| !u.trim().is_empty()),
        })
    }

    fn timestamp(&self, field: &'static str, raw: Value) -> Option<DateTime<Utc>> {
        let parsed = convert_timestamp(&raw);
        if parsed.is_none() {
            warn!(
                store = %self.store,
                record = %self.record,
                field,
                value = %raw,
                "Ignoring unparsable date"
            );
        }
        parsed
    }
}

/// Parse and validate a catalog payload.
///
/// A payload starting with `[` is a bare store array; anything else must
/// be a wrapper object with `stores` and optional `platforms` and
/// `synced_at`.
///
/// # Errors
///
/// Returns [`CatalogError`] for invalid JSON, stores without a name, and
/// records without a usable platform id or base value.
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let (raw_stores, raw_platforms, raw_synced_at) = if json.trim_start().starts_with('[') {
        let stores: Vec<RawStore> = serde_json::from_str(json)?;
        (stores, None, None)
    } else {
        let catalog: RawCatalog = serde_json::from_str(json)?;
        (catalog.stores, catalog.platforms, catalog.synced_at)
    };

    let stores = raw_stores
        .into_iter()
        .enumerate()
        .map(|(index, raw)| convert_store(index, raw))
        .collect::<Result<Vec<_>, _>>()?;

    let platforms = match raw_platforms {
        Some(raw) => convert_platforms(raw)?,
        None => derive_platforms(&stores),
    };

    let synced_at = raw_synced_at.and_then(|raw| {
        let parsed = convert_timestamp(&raw);
        if parsed.is_none() {
            warn!(synced_at = %raw, "Ignoring unparsable synced_at");
        }
        parsed
    });

    info!(
        stores = stores.len(),
        platforms = platforms.len(),
        "Catalog parsed"
    );

    Ok(Catalog {
        stores,
        platforms,
        synced_at,
    })
}

fn convert_store(index: usize, raw: RawStore) -> Result<Store, CatalogError> {
    let name = raw
        .name
        .and_then(|n| StoreName::new(n).ok())
        .ok_or(CatalogError::InvalidStoreName { store: index })?;

    let offers = raw
        .offers
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, record)| convert_offer(&name, i, record))
        .collect::<Result<Vec<_>, _>>()?;

    let mut history = raw
        .history
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, record)| convert_history(&name, i, record))
        .collect::<Result<Vec<_>, _>>()?;
    history.sort_by_key(|entry| entry.date_start);

    Ok(Store {
        id: raw.id,
        name,
        url: raw.url,
        offers,
        history,
    })
}

fn convert_offer(store: &StoreName, index: usize, raw: RawRecord) -> Result<Offer, CatalogError> {
    let context = RecordContext {
        store,
        record: Record::Offer(index),
    };
    let fields = context.fields(raw)?;
    Ok(Offer {
        platform_id: fields.platform_id,
        platform_name: fields.platform_name,
        value: fields.value,
        value_specific: fields.value_specific,
        description: fields.description,
        date_end: fields.date_end,
        url: fields.url,
    })
}

fn convert_history(
    store: &StoreName,
    index: usize,
    raw: RawRecord,
) -> Result<HistoryEntry, CatalogError> {
    let context = RecordContext {
        store,
        record: Record::History(index),
    };
    let fields = context.fields(raw)?;
    Ok(HistoryEntry {
        platform_id: fields.platform_id,
        platform_name: fields.platform_name,
        value: fields.value,
        value_specific: fields.value_specific,
        description: fields.description,
        date_start: fields.date_start,
        date_end: fields.date_end,
    })
}

/// Accepts integers, integral floats like `1.0`, and strings holding
/// either after trimming.
fn parse_platform_id(raw: &Value) -> Option<PlatformId> {
    let id = match raw {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral_id)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral_id))
        }
        _ => None,
    };
    id.map(PlatformId::new)
}

fn integral_id(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_FLOAT_ID)
        .then_some(value as i64)
}

/// Strings are reported without their JSON quotes.
fn raw_text(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn convert_platforms(raw: Vec<RawPlatform>) -> Result<Vec<Platform>, CatalogError> {
    let mut platforms = raw
        .into_iter()
        .enumerate()
        .map(|(index, p)| {
            let id = parse_platform_id(&p.id).ok_or_else(|| CatalogError::InvalidPlatformListId {
                index,
                raw: raw_text(&p.id),
            })?;
            Ok(Platform {
                id,
                name: p.name.unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<_>, CatalogError>>()?;
    sort_platforms(&mut platforms);
    Ok(platforms)
}

/// Collect unique platforms referenced by offers.
///
/// The first non-empty name seen for an id is kept.
fn derive_platforms(stores: &[Store]) -> Vec<Platform> {
    let mut by_id: BTreeMap<PlatformId, String> = BTreeMap::new();
    for offer in stores.iter().flat_map(|s| s.offers.iter()) {
        let name = by_id.entry(offer.platform_id).or_default();
        if name.is_empty() {
            name.clone_from(&offer.platform_name);
        }
    }

    let mut platforms: Vec<Platform> = by_id
        .into_iter()
        .map(|(id, name)| Platform { id, name })
        .collect();
    sort_platforms(&mut platforms);
    platforms
}

fn sort_platforms(platforms: &mut [Platform]) {
    platforms.sort_by(|a, b| locale_compare(&a.name, &b.name).then(a.id.cmp(&b.id)));
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD` or Unix seconds.
///
/// Unix seconds keep millisecond precision, including before the epoch.
fn convert_timestamp(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::Number(n) => n
            .as_f64()
            .filter(|secs| secs.is_finite())
            .and_then(|secs| DateTime::from_timestamp_millis((secs * 1000.0).round() as i64)),
        Value::String(text) => parse_timestamp_text(text.trim()),
        _ => None,
    }
}

fn parse_timestamp_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
