// ABOUTME: Defines the Brew record and the input shapes used to create or replace one.
// ABOUTME: BrewInput is the raw request body; validate() turns it into a NewBrew or a ValidationError.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{Collector, Location, ValidationError};

/// Primary key of a stored brew. Assigned by the store, never reused.
pub type BrewId = i64;

/// The validated, user-supplied fields of a brew. Everything except the id
/// and timestamps, which only the store assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBrew {
    pub bean_type: String,
    pub brew_type: String,
    /// Water temperature in Celsius.
    pub water_temp: f64,
    /// Dry coffee dose in grams.
    pub weight_in: f64,
    /// Beverage yield in grams.
    pub weight_out: f64,
    /// Total brew time, nominally "mm:ss". Not format-checked.
    pub brew_time: String,
    /// Bloom (pre-infusion) duration in seconds.
    pub bloom_time: Option<i64>,
    pub details: Option<String>,
    /// Opaque URL or inline data for a photo of the brew.
    pub image_url: Option<String>,
}

/// A stored brew record as returned by every read and write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brew {
    pub id: BrewId,
    #[serde(flatten)]
    pub fields: NewBrew,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for create and update. Every field is optional at the
/// deserialization level so that missing fields are reported alongside
/// range violations instead of failing on the first one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BrewInput {
    pub bean_type: Option<String>,
    pub brew_type: Option<String>,
    pub water_temp: Option<f64>,
    pub weight_in: Option<f64>,
    pub weight_out: Option<f64>,
    pub brew_time: Option<String>,
    pub bloom_time: Option<i64>,
    pub details: Option<String>,
    pub image_url: Option<String>,
}

impl BrewInput {
    /// Check required fields and numeric ranges:
    /// - `bean_type`, `brew_type`, `brew_time` required, any string
    /// - `water_temp`, `weight_in`, `weight_out` required, strictly > 0
    /// - `bloom_time` optional, >= 0 when given
    pub fn validate(self) -> Result<NewBrew, ValidationError> {
        let body = Location::Body;
        let mut c = Collector::default();

        let bean_type = c.required(body, "bean_type", self.bean_type);
        let brew_type = c.required(body, "brew_type", self.brew_type);
        let water_temp = c.positive(body, "water_temp", self.water_temp);
        let weight_in = c.positive(body, "weight_in", self.weight_in);
        let weight_out = c.positive(body, "weight_out", self.weight_out);
        let brew_time = c.required(body, "brew_time", self.brew_time);
        if let Some(bloom) = self.bloom_time {
            c.at_least(body, "bloom_time", bloom, 0);
        }

        let brew = match (bean_type, brew_type, water_temp, weight_in, weight_out, brew_time) {
            (
                Some(bean_type),
                Some(brew_type),
                Some(water_temp),
                Some(weight_in),
                Some(weight_out),
                Some(brew_time),
            ) => Some(NewBrew {
                bean_type,
                brew_type,
                water_temp,
                weight_in,
                weight_out,
                brew_time,
                bloom_time: self.bloom_time,
                details: self.details,
                image_url: self.image_url,
            }),
            _ => None,
        };

        c.finish(brew)
    }
}

/// Default page size when `limit` is omitted.
pub const DEFAULT_LIMIT: i64 = 100;

/// Raw `skip`/`limit` query parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// A validated offset window over the newest-first brew list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT as u64,
        }
    }
}

impl PageQuery {
    /// `skip` must be >= 0 (default 0); `limit` must be >= 1 (default 100).
    /// There is no upper bound on `limit`.
    pub fn validate(self) -> Result<Page, ValidationError> {
        let query = Location::Query;
        let mut c = Collector::default();
        let skip = c.at_least(query, "skip", self.skip.unwrap_or(0), 0);
        let limit = c.at_least(query, "limit", self.limit.unwrap_or(DEFAULT_LIMIT), 1);
        let page = skip.zip(limit).map(|(skip, limit)| Page {
            skip: skip as u64,
            limit: limit as u64,
        });
        c.finish(page)
    }
}
