// ============================================================================
// promo.rs — Random promo codes rendered as one SQL INSERT statement
// ============================================================================

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::PromoConfig;
use crate::error::PromoError;

pub const SUFFIX_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of distinct two-character suffixes.
pub const MAX_CODES: usize = SUFFIX_ALPHABET.len() * SUFFIX_ALPHABET.len();

#[derive(Debug, Clone)]
pub struct PromoBatch {
    pub codes: Vec<String>,
    pub requested: usize,
}

impl PromoBatch {
    /// True when fewer codes were produced than requested.
    pub fn is_capped(&self) -> bool {
        self.codes.len() < self.requested
    }
}

/// Every two-character suffix, in alphabet order.
pub fn all_suffixes() -> Vec<String> {
    let mut suffixes = Vec::with_capacity(MAX_CODES);
    for &a in SUFFIX_ALPHABET {
        for &b in SUFFIX_ALPHABET {
            suffixes.push(String::from_utf8_lossy(&[a, b]).into_owned());
        }
    }
    suffixes
}

/// Shuffles the suffix alphabet once and takes the first `count` entries.
/// Output is capped at `MAX_CODES`; the caller decides how to surface that.
pub fn generate_codes<R: Rng + ?Sized>(prefix: &str, count: usize, rng: &mut R) -> Result<PromoBatch, PromoError> {
    if prefix.is_empty() {
        return Err(PromoError::EmptyPrefix);
    }
    if count == 0 {
        return Err(PromoError::EmptyBatch);
    }

    let mut suffixes = all_suffixes();
    suffixes.shuffle(rng);
    let codes = suffixes
        .into_iter()
        .take(count)
        .map(|suffix| format!("{}{}", prefix, suffix))
        .collect();

    Ok(PromoBatch { codes, requested: count })
}

/// Doubles embedded single quotes and wraps the value in quotes.
pub fn sql_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub fn render_insert(batch: &PromoBatch, config: &PromoConfig) -> String {
    let mut sql = format!(
        "INSERT INTO {} (code, description, is_active, max_uses, discount_percent) VALUES\n",
        config.table
    );
    let description = sql_quote(&config.description);
    let last = batch.codes.len().saturating_sub(1);
    for (i, code) in batch.codes.iter().enumerate() {
        let end = if i < last { "," } else { ";" };
        sql.push_str(&format!(
            "  ({}, {}, true, {}, {}){}\n",
            sql_quote(code),
            description,
            config.max_uses,
            config.discount_percent,
            end
        ));
    }
    sql
}
