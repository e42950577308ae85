//! Parsing of free-text transport options
//!
//! The live service returns human-written descriptions such as
//! `"Adresse: A → B | Moyen: Bus 38 | Temps: 1h 05min | Prix: 2,15€"`.
//! This module pulls out the kind of transport, the duration and the price.

use std::fmt;
use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};

/// Kind of transport named in a description
///
/// Declaration order is match priority: a description mentioning both
/// "bus" and "walk" is a bus option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveOptionKind {
    /// Bus or coach
    Bus,
    /// Metro / underground
    Metro,
    /// Train or rail
    Train,
    /// Tramway
    Tram,
    /// Taxi
    Taxi,
    /// On foot
    Walking,
    /// Bicycle
    Bike,
    /// Private car
    Car,
    /// Anything else
    Other,
}

impl LiveOptionKind {
    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bus => "Bus",
            Self::Metro => "Metro",
            Self::Train => "Train",
            Self::Tram => "Tram",
            Self::Taxi => "Taxi",
            Self::Walking => "Walking",
            Self::Bike => "Bike",
            Self::Car => "Car",
            Self::Other => "Transport",
        }
    }

    /// Icon class used by the itinerary page
    #[must_use]
    pub const fn icon_hint(&self) -> &'static str {
        match self {
            Self::Bus => "fas fa-bus",
            Self::Metro => "fas fa-subway",
            Self::Train => "fas fa-train",
            Self::Tram => "fas fa-tram",
            Self::Taxi => "fas fa-taxi",
            Self::Walking => "fas fa-walking",
            Self::Bike => "fas fa-bicycle",
            Self::Car => "fas fa-car",
            Self::Other => "fas fa-shuttle-van",
        }
    }
}

impl fmt::Display for LiveOptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

const KIND_KEYWORDS: &[(&str, LiveOptionKind)] = &[
    ("bus", LiveOptionKind::Bus),
    ("autobus", LiveOptionKind::Bus),
    ("métro", LiveOptionKind::Metro),
    ("metro", LiveOptionKind::Metro),
    ("subway", LiveOptionKind::Metro),
    ("underground", LiveOptionKind::Metro),
    ("train", LiveOptionKind::Train),
    ("rail", LiveOptionKind::Train),
    ("tram", LiveOptionKind::Tram),
    ("taxi", LiveOptionKind::Taxi),
    ("marche", LiveOptionKind::Walking),
    ("à pied", LiveOptionKind::Walking),
    ("walk", LiveOptionKind::Walking),
    ("vélo", LiveOptionKind::Bike),
    ("bike", LiveOptionKind::Bike),
    ("voiture", LiveOptionKind::Car),
    ("car", LiveOptionKind::Car),
];

/// Pre-compiled matcher over lowercased descriptions
static KIND_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    let patterns: Vec<&str> = KIND_KEYWORDS.iter().map(|(k, _)| *k).collect();
    #[allow(clippy::expect_used)] // Infallible with valid static patterns
    AhoCorasick::new(patterns).expect("Failed to build transport keyword matcher")
});

/// A live option description with the fields that could be recognised
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveOption {
    /// Original text as sent by the service
    pub description: String,
    /// Recognised kind of transport
    pub kind: LiveOptionKind,
    /// Travel time in minutes, if stated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Price in euros, if stated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_eur: Option<f64>,
}

impl LiveOption {
    /// Parse a description
    #[must_use]
    pub fn parse(description: &str) -> Self {
        let lower = description.to_lowercase();
        Self {
            description: description.trim().to_string(),
            kind: classify(&lower),
            duration_minutes: parse_duration_minutes(&lower),
            price_eur: parse_price_eur(&lower),
        }
    }

    /// Travel time as `"Hh Mmin"` / `"N min"`, or `"unknown duration"`
    #[must_use]
    pub fn format_time(&self) -> String {
        self.duration_minutes
            .map_or_else(|| "unknown duration".to_string(), domain::format_travel_time)
    }

    /// Price as `"N€"` with up to two decimals, or `"unknown price"`
    #[must_use]
    pub fn format_price(&self) -> String {
        self.price_eur.map_or_else(
            || "unknown price".to_string(),
            |p| {
                if p.fract().abs() < f64::EPSILON {
                    format!("{p:.0}€")
                } else {
                    format!("{p:.2}€")
                }
            },
        )
    }
}

impl fmt::Display for LiveOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} · {} · {}",
            self.kind,
            self.format_time(),
            self.format_price()
        )
    }
}

fn classify(lower: &str) -> LiveOptionKind {
    KIND_MATCHER
        .find_overlapping_iter(lower)
        .map(|m| KIND_KEYWORDS[m.pattern().as_usize()].1)
        .min()
        .unwrap_or(LiveOptionKind::Other)
}

/// First `"<h>h [<m>min]"` or `"<m> min"` in the text, in minutes
fn parse_duration_minutes(lower: &str) -> Option<u32> {
    let bytes = lower.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !starts_number(bytes, i) {
            i += 1;
            continue;
        }

        let (value, end) = read_integer(bytes, i);
        let j = skip_spaces(bytes, end);

        if bytes.get(j) == Some(&b'h') {
            let hours = value.saturating_mul(60);
            let k = skip_spaces(bytes, j + 1);
            if bytes.get(k).is_some_and(u8::is_ascii_digit) {
                let (minutes, end) = read_integer(bytes, k);
                let m = skip_spaces(bytes, end);
                if lower[m..].starts_with("min") {
                    return Some(hours.saturating_add(minutes));
                }
            }
            return Some(hours);
        }

        if lower[j..].starts_with("min") {
            return Some(value);
        }
        i = end;
    }
    None
}

/// First `"<n>[,.<d>] €"` in the text
fn parse_price_eur(lower: &str) -> Option<f64> {
    let bytes = lower.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !starts_number(bytes, i) {
            i += 1;
            continue;
        }

        let mut end = digits_end(bytes, i);
        if matches!(bytes.get(end), Some(b',' | b'.'))
            && bytes.get(end + 1).is_some_and(u8::is_ascii_digit)
        {
            end = digits_end(bytes, end + 1);
        }

        let mut j = end;
        if bytes.get(j) == Some(&b' ') {
            j += 1;
        }
        if lower[j..].starts_with('€') {
            return lower[i..end].replace(',', ".").parse().ok();
        }
        i = end;
    }
    None
}

/// A digit that is not glued to a preceding ASCII word character
fn starts_number(bytes: &[u8], i: usize) -> bool {
    bytes[i].is_ascii_digit()
        && (i == 0 || !(bytes[i - 1].is_ascii_alphanumeric() || bytes[i - 1] == b'_'))
}

fn digits_end(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    end
}

fn read_integer(bytes: &[u8], start: usize) -> (u32, usize) {
    let end = digits_end(bytes, start);
    let value = bytes[start..end].iter().fold(0_u32, |acc, b| {
        acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
    });
    (value, end)
}

fn skip_spaces(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while bytes.get(end) == Some(&b' ') {
        end += 1;
    }
    end
}
