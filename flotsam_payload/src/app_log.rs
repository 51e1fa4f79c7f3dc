//! Application log payload.
//!
//! Imitates the console output of a small web application. Every line is
//! either a pipe-delimited record with a fixed field shape or a bare message
//! body, chosen by coin flip. Timestamps are skewed up to thirty days in
//! either direction so that downstream consumers get exercised on
//! out-of-order and far-future data.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::{
    Duration, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{Error, Generator, common::NoiseString};

// Static placeholder fields of the structured record shape.
const SERVICE: &str = "app";
const THREAD: &str = "thread";
const CLASS: &str = "class";
const SOURCE_LINE: u8 = 64;

// Millisecond precision, three digits, truncated from the sub-second clock
// reading rather than rounded.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]");

/// The log level label of a structured record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Routine operation, the common case.
    Info,
    /// Something went wrong, the uncommon case.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "INFO",
            Severity::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

/// The message body variant.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    /// The decimal rendering of a uniform random float in `[0, 1)`.
    Numeric,
    /// One hundred characters of ASCII letters and raw newlines. A single
    /// logical line may span multiple output lines.
    Noise,
}

/// Configuration for the `AppLog` payload generator.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Probability that a record carries the `ERROR` severity. Must lie in
    /// `[0.0, 1.0]`.
    pub error_chance: f64,
    /// Probability that a line is the bare message body with no record
    /// structure around it. Must lie in `[0.0, 1.0]`.
    pub unstructured_chance: f64,
    /// Maximum timestamp skew, in whole hours. Each record's timestamp is
    /// offset from the generation instant by a uniform draw in
    /// `[-skew_hours, skew_hours]`. Must be non-negative.
    pub skew_hours: i64,
    /// The message body variant.
    pub body: Body,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            error_chance: 0.2,
            unstructured_chance: 0.5,
            skew_hours: 720,
            body: Body::Numeric,
        }
    }
}

/// A fully assembled structured record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub(crate) timestamp: String,
    pub(crate) severity: Severity,
    pub(crate) message: String,
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {} | {}: {}",
            self.timestamp, SERVICE, self.severity, THREAD, CLASS, SOURCE_LINE, self.message
        )
    }
}

/// One generated log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// The raw message body alone.
    Unstructured(String),
    /// The pipe-delimited record shape.
    Structured(Member),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Unstructured(message) => write!(f, "{message}"),
            Line::Structured(member) => write!(f, "{member}"),
        }
    }
}

#[derive(Debug, Clone)]
/// Application log payload
pub struct AppLog {
    error_chance: f64,
    unstructured_chance: f64,
    skew_hours: i64,
    body: Body,
    noise: NoiseString,
}

impl AppLog {
    /// Construct a new instance of `AppLog`.
    ///
    /// # Errors
    ///
    /// Function will error if the configuration's probabilities fall outside
    /// `[0.0, 1.0]` or its skew is negative.
    pub fn new(config: Config) -> Result<Self, Error> {
        if !(0.0..=1.0).contains(&config.error_chance) {
            return Err(Error::Validation(format!(
                "error_chance must lie in [0.0, 1.0]: {chance}",
                chance = config.error_chance
            )));
        }
        if !(0.0..=1.0).contains(&config.unstructured_chance) {
            return Err(Error::Validation(format!(
                "unstructured_chance must lie in [0.0, 1.0]: {chance}",
                chance = config.unstructured_chance
            )));
        }
        if config.skew_hours < 0 {
            return Err(Error::Validation(format!(
                "skew_hours must be non-negative: {hours}",
                hours = config.skew_hours
            )));
        }

        Ok(Self {
            error_chance: config.error_chance,
            unstructured_chance: config.unstructured_chance,
            skew_hours: config.skew_hours,
            body: config.body,
            noise: NoiseString::default(),
        })
    }

    /// Generate one line with timestamps skewed relative to `base`.
    ///
    /// The draw order is fixed: severity, timestamp offset, message body,
    /// then the structure coin. Severity and timestamp are drawn even when
    /// the coin lands on an unstructured line, so a seeded run replays
    /// identically whichever way each coin falls.
    pub fn generate_at<R>(&self, base: OffsetDateTime, rng: &mut R) -> Line
    where
        R: Rng + ?Sized,
    {
        let severity = if rng.random::<f64>() < self.error_chance {
            Severity::Error
        } else {
            Severity::Info
        };
        let timestamp = skewed_timestamp(base, self.skew_hours, rng);
        let message = match self.body {
            Body::Numeric => rng.random::<f64>().to_string(),
            Body::Noise => self.noise.generate(rng),
        };

        if rng.random::<f64>() < self.unstructured_chance {
            Line::Unstructured(message)
        } else {
            Line::Structured(Member {
                timestamp,
                severity,
                message,
            })
        }
    }
}

impl<'a> Generator<'a> for AppLog {
    type Output = Line;
    type Error = Error;

    fn generate<R>(&'a self, rng: &mut R) -> Result<Self::Output, Self::Error>
    where
        R: rand::Rng + ?Sized,
    {
        Ok(self.generate_at(OffsetDateTime::now_utc(), rng))
    }
}

fn skewed_timestamp<R>(base: OffsetDateTime, skew_hours: i64, rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let offset = rng.random_range(-skew_hours..=skew_hours);
    let skewed = base + Duration::hours(offset);
    skewed
        .format(&TIMESTAMP_FORMAT)
        .expect("failed to format timestamp")
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::SmallRng};
    use time::{Duration, PrimitiveDateTime, macros::datetime};

    use super::{AppLog, Body, Config, Line, Severity, TIMESTAMP_FORMAT, skewed_timestamp};

    const BASE: time::OffsetDateTime = datetime!(2024-03-01 09:30:00 UTC);

    // Timestamps parse back with the exact format description, carry three
    // sub-second digits and land within the configured skew of the base
    // instant. One second of slack covers sub-second truncation.
    proptest! {
        #[test]
        fn timestamp_parses_and_is_bounded(seed: u64) {
            let mut rng = SmallRng::seed_from_u64(seed);

            for _ in 0..32 {
                let s = skewed_timestamp(BASE, 720, &mut rng);
                prop_assert_eq!(s.len(), 23);

                let parsed = PrimitiveDateTime::parse(&s, &TIMESTAMP_FORMAT)
                    .expect("timestamp must round-trip");
                let distance = (parsed.assume_utc() - BASE).abs();
                prop_assert!(distance <= Duration::hours(720) + Duration::seconds(1));
            }
        }
    }

    // Numeric message bodies are the decimal rendering of a float in [0, 1).
    proptest! {
        #[test]
        fn numeric_body_lies_in_unit_interval(seed: u64) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let config = Config {
                unstructured_chance: 1.0,
                ..Config::default()
            };
            let payload = AppLog::new(config).expect("config is valid");

            for _ in 0..32 {
                let line = payload.generate_at(BASE, &mut rng);
                let Line::Unstructured(message) = line else {
                    panic!("unstructured_chance of 1.0 must yield bare bodies");
                };
                let value: f64 = message.parse().expect("body must parse as f64");
                prop_assert!((0.0..1.0).contains(&value));
            }
        }
    }

    // Structured records hold exactly five " | " separators, the static
    // placeholder fields and a message prefixed by the source line.
    proptest! {
        #[test]
        fn structured_record_has_fixed_shape(seed: u64) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let config = Config {
                unstructured_chance: 0.0,
                ..Config::default()
            };
            let payload = AppLog::new(config).expect("config is valid");

            for _ in 0..32 {
                let line = payload.generate_at(BASE, &mut rng);
                let Line::Structured(ref member) = line else {
                    panic!("unstructured_chance of 0.0 must yield records");
                };

                let rendered = line.to_string();
                prop_assert_eq!(rendered.matches(" | ").count(), 5);
                let expected_suffix = format!("64: {}", member.message);
                prop_assert!(rendered.ends_with(&expected_suffix));

                let fields: Vec<&str> = rendered.split(" | ").collect();
                prop_assert_eq!(fields.len(), 6);
                prop_assert_eq!(fields[1], "app");
                prop_assert!(fields[2] == "INFO" || fields[2] == "ERROR");
                prop_assert_eq!(fields[3], "thread");
                prop_assert_eq!(fields[4], "class");
            }
        }
    }

    // Identical seed, configuration and base instant must replay the exact
    // same stream of lines.
    proptest! {
        #[test]
        fn generation_is_deterministic_under_seed(seed: u64) {
            let payload_one = AppLog::new(Config::default()).expect("config is valid");
            let payload_two = AppLog::new(Config::default()).expect("config is valid");
            let mut rng_one = SmallRng::seed_from_u64(seed);
            let mut rng_two = SmallRng::seed_from_u64(seed);

            for _ in 0..32 {
                let one = payload_one.generate_at(BASE, &mut rng_one);
                let two = payload_two.generate_at(BASE, &mut rng_two);
                prop_assert_eq!(one.to_string(), two.to_string());
            }
        }
    }

    // Statistical property: the empirical ERROR frequency converges on the
    // configured chance. Seeded, so the tolerance is safe.
    #[test]
    fn severity_frequency_converges() {
        let mut rng = SmallRng::seed_from_u64(0x0F10_75A4);
        let config = Config {
            unstructured_chance: 0.0,
            ..Config::default()
        };
        let payload = AppLog::new(config).expect("config is valid");

        let total = 100_000_u32;
        let mut errors = 0_u32;
        for _ in 0..total {
            if let Line::Structured(member) = payload.generate_at(BASE, &mut rng) {
                if member.severity == Severity::Error {
                    errors += 1;
                }
            }
        }

        let frequency = f64::from(errors) / f64::from(total);
        assert!(
            (frequency - 0.2).abs() < 0.01,
            "ERROR frequency drifted: {frequency}"
        );
    }

    #[test]
    fn noise_body_spans_lines() {
        let mut rng = SmallRng::seed_from_u64(8_191);
        let config = Config {
            unstructured_chance: 1.0,
            body: Body::Noise,
            ..Config::default()
        };
        let payload = AppLog::new(config).expect("config is valid");

        let Line::Unstructured(message) = payload.generate_at(BASE, &mut rng) else {
            panic!("unstructured_chance of 1.0 must yield bare bodies");
        };
        assert_eq!(message.len(), 100);
        assert!(
            message
                .chars()
                .all(|c| c.is_ascii_alphabetic() || c == '\n')
        );
    }

    #[test]
    fn config_validation_rejects_out_of_range() {
        let chance_high = Config {
            error_chance: 1.5,
            ..Config::default()
        };
        assert!(AppLog::new(chance_high).is_err());

        let chance_negative = Config {
            unstructured_chance: -0.1,
            ..Config::default()
        };
        assert!(AppLog::new(chance_negative).is_err());

        let skew_negative = Config {
            skew_hours: -1,
            ..Config::default()
        };
        assert!(AppLog::new(skew_negative).is_err());
    }
}
