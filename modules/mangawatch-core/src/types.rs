use std::fmt;
use std::str::FromStr;

/// Last confirmed installment number for a feed. Non-negative and finite;
/// fractional installments ("10.5") are valid.
///
/// `Display` canonicalizes: an integral value renders without a decimal
/// point (`2`, never `2.0`) so a written watermark reparses to the same
/// value on the next run.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Watermark(f64);

impl Watermark {
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            // Not an i64 cast: that saturates for values past i64::MAX.
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for Watermark {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| format!("not a number: {s:?}"))?;
        Watermark::new(value).ok_or_else(|| format!("not a valid watermark: {s:?}"))
    }
}

/// One tracked source: where to look, what to match, and the last
/// installment we confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    pub name: String,
    pub url: String,
    pub locator: String,
    pub watermark: Watermark,
}

/// A pending outbound alert for one advanced feed. Produced by the
/// resolver, consumed exactly once by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationTask {
    pub feed_name: String,
    pub url: String,
    pub prior_watermark: Watermark,
    pub new_watermark: Watermark,
}
