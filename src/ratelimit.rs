//! Fixed-window token bucket shared by all download tasks.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// `<n>/<period>`, e.g. `10/minute`, `5/s`, `100/1h`, `3/500ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub requests: u32,
    pub period: Duration,
}

impl FromStr for RateLimit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (count, period) = s
            .split_once('/')
            .ok_or_else(|| format!("invalid rate limit {s:?} (expected number/period)"))?;

        let requests: u32 = count
            .trim()
            .parse()
            .map_err(|_| format!("invalid rate number: {count:?}"))?;
        if requests == 0 {
            return Err("rate must be at least 1".to_string());
        }

        let period = parse_period(period.trim())
            .ok_or_else(|| format!("invalid period: {period:?}"))?;

        Ok(Self { requests, period })
    }
}

impl fmt::Display for RateLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:?}", self.requests, self.period)
    }
}

fn parse_period(s: &str) -> Option<Duration> {
    match s {
        "second" | "s" => return Some(Duration::from_secs(1)),
        "minute" | "min" | "m" => return Some(Duration::from_secs(60)),
        "hour" | "h" => return Some(Duration::from_secs(3600)),
        _ => {}
    }

    let split = s.find(|c: char| !c.is_ascii_digit())?;
    let (value, unit) = s.split_at(split);
    let value: u64 = value.parse().ok()?;
    let period = match unit {
        "ms" => Duration::from_millis(value),
        "s" => Duration::from_secs(value),
        "m" => Duration::from_secs(value * 60),
        "h" => Duration::from_secs(value * 3600),
        _ => return None,
    };
    (!period.is_zero()).then_some(period)
}

struct Bucket {
    tokens: u32,
    window_start: Instant,
}

pub struct RateLimiter {
    limit: RateLimit,
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    pub fn new(limit: RateLimit) -> Self {
        Self {
            limit,
            bucket: Mutex::new(Bucket {
                tokens: limit.requests,
                window_start: Instant::now(),
            }),
        }
    }

    /// Waits until a request may start.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.bucket.lock().await;
                let elapsed = bucket.window_start.elapsed();
                if elapsed >= self.limit.period {
                    bucket.tokens = self.limit.requests;
                    bucket.window_start = Instant::now();
                }
                if bucket.tokens > 0 {
                    bucket.tokens -= 1;
                    return;
                }
                self.limit.period.saturating_sub(elapsed)
            };
            sleep(wait).await;
        }
    }
}
