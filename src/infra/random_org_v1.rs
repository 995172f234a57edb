//! random.org v1 plain-text dialect implementing the `RandomService` port.
//!
//! Both endpoints answer plain text: `/quota` a bare integer, `/integers`
//! one base-10 integer per line. Usage is billed in bits, one magnitude bit
//! per integer returned.
use crate::domain::errors::VeraRandomError;
use crate::domain::model::{magnitude_bits, RandomConfig, FLOAT_DRAW_PARTS};
use crate::ports::http::Http;
use crate::ports::service::RandomService;

pub const RANDOM_ORG_URL: &str = "https://www.random.org";

/// Requests below this estimate are refused locally.
pub const QUOTA_FLOOR: i64 = 0;
/// Largest quota the service grants a single network identity.
pub const MAX_QUOTA: i64 = 1_000_000;

pub const MAX_INTEGER: i64 = 1_000_000_000;
pub const MIN_INTEGER: i64 = -1_000_000_000;
pub const MAX_INTEGERS_PER_REQUEST: usize = 10_000;
/// A float batch may not imply more integers than one integer batch carries.
pub const MAX_FLOATS_PER_REQUEST: usize = MAX_INTEGERS_PER_REQUEST / FLOAT_DRAW_PARTS;

const FORMAT: (&str, &str) = ("format", "plain");
const RANDOMIZATION: &str = "rnd";
const TRULY_RANDOM: &str = "new";
const BASE: &str = "base";
const BASE_10: &str = "10";
const MIN: &str = "min";
const MAX: &str = "max";
const NUM: &str = "num";
const COL: &str = "col";
const ONE_COLUMN: &str = "1";

/// The documented limits of the v1 API.
pub fn default_config() -> RandomConfig {
    RandomConfig {
        quota_floor: QUOTA_FLOOR,
        max_integer: MAX_INTEGER,
        min_integer: MIN_INTEGER,
        max_integers_per_request: MAX_INTEGERS_PER_REQUEST,
        max_floats_per_request: MAX_FLOATS_PER_REQUEST,
    }
}

pub struct RandomOrgV1<H: Http> {
    http: H,
    quota_url: String,
    integers_url: String,
}

impl<H: Http> RandomOrgV1<H> {
    pub fn new(http: H) -> Self {
        Self::with_base_url(http, RANDOM_ORG_URL)
    }

    /// Point the dialect at a mirror or a test server.
    pub fn with_base_url(http: H, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            http,
            quota_url: format!("{base_url}/quota"),
            integers_url: format!("{base_url}/integers"),
        }
    }

    fn plain_text(&self, url: &str, params: &[(&str, String)]) -> Result<String, VeraRandomError> {
        let mut query: Vec<(&str, String)> = vec![(FORMAT.0, FORMAT.1.to_string())];
        query.extend_from_slice(params);
        Ok(self.http.get_text(url, &query)?)
    }
}

impl<H: Http> RandomService for RandomOrgV1<H> {
    fn fetch_quota(&self) -> Result<i64, VeraRandomError> {
        let body = self.plain_text(&self.quota_url, &[])?;
        parse_integer(body.trim())
    }

    fn fetch_integers(
        &self,
        lower: i64,
        upper: i64,
        count: usize,
    ) -> Result<Vec<i64>, VeraRandomError> {
        let params = [
            (RANDOMIZATION, TRULY_RANDOM.to_string()),
            (BASE, BASE_10.to_string()),
            (MIN, lower.to_string()),
            (MAX, upper.to_string()),
            (NUM, count.to_string()),
            (COL, ONE_COLUMN.to_string()),
        ];
        let body = self.plain_text(&self.integers_url, &params)?;
        let integers = parse_integer_lines(&body)?;
        if integers.len() != count {
            return Err(VeraRandomError::MalformedResponse(format!(
                "requested {count} integers, service sent {}",
                integers.len()
            )));
        }
        Ok(integers)
    }

    fn bits_spent(&self, integers: &[i64]) -> i64 {
        integers.iter().map(|n| i64::from(magnitude_bits(*n))).sum()
    }
}

fn parse_integer_lines(body: &str) -> Result<Vec<i64>, VeraRandomError> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_integer)
        .collect()
}

fn parse_integer(text: &str) -> Result<i64, VeraRandomError> {
    text.parse().map_err(|_| {
        VeraRandomError::MalformedResponse(format!("expected an integer, got {text:?}"))
    })
}
