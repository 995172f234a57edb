//! True-random numbers from [random.org](https://www.random.org), exposed as a
//! conventional generator interface (`next_int`, `next_ints`, `next_float`).
//!
//! There is no local state to seed: every draw is an HTTP request to the
//! service, gated by a locally cached estimate of the caller's remaining bit
//! quota. The generator core (`VeraRandom`) is independent of the wire
//! dialect; `RandomOrgV1` speaks the v1 plain-text API over any [`Http`]
//! transport.
//!
//! ```no_run
//! let mut rng = verarandom::random_org_v1()?;
//! let roll = rng.next_int(1, 6)?;
//! let noise = rng.next_float()?;
//! # Ok::<(), verarandom::VeraRandomError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infra;
pub mod ports;

pub use app::generator::VeraRandom;
pub use domain::errors::{HttpError, VeraRandomError};
pub use domain::model::RandomConfig;
pub use infra::random_org_v1::{self as random_org, RandomOrgV1};
pub use infra::reqwest_http::ReqwestHttp;
pub use ports::http::Http;
pub use ports::service::RandomService;

/// Generator wired to the live random.org v1 endpoints over a blocking
/// reqwest transport. Fails only if the HTTP client cannot be built.
pub fn random_org_v1() -> Result<VeraRandom<RandomOrgV1<ReqwestHttp>>, VeraRandomError> {
    let http = ReqwestHttp::new(concat!("verarandom/", env!("CARGO_PKG_VERSION")))?;
    Ok(VeraRandom::new(
        RandomOrgV1::new(http),
        random_org::default_config(),
    ))
}
