//! Generator core: sequences quota check, parameter check, fetch and debit
//! over a [`RandomService`].
use tracing::{debug, trace};

use crate::domain::errors::VeraRandomError;
use crate::domain::model::{RandomConfig, FLOAT_DRAW_PARTS, FLOAT_PART_MODULUS};
use crate::domain::validate::{validate_count, validate_request};
use crate::ports::service::RandomService;

/// True-random generator over a remote randomness service.
///
/// Holds the only copy of the local quota estimate: unset until the first
/// quota query (explicit or implicit), then decremented by the bit cost of
/// every successful draw. The estimate may go negative; that is a stale
/// local view and stands until the next [`refresh_quota`].
///
/// Every operation takes `&mut self`: access is single-owner and sequential,
/// callers sharing an instance across threads must wrap it themselves.
///
/// [`refresh_quota`]: VeraRandom::refresh_quota
pub struct VeraRandom<S: RandomService> {
    service: S,
    config: RandomConfig,
    quota: Option<i64>,
}

impl<S: RandomService> VeraRandom<S> {
    pub fn new(service: S, config: RandomConfig) -> Self {
        Self {
            service,
            config,
            quota: None,
        }
    }

    /// Start from a caller-supplied quota estimate instead of fetching one.
    pub fn with_initial_quota(service: S, config: RandomConfig, quota: i64) -> Self {
        Self {
            service,
            config,
            quota: Some(quota),
        }
    }

    pub fn config(&self) -> &RandomConfig {
        &self.config
    }

    /// Cached quota estimate, fetching it from the service on first use.
    pub fn quota_estimate(&mut self) -> Result<i64, VeraRandomError> {
        match self.quota {
            Some(quota) => Ok(quota),
            None => self.refresh_quota(),
        }
    }

    /// Unconditionally re-fetch the quota and overwrite the cached estimate.
    pub fn refresh_quota(&mut self) -> Result<i64, VeraRandomError> {
        let quota = self.service.fetch_quota()?;
        debug!(quota, "refreshed quota estimate");
        self.quota = Some(quota);
        Ok(quota)
    }

    /// One truly-random integer in `[lower, upper]`.
    pub fn next_int(&mut self, lower: i64, upper: i64) -> Result<i64, VeraRandomError> {
        let mut batch = self.request_integers(lower, upper, 1)?;
        batch.pop().ok_or_else(|| {
            VeraRandomError::MalformedResponse("service returned an empty batch".to_string())
        })
    }

    /// `count` truly-random integers in `[lower, upper]`, in server order.
    pub fn next_ints(
        &mut self,
        lower: i64,
        upper: i64,
        count: usize,
    ) -> Result<Vec<i64>, VeraRandomError> {
        self.request_integers(lower, upper, count)
    }

    /// One truly-random float in `[0, 1)` with fifteen fractional decimal
    /// digits, built from three five-digit integers: `[12345, 67890, 11111]`
    /// becomes `0.123456789011111`.
    pub fn next_float(&mut self) -> Result<f64, VeraRandomError> {
        self.draw_float()
    }

    /// `count` independent float draws, one integer batch each.
    pub fn next_floats(&mut self, count: usize) -> Result<Vec<f64>, VeraRandomError> {
        validate_count(count, self.config.max_floats_per_request)?;
        (0..count).map(|_| self.draw_float()).collect()
    }

    fn draw_float(&mut self) -> Result<f64, VeraRandomError> {
        let parts = self.request_integers(0, FLOAT_PART_MODULUS - 1, FLOAT_DRAW_PARTS)?;
        let mut numerator = 0i64;
        let mut denominator = 1i64;
        for part in &parts {
            numerator = numerator * FLOAT_PART_MODULUS + part;
            denominator *= FLOAT_PART_MODULUS;
        }
        Ok(numerator as f64 / denominator as f64)
    }

    fn request_integers(
        &mut self,
        lower: i64,
        upper: i64,
        count: usize,
    ) -> Result<Vec<i64>, VeraRandomError> {
        self.ensure_allowed()?;
        validate_request(&self.config, lower, upper, count)?;
        let integers = self.service.fetch_integers(lower, upper, count)?;
        let bits = self.service.bits_spent(&integers);
        self.debit(bits);
        Ok(integers)
    }

    fn ensure_allowed(&mut self) -> Result<(), VeraRandomError> {
        let estimate = self.quota_estimate()?;
        if estimate < self.config.quota_floor {
            return Err(VeraRandomError::QuotaExceeded { estimate });
        }
        Ok(())
    }

    fn debit(&mut self, bits: i64) {
        if let Some(quota) = self.quota.as_mut() {
            *quota -= bits;
            trace!(bits, quota = *quota, "debited quota estimate");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::domain::model::magnitude_bits;

    /// Serves canned batches and counts quota fetches.
    struct FakeService {
        quota: i64,
        batches: RefCell<Vec<Vec<i64>>>,
        quota_fetches: RefCell<usize>,
    }

    impl FakeService {
        fn new(quota: i64, batches: Vec<Vec<i64>>) -> Self {
            Self {
                quota,
                batches: RefCell::new(batches),
                quota_fetches: RefCell::new(0),
            }
        }
    }

    impl RandomService for FakeService {
        fn fetch_quota(&self) -> Result<i64, VeraRandomError> {
            *self.quota_fetches.borrow_mut() += 1;
            Ok(self.quota)
        }

        fn fetch_integers(
            &self,
            _lower: i64,
            _upper: i64,
            _count: usize,
        ) -> Result<Vec<i64>, VeraRandomError> {
            let mut batches = self.batches.borrow_mut();
            if batches.is_empty() {
                Err(VeraRandomError::MalformedResponse(
                    "no batch queued".to_string(),
                ))
            } else {
                Ok(batches.remove(0))
            }
        }

        fn bits_spent(&self, integers: &[i64]) -> i64 {
            integers.iter().map(|n| i64::from(magnitude_bits(*n))).sum()
        }
    }

    fn config() -> RandomConfig {
        RandomConfig {
            quota_floor: 0,
            max_integer: 1_000_000_000,
            min_integer: -1_000_000_000,
            max_integers_per_request: 10_000,
            max_floats_per_request: 3_333,
        }
    }

    #[test]
    fn first_generation_call_primes_the_quota() {
        let service = FakeService::new(1_500, vec![vec![1]]);
        let mut rng = VeraRandom::new(service, config());
        assert_eq!(rng.next_int(1, 1).unwrap(), 1);
        assert_eq!(*rng.service.quota_fetches.borrow(), 1);
    }

    #[test]
    fn preseeded_quota_skips_the_fetch() {
        let service = FakeService::new(9_999, vec![]);
        let mut rng = VeraRandom::with_initial_quota(service, config(), 500);
        assert_eq!(rng.quota_estimate().unwrap(), 500);
        assert_eq!(*rng.service.quota_fetches.borrow(), 0);
    }

    #[test]
    fn refresh_overwrites_a_stale_estimate() {
        let service = FakeService::new(1_000, vec![]);
        let mut rng = VeraRandom::with_initial_quota(service, config(), 3);
        assert_eq!(rng.refresh_quota().unwrap(), 1_000);
        assert_eq!(rng.quota_estimate().unwrap(), 1_000);
    }

    #[test]
    fn quota_at_the_floor_still_allows_a_request() {
        let service = FakeService::new(0, vec![vec![1]]);
        let mut rng = VeraRandom::with_initial_quota(service, config(), 0);
        assert!(rng.next_int(1, 1).is_ok());
    }

    #[test]
    fn quota_below_the_floor_refuses_before_any_fetch() {
        let service = FakeService::new(0, vec![vec![1]]);
        let mut rng = VeraRandom::with_initial_quota(service, config(), -1);
        assert!(matches!(
            rng.next_int(1, 1),
            Err(VeraRandomError::QuotaExceeded { estimate: -1 })
        ));
        assert_eq!(rng.service.batches.borrow().len(), 1);
    }

    #[test]
    fn successful_batch_debits_the_bit_cost() {
        let service = FakeService::new(0, vec![vec![7, 1, 4]]);
        let mut rng = VeraRandom::with_initial_quota(service, config(), 1_000);
        rng.next_ints(1, 8, 3).unwrap();
        assert_eq!(rng.quota_estimate().unwrap(), 993);
    }

    #[test]
    fn debit_may_drive_the_estimate_negative() {
        let service = FakeService::new(0, vec![vec![7], vec![1]]);
        let mut rng = VeraRandom::with_initial_quota(service, config(), 2);
        rng.next_int(1, 8).unwrap();
        assert_eq!(rng.quota_estimate().unwrap(), -1);
        // Stale negative view now refuses further draws.
        assert!(matches!(
            rng.next_int(1, 8),
            Err(VeraRandomError::QuotaExceeded { estimate: -1 })
        ));
    }

    #[test]
    fn failed_fetch_leaves_the_estimate_untouched() {
        let service = FakeService::new(0, vec![]);
        let mut rng = VeraRandom::with_initial_quota(service, config(), 42);
        assert!(rng.next_int(1, 8).is_err());
        assert_eq!(rng.quota_estimate().unwrap(), 42);
    }

    #[test]
    fn validation_runs_before_the_fetch() {
        let service = FakeService::new(0, vec![vec![1]]);
        let mut rng = VeraRandom::with_initial_quota(service, config(), 1_000);
        assert!(matches!(
            rng.next_ints(1, 8, 0),
            Err(VeraRandomError::NoNumbersRequested)
        ));
        assert_eq!(rng.service.batches.borrow().len(), 1);
    }

    #[test]
    fn float_concatenates_zero_padded_parts() {
        let service = FakeService::new(0, vec![vec![12_345, 67_890, 11_111]]);
        let mut rng = VeraRandom::with_initial_quota(service, config(), 1_000_000);
        assert_eq!(rng.next_float().unwrap(), 0.123456789011111);
    }

    #[test]
    fn float_batch_validates_its_count() {
        let service = FakeService::new(0, vec![]);
        let mut rng = VeraRandom::with_initial_quota(service, config(), 1_000_000);
        assert!(matches!(
            rng.next_floats(0),
            Err(VeraRandomError::NoNumbersRequested)
        ));
        assert!(matches!(
            rng.next_floats(3_334),
            Err(VeraRandomError::TooManyNumbersRequested { requested: 3_334, max: 3_333 })
        ));
    }

    #[test]
    fn float_batch_draws_one_integer_batch_per_float() {
        let service = FakeService::new(0, vec![vec![0, 0, 1], vec![99_999, 0, 0]]);
        let mut rng = VeraRandom::with_initial_quota(service, config(), 1_000_000);
        let floats = rng.next_floats(2).unwrap();
        assert_eq!(floats, vec![0.000000000000001, 0.999990000000000]);
    }
}
