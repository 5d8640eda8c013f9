// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Fisher–Yates shuffling over a cryptographically secure random source.

The shuffle is split in two halves so callers can draw all randomness first
and only then mutate shared data:

- [`swap_plan`] draws the swap targets for a sequence of length `n`
- [`apply_swap_plan`] performs the swaps in place

[`shuffle`] does both. Every `n!` ordering is equally likely as long as the
source is uniform. Sources must be `CryptoRng`; a failing source is reported
as [`ServiceError::RandomSource`], never papered over.
*/

use rand::{CryptoRng, RngCore};

use crate::types::{ServiceError, ServiceResult};

/// Draw an unbiased index in `[0, bound)`.
///
/// Draws landing in the top partial block of the `u64` range are rejected and
/// redrawn, which removes modulo bias.
pub fn uniform_index<R>(rng: &mut R, bound: usize) -> ServiceResult<usize>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if bound == 0 {
        return Err(ServiceError::InvalidInput(
            "cannot draw an index below 0".to_string(),
        ));
    }

    let bound = bound as u64;
    let zone = u64::MAX - (u64::MAX % bound);
    let mut buf = [0u8; 8];
    loop {
        rng.try_fill_bytes(&mut buf)?;
        let value = u64::from_le_bytes(buf);
        if value < zone {
            return Ok((value % bound) as usize);
        }
    }
}

/// Draw the swap targets for shuffling a sequence of length `len`.
///
/// Entry `k` is the partner of index `len - 1 - k`. Sequences of length 0 or 1
/// produce an empty plan without touching the random source.
pub fn swap_plan<R>(len: usize, rng: &mut R) -> ServiceResult<Vec<usize>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut plan = Vec::with_capacity(len.saturating_sub(1));
    for i in (1..len).rev() {
        plan.push(uniform_index(rng, i + 1)?);
    }
    Ok(plan)
}

/// Apply a plan produced by [`swap_plan`] for the same length.
pub fn apply_swap_plan<T>(items: &mut [T], plan: &[usize]) -> ServiceResult<()> {
    if plan.len() != items.len().saturating_sub(1) {
        return Err(ServiceError::Internal(format!(
            "swap plan of {} entries does not fit a sequence of {}",
            plan.len(),
            items.len()
        )));
    }

    let last = items.len().saturating_sub(1);
    for (k, &j) in plan.iter().enumerate() {
        let i = last - k;
        if j > i {
            return Err(ServiceError::Internal(format!(
                "swap target {} out of range for index {}",
                j, i
            )));
        }
        items.swap(i, j);
    }
    Ok(())
}

/// Shuffle `items` in place.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R) -> ServiceResult<()>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let plan = swap_plan(items.len(), rng)?;
    apply_swap_plan(items, &plan)
}

#[cfg(test)]
pub(crate) mod test_rngs {
    use rand::{CryptoRng, RngCore};
    use std::collections::VecDeque;

    /// Source that always fails, like an exhausted entropy pool
    pub struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            panic!("FailingRng has no entropy")
        }
        fn next_u64(&mut self) -> u64 {
            panic!("FailingRng has no entropy")
        }
        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            panic!("FailingRng has no entropy")
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                "entropy exhausted",
            )))
        }
    }

    impl CryptoRng for FailingRng {}

    /// Source replaying a fixed list of `u64` draws, then failing
    pub struct ScriptedRng {
        pub draws: VecDeque<u64>,
    }

    impl ScriptedRng {
        pub fn new(draws: &[u64]) -> Self {
            Self {
                draws: draws.iter().copied().collect(),
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }
        fn next_u64(&mut self) -> u64 {
            self.draws.pop_front().expect("script exhausted")
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.next_u64().to_le_bytes();
            dest.copy_from_slice(&bytes[..dest.len()]);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            if self.draws.is_empty() {
                return Err(rand::Error::new(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "script exhausted",
                )));
            }
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for ScriptedRng {}
}
