// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Rotation cursor: a shuffled sequence plus the index of the next item to serve.

The sequence and its cursor live in one struct behind one lock, so a reader
always sees a cursor that belongs to the sequence it indexes. `next` is an
atomic fetch-and-increment; `reshuffle` permutes and resets the cursor as a
single unit. Random draws for a reshuffle happen before the lock is taken, so
the critical section is just the in-place permutation.
*/

use parking_lot::Mutex;
use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::shuffle;
use crate::types::{ServiceError, ServiceResult};

#[derive(Debug)]
struct RotationState<T> {
    items: Vec<T>,
    cursor: usize,
}

/// Cyclic cursor over a non-empty sequence
#[derive(Debug)]
pub struct Rotation<T> {
    name: &'static str,
    /// Fixed for the lifetime of the rotation
    len: usize,
    state: Mutex<RotationState<T>>,
}

impl<T: Clone> Rotation<T> {
    /// Wrap `items` in their current order with the cursor at 0.
    ///
    /// # Errors
    /// * `ServiceError::EmptyContent` - `items` is empty
    pub fn new(name: &'static str, items: Vec<T>) -> ServiceResult<Self> {
        if items.is_empty() {
            return Err(ServiceError::EmptyContent(format!("{} sequence is empty", name)));
        }

        Ok(Self {
            name,
            len: items.len(),
            state: Mutex::new(RotationState { items, cursor: 0 }),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; construction rejects empty sequences
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return the current item and advance the cursor, wrapping at the end.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> T {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let item = state.items[state.cursor].clone();
        state.cursor = (state.cursor + 1) % state.items.len();
        item
    }

    /// Permute the sequence and reset the cursor to 0.
    ///
    /// On error the sequence and cursor are left untouched.
    pub fn reshuffle<R>(&self, rng: &mut R) -> ServiceResult<()>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let plan = self.draw_plan(rng)?;
        self.apply_plan(&plan)
    }

    /// Draw a swap plan for this sequence without touching it.
    pub fn draw_plan<R>(&self, rng: &mut R) -> ServiceResult<Vec<usize>>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        shuffle::swap_plan(self.len, rng)
    }

    /// Apply a plan from [`Rotation::draw_plan`] and reset the cursor to 0.
    pub fn apply_plan(&self, plan: &[usize]) -> ServiceResult<()> {
        let mut guard = self.state.lock();
        shuffle::apply_swap_plan(&mut guard.items, plan)?;
        guard.cursor = 0;
        drop(guard);

        debug!(target: "rotator-services", "Reshuffled {} sequence ({} items)", self.name, self.len);
        Ok(())
    }

    /// Index of the item the next call to [`Rotation::next`] returns
    pub fn position(&self) -> usize {
        self.state.lock().cursor
    }

    /// Copy of the sequence in its current order
    pub fn items(&self) -> Vec<T> {
        self.state.lock().items.clone()
    }
}
