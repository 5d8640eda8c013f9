// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Content service implementation.

Holds one [`Rotation`] per content pair (quotes, images). Each pair has its
own lock, so quote traffic never waits on image traffic.
*/

use crate::content::load_image_files;
use crate::rotation::Rotation;
use crate::traits::ContentService;
use crate::types::*;
use async_trait::async_trait;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

/// Default implementation of ContentService
pub struct ContentRotationService {
    quotes: Rotation<String>,
    images: Rotation<String>,
    image_dir: PathBuf,
    shuffle_count: AtomicU64,
}

impl ContentRotationService {
    /// Build a service over the given content, keeping the given order.
    ///
    /// Call [`ContentRotationService::reshuffle_with`] (or use
    /// [`ContentRotationService::load`]) to randomize before serving.
    pub fn new(
        quotes: Vec<String>,
        image_files: Vec<String>,
        image_dir: impl Into<PathBuf>,
    ) -> ServiceResult<Self> {
        Ok(Self {
            quotes: Rotation::new("quotes", quotes)?,
            images: Rotation::new("images", image_files)?,
            image_dir: image_dir.into(),
            shuffle_count: AtomicU64::new(0),
        })
    }

    /// Discover images in `image_dir` and shuffle both sequences once.
    ///
    /// This is the startup path: any error here must stop the process before
    /// the listener is bound.
    pub fn load(quotes: Vec<String>, image_dir: &Path) -> ServiceResult<Self> {
        let image_files = load_image_files(image_dir)?;
        let service = Self::new(quotes, image_files, image_dir)?;
        service.reshuffle_with(&mut OsRng)?;

        info!(
            target: "rotator-services",
            "Loaded {} quotes and {} images from {}",
            service.quotes.len(),
            service.images.len(),
            image_dir.display()
        );
        Ok(service)
    }

    /// Reshuffle both pairs with an explicit random source.
    ///
    /// All randomness for both pairs is drawn before either is touched, so a
    /// failing source leaves both orders and cursors as they were. Each pair
    /// is then permuted and reset under its own lock.
    pub fn reshuffle_with<R>(&self, rng: &mut R) -> ServiceResult<()>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let quote_plan = self.quotes.draw_plan(rng)?;
        let image_plan = self.images.draw_plan(rng)?;

        self.quotes.apply_plan(&quote_plan)?;
        self.images.apply_plan(&image_plan)?;
        self.shuffle_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub fn quotes(&self) -> &Rotation<String> {
        &self.quotes
    }

    pub fn images(&self) -> &Rotation<String> {
        &self.images
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    pub fn shuffle_count(&self) -> u64 {
        self.shuffle_count.load(Ordering::Relaxed)
    }

    /// Synchronous form of [`ContentService::next_image`]
    pub fn next_image_file(&self) -> ImageFile {
        let file_name = self.images.next();
        let path = self.image_dir.join(&file_name);
        ImageFile { file_name, path }
    }
}

#[async_trait]
impl ContentService for ContentRotationService {
    async fn next_quote(&self) -> ServiceResult<String> {
        Ok(self.quotes.next())
    }

    async fn next_image(&self) -> ServiceResult<ImageFile> {
        Ok(self.next_image_file())
    }

    async fn reshuffle(&self) -> ServiceResult<()> {
        self.reshuffle_with(&mut OsRng).map_err(|e| {
            warn!(target: "rotator-services", "Reshuffle failed: {}", e);
            e
        })
    }

    async fn get_content_stats(&self) -> ServiceResult<ContentStats> {
        Ok(ContentStats {
            quote_count: self.quotes.len(),
            image_count: self.images.len(),
            image_dir: self.image_dir.clone(),
            shuffle_count: self.shuffle_count(),
        })
    }
}
