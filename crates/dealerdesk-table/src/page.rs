// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 1-based page request. The size is fixed for the lifetime of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    number: usize,
    size: usize,
}

impl PageRequest {
    pub fn new(number: usize, size: usize) -> Result<Self> {
        if size == 0 {
            bail!("page size must be at least 1");
        }
        Ok(Self {
            number: number.max(1),
            size,
        })
    }

    pub fn first(size: usize) -> Result<Self> {
        Self::new(1, size)
    }

    pub const fn number(self) -> usize {
        self.number
    }

    pub const fn size(self) -> usize {
        self.size
    }

    /// Same size, different page. Page 0 is treated as page 1.
    pub fn with_number(self, number: usize) -> Self {
        Self {
            number: number.max(1),
            size: self.size,
        }
    }

    pub const fn offset(self) -> usize {
        (self.number - 1).saturating_mul(self.size)
    }
}

pub const fn total_pages(count: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    count.div_ceil(size)
}

/// Slice for `page`. A page beyond the end is empty rather than clamped; the
/// caller resets to page 1 whenever the filtered set can shrink.
pub fn paginate<T>(items: &[T], page: PageRequest) -> &[T] {
    let start = page.offset();
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page.size()).min(items.len());
    &items[start..end]
}
