// ABOUTME: Page-number pagination module for list endpoints
// ABOUTME: Normalizes 1-based page/pageSize requests and reports pagination metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

use serde::{Deserialize, Serialize};

use crate::constants::limits::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Normalized 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Current page, starting at 1
    pub page: u32,
    /// Items per page
    pub page_size: u32,
}

impl PageRequest {
    /// Build a page request from optional raw values
    ///
    /// Missing values take the defaults, zero is clamped to 1 and the page size
    /// is capped at `MAX_PAGE_SIZE`.
    #[must_use]
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of documents to skip before this page
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64).saturating_sub(1) * self.page_size as u64
    }

    /// Maximum number of documents on this page
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.page_size as u64
    }

    /// Pagination metadata for a result set of `total` matching documents
    #[must_use]
    pub const fn pagination(&self, total: u64) -> Pagination {
        Pagination {
            current: self.page,
            page_size: self.page_size,
            total,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination metadata returned next to a page of items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page, starting at 1
    pub current: u32,
    /// Items per page
    pub page_size: u32,
    /// Total number of matching documents, independent of the page
    pub total: u64,
}

/// A page of items with its pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in this page
    pub items: Vec<T>,
    /// Pagination metadata
    pub pagination: Pagination,
}
