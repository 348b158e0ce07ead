// ABOUTME: Core types and constants for the ConvoInsight conversation analytics backend
// ABOUTME: Foundation crate with error handling, response envelope, pagination, models and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

#![deny(unsafe_code)]

//! # ConvoInsight Core
//!
//! Foundation crate providing shared types for the ConvoInsight backend. It is
//! kept free of HTTP routing and storage code so it changes rarely and the
//! server crate compiles incrementally on top of it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **envelope**: The `{success, data, message}` response wrapper
//! - **pagination**: 1-based page requests and pagination metadata
//! - **models**: Typed, defaulting view over stored conversation documents
//! - **constants**: Application-wide constants organized by domain

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Uniform `{success, data, message}` response envelope
pub mod envelope;

/// Page-number pagination for list endpoints
pub mod pagination;

/// Conversation data models with uniform defaulting rules
pub mod models;

/// Application constants and configuration values organized by domain
pub mod constants;
