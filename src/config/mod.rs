// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-driven server, store, CORS and analytics configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

//! Configuration module for the ConvoInsight server
//!
//! Everything is read from environment variables, optionally seeded from a
//! `.env` file; see [`environment::ServerConfig::from_env`].

/// Environment and server configuration
pub mod environment;
