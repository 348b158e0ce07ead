// ABOUTME: HTTP middleware for request tracing, request IDs and CORS
// ABOUTME: Provides request ID generation, span creation and cross-origin configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ConvoInsight

pub mod cors;
pub mod request_id;
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request IDs
pub use request_id::{
    propagate_request_id_layer, set_request_id_layer, MakeRequestUuid, REQUEST_ID_HEADER,
};

// Request tracing
pub use self::tracing::{create_request_span, trace_layer};
