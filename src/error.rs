/*
 * SPDX-FileCopyrightText: Copyright (c) 2023 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: MIT
 *
 * Permission is hereby granted, free of charge, to any person obtaining a
 * copy of this software and associated documentation files (the "Software"),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in
 * all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
 * THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */
use std::{collections::BTreeMap, fmt};

use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum RedfishError {
    #[error("Network error talking to BMC at {url}. {source}")]
    NetworkError { url: String, source: reqwest::Error },

    #[error("HTTP {status_code} at {url}. See debug logs for details.")]
    HTTPErrorCode {
        url: String,
        status_code: StatusCode,
    },

    #[error("Could not deserialize response from {url}. Body: {body}. {source}")]
    JsonDeserializeError {
        url: String,
        body: String,
        source: serde_json::Error,
    },

    #[error("Could not serialize request body for {url}. Obj: {object_debug}. {source}")]
    JsonSerializeError {
        url: String,
        object_debug: String,
        source: serde_json::Error,
    },

    #[error("Remote returned empty body")]
    NoContent,

    #[error("Missing key {key} in JSON at {url}")]
    MissingKey { key: String, url: String },

    #[error("Key {key} should be {expected_type} at {url}")]
    InvalidKeyType {
        key: String,
        expected_type: String,
        url: String,
    },

    #[error("Expected {expected} but {resource_uri} is {actual} ({resource_type})")]
    TypeMismatch {
        expected: String,
        actual: String,
        resource_type: String,
        resource_uri: String,
    },

    #[error("Resource {url} has no client attached")]
    NoClient { url: String },

    #[error("Action {action} is not supported by {resource}")]
    UnsupportedAction { action: String, resource: String },

    #[error(transparent)]
    Collection(#[from] CollectionError),
}

impl RedfishError {
    /// True for errors that come from decoding a payload rather than from the transport.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            RedfishError::JsonDeserializeError { .. }
                | RedfishError::MissingKey { .. }
                | RedfishError::InvalidKeyType { .. }
                | RedfishError::TypeMismatch { .. }
        )
    }
}

/// Failures collected while resolving several linked resources, keyed by the URI
/// that failed. An empty CollectionError means every member was resolved.
#[derive(Debug, Default)]
pub struct CollectionError {
    pub failures: BTreeMap<String, RedfishError>,
}

impl CollectionError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub(crate) fn insert(&mut self, uri: String, err: RedfishError) {
        self.failures.insert(uri, err);
    }
}

impl std::error::Error for CollectionError {}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to retrieve {} collection member(s):", self.len())?;
        for (uri, err) in &self.failures {
            write!(f, " [{uri}: {err}]")?;
        }
        Ok(())
    }
}
