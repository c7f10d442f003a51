/*
 * SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
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

// In-memory BMC for unit tests. Serves canned JSON by URI and records every
// request in the order it arrived.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use reqwest::StatusCode;
use serde_json::Value;

use crate::{Client, RedfishError};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Request {
    Get(String),
    Post(String, Value),
    Patch(String, Value),
}

#[derive(Default)]
struct Inner {
    bodies: HashMap<String, String>,
    failing_writes: HashSet<String>,
    requests: Vec<Request>,
}

#[derive(Clone, Default)]
pub(crate) struct FakeClient {
    inner: Arc<Mutex<Inner>>,
}

impl FakeClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_resource(self, uri: &str, body: Value) -> Self {
        self.with_body(uri, &body.to_string())
    }

    pub(crate) fn with_body(self, uri: &str, body: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .bodies
            .insert(uri.to_string(), body.to_string());
        self
    }

    pub(crate) fn fail_writes_to(self, uri: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .failing_writes
            .insert(uri.to_string());
        self
    }

    pub(crate) fn into_client(self) -> Arc<dyn Client> {
        Arc::new(self)
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub(crate) fn gets(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|r| match r {
                Request::Get(uri) => Some(uri),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn posts(&self) -> Vec<(String, Value)> {
        self.requests()
            .into_iter()
            .filter_map(|r| match r {
                Request::Post(uri, body) => Some((uri, body)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn patches(&self) -> Vec<(String, Value)> {
        self.requests()
            .into_iter()
            .filter_map(|r| match r {
                Request::Patch(uri, body) => Some((uri, body)),
                _ => None,
            })
            .collect()
    }

    fn write(&self, request: Request, uri: &str) -> Result<StatusCode, RedfishError> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(request);
        if inner.failing_writes.contains(uri) {
            return Err(RedfishError::HTTPErrorCode {
                url: uri.to_string(),
                status_code: StatusCode::BAD_REQUEST,
            });
        }
        Ok(StatusCode::NO_CONTENT)
    }
}

#[async_trait::async_trait]
impl Client for FakeClient {
    async fn get(&self, uri: &str) -> Result<(StatusCode, String), RedfishError> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(Request::Get(uri.to_string()));
        match inner.bodies.get(uri) {
            Some(body) => Ok((StatusCode::OK, body.clone())),
            None => Err(RedfishError::HTTPErrorCode {
                url: uri.to_string(),
                status_code: StatusCode::NOT_FOUND,
            }),
        }
    }

    async fn post(&self, uri: &str, body: Value) -> Result<StatusCode, RedfishError> {
        self.write(Request::Post(uri.to_string(), body), uri)
    }

    async fn patch(&self, uri: &str, body: Value) -> Result<StatusCode, RedfishError> {
        self.write(Request::Patch(uri.to_string(), body), uri)
    }
}
