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
use std::{sync::Arc, time::Duration};

use reqwest::{
    header::HeaderValue, header::ACCEPT, header::CONTENT_TYPE, Client as HttpClient,
    ClientBuilder as HttpClientBuilder, Method, StatusCode,
};
use serde_json::Value;
use tracing::debug;

use crate::{Client, RedfishError};

pub const REDFISH_ENDPOINT: &str = "redfish/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug)]
pub struct RedfishClientPoolBuilder {
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl RedfishClientPoolBuilder {
    /// Prevents the Redfish Client from accepting self signed certificates
    /// and other invalid certificates.
    ///
    /// By default self signed certificates will be accepted, since BMCs usually
    /// use those.
    pub fn reject_invalid_certs(mut self) -> RedfishClientPoolBuilder {
        self.accept_invalid_certs = false;
        self
    }

    /// Overwrites the timeout that will be applied to every request
    pub fn timeout(mut self, timeout: Duration) -> RedfishClientPoolBuilder {
        self.timeout = timeout;
        self
    }

    /// Builds a Redfish Client Network Configuration
    pub fn build(&self) -> Result<RedfishClientPool, RedfishError> {
        let http_client = HttpClientBuilder::new()
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .timeout(self.timeout)
            .build()
            .map_err(|e| RedfishError::NetworkError {
                url: String::new(),
                source: e,
            })?;
        Ok(RedfishClientPool { http_client })
    }
}

/// The endpoint that the redfish client connects to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Hostname or IP address of BMC
    pub host: String,
    /// BMC port. If absent the scheme's default port is used
    pub port: Option<u16>,
    /// BMC username
    pub user: Option<String>,
    /// BMC password
    pub password: Option<String>,
    /// https if set, plain http otherwise. Emulators often only speak http.
    pub use_tls: bool,
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint {
            host: "".to_string(),
            port: None,
            user: None,
            password: None,
            use_tls: true,
        }
    }
}

impl Endpoint {
    fn base_url(&self) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        match self.port {
            Some(p) => format!("{scheme}://{}:{p}", self.host),
            None => format!("{scheme}://{}", self.host),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RedfishClientPool {
    http_client: HttpClient,
}

impl RedfishClientPool {
    /// Returns Builder for configuring a Redfish HTTP connection pool
    pub fn builder() -> RedfishClientPoolBuilder {
        RedfishClientPoolBuilder {
            timeout: DEFAULT_TIMEOUT,
            // BMCs often have a self-signed cert, so usually this has to be true
            accept_invalid_certs: true,
        }
    }

    /// Creates a client for a certain endpoint. No request is made until the
    /// first resource is fetched. Clients share the pool's connections.
    pub fn create_client(&self, endpoint: Endpoint) -> Arc<dyn Client> {
        Arc::new(RedfishHttpClient::new(self.http_client.clone(), endpoint))
    }
}

/// A HTTP client which targets a single Redfish endpoint
#[derive(Debug)]
pub struct RedfishHttpClient {
    endpoint: Endpoint,
    http_client: HttpClient,
}

impl RedfishHttpClient {
    pub fn new(http_client: HttpClient, endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            http_client,
        }
    }

    /// Resolves a resource URI to a full URL. Links found in payloads are
    /// absolute paths (`/redfish/v1/...`); anything else is taken relative to
    /// the service root. Full URLs are used as they are.
    pub fn url(&self, uri: &str) -> String {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            return uri.to_string();
        }
        let base = self.endpoint.base_url();
        if uri.starts_with('/') {
            format!("{base}{uri}")
        } else {
            format!("{base}/{REDFISH_ENDPOINT}/{uri}")
        }
    }

    // All the HTTP requests happen from here.
    async fn req(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Result<(StatusCode, String), RedfishError> {
        let url = self.url(uri);
        let body_enc = match body {
            Some(b) => Some(serde_json::to_string(&b).map_err(|e| {
                RedfishError::JsonSerializeError {
                    url: url.clone(),
                    object_debug: format!("{b:?}"),
                    source: e,
                }
            })?),
            None => None,
        };
        debug!(
            "TX {} {} {}",
            method,
            url,
            body_enc.as_deref().unwrap_or_default()
        );

        let mut req_b = self
            .http_client
            .request(method, &url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(user) = &self.endpoint.user {
            req_b = req_b.basic_auth(user, self.endpoint.password.as_ref());
        }
        if let Some(b) = body_enc {
            req_b = req_b.body(b);
        }
        let response = req_b.send().await.map_err(|e| RedfishError::NetworkError {
            url: url.clone(),
            source: e,
        })?;
        let status_code = response.status();
        // read the body even if not status 2XX, because BMCs give useful error messages as JSON
        let response_body = response
            .text()
            .await
            .map_err(|e| RedfishError::NetworkError {
                url: url.clone(),
                source: e,
            })?;
        if response_body.is_empty() {
            debug!("RX {status_code}");
        } else {
            debug!("RX {status_code} {response_body}");
        }

        if !status_code.is_success() {
            return Err(RedfishError::HTTPErrorCode { url, status_code });
        }
        Ok((status_code, response_body))
    }
}

#[async_trait::async_trait]
impl Client for RedfishHttpClient {
    async fn get(&self, uri: &str) -> Result<(StatusCode, String), RedfishError> {
        let (status_code, body) = self.req(Method::GET, uri, None).await?;
        if body.is_empty() {
            return Err(RedfishError::NoContent);
        }
        Ok((status_code, body))
    }

    async fn post(&self, uri: &str, body: Value) -> Result<StatusCode, RedfishError> {
        let (status_code, _resp_body) = self.req(Method::POST, uri, Some(body)).await?;
        Ok(status_code)
    }

    async fn patch(&self, uri: &str, body: Value) -> Result<StatusCode, RedfishError> {
        let (status_code, _resp_body) = self.req(Method::PATCH, uri, Some(body)).await?;
        Ok(status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(port: Option<u16>, use_tls: bool) -> RedfishHttpClient {
        let endpoint = Endpoint {
            host: "10.0.0.5".to_string(),
            port,
            use_tls,
            ..Default::default()
        };
        RedfishHttpClient::new(HttpClient::new(), endpoint)
    }

    #[test]
    fn test_url() {
        let c = client(None, true);
        assert_eq!(
            c.url("/redfish/v1/Chassis/1"),
            "https://10.0.0.5/redfish/v1/Chassis/1"
        );
        assert_eq!(c.url("Chassis/1"), "https://10.0.0.5/redfish/v1/Chassis/1");
        assert_eq!(
            c.url("http://other:8000/redfish/v1"),
            "http://other:8000/redfish/v1"
        );
        let c = client(Some(8000), false);
        assert_eq!(
            c.url("/redfish/v1/Managers/BMC"),
            "http://10.0.0.5:8000/redfish/v1/Managers/BMC"
        );
    }

    #[test]
    fn test_endpoint_defaults_to_tls() {
        assert!(Endpoint::default().use_tls);
    }
}
