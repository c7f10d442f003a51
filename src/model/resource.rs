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
use std::{fmt, sync::Arc};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{value::RawValue, Map, Value};
use tracing::debug;

use crate::collection::Collected;
use crate::model::link::{Link, LinkCollection};
use crate::{Client, RedfishError};

// A Resource is a single entity accessed at a specific URI. A resource collection is a
// set of resources that share the same schema definition. Both are defined in Redfish Spec to have the
// following propeties that we must capture.
//
//                  for Resource        for Resource-Collection
// @odata.id   -    mandatory           mandatory
// @odata.type -    mandatory           mandatory
// @odata.etag -    mandatory           optional
// @odata.context   optional            optional
//
// Plenty of BMCs leave some of these out, so none of them fail a decode on their own.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Eq)]
pub struct OData {
    #[serde(rename = "@odata.id", default, deserialize_with = "crate::model::null_as_default")]
    pub odata_id: String,
    #[serde(rename = "@odata.type", default, deserialize_with = "crate::model::null_as_default")]
    pub odata_type: String,
    #[serde(rename = "@odata.etag", skip_serializing_if = "Option::is_none")]
    pub odata_etag: Option<String>,
    #[serde(rename = "@odata.context", skip_serializing_if = "Option::is_none")]
    pub odata_context: Option<String>,
}

impl PartialEq for OData {
    fn eq(&self, other: &OData) -> bool {
        self.odata_id == other.odata_id
    }
}

impl OData {
    // "#CoolingUnit.v1_1_0.CoolingUnit" -> "CoolingUnit"
    pub fn term_name(&self) -> &str {
        self.odata_type
            .split('.')
            .next_back()
            .unwrap_or_default()
            .trim_start_matches('#')
    }
}

/// Identity shared by every resource, plus the client it was fetched with and the
/// payload it was decoded from.
#[derive(Default, Clone, Serialize, Deserialize)]
pub struct Entity {
    #[serde(flatten)]
    pub odata: OData,
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name", default, deserialize_with = "crate::model::null_as_default")]
    pub name: String,
    #[serde(skip)]
    client: Option<Arc<dyn Client>>,
    // The URI decode() was given. Stands in for a missing @odata.id.
    #[serde(skip)]
    fetched_from: String,
    // Exactly what the BMC sent. Written once by decode().
    #[serde(skip)]
    raw: Option<Box<RawValue>>,
    // Values accepted by a PATCH since the decode. Compared instead of raw for those keys.
    #[serde(skip)]
    committed: Map<String, Value>,
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("odata", &self.odata)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("has_client", &self.client.is_some())
            .finish()
    }
}

impl Entity {
    /// The resource's own URI: @odata.id, or the URI it was fetched from when
    /// the payload did not carry one.
    pub fn odata_id(&self) -> &str {
        if self.odata.odata_id.is_empty() {
            &self.fetched_from
        } else {
            &self.odata.odata_id
        }
    }

    pub fn set_client(&mut self, client: Arc<dyn Client>) {
        self.client = Some(client);
    }

    pub fn client(&self) -> Result<&Arc<dyn Client>, RedfishError> {
        self.client.as_ref().ok_or_else(|| RedfishError::NoClient {
            url: self.odata_id().to_string(),
        })
    }

    /// The JSON this resource was decoded from, if it came from decode().
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref().map(RawValue::get)
    }

    pub(crate) fn committed(&self) -> &Map<String, Value> {
        &self.committed
    }

    pub(crate) fn commit(&mut self, field: &str, value: Value) {
        self.committed.insert(field.to_string(), value);
    }

    /// Resolves a link to a single resource. An unset link is not an error.
    pub async fn fetch<T: IsResource>(&self, link: &Link<T>) -> Result<Option<T>, RedfishError> {
        if !link.is_set() {
            return Ok(None);
        }
        link.get(self.client()?).await
    }

    /// Resolves a link that points at a resource collection.
    pub async fn fetch_collection<T: IsResource>(&self, link: &Link<T>) -> Collected<T> {
        let Some(uri) = link.uri() else {
            return Collected::default();
        };
        match self.client() {
            Ok(client) => link.list(client).await,
            Err(e) => Collected::failed(uri, e),
        }
    }

    /// Resolves every link of an array of links.
    pub async fn fetch_all<T: IsResource>(&self, links: &LinkCollection<T>) -> Collected<T> {
        if links.is_empty() {
            return Collected::default();
        }
        match self.client() {
            Ok(client) => links.get_all(client).await,
            Err(e) => Collected::failed(self.odata_id(), e),
        }
    }
}

// This trait is used as a bound (constraint) in generic definitions
// Macros are provided to implement it.
pub trait IsResource: DeserializeOwned + Send + 'static {
    /// Last segment of @odata.type, e.g. "CoolingUnit".
    const TERM_NAME: &'static str;

    fn entity(&self) -> &Entity;
    fn entity_mut(&mut self) -> &mut Entity;

    fn odata_id(&self) -> String {
        self.entity().odata_id().to_string()
    }
    fn odata_type(&self) -> String {
        self.entity().odata.odata_type.clone()
    }
}

// Macro to implement IsResource for a struct holding its Entity in a field named `entity`
#[macro_export]
macro_rules! impl_is_resource {
    ($t:ty, $term:literal) => {
        impl $crate::model::resource::IsResource for $t {
            const TERM_NAME: &'static str = $term;

            fn entity(&self) -> &$crate::model::resource::Entity {
                &self.entity
            }
            fn entity_mut(&mut self) -> &mut $crate::model::resource::Entity {
                &mut self.entity
            }
        }
    };
}
pub use impl_is_resource;

/// Decodes one resource. Makes no network calls; the result has no client attached.
///
/// If the payload carries an @odata.type its term name must match `U::TERM_NAME`.
/// The input is kept verbatim on the entity for `update`, and `url` is recorded as
/// the resource's URI in case the payload has no @odata.id.
pub fn decode<U: IsResource>(url: &str, raw: &str) -> Result<U, RedfishError> {
    let deserialize_error = |e| RedfishError::JsonDeserializeError {
        url: url.to_string(),
        body: raw.to_string(),
        source: e,
    };
    let mut resource: U = serde_json::from_str(raw).map_err(deserialize_error)?;

    let odata = &resource.entity().odata;
    if !odata.odata_type.is_empty() && odata.term_name() != U::TERM_NAME {
        debug!(
            "decode: expected type >{}< got {} at {}",
            U::TERM_NAME,
            odata.odata_type,
            url
        );
        return Err(RedfishError::TypeMismatch {
            expected: U::TERM_NAME.to_string(),
            actual: odata.term_name().to_string(),
            resource_type: odata.odata_type.clone(),
            resource_uri: url.to_string(),
        });
    }

    resource.entity_mut().fetched_from = url.to_string();
    resource.entity_mut().raw = Some(RawValue::from_string(raw.to_string()).map_err(deserialize_error)?);
    Ok(resource)
}

/// GETs `uri`, decodes it and attaches `client` for later link resolution.
pub async fn get_object<U: IsResource>(
    client: &Arc<dyn Client>,
    uri: &str,
) -> Result<U, RedfishError> {
    let (_status_code, body) = client.get(uri).await?;
    let mut resource: U = decode(uri, &body)?;
    resource.entity_mut().set_client(client.clone());
    Ok(resource)
}
