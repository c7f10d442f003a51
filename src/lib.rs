/*
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

//! Typed Redfish resources.
//!
//! Resources are decoded from JSON into plain structs. Links to other
//! resources are kept as URIs and only fetched when an accessor is called.
//! Collections are fetched concurrently and report per-member failures next to
//! the members that did resolve. `update()` PATCHes only the writable
//! properties that changed since the resource was read.

use reqwest::StatusCode;
use serde_json::Value;

pub mod collection;
mod error;
pub mod jsonmap;
pub mod model;
mod network;
#[cfg(test)]
mod testing;
pub mod update;

pub use collection::{collect_links, list_referenced, Collected};
pub use error::{CollectionError, RedfishError};
pub use model::resource::{decode, get_object};
pub use model::{Action, EnabledDisabled, Entity, IsResource, Link, LinkCollection, ODataId};
pub use network::{
    Endpoint, RedfishClientPool, RedfishClientPoolBuilder, RedfishHttpClient, REDFISH_ENDPOINT,
};

pub use model::certificate::{get_certificate, get_signature, Certificate, Signature};
pub use model::chassis::{get_chassis, Assembly, Chassis};
pub use model::cooling_unit::{
    get_cooling_unit, list_referenced_cooling_units, CoolingEquipmentType, CoolingUnit,
    CoolingUnitMode,
};
pub use model::manager::{get_manager, Manager};
pub use model::secure_boot::{get_secure_boot, SecureBoot};
pub use model::secure_boot_database::{
    get_secure_boot_database, list_referenced_secure_boot_databases, SecureBootDatabase,
};

/// Transport to one Redfish service. Resources hold a shared handle to the
/// client they were fetched with and use it to resolve their links.
///
/// URIs are whatever the service put in @odata.id: usually absolute paths such
/// as `/redfish/v1/Chassis/1`.
#[async_trait::async_trait]
pub trait Client: Send + Sync + 'static {
    /// GETs a resource. Returns the body as received.
    async fn get(&self, uri: &str) -> Result<(StatusCode, String), RedfishError>;

    /// POSTs a JSON body, e.g. an action's parameters.
    async fn post(&self, uri: &str, body: Value) -> Result<StatusCode, RedfishError>;

    /// PATCHes a JSON merge-patch body.
    async fn patch(&self, uri: &str, body: Value) -> Result<StatusCode, RedfishError>;
}
