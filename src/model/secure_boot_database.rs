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
use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::certificate::{Certificate, Signature};
use super::{Action, Entity, Link, ODataId};
use crate::collection::{list_referenced, Collected};
use crate::model::resource::get_object;
use crate::{impl_is_resource, Client, RedfishError};

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
pub enum SecureBootDatabaseResetKeysType {
    ResetAllKeysToDefault,
    DeleteAllKeys,
}

impl fmt::Display for SecureBootDatabaseResetKeysType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// http://redfish.dmtf.org/schemas/v1/SecureBootDatabase.v1_0_3.json
/// One UEFI Secure Boot variable (PK, KEK, db, dbx, ...) and the certificates and
/// signatures it holds.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase", from = "SecureBootDatabaseWire")]
pub struct SecureBootDatabase {
    #[serde(flatten)]
    pub entity: Entity,
    pub database_id: Option<String>,
    pub description: Option<String>,
    /// Vendor extensions, passed through undecoded.
    pub oem: Option<Value>,
    #[serde(skip)]
    certificates: Link<Certificate>,
    #[serde(skip)]
    signatures: Link<Signature>,
    #[serde(skip)]
    reset_keys: Action<SecureBootDatabaseResetKeysType>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SecureBootDatabaseWire {
    #[serde(flatten)]
    entity: Entity,
    database_id: Option<String>,
    description: Option<String>,
    oem: Option<Value>,
    certificates: Option<ODataId>,
    signatures: Option<ODataId>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    actions: SecureBootDatabaseActions,
}

#[derive(Default, Deserialize)]
struct SecureBootDatabaseActions {
    #[serde(rename = "#SecureBootDatabase.ResetKeys", default, deserialize_with = "crate::model::null_as_default")]
    reset_keys: ResetKeysAction,
}

#[derive(Default, Deserialize)]
struct ResetKeysAction {
    target: Option<String>,
    #[serde(rename = "ResetKeysType@Redfish.AllowableValues", default, deserialize_with = "crate::model::null_as_default")]
    allowable_values: Vec<SecureBootDatabaseResetKeysType>,
}

impl From<SecureBootDatabaseWire> for SecureBootDatabase {
    fn from(t: SecureBootDatabaseWire) -> Self {
        SecureBootDatabase {
            entity: t.entity,
            database_id: t.database_id,
            description: t.description,
            oem: t.oem,
            certificates: t.certificates.into(),
            signatures: t.signatures.into(),
            reset_keys: Action::new(
                "#SecureBootDatabase.ResetKeys",
                t.actions.reset_keys.target,
                t.actions.reset_keys.allowable_values,
            ),
        }
    }
}

impl_is_resource!(SecureBootDatabase, "SecureBootDatabase");

impl SecureBootDatabase {
    pub async fn certificates(&self) -> Collected<Certificate> {
        self.entity.fetch_collection(&self.certificates).await
    }

    pub async fn signatures(&self) -> Collected<Signature> {
        self.entity.fetch_collection(&self.signatures).await
    }

    pub fn reset_keys_allowable_values(&self) -> &[SecureBootDatabaseResetKeysType] {
        &self.reset_keys.allowable_values
    }

    pub async fn reset_keys(
        &self,
        reset_type: SecureBootDatabaseResetKeysType,
    ) -> Result<(), RedfishError> {
        self.reset_keys
            .invoke_with(&self.entity, "ResetKeysType", &reset_type)
            .await
    }
}

pub async fn get_secure_boot_database(
    client: &Arc<dyn Client>,
    uri: &str,
) -> Result<SecureBootDatabase, RedfishError> {
    get_object(client, uri).await
}

pub async fn list_referenced_secure_boot_databases(
    client: &Arc<dyn Client>,
    link: &str,
) -> Collected<SecureBootDatabase> {
    list_referenced(client, link).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::FakeClient;

    const DB: &str = "/redfish/v1/Systems/1/SecureBoot/SecureBootDatabases/db";

    fn db_body() -> Value {
        json!({
            "@odata.id": DB,
            "@odata.type": "#SecureBootDatabase.v1_0_3.SecureBootDatabase",
            "Id": "db",
            "Name": "db - Authorized Signature Database",
            "DatabaseId": "db",
            "Certificates": {"@odata.id": format!("{DB}/Certificates")},
            "Signatures": {"@odata.id": format!("{DB}/Signatures")},
            "Actions": {
                "#SecureBootDatabase.ResetKeys": {
                    "target": format!("{DB}/Actions/SecureBootDatabase.ResetKeys"),
                    "ResetKeysType@Redfish.AllowableValues": ["ResetAllKeysToDefault", "DeleteAllKeys"]
                }
            },
            "Oem": {"Contoso": {"Locked": true}}
        })
    }

    #[tokio::test]
    async fn test_certificates_partial_failure() {
        let fake = FakeClient::new()
            .with_resource(DB, db_body())
            .with_resource(
                &format!("{DB}/Certificates"),
                json!({"Members": [
                    {"@odata.id": format!("{DB}/Certificates/1")},
                    {"@odata.id": format!("{DB}/Certificates/2")}
                ]}),
            )
            .with_resource(
                &format!("{DB}/Certificates/1"),
                json!({
                    "@odata.id": format!("{DB}/Certificates/1"),
                    "@odata.type": "#Certificate.v1_8_0.Certificate",
                    "Id": "1",
                    "CertificateType": "PEM"
                }),
            )
            .with_body(&format!("{DB}/Certificates/2"), "{not json");
        let client = fake.into_client();
        let db = get_secure_boot_database(&client, DB).await.unwrap();
        assert_eq!(db.database_id.as_deref(), Some("db"));
        assert_eq!(db.oem, Some(json!({"Contoso": {"Locked": true}})));

        let (certs, errors) = db.certificates().await.into_parts();
        assert_eq!(certs.len(), 1);
        assert_eq!(certs[0].entity.id, "1");
        assert_eq!(errors.len(), 1);
        let err = &errors.failures[&format!("{DB}/Certificates/2")];
        assert!(err.is_decode_error());
    }

    #[tokio::test]
    async fn test_reset_keys() {
        let fake = FakeClient::new().with_resource(DB, db_body());
        let client = fake.clone().into_client();
        let db = get_secure_boot_database(&client, DB).await.unwrap();
        assert_eq!(db.reset_keys_allowable_values().len(), 2);
        db.reset_keys(SecureBootDatabaseResetKeysType::DeleteAllKeys)
            .await
            .unwrap();
        assert_eq!(
            fake.posts(),
            vec![(
                format!("{DB}/Actions/SecureBootDatabase.ResetKeys"),
                json!({"ResetKeysType": "DeleteAllKeys"})
            )]
        );
    }
}
