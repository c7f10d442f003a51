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
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::secure_boot_database::SecureBootDatabase;
use super::{Action, EnabledDisabled, Entity, Link, ODataId};
use crate::collection::Collected;
use crate::model::resource::get_object;
use crate::update::update_from_raw_data;
use crate::{impl_is_resource, Client, RedfishError};

/// http://redfish.dmtf.org/schemas/v1/SecureBoot.v1_1_2.json
/// The SecureBoot schema contains UEFI Secure Boot information and represents properties
/// for managing the UEFI Secure Boot functionality of a system.
#[derive(Debug, Serialize, Default, Deserialize, Clone)]
#[serde(rename_all = "PascalCase", from = "SecureBootWire")]
pub struct SecureBoot {
    #[serde(flatten)]
    pub entity: Entity,
    pub description: Option<String>,
    pub secure_boot_current_boot: Option<EnabledDisabled>,
    pub secure_boot_enable: Option<bool>,
    pub secure_boot_mode: Option<SecureBootMode>,
    #[serde(skip)]
    secure_boot_databases: Link<SecureBootDatabase>,
    #[serde(skip)]
    reset_keys: Action<SecureBootResetKeysType>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SecureBootWire {
    #[serde(flatten)]
    entity: Entity,
    description: Option<String>,
    secure_boot_current_boot: Option<EnabledDisabled>,
    secure_boot_enable: Option<bool>,
    secure_boot_mode: Option<SecureBootMode>,
    secure_boot_databases: Option<ODataId>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    actions: SecureBootActions,
}

#[derive(Default, Deserialize)]
struct SecureBootActions {
    #[serde(rename = "#SecureBoot.ResetKeys", default, deserialize_with = "crate::model::null_as_default")]
    reset_keys: ResetKeysAction,
}

#[derive(Default, Deserialize)]
struct ResetKeysAction {
    target: Option<String>,
    #[serde(rename = "ResetKeysType@Redfish.AllowableValues", default, deserialize_with = "crate::model::null_as_default")]
    allowable_values: Vec<SecureBootResetKeysType>,
}

impl From<SecureBootWire> for SecureBoot {
    fn from(t: SecureBootWire) -> Self {
        SecureBoot {
            entity: t.entity,
            description: t.description,
            secure_boot_current_boot: t.secure_boot_current_boot,
            secure_boot_enable: t.secure_boot_enable,
            secure_boot_mode: t.secure_boot_mode,
            secure_boot_databases: t.secure_boot_databases.into(),
            reset_keys: Action::new(
                "#SecureBoot.ResetKeys",
                t.actions.reset_keys.target,
                t.actions.reset_keys.allowable_values,
            ),
        }
    }
}

impl_is_resource!(SecureBoot, "SecureBoot");

#[allow(clippy::enum_variant_names)]
#[derive(Debug, Serialize, Default, Deserialize, Copy, Clone, Eq, PartialEq)]
pub enum SecureBootMode {
    SetupMode,
    #[default]
    UserMode,
    AuditMode,
    DeployedMode,
}

impl std::fmt::Display for SecureBootMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, Eq, PartialEq)]
pub enum SecureBootResetKeysType {
    ResetAllKeysToDefault,
    DeleteAllKeys,
    DeletePK,
}

impl SecureBoot {
    const READ_WRITE_FIELDS: &'static [&'static str] = &["SecureBootEnable"];

    /// Commits a change to SecureBootEnable. Takes effect on the next boot.
    pub async fn update(&mut self) -> Result<(), RedfishError> {
        update_from_raw_data(self, Self::READ_WRITE_FIELDS).await
    }

    pub async fn secure_boot_databases(&self) -> Collected<SecureBootDatabase> {
        self.entity
            .fetch_collection(&self.secure_boot_databases)
            .await
    }

    pub async fn reset_keys(&self, reset_type: SecureBootResetKeysType) -> Result<(), RedfishError> {
        self.reset_keys
            .invoke_with(&self.entity, "ResetKeysType", &reset_type)
            .await
    }
}

pub async fn get_secure_boot(
    client: &Arc<dyn Client>,
    uri: &str,
) -> Result<SecureBoot, RedfishError> {
    get_object(client, uri).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::FakeClient;

    const SB: &str = "/redfish/v1/Systems/1/SecureBoot";

    fn fake() -> FakeClient {
        FakeClient::new()
            .with_resource(
                SB,
                json!({
                    "@odata.id": SB,
                    "@odata.type": "#SecureBoot.v1_1_2.SecureBoot",
                    "Id": "SecureBoot",
                    "SecureBootEnable": true,
                    "SecureBootCurrentBoot": "Enabled",
                    "SecureBootMode": "DeployedMode",
                    "SecureBootDatabases": {"@odata.id": format!("{SB}/SecureBootDatabases")},
                    "Actions": {
                        "#SecureBoot.ResetKeys": {"target": format!("{SB}/Actions/SecureBoot.ResetKeys")}
                    }
                }),
            )
            .with_resource(
                &format!("{SB}/SecureBootDatabases"),
                json!({"Members": [{"@odata.id": format!("{SB}/SecureBootDatabases/PK")}]}),
            )
            .with_resource(
                &format!("{SB}/SecureBootDatabases/PK"),
                json!({
                    "@odata.id": format!("{SB}/SecureBootDatabases/PK"),
                    "@odata.type": "#SecureBootDatabase.v1_0_3.SecureBootDatabase",
                    "Id": "PK",
                    "DatabaseId": "PK"
                }),
            )
    }

    #[tokio::test]
    async fn test_disable_secure_boot() {
        let fake = fake();
        let client = fake.clone().into_client();
        let mut sb = get_secure_boot(&client, SB).await.unwrap();
        assert_eq!(sb.secure_boot_mode, Some(SecureBootMode::DeployedMode));
        assert!(sb.secure_boot_current_boot.unwrap().is_enabled());
        sb.secure_boot_enable = Some(false);
        sb.secure_boot_mode = Some(SecureBootMode::SetupMode);
        sb.update().await.unwrap();
        assert_eq!(
            fake.patches(),
            vec![(SB.to_string(), json!({"SecureBootEnable": false}))]
        );
    }

    #[tokio::test]
    async fn test_databases_and_reset() {
        let fake = fake();
        let client = fake.clone().into_client();
        let sb = get_secure_boot(&client, SB).await.unwrap();
        let dbs = sb.secure_boot_databases().await.into_result().unwrap();
        assert_eq!(dbs[0].database_id.as_deref(), Some("PK"));
        sb.reset_keys(SecureBootResetKeysType::ResetAllKeysToDefault)
            .await
            .unwrap();
        assert_eq!(
            fake.posts(),
            vec![(
                format!("{SB}/Actions/SecureBoot.ResetKeys"),
                json!({"ResetKeysType": "ResetAllKeysToDefault"})
            )]
        );
    }
}
