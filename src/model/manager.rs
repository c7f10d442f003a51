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

use super::{Action, Entity, ResourceStatus};
use crate::collection::{list_referenced, Collected};
use crate::model::resource::get_object;
use crate::{impl_is_resource, Client, RedfishError};

/// http://redfish.dmtf.org/schemas/v1/Manager.v1_19_0.json
/// Only what a cooling unit or chassis needs to know about the manager managing it.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase", from = "ManagerWire")]
pub struct Manager {
    #[serde(flatten)]
    pub entity: Entity,
    pub description: Option<String>,
    pub firmware_version: Option<String>,
    pub manager_type: Option<String>,
    pub model: Option<String>,
    pub status: Option<ResourceStatus>,
    #[serde(rename = "UUID")]
    pub uuid: Option<String>,
    #[serde(skip)]
    reset: Action<ManagerResetType>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ManagerWire {
    #[serde(flatten)]
    entity: Entity,
    description: Option<String>,
    firmware_version: Option<String>,
    manager_type: Option<String>,
    model: Option<String>,
    status: Option<ResourceStatus>,
    #[serde(rename = "UUID")]
    uuid: Option<String>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    actions: ManagerActions,
}

#[derive(Default, Deserialize)]
struct ManagerActions {
    #[serde(rename = "#Manager.Reset", default, deserialize_with = "crate::model::null_as_default")]
    reset: ResetAction,
}

#[derive(Default, Deserialize)]
struct ResetAction {
    #[serde(rename = "target")]
    target: Option<String>,
    #[serde(rename = "ResetType@Redfish.AllowableValues", default, deserialize_with = "crate::model::null_as_default")]
    allowable_values: Vec<ManagerResetType>,
}

impl From<ManagerWire> for Manager {
    fn from(t: ManagerWire) -> Self {
        Manager {
            entity: t.entity,
            description: t.description,
            firmware_version: t.firmware_version,
            manager_type: t.manager_type,
            model: t.model,
            status: t.status,
            uuid: t.uuid,
            reset: Action::new(
                "#Manager.Reset",
                t.actions.reset.target,
                t.actions.reset.allowable_values,
            ),
        }
    }
}

impl_is_resource!(Manager, "Manager");

#[allow(clippy::enum_variant_names)]
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
pub enum ManagerResetType {
    GracefulRestart,
    ForceRestart,
}

impl fmt::Display for ManagerResetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Manager {
    pub fn reset_allowable_values(&self) -> &[ManagerResetType] {
        &self.reset.allowable_values
    }

    /// Reboots the manager itself.
    pub async fn reset(&self, reset_type: ManagerResetType) -> Result<(), RedfishError> {
        self.reset
            .invoke_with(&self.entity, "ResetType", &reset_type)
            .await
    }
}

pub async fn get_manager(client: &Arc<dyn Client>, uri: &str) -> Result<Manager, RedfishError> {
    get_object(client, uri).await
}

pub async fn list_referenced_managers(client: &Arc<dyn Client>, link: &str) -> Collected<Manager> {
    list_referenced(client, link).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::FakeClient;

    #[tokio::test]
    async fn test_manager_reset() {
        let fake = FakeClient::new().with_resource(
            "/redfish/v1/Managers/BMC",
            json!({
                "@odata.id": "/redfish/v1/Managers/BMC",
                "@odata.type": "#Manager.v1_19_0.Manager",
                "Id": "BMC",
                "ManagerType": "BMC",
                "Actions": {
                    "#Manager.Reset": {
                        "target": "/redfish/v1/Managers/BMC/Actions/Manager.Reset",
                        "ResetType@Redfish.AllowableValues": ["GracefulRestart"]
                    }
                }
            }),
        );
        let client = fake.clone().into_client();
        let manager = get_manager(&client, "/redfish/v1/Managers/BMC").await.unwrap();
        assert_eq!(manager.manager_type.as_deref(), Some("BMC"));
        assert_eq!(
            manager.reset_allowable_values(),
            &[ManagerResetType::GracefulRestart]
        );
        manager.reset(ManagerResetType::GracefulRestart).await.unwrap();
        assert_eq!(
            fake.posts(),
            vec![(
                "/redfish/v1/Managers/BMC/Actions/Manager.Reset".to_string(),
                json!({"ResetType": "GracefulRestart"})
            )]
        );
    }
}
