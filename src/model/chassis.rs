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

use super::environment_metrics::EnvironmentMetrics;
use super::manager::Manager;
use super::{Entity, Link, LinkCollection, Location, ODataId, ResourceStatus};
use crate::collection::{list_referenced, Collected};
use crate::model::resource::get_object;
use crate::update::update_from_raw_data;
use crate::{impl_is_resource, Client, RedfishError};

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
pub enum ChassisType {
    Rack,
    Blade,
    Enclosure,
    StandAlone,
    RackMount,
    Card,
    Cartridge,
    Row,
    Pod,
    Expansion,
    Sidecar,
    Zone,
    Sled,
    Shelf,
    Drawer,
    Module,
    Component,
    IPBasedDrive,
    RackGroup,
    StorageEnclosure,
    ImmersionTank,
    HeatExchanger,
    Other,
}

impl std::fmt::Display for ChassisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// http://redfish.dmtf.org/schemas/v1/Chassis.v1_23_0.json
/// The Chassis schema contains an inventory of chassis components.
/// This can include chassis parameters such as chassis type, model, etc.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase", from = "ChassisWire")]
pub struct Chassis {
    #[serde(flatten)]
    pub entity: Entity,
    pub asset_tag: Option<String>,
    pub chassis_type: Option<ChassisType>,
    pub description: Option<String>,
    pub location: Option<Location>,
    pub location_indicator_active: Option<bool>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub part_number: Option<String>,
    pub serial_number: Option<String>,
    pub status: Option<ResourceStatus>,
    #[serde(skip)]
    assembly: Link<Assembly>,
    #[serde(skip)]
    environment_metrics: Link<EnvironmentMetrics>,
    #[serde(skip)]
    managed_by: LinkCollection<Manager>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ChassisWire {
    #[serde(flatten)]
    entity: Entity,
    asset_tag: Option<String>,
    chassis_type: Option<ChassisType>,
    description: Option<String>,
    location: Option<Location>,
    location_indicator_active: Option<bool>,
    manufacturer: Option<String>,
    model: Option<String>,
    part_number: Option<String>,
    serial_number: Option<String>,
    status: Option<ResourceStatus>,
    assembly: Option<ODataId>,
    environment_metrics: Option<ODataId>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    links: ChassisLinks,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ChassisLinks {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    managed_by: Vec<ODataId>,
    #[serde(rename = "ManagedBy@odata.count")]
    managed_by_count: Option<usize>,
}

impl From<ChassisWire> for Chassis {
    fn from(t: ChassisWire) -> Self {
        let mut managed_by: LinkCollection<Manager> = t.links.managed_by.into();
        if let Some(count) = t.links.managed_by_count {
            managed_by = LinkCollection::new(managed_by.uris().to_vec(), Some(count));
        }
        Chassis {
            entity: t.entity,
            asset_tag: t.asset_tag,
            chassis_type: t.chassis_type,
            description: t.description,
            location: t.location,
            location_indicator_active: t.location_indicator_active,
            manufacturer: t.manufacturer,
            model: t.model,
            part_number: t.part_number,
            serial_number: t.serial_number,
            status: t.status,
            assembly: t.assembly.into(),
            environment_metrics: t.environment_metrics.into(),
            managed_by,
        }
    }
}

impl_is_resource!(Chassis, "Chassis");

impl Chassis {
    const READ_WRITE_FIELDS: &'static [&'static str] = &["AssetTag", "LocationIndicatorActive"];

    /// Commits changes to AssetTag and LocationIndicatorActive.
    pub async fn update(&mut self) -> Result<(), RedfishError> {
        update_from_raw_data(self, Self::READ_WRITE_FIELDS).await
    }

    pub async fn assembly(&self) -> Result<Option<Assembly>, RedfishError> {
        self.entity.fetch(&self.assembly).await
    }

    pub async fn environment_metrics(&self) -> Result<Option<EnvironmentMetrics>, RedfishError> {
        self.entity.fetch(&self.environment_metrics).await
    }

    pub fn managed_by_count(&self) -> usize {
        self.managed_by.count()
    }

    pub async fn managed_by(&self) -> Collected<Manager> {
        self.entity.fetch_all(&self.managed_by).await
    }
}

pub async fn get_chassis(client: &Arc<dyn Client>, uri: &str) -> Result<Chassis, RedfishError> {
    get_object(client, uri).await
}

pub async fn list_referenced_chassis(client: &Arc<dyn Client>, link: &str) -> Collected<Chassis> {
    list_referenced(client, link).await
}

/// http://redfish.dmtf.org/schemas/v1/Assembly.v1_5_1.json
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Assembly {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub assemblies: Vec<AssemblyData>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblyData {
    pub member_id: Option<String>,
    pub model: Option<String>,
    pub part_number: Option<String>,
    pub serial_number: Option<String>,
    pub vendor: Option<String>,
    pub version: Option<String>,
}

impl_is_resource!(Assembly, "Assembly");

pub async fn get_assembly(client: &Arc<dyn Client>, uri: &str) -> Result<Assembly, RedfishError> {
    get_object(client, uri).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::resource::decode;
    use crate::testing::FakeClient;

    #[tokio::test]
    async fn test_chassis_links() {
        let fake = FakeClient::new()
            .with_resource(
                "/redfish/v1/Chassis/1/Assembly",
                json!({
                    "@odata.id": "/redfish/v1/Chassis/1/Assembly",
                    "@odata.type": "#Assembly.v1_5_1.Assembly",
                    "Id": "Assembly",
                    "Assemblies": [{"MemberId": "0", "Model": "Board", "SerialNumber": "B1"}]
                }),
            )
            .with_resource(
                "/redfish/v1/Managers/BMC",
                json!({"@odata.id": "/redfish/v1/Managers/BMC", "Id": "BMC", "ManagerType": "BMC"}),
            );
        let body = json!({
            "@odata.id": "/redfish/v1/Chassis/1",
            "@odata.type": "#Chassis.v1_23_0.Chassis",
            "Id": "1",
            "ChassisType": "RackMount",
            "Assembly": {"@odata.id": "/redfish/v1/Chassis/1/Assembly"},
            "Links": {
                "ManagedBy": [{"@odata.id": "/redfish/v1/Managers/BMC"}],
                "ManagedBy@odata.count": 1
            }
        });
        let mut chassis: Chassis = decode("/redfish/v1/Chassis/1", &body.to_string()).unwrap();
        chassis.entity.set_client(fake.clone().into_client());

        assert_eq!(chassis.chassis_type, Some(ChassisType::RackMount));
        let assembly = chassis.assembly().await.unwrap().unwrap();
        assert_eq!(assembly.assemblies[0].serial_number.as_deref(), Some("B1"));
        assert!(chassis.environment_metrics().await.unwrap().is_none());
        assert_eq!(chassis.managed_by_count(), 1);
        let managers = chassis.managed_by().await.into_result().unwrap();
        assert_eq!(managers[0].entity.id, "BMC");
        assert_eq!(fake.gets().len(), 2);
    }

    #[test]
    fn test_chassis_null_links() {
        let body = json!({
            "@odata.id": "/redfish/v1/Chassis/1",
            "Id": "1",
            "Links": {"ManagedBy": null}
        });
        let chassis: Chassis = decode("/redfish/v1/Chassis/1", &body.to_string()).unwrap();
        assert_eq!(chassis.managed_by_count(), 0);
        let body = json!({"@odata.id": "/redfish/v1/Chassis/1", "Id": "1", "Links": null});
        let chassis: Chassis = decode("/redfish/v1/Chassis/1", &body.to_string()).unwrap();
        assert_eq!(chassis.managed_by_count(), 0);
    }

    #[tokio::test]
    async fn test_chassis_update_ignores_read_only() {
        let fake = FakeClient::new();
        let body = json!({
            "@odata.id": "/redfish/v1/Chassis/1",
            "Id": "1",
            "AssetTag": "old",
            "SerialNumber": "S1",
            "LocationIndicatorActive": false
        });
        let mut chassis: Chassis = decode("/redfish/v1/Chassis/1", &body.to_string()).unwrap();
        chassis.entity.set_client(fake.clone().into_client());
        chassis.serial_number = Some("S2".to_string());
        chassis.location_indicator_active = Some(true);
        chassis.update().await.unwrap();
        assert_eq!(
            fake.patches(),
            vec![(
                "/redfish/v1/Chassis/1".to_string(),
                json!({"LocationIndicatorActive": true})
            )]
        );
    }
}
