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

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::chassis::{Assembly, Chassis};
use super::environment_metrics::EnvironmentMetrics;
use super::facility::Facility;
use super::manager::Manager;
use super::thermal_equipment::{Coolant, CoolantConnector, Filter, LeakDetection, Pump, Reservoir};
use super::{
    Action, Entity, Link, LinkCollection, Location, ODataId, RedundantGroup, ResourceStatus,
};
use crate::collection::{list_referenced, Collected};
use crate::model::resource::get_object;
use crate::update::update_from_raw_data;
use crate::{impl_is_resource, Client, RedfishError};

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
pub enum CoolingEquipmentType {
    /// A coolant distribution unit.
    #[serde(rename = "CDU")]
    Cdu,
    HeatExchanger,
    ImmersionUnit,
}

impl fmt::Display for CoolingEquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
pub enum CoolingUnitMode {
    Enabled,
    Disabled,
}

impl fmt::Display for CoolingUnitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// http://redfish.dmtf.org/schemas/v1/CoolingUnit.v1_1_0.json
/// A cooling system component or unit: a CDU, a heat exchanger or an immersion
/// unit. Only AssetTag and UserLabel are written back by `update()`.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase", from = "CoolingUnitWire")]
pub struct CoolingUnit {
    #[serde(flatten)]
    pub entity: Entity,
    pub asset_tag: Option<String>,
    pub coolant: Option<Coolant>,
    #[serde(default)]
    pub coolant_connector_redundancy: Vec<RedundantGroup>,
    pub cooling_capacity_watts: Option<i64>,
    pub description: Option<String>,
    pub equipment_type: Option<CoolingEquipmentType>,
    #[serde(default)]
    pub filter_redundancy: Vec<RedundantGroup>,
    pub firmware_version: Option<String>,
    pub location: Option<Location>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub part_number: Option<String>,
    pub production_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub pump_redundancy: Vec<RedundantGroup>,
    pub serial_number: Option<String>,
    pub status: Option<ResourceStatus>,
    pub user_label: Option<String>,
    pub version: Option<String>,
    #[serde(skip)]
    assembly: Link<Assembly>,
    #[serde(skip)]
    environment_metrics: Link<EnvironmentMetrics>,
    #[serde(skip)]
    filters: Link<Filter>,
    #[serde(skip)]
    leak_detection: Link<LeakDetection>,
    #[serde(skip)]
    primary_coolant_connectors: Link<CoolantConnector>,
    #[serde(skip)]
    secondary_coolant_connectors: Link<CoolantConnector>,
    #[serde(skip)]
    pumps: Link<Pump>,
    #[serde(skip)]
    reservoirs: Link<Reservoir>,
    #[serde(skip)]
    chassis: LinkCollection<Chassis>,
    #[serde(skip)]
    facility: Link<Facility>,
    #[serde(skip)]
    managed_by: LinkCollection<Manager>,
    #[serde(skip)]
    set_mode: Action<CoolingUnitMode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CoolingUnitWire {
    #[serde(flatten)]
    entity: Entity,
    asset_tag: Option<String>,
    coolant: Option<Coolant>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    coolant_connector_redundancy: Vec<RedundantGroup>,
    cooling_capacity_watts: Option<i64>,
    description: Option<String>,
    equipment_type: Option<CoolingEquipmentType>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    filter_redundancy: Vec<RedundantGroup>,
    firmware_version: Option<String>,
    location: Option<Location>,
    manufacturer: Option<String>,
    model: Option<String>,
    part_number: Option<String>,
    production_date: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pump_redundancy: Vec<RedundantGroup>,
    serial_number: Option<String>,
    status: Option<ResourceStatus>,
    user_label: Option<String>,
    version: Option<String>,
    assembly: Option<ODataId>,
    environment_metrics: Option<ODataId>,
    filters: Option<ODataId>,
    leak_detection: Option<ODataId>,
    primary_coolant_connectors: Option<ODataId>,
    secondary_coolant_connectors: Option<ODataId>,
    pumps: Option<ODataId>,
    reservoirs: Option<ODataId>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    links: CoolingUnitLinks,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    actions: CoolingUnitActions,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CoolingUnitLinks {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    chassis: Vec<ODataId>,
    #[serde(rename = "Chassis@odata.count")]
    chassis_count: Option<usize>,
    facility: Option<ODataId>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    managed_by: Vec<ODataId>,
    #[serde(rename = "ManagedBy@odata.count")]
    managed_by_count: Option<usize>,
}

#[derive(Default, Deserialize)]
struct CoolingUnitActions {
    #[serde(rename = "#CoolingUnit.SetMode", default, deserialize_with = "crate::model::null_as_default")]
    set_mode: SetModeAction,
}

#[derive(Default, Deserialize)]
struct SetModeAction {
    target: Option<String>,
    #[serde(rename = "Mode@Redfish.AllowableValues", default, deserialize_with = "crate::model::null_as_default")]
    allowable_values: Vec<CoolingUnitMode>,
}

fn odata_ids(links: Vec<ODataId>) -> Vec<String> {
    links.into_iter().map(|l| l.odata_id).collect()
}

impl From<CoolingUnitWire> for CoolingUnit {
    fn from(t: CoolingUnitWire) -> Self {
        let links = t.links;
        CoolingUnit {
            entity: t.entity,
            asset_tag: t.asset_tag,
            coolant: t.coolant,
            coolant_connector_redundancy: t.coolant_connector_redundancy,
            cooling_capacity_watts: t.cooling_capacity_watts,
            description: t.description,
            equipment_type: t.equipment_type,
            filter_redundancy: t.filter_redundancy,
            firmware_version: t.firmware_version,
            location: t.location,
            manufacturer: t.manufacturer,
            model: t.model,
            part_number: t.part_number,
            production_date: t.production_date,
            pump_redundancy: t.pump_redundancy,
            serial_number: t.serial_number,
            status: t.status,
            user_label: t.user_label,
            version: t.version,
            assembly: t.assembly.into(),
            environment_metrics: t.environment_metrics.into(),
            filters: t.filters.into(),
            leak_detection: t.leak_detection.into(),
            primary_coolant_connectors: t.primary_coolant_connectors.into(),
            secondary_coolant_connectors: t.secondary_coolant_connectors.into(),
            pumps: t.pumps.into(),
            reservoirs: t.reservoirs.into(),
            chassis: LinkCollection::new(odata_ids(links.chassis), links.chassis_count),
            facility: links.facility.into(),
            managed_by: LinkCollection::new(odata_ids(links.managed_by), links.managed_by_count),
            set_mode: Action::new(
                "#CoolingUnit.SetMode",
                t.actions.set_mode.target,
                t.actions.set_mode.allowable_values,
            ),
        }
    }
}

impl_is_resource!(CoolingUnit, "CoolingUnit");

impl CoolingUnit {
    const READ_WRITE_FIELDS: &'static [&'static str] = &["AssetTag", "UserLabel"];

    /// Commits changes to AssetTag and UserLabel to the service.
    pub async fn update(&mut self) -> Result<(), RedfishError> {
        update_from_raw_data(self, Self::READ_WRITE_FIELDS).await
    }

    /// The modes the service advertised for SetMode. Empty if it did not say.
    pub fn allowed_modes(&self) -> &[CoolingUnitMode] {
        &self.set_mode.allowable_values
    }

    pub async fn set_mode(&self, mode: CoolingUnitMode) -> Result<(), RedfishError> {
        self.set_mode.invoke_with(&self.entity, "Mode", &mode).await
    }

    pub async fn assembly(&self) -> Result<Option<Assembly>, RedfishError> {
        self.entity.fetch(&self.assembly).await
    }

    pub async fn environment_metrics(&self) -> Result<Option<EnvironmentMetrics>, RedfishError> {
        self.entity.fetch(&self.environment_metrics).await
    }

    pub async fn leak_detection(&self) -> Result<Option<LeakDetection>, RedfishError> {
        self.entity.fetch(&self.leak_detection).await
    }

    pub async fn facility(&self) -> Result<Option<Facility>, RedfishError> {
        self.entity.fetch(&self.facility).await
    }

    pub async fn filters(&self) -> Collected<Filter> {
        self.entity.fetch_collection(&self.filters).await
    }

    pub async fn primary_coolant_connectors(&self) -> Collected<CoolantConnector> {
        self.entity
            .fetch_collection(&self.primary_coolant_connectors)
            .await
    }

    pub async fn secondary_coolant_connectors(&self) -> Collected<CoolantConnector> {
        self.entity
            .fetch_collection(&self.secondary_coolant_connectors)
            .await
    }

    pub async fn pumps(&self) -> Collected<Pump> {
        self.entity.fetch_collection(&self.pumps).await
    }

    pub async fn reservoirs(&self) -> Collected<Reservoir> {
        self.entity.fetch_collection(&self.reservoirs).await
    }

    /// The connectors named by every CoolantConnectorRedundancy group.
    pub async fn redundant_coolant_connectors(&self) -> Collected<CoolantConnector> {
        let uris: Vec<String> = self
            .coolant_connector_redundancy
            .iter()
            .flat_map(|g| g.redundancy_group.iter())
            .map(|l| l.odata_id.clone())
            .collect();
        self.entity
            .fetch_all(&LinkCollection::new(uris, None))
            .await
    }

    pub fn chassis_count(&self) -> usize {
        self.chassis.count()
    }

    pub async fn chassis(&self) -> Collected<Chassis> {
        self.entity.fetch_all(&self.chassis).await
    }

    pub fn managed_by_count(&self) -> usize {
        self.managed_by.count()
    }

    pub async fn managed_by(&self) -> Collected<Manager> {
        self.entity.fetch_all(&self.managed_by).await
    }
}

pub async fn get_cooling_unit(
    client: &Arc<dyn Client>,
    uri: &str,
) -> Result<CoolingUnit, RedfishError> {
    get_object(client, uri).await
}

pub async fn list_referenced_cooling_units(
    client: &Arc<dyn Client>,
    link: &str,
) -> Collected<CoolingUnit> {
    list_referenced(client, link).await
}
