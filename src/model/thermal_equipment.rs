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

// The parts of a liquid cooling loop a CoolingUnit links to. These are read-only
// here: fetched, decoded, handed back.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::environment_metrics::SensorExcerpt;
use super::{Entity, Location, ResourceStatus};
use crate::collection::{list_referenced, Collected};
use crate::model::resource::get_object;
use crate::{impl_is_resource, Client, RedfishError};

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Coolant {
    pub additive_name: Option<String>,
    pub additive_percent: Option<f64>,
    pub coolant_type: Option<String>,
    pub density_kg_per_cubic_meter: Option<f64>,
    pub specific_heat_kj_per_kg_k: Option<f64>,
}

/// http://redfish.dmtf.org/schemas/v1/Filter.v1_0_2.json
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Filter {
    #[serde(flatten)]
    pub entity: Entity,
    pub hot_pluggable: Option<bool>,
    pub location: Option<Location>,
    pub manufacturer: Option<String>,
    pub part_number: Option<String>,
    pub rated_service_hours: Option<f64>,
    pub replaced: Option<bool>,
    pub service_hours: Option<f64>,
    pub serial_number: Option<String>,
    pub status: Option<ResourceStatus>,
}

/// http://redfish.dmtf.org/schemas/v1/Pump.v1_0_1.json
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Pump {
    #[serde(flatten)]
    pub entity: Entity,
    pub firmware_version: Option<String>,
    pub location: Option<Location>,
    pub manufacturer: Option<String>,
    pub pump_speed_percent: Option<SensorExcerpt>,
    pub pump_type: Option<PumpType>,
    pub serial_number: Option<String>,
    pub status: Option<ResourceStatus>,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
pub enum PumpType {
    Liquid,
    Compressor,
}

/// http://redfish.dmtf.org/schemas/v1/Reservoir.v1_0_1.json
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Reservoir {
    #[serde(flatten)]
    pub entity: Entity,
    pub capacity_liters: Option<f64>,
    pub coolant: Option<Coolant>,
    pub fluid_level_percent: Option<SensorExcerpt>,
    pub location: Option<Location>,
    pub reservoir_type: Option<ReservoirType>,
    pub status: Option<ResourceStatus>,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
pub enum ReservoirType {
    Reserve,
    Overflow,
    Inline,
    Immersion,
}

/// http://redfish.dmtf.org/schemas/v1/CoolantConnector.v1_0_1.json
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct CoolantConnector {
    #[serde(flatten)]
    pub entity: Entity,
    pub coolant: Option<Coolant>,
    pub coolant_connector_type: Option<String>,
    pub flow_liters_per_minute: Option<SensorExcerpt>,
    pub rated_flow_liters_per_minute: Option<f64>,
    pub status: Option<ResourceStatus>,
    pub supply_temperature_celsius: Option<SensorExcerpt>,
    pub return_temperature_celsius: Option<SensorExcerpt>,
}

/// http://redfish.dmtf.org/schemas/v1/LeakDetection.v1_0_1.json
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct LeakDetection {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub leak_detector_groups: Vec<LeakDetectorGroup>,
    pub status: Option<ResourceStatus>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct LeakDetectorGroup {
    pub group_name: Option<String>,
    pub humidity_percent: Option<SensorExcerpt>,
    pub status: Option<ResourceStatus>,
}

impl_is_resource!(Filter, "Filter");
impl_is_resource!(Pump, "Pump");
impl_is_resource!(Reservoir, "Reservoir");
impl_is_resource!(CoolantConnector, "CoolantConnector");
impl_is_resource!(LeakDetection, "LeakDetection");

pub async fn get_filter(client: &Arc<dyn Client>, uri: &str) -> Result<Filter, RedfishError> {
    get_object(client, uri).await
}

pub async fn list_referenced_filters(client: &Arc<dyn Client>, link: &str) -> Collected<Filter> {
    list_referenced(client, link).await
}

pub async fn get_pump(client: &Arc<dyn Client>, uri: &str) -> Result<Pump, RedfishError> {
    get_object(client, uri).await
}

pub async fn list_referenced_pumps(client: &Arc<dyn Client>, link: &str) -> Collected<Pump> {
    list_referenced(client, link).await
}

pub async fn get_reservoir(client: &Arc<dyn Client>, uri: &str) -> Result<Reservoir, RedfishError> {
    get_object(client, uri).await
}

pub async fn list_referenced_reservoirs(
    client: &Arc<dyn Client>,
    link: &str,
) -> Collected<Reservoir> {
    list_referenced(client, link).await
}

pub async fn get_coolant_connector(
    client: &Arc<dyn Client>,
    uri: &str,
) -> Result<CoolantConnector, RedfishError> {
    get_object(client, uri).await
}

pub async fn list_referenced_coolant_connectors(
    client: &Arc<dyn Client>,
    link: &str,
) -> Collected<CoolantConnector> {
    list_referenced(client, link).await
}

pub async fn get_leak_detection(
    client: &Arc<dyn Client>,
    uri: &str,
) -> Result<LeakDetection, RedfishError> {
    get_object(client, uri).await
}
