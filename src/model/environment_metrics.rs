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

use super::Entity;
use crate::model::resource::get_object;
use crate::{impl_is_resource, Client, RedfishError};

/// http://redfish.dmtf.org/schemas/v1/EnvironmentMetrics.v1_3_2.json
/// Excerpts are the `{"Reading": ...}` objects Redfish wraps sensor readings in.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentMetrics {
    #[serde(flatten)]
    pub entity: Entity,
    pub absolute_humidity: Option<SensorExcerpt>,
    pub dew_point_celsius: Option<SensorExcerpt>,
    pub humidity_percent: Option<SensorExcerpt>,
    pub power_watts: Option<SensorExcerpt>,
    pub temperature_celsius: Option<SensorExcerpt>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SensorExcerpt {
    pub reading: Option<f64>,
    pub data_source_uri: Option<String>,
}

impl_is_resource!(EnvironmentMetrics, "EnvironmentMetrics");

pub async fn get_environment_metrics(
    client: &Arc<dyn Client>,
    uri: &str,
) -> Result<EnvironmentMetrics, RedfishError> {
    get_object(client, uri).await
}
