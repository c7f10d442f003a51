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

use super::{Entity, Location, ResourceStatus};
use crate::model::resource::get_object;
use crate::{impl_is_resource, Client, RedfishError};

/// http://redfish.dmtf.org/schemas/v1/Facility.v1_4_2.json
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Facility {
    #[serde(flatten)]
    pub entity: Entity,
    pub description: Option<String>,
    pub facility_type: Option<FacilityType>,
    pub location: Option<Location>,
    pub status: Option<ResourceStatus>,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
pub enum FacilityType {
    Room,
    Floor,
    Building,
    Site,
}

impl_is_resource!(Facility, "Facility");

pub async fn get_facility(client: &Arc<dyn Client>, uri: &str) -> Result<Facility, RedfishError> {
    get_object(client, uri).await
}
