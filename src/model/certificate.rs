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

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::collection::{list_referenced, Collected};
use crate::model::resource::get_object;
use crate::{impl_is_resource, Client, RedfishError};

/// http://redfish.dmtf.org/schemas/v1/Certificate.v1_8_0.json
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Certificate {
    #[serde(flatten)]
    pub entity: Entity,
    pub certificate_string: Option<String>,
    pub certificate_type: Option<CertificateType>,
    pub fingerprint: Option<String>,
    pub fingerprint_hash_algorithm: Option<String>,
    pub issuer: Option<CertificateIdentifier>,
    pub serial_number: Option<String>,
    pub subject: Option<CertificateIdentifier>,
    #[serde(rename = "UEFISignatureOwner")]
    pub uefi_signature_owner: Option<String>,
    pub valid_not_after: Option<DateTime<FixedOffset>>,
    pub valid_not_before: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
pub enum CertificateType {
    #[serde(rename = "PEM")]
    Pem,
    #[serde(rename = "PEMchain")]
    PemChain,
    #[serde(rename = "PKCS7")]
    Pkcs7,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CertificateIdentifier {
    pub city: Option<String>,
    pub common_name: Option<String>,
    pub country: Option<String>,
    pub organization: Option<String>,
    pub organizational_unit: Option<String>,
    pub state: Option<String>,
}

impl Certificate {
    /// True if `now` falls outside ValidNotBefore..=ValidNotAfter. Bounds the
    /// service did not report are not checked.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_not_after.is_some_and(|t| now > t.with_timezone(&Utc))
            || self.valid_not_before.is_some_and(|t| now < t.with_timezone(&Utc))
    }
}

/// http://redfish.dmtf.org/schemas/v1/Signature.v1_0_2.json
/// A hash in a UEFI signature database.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Signature {
    #[serde(flatten)]
    pub entity: Entity,
    pub signature_string: Option<String>,
    pub signature_type: Option<String>,
    pub signature_type_registry: Option<String>,
    #[serde(rename = "UEFISignatureOwner")]
    pub uefi_signature_owner: Option<String>,
}

impl_is_resource!(Certificate, "Certificate");
impl_is_resource!(Signature, "Signature");

pub async fn get_certificate(
    client: &Arc<dyn Client>,
    uri: &str,
) -> Result<Certificate, RedfishError> {
    get_object(client, uri).await
}

pub async fn list_referenced_certificates(
    client: &Arc<dyn Client>,
    link: &str,
) -> Collected<Certificate> {
    list_referenced(client, link).await
}

pub async fn get_signature(client: &Arc<dyn Client>, uri: &str) -> Result<Signature, RedfishError> {
    get_object(client, uri).await
}

pub async fn list_referenced_signatures(
    client: &Arc<dyn Client>,
    link: &str,
) -> Collected<Signature> {
    list_referenced(client, link).await
}
