/*
 * SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
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

// Read-modify-write. A resource's writable properties are compared against the
// payload it was decoded from and only the ones that changed are PATCHed back.
// BMCs reject writes to properties they own, and some re-validate (and reject)
// values that were sent unchanged.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::jsonmap::{self, JsonMap};
use crate::model::resource::IsResource;
use crate::RedfishError;

/// Builds the merge-patch body for `read_write_fields`: every listed property
/// whose current value differs from the last value the service accepted.
/// Nested objects only carry the members that changed. Absent and null compare
/// equal.
pub fn patch_payload<T: IsResource + Serialize>(
    resource: &T,
    read_write_fields: &[&str],
) -> Result<JsonMap, RedfishError> {
    let (patch, _current) = diff_resource(resource, read_write_fields)?;
    Ok(patch)
}

/// PATCHes the changed writable properties to the resource's @odata.id.
/// Nothing changed means no request at all.
pub async fn update_from_raw_data<T: IsResource + Serialize>(
    resource: &mut T,
    read_write_fields: &[&str],
) -> Result<(), RedfishError> {
    let (patch, mut current) = diff_resource(resource, read_write_fields)?;
    let entity = resource.entity();
    if patch.is_empty() {
        debug!("update {}: nothing changed", entity.odata_id());
        return Ok(());
    }
    if entity.odata_id().is_empty() {
        return Err(RedfishError::MissingKey {
            key: "@odata.id".to_string(),
            url: entity.id.clone(),
        });
    }

    let changed: Vec<String> = patch.keys().cloned().collect();
    entity
        .client()?
        .patch(entity.odata_id(), Value::Object(patch))
        .await?;

    let entity = resource.entity_mut();
    for field in changed {
        let value = current.remove(&field).unwrap_or(Value::Null);
        entity.commit(&field, value);
    }
    Ok(())
}

// Returns the patch plus the current values of the whitelisted fields.
fn diff_resource<T: IsResource + Serialize>(
    resource: &T,
    read_write_fields: &[&str],
) -> Result<(JsonMap, JsonMap), RedfishError> {
    let entity = resource.entity();
    let url = entity.odata_id();

    let current = serde_json::to_value(resource).map_err(|e| RedfishError::JsonSerializeError {
        url: url.to_string(),
        object_debug: entity.id.clone(),
        source: e,
    })?;
    let mut current = jsonmap::into_object(current, "resource", url)?;

    let original = match entity.raw() {
        Some(raw) => serde_json::from_str::<JsonMap>(raw).map_err(|e| {
            RedfishError::JsonDeserializeError {
                url: url.to_string(),
                body: raw.to_string(),
                source: e,
            }
        })?,
        None => Map::new(),
    };

    let mut patch = Map::new();
    let mut kept = Map::new();
    for field in read_write_fields {
        let value = current.remove(*field).unwrap_or(Value::Null);
        let baseline = entity
            .committed()
            .get(*field)
            .or_else(|| original.get(*field))
            .unwrap_or(&Value::Null);
        if let Some(delta) = diff(baseline, &value) {
            patch.insert(field.to_string(), delta);
        }
        kept.insert(field.to_string(), value);
    }
    Ok((patch, kept))
}

fn diff(original: &Value, current: &Value) -> Option<Value> {
    match (original, current) {
        (a, b) if a == b => None,
        // 5 and 5.0 are the same value to the BMC
        (Value::Number(a), Value::Number(b)) if a.as_f64() == b.as_f64() => None,
        (Value::Object(a), Value::Object(b)) => {
            let mut delta = Map::new();
            for (key, value) in b {
                if let Some(d) = diff(a.get(key).unwrap_or(&Value::Null), value) {
                    delta.insert(key.clone(), d);
                }
            }
            if delta.is_empty() {
                None
            } else {
                Some(Value::Object(delta))
            }
        }
        _ => Some(current.clone()),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::impl_is_resource;
    use crate::model::resource::{decode, Entity};
    use crate::testing::{FakeClient, Request};

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Widget {
        #[serde(flatten)]
        entity: Entity,
        asset_tag: Option<String>,
        user_label: Option<String>,
        serial_number: Option<String>,
        capacity: Option<f64>,
        settings: Option<Settings>,
    }

    #[derive(Debug, Serialize, Deserialize, Clone)]
    #[serde(rename_all = "PascalCase")]
    struct Settings {
        speed: Option<i64>,
        mode: Option<String>,
    }

    impl_is_resource!(Widget, "Widget");

    const FIELDS: &[&str] = &["AssetTag", "UserLabel", "Capacity", "Settings"];

    fn widget(fake: &FakeClient) -> Widget {
        let body = json!({
            "@odata.id": "/redfish/v1/Widgets/1",
            "Id": "1",
            "AssetTag": "A1",
            "SerialNumber": "SN1",
            "Capacity": 5,
            "Settings": {"Speed": 10, "Mode": "Auto"},
            "Oem": {"Vendor": {"Opaque": true}}
        });
        let mut w: Widget = decode("/redfish/v1/Widgets/1", &body.to_string()).unwrap();
        w.entity.set_client(fake.clone().into_client());
        w
    }

    #[test]
    fn test_unchanged_resource_has_empty_patch() {
        let w = widget(&FakeClient::new());
        assert!(patch_payload(&w, FIELDS).unwrap().is_empty());
    }

    #[test]
    fn test_only_changed_whitelisted_fields() {
        let mut w = widget(&FakeClient::new());
        w.asset_tag = Some("A2".to_string());
        w.serial_number = Some("SN2".to_string());
        let patch = patch_payload(&w, FIELDS).unwrap();
        assert_eq!(Value::Object(patch), json!({"AssetTag": "A2"}));
    }

    #[test]
    fn test_nested_object_sends_only_changed_members() {
        let mut w = widget(&FakeClient::new());
        w.settings.as_mut().unwrap().mode = Some("Manual".to_string());
        let patch = patch_payload(&w, FIELDS).unwrap();
        assert_eq!(Value::Object(patch), json!({"Settings": {"Mode": "Manual"}}));
    }

    #[test]
    fn test_setting_absent_field() {
        let mut w = widget(&FakeClient::new());
        w.user_label = Some("rack 4".to_string());
        let patch = patch_payload(&w, FIELDS).unwrap();
        assert_eq!(Value::Object(patch), json!({"UserLabel": "rack 4"}));
    }

    #[test]
    fn test_clearing_field_sends_null() {
        let mut w = widget(&FakeClient::new());
        w.asset_tag = None;
        let patch = patch_payload(&w, FIELDS).unwrap();
        assert_eq!(Value::Object(patch), json!({"AssetTag": null}));
    }

    #[test]
    fn test_integer_and_float_compare_equal() {
        let w = widget(&FakeClient::new());
        assert_eq!(w.capacity, Some(5.0));
        assert!(patch_payload(&w, &["Capacity"]).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_patches_once() {
        let fake = FakeClient::new();
        let mut w = widget(&fake);
        w.asset_tag = Some("A2".to_string());
        update_from_raw_data(&mut w, FIELDS).await.unwrap();
        update_from_raw_data(&mut w, FIELDS).await.unwrap();
        assert_eq!(
            fake.requests(),
            vec![Request::Patch(
                "/redfish/v1/Widgets/1".to_string(),
                json!({"AssetTag": "A2"})
            )]
        );
        // the payload the resource was decoded from is untouched
        assert!(w.entity.raw().unwrap().contains("\"A1\""));
    }

    #[tokio::test]
    async fn test_update_without_changes_makes_no_request() {
        let fake = FakeClient::new();
        let mut w = widget(&fake);
        w.serial_number = Some("changed but read-only".to_string());
        update_from_raw_data(&mut w, FIELDS).await.unwrap();
        update_from_raw_data(&mut w, FIELDS).await.unwrap();
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_is_retried_next_time() {
        let fake = FakeClient::new().fail_writes_to("/redfish/v1/Widgets/1");
        let mut w = widget(&fake);
        w.asset_tag = Some("A2".to_string());
        let err = update_from_raw_data(&mut w, FIELDS).await.unwrap_err();
        assert!(matches!(err, RedfishError::HTTPErrorCode { .. }));
        assert!(update_from_raw_data(&mut w, FIELDS).await.is_err());
        assert_eq!(fake.patches().len(), 2);
    }

    #[tokio::test]
    async fn test_update_falls_back_to_fetch_uri() {
        let fake = FakeClient::new();
        let mut w: Widget =
            decode("/redfish/v1/Widgets/7", r#"{"Id": "7", "AssetTag": "A1"}"#).unwrap();
        w.entity.set_client(fake.clone().into_client());
        w.asset_tag = Some("A2".to_string());
        update_from_raw_data(&mut w, FIELDS).await.unwrap();
        assert_eq!(
            fake.patches(),
            vec![(
                "/redfish/v1/Widgets/7".to_string(),
                json!({"AssetTag": "A2"})
            )]
        );
    }

    #[tokio::test]
    async fn test_update_needs_odata_id() {
        let fake = FakeClient::new();
        let mut w: Widget = decode("", r#"{"Id": "1", "AssetTag": "A1"}"#).unwrap();
        w.entity.set_client(fake.clone().into_client());
        w.asset_tag = Some("A2".to_string());
        let err = update_from_raw_data(&mut w, FIELDS).await.unwrap_err();
        assert!(matches!(err, RedfishError::MissingKey { ref key, .. } if key == "@odata.id"));
        assert!(fake.requests().is_empty());
    }
}
