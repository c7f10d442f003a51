/*
 * SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
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

// jsonmap.rs
// Helpers for pulling typed values out of loosely shaped JSON objects:
// collection pages, and the field maps the update diff works on.

use std::any::type_name;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::RedfishError;

pub type JsonMap = Map<String, Value>;

// missing_key_error creates a RedfishError::MissingKey error.
fn missing_key_error(key: &str, url: &str) -> RedfishError {
    RedfishError::MissingKey {
        key: key.to_string(),
        url: url.to_string(),
    }
}

// invalid_type_error creates a RedfishError::InvalidKeyType error.
fn invalid_type_error(key: &str, expected_type: &str, url: &str) -> RedfishError {
    RedfishError::InvalidKeyType {
        key: key.to_string(),
        expected_type: expected_type.to_string(),
        url: url.to_string(),
    }
}

// extract removes a key from a map and deserializes the
// value to type T. Returns an error if the key is missing or
// deserialization fails.
pub fn extract<T>(map: &mut JsonMap, key: &str, url: &str) -> Result<T, RedfishError>
where
    T: DeserializeOwned,
{
    let json = map
        .remove(key)
        .ok_or_else(|| missing_key_error(key, url))?;
    serde_json::from_value::<T>(json).map_err(|_| invalid_type_error(key, type_name::<T>(), url))
}

// extract_opt is extract for keys that may legitimately be absent.
// An explicit null counts as absent.
pub fn extract_opt<T>(map: &mut JsonMap, key: &str, url: &str) -> Result<Option<T>, RedfishError>
where
    T: DeserializeOwned,
{
    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(json) => serde_json::from_value::<T>(json)
            .map(Some)
            .map_err(|_| invalid_type_error(key, type_name::<T>(), url)),
    }
}

// into_object unwraps a JSON object. `what` names the value in the error.
pub fn into_object(value: Value, what: &str, url: &str) -> Result<JsonMap, RedfishError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(invalid_type_error(what, "object", url)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> JsonMap {
        value.as_object().unwrap().clone()
    }

    // test_extract_success tests that extract correctly extracts and
    // removes a value.
    #[test]
    fn test_extract_success() {
        let mut m = map(json!({"Name": "TestName"}));
        let result: Result<String, _> = extract(&mut m, "Name", "http://test/url");
        assert_eq!(result.unwrap(), "TestName");
        assert!(m.is_empty());
    }

    // test_extract_missing_key tests that extract returns MissingKey error when key doesn't exist.
    #[test]
    fn test_extract_missing_key() {
        let mut m = map(json!({"Name": "TestName"}));
        let result: Result<String, _> = extract(&mut m, "Members", "http://test/url");
        assert!(matches!(result, Err(RedfishError::MissingKey { .. })));
    }

    // test_extract_wrong_type tests that extract returns InvalidKeyType when value has the wrong shape.
    #[test]
    fn test_extract_wrong_type() {
        let mut m = map(json!({"Members": 42}));
        let result: Result<Vec<String>, _> = extract(&mut m, "Members", "http://test/url");
        assert!(matches!(result, Err(RedfishError::InvalidKeyType { .. })));
    }

    #[test]
    fn test_extract_opt() {
        let mut m = map(json!({"Next": "/page/2", "Null": null, "Bad": 1}));
        let next: Option<String> = extract_opt(&mut m, "Next", "u").unwrap();
        assert_eq!(next.as_deref(), Some("/page/2"));
        let null: Option<String> = extract_opt(&mut m, "Null", "u").unwrap();
        assert!(null.is_none());
        let absent: Option<String> = extract_opt(&mut m, "Absent", "u").unwrap();
        assert!(absent.is_none());
        assert!(extract_opt::<String>(&mut m, "Bad", "u").is_err());
    }

    #[test]
    fn test_into_object() {
        assert!(into_object(json!({"a": 1}), "body", "u").is_ok());
        assert!(matches!(
            into_object(json!([1]), "body", "u"),
            Err(RedfishError::InvalidKeyType { .. })
        ));
    }
}
