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
use std::fmt::Debug;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::model::resource::Entity;
use crate::RedfishError;

/// An entry of a resource's `Actions` object: where to POST, and the values the
/// service advertised for the action's parameter.
#[derive(Debug, Clone)]
pub struct Action<V> {
    pub name: &'static str,
    pub target: String,
    pub allowable_values: Vec<V>,
}

impl<V> Action<V> {
    pub fn new(name: &'static str, target: Option<String>, allowable_values: Vec<V>) -> Self {
        Action {
            name,
            target: target.unwrap_or_default(),
            allowable_values,
        }
    }

    pub fn is_supported(&self) -> bool {
        !self.target.is_empty()
    }
}

impl<V> Default for Action<V> {
    fn default() -> Self {
        Action::new("", None, vec![])
    }
}

impl<V: Serialize + PartialEq + Debug> Action<V> {
    /// POSTs `{parameter: value}` to the action target.
    ///
    /// The allowable values are not enforced. A value the service did not
    /// advertise is logged and sent anyway; the service has the final word.
    pub async fn invoke_with(
        &self,
        entity: &Entity,
        parameter: &str,
        value: &V,
    ) -> Result<(), RedfishError> {
        if !self.allowable_values.is_empty() && !self.allowable_values.contains(value) {
            warn!(
                "{} on {}: {:?} is not one of {:?}",
                self.name,
                entity.odata_id(),
                value,
                self.allowable_values
            );
        }
        let value = serde_json::to_value(value).map_err(|e| RedfishError::JsonSerializeError {
            url: self.target.clone(),
            object_debug: format!("{value:?}"),
            source: e,
        })?;
        let mut payload = Map::new();
        payload.insert(parameter.to_string(), value);
        self.invoke(entity, payload).await
    }

    /// POSTs `payload` as the action body. Fails without touching the network if
    /// this resource did not advertise the action.
    pub async fn invoke(
        &self,
        entity: &Entity,
        payload: Map<String, Value>,
    ) -> Result<(), RedfishError> {
        if !self.is_supported() {
            return Err(RedfishError::UnsupportedAction {
                action: self.name.to_string(),
                resource: entity.odata_id().to_string(),
            });
        }
        let client = entity.client()?;
        debug!("{} -> {}", self.name, self.target);
        client
            .post(&self.target, Value::Object(payload))
            .await
            .map(|_status_code| ())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::FakeClient;

    fn entity_with(fake: &FakeClient) -> Entity {
        let mut entity = Entity::default();
        entity.id = "1".to_string();
        entity.odata.odata_id = "/redfish/v1/Thing/1".to_string();
        entity.set_client(fake.clone().into_client());
        entity
    }

    #[tokio::test]
    async fn test_empty_target_is_unsupported() {
        let fake = FakeClient::new();
        let entity = entity_with(&fake);
        let action: Action<String> = Action::new("#Thing.Do", None, vec![]);
        let err = action
            .invoke_with(&entity, "Mode", &"Enabled".to_string())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RedfishError::UnsupportedAction { ref action, ref resource }
                if action == "#Thing.Do" && resource == "/redfish/v1/Thing/1"
        ));
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn test_value_outside_allowable_is_still_posted() {
        let fake = FakeClient::new();
        let entity = entity_with(&fake);
        let action = Action::new(
            "#Thing.Do",
            Some("/redfish/v1/Thing/1/Actions/Thing.Do".to_string()),
            vec!["Enabled".to_string()],
        );
        action
            .invoke_with(&entity, "Mode", &"Disabled".to_string())
            .await
            .unwrap();
        assert_eq!(
            fake.posts(),
            vec![(
                "/redfish/v1/Thing/1/Actions/Thing.Do".to_string(),
                json!({"Mode": "Disabled"})
            )]
        );
    }

    #[tokio::test]
    async fn test_server_error_is_returned() {
        let fake = FakeClient::new().fail_writes_to("/redfish/v1/Thing/1/Actions/Thing.Do");
        let entity = entity_with(&fake);
        let action: Action<String> = Action::new(
            "#Thing.Do",
            Some("/redfish/v1/Thing/1/Actions/Thing.Do".to_string()),
            vec![],
        );
        let err = action.invoke(&entity, Map::new()).await.unwrap_err();
        assert!(matches!(err, RedfishError::HTTPErrorCode { .. }));
    }
}
