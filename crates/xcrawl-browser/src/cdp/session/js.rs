//! JavaScript execution operations for CDP page session.

use serde_json::{json, Value};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{ExceptionDetails, PropertyDescriptor, RemoteObject};

use super::core::PageSession;

/// Turn `exceptionDetails` in a Runtime reply into an error.
fn check_exception(result: &Value) -> Result<(), CdpError> {
    let Some(exception) = result.get("exceptionDetails") else {
        return Ok(());
    };
    let message = serde_json::from_value::<ExceptionDetails>(exception.clone())
        .map(|details| details.message())
        .unwrap_or_else(|_| {
            exception["text"]
                .as_str()
                .unwrap_or("Unknown error")
                .to_string()
        });
    Err(CdpError::JavaScript(message))
}

impl PageSession {
    /// Evaluate JavaScript expression.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        check_exception(&result)?;
        Ok(result["result"]["value"].clone())
    }

    /// Evaluate JavaScript and return remote object.
    ///
    /// The object lives in `object_group` until that group is released.
    pub async fn evaluate_handle(
        &self,
        expression: &str,
        object_group: &str,
    ) -> Result<RemoteObject, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": false,
                    "objectGroup": object_group,
                })),
            )
            .await?;

        check_exception(&result)?;
        let remote_obj: RemoteObject = serde_json::from_value(result["result"].clone())?;
        Ok(remote_obj)
    }

    /// Call function on remote object.
    pub async fn call_function_on(
        &self,
        object_id: &str,
        function: &str,
        args: Option<Vec<Value>>,
    ) -> Result<Value, CdpError> {
        let mut params = json!({
            "objectId": object_id,
            "functionDeclaration": function,
            "returnByValue": true,
            "awaitPromise": true,
        });

        if let Some(a) = args {
            params["arguments"] = json!(
                a.into_iter()
                    .map(|v| json!({"value": v}))
                    .collect::<Vec<_>>()
            );
        }

        let result = self.call("Runtime.callFunctionOn", Some(params)).await?;

        check_exception(&result)?;
        Ok(result["result"]["value"].clone())
    }

    /// Own properties of a remote object.
    pub async fn get_properties(
        &self,
        object_id: &str,
    ) -> Result<Vec<PropertyDescriptor>, CdpError> {
        let result = self
            .call(
                "Runtime.getProperties",
                Some(json!({
                    "objectId": object_id,
                    "ownProperties": true,
                })),
            )
            .await?;

        check_exception(&result)?;
        let props: Vec<PropertyDescriptor> = serde_json::from_value(result["result"].clone())?;
        Ok(props)
    }

    /// Release every remote object held in `object_group`.
    pub async fn release_object_group(&self, object_group: &str) -> Result<(), CdpError> {
        self.call(
            "Runtime.releaseObjectGroup",
            Some(json!({"objectGroup": object_group})),
        )
        .await?;
        Ok(())
    }
}
