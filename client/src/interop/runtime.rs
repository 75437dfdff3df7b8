//! Dispatch primitive underneath the typed bridge.
//!
//! ARCHITECTURE
//! ============
//! `JsRuntime` is the only place that knows how to reach the browser. The
//! typed `Interop` methods build a `BrowserCall` and hand it here; tests swap
//! in a scripted runtime to observe calls and inject failures.
//!
//! Client-side (csr): `BrowserRuntime` resolves `window.interop[fn]`,
//! applies it to JSON-converted arguments and awaits a returned Promise.
//! Results of unit operations are dropped without conversion, so a side
//! effect that returns something JSON cannot represent still counts as run.
//! Native builds (no `csr` feature): every call reports `InteropError::Unavailable`.

use serde_json::Value;

use super::{BrowserCall, InteropError};

/// Something that can execute a browser call and return its JSON result.
///
/// A JS `undefined` result, and any result of a `ReturnShape::Unit`
/// operation, is reported as `Value::Null`.
#[allow(async_fn_in_trait)]
pub trait JsRuntime {
    async fn invoke(&self, call: &BrowserCall) -> Result<Value, InteropError>;
}

/// Runtime backed by the page's `window.interop` object.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserRuntime;

impl JsRuntime for BrowserRuntime {
    #[allow(clippy::unused_async)]
    async fn invoke(&self, call: &BrowserCall) -> Result<Value, InteropError> {
        #[cfg(feature = "csr")]
        {
            browser::invoke(call).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = call;
            Err(InteropError::Unavailable("no browser window outside a csr build"))
        }
    }
}

#[cfg(feature = "csr")]
mod browser {
    use js_sys::{Array, Function, JSON, Promise, Reflect};
    use serde_json::Value;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    use super::super::{BrowserCall, InteropError, NAMESPACE, ReturnShape};

    fn script_error(call: &BrowserCall, err: &JsValue) -> InteropError {
        let message = err
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message()))
            .or_else(|| err.as_string())
            .unwrap_or_else(|| format!("{err:?}"));
        InteropError::Script { function: call.op.qualified_name(), message }
    }

    fn to_js(call: &BrowserCall, value: &Value) -> Result<JsValue, InteropError> {
        let text = serde_json::to_string(value).map_err(|e| InteropError::Serialize(e.to_string()))?;
        JSON::parse(&text).map_err(|e| script_error(call, &e))
    }

    fn from_js(call: &BrowserCall, value: &JsValue) -> Result<Value, InteropError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Value::Null);
        }
        let decode_error = |message: String| InteropError::Decode { function: call.op.qualified_name(), message };
        // `stringify` yields `undefined` for functions and symbols.
        let text = JSON::stringify(value)
            .map_err(|e| script_error(call, &e))?
            .as_string()
            .ok_or_else(|| decode_error("result is not representable as JSON".to_owned()))?;
        serde_json::from_str(&text).map_err(|e| decode_error(e.to_string()))
    }

    pub(super) async fn invoke(call: &BrowserCall) -> Result<Value, InteropError> {
        let window = web_sys::window().ok_or(InteropError::Unavailable("window is not available"))?;

        let namespace = Reflect::get(&window, &JsValue::from_str(NAMESPACE)).map_err(|e| script_error(call, &e))?;
        if namespace.is_undefined() || namespace.is_null() {
            return Err(InteropError::MissingFunction(call.op.qualified_name()));
        }

        let function = Reflect::get(&namespace, &JsValue::from_str(call.op.function_name()))
            .map_err(|e| script_error(call, &e))?
            .dyn_into::<Function>()
            .map_err(|_| InteropError::MissingFunction(call.op.qualified_name()))?;

        let args = Array::new();
        for arg in &call.args {
            args.push(&to_js(call, arg)?);
        }

        let mut result = function.apply(&namespace, &args).map_err(|e| script_error(call, &e))?;
        if result.has_type::<Promise>() {
            result = JsFuture::from(result.unchecked_into::<Promise>())
                .await
                .map_err(|e| script_error(call, &e))?;
        }

        if call.op.returns() == ReturnShape::Unit {
            return Ok(Value::Null);
        }
        from_js(call, &result)
    }
}
