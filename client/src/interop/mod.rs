//! Typed bridge to browser-side JavaScript.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call `Interop` for progressive-enhancement side effects: cookies,
//! the document title, injected `<meta>`/`<link>`/`<script>` tags, form
//! submission and file upload triggers. The browser half lives in
//! `public/interop.js` and is published as `window.interop`.
//!
//! ERROR HANDLING
//! ==============
//! No bridge method fails. A call that cannot run, throws, rejects, or
//! returns something undecodable yields `Outcome::Defaulted` carrying the
//! neutral value for that operation (`""`, `[]` or `()`). The bridge holds
//! no state, does not log and does not validate arguments before forwarding.


mod error;
mod op;
mod outcome;
mod runtime;

pub use error::InteropError;
pub use op::{BrowserCall, BrowserOp, NAMESPACE, ReturnShape, ScriptPlacement};
pub use outcome::Outcome;
pub use runtime::{BrowserRuntime, JsRuntime};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

/// Failure-isolated API over `window.interop`.
#[derive(Clone, Debug, Default)]
pub struct Interop<R = BrowserRuntime> {
    runtime: R,
}

impl Interop<BrowserRuntime> {
    #[must_use]
    pub fn browser() -> Self {
        Self { runtime: BrowserRuntime }
    }
}

impl<R: JsRuntime> Interop<R> {
    #[must_use]
    pub fn new(runtime: R) -> Self {
        Self { runtime }
    }

    #[must_use]
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub async fn set_cookie(&self, name: &str, value: &str, days: i32) -> Outcome<()> {
        self.call(BrowserCall::new(BrowserOp::SetCookie, vec![json!(name), json!(value), json!(days)]))
            .await
    }

    /// Read a cookie; a missing cookie is a completed empty string.
    pub async fn get_cookie(&self, name: &str) -> Outcome<String> {
        self.call(BrowserCall::new(BrowserOp::GetCookie, vec![json!(name)])).await
    }

    pub async fn update_title(&self, title: &str) -> Outcome<()> {
        self.call(BrowserCall::new(BrowserOp::UpdateTitle, vec![json!(title)])).await
    }

    /// Insert or replace `<meta id=.. {attribute}=.. content=..>` in `<head>`.
    pub async fn include_meta(&self, id: &str, attribute: &str, name: &str, content: &str) -> Outcome<()> {
        self.call(BrowserCall::new(
            BrowserOp::IncludeMeta,
            vec![json!(id), json!(attribute), json!(name), json!(content)],
        ))
        .await
    }

    pub async fn include_link(&self, id: &str, rel: &str, url: &str, link_type: &str) -> Outcome<()> {
        self.call(BrowserCall::new(
            BrowserOp::IncludeLink,
            vec![json!(id), json!(rel), json!(url), json!(link_type)],
        ))
        .await
    }

    /// Inject a script by `src`, or inline `content` when `src` is empty.
    pub async fn include_script(
        &self,
        id: &str,
        src: &str,
        content: &str,
        placement: ScriptPlacement,
    ) -> Outcome<()> {
        self.call(BrowserCall::new(
            BrowserOp::IncludeScript,
            vec![json!(id), json!(src), json!(content), json!(placement)],
        ))
        .await
    }

    pub async fn include_css(&self, id: &str, url: &str) -> Outcome<()> {
        self.include_link(id, "stylesheet", url, "text/css").await
    }

    /// Value of the first element with the given `name` attribute.
    pub async fn get_element_by_name(&self, name: &str) -> Outcome<String> {
        self.call(BrowserCall::new(BrowserOp::GetElementByName, vec![json!(name)]))
            .await
    }

    /// Build and submit a form posting `fields` to `path`. Whatever the
    /// browser returns is discarded.
    pub async fn submit_form<F: Serialize + ?Sized>(&self, path: &str, fields: &F) -> Outcome<()> {
        let fields = match serde_json::to_value(fields) {
            Ok(fields) => fields,
            Err(e) => return Outcome::defaulted(InteropError::Serialize(e.to_string())),
        };
        self.call(BrowserCall::new(BrowserOp::SubmitForm, vec![json!(path), fields]))
            .await
    }

    /// Names of the files currently selected in the `<input type=file>` with
    /// the given id.
    pub async fn get_files(&self, input_id: &str) -> Outcome<Vec<String>> {
        self.call(BrowserCall::new(BrowserOp::GetFiles, vec![json!(input_id)])).await
    }

    /// Upload the files selected in `input_id` to `post_url`, targeting
    /// `folder` on the receiving side.
    pub async fn upload_files(&self, post_url: &str, folder: &str, input_id: &str) -> Outcome<()> {
        self.call(BrowserCall::new(
            BrowserOp::UploadFiles,
            vec![json!(post_url), json!(folder), json!(input_id)],
        ))
        .await
    }

    /// Dispatch `call` and shape the answer by the operation's declared
    /// return: unit operations ignore whatever the browser hands back, value
    /// operations decode it (`null` decodes to the empty value).
    async fn call<T: DeserializeOwned + Default>(&self, call: BrowserCall) -> Outcome<T> {
        let value = match self.runtime.invoke(&call).await {
            Ok(value) => value,
            Err(error) => return Outcome::defaulted(error),
        };
        if call.op.returns() == ReturnShape::Unit || value.is_null() {
            return Outcome::Completed(T::default());
        }
        match serde_json::from_value(value) {
            Ok(decoded) => Outcome::Completed(decoded),
            Err(e) => Outcome::defaulted(InteropError::Decode {
                function: call.op.qualified_name(),
                message: e.to_string(),
            }),
        }
    }
}
