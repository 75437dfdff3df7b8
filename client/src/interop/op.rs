//! Browser-side operation descriptors.
//!
//! DESIGN
//! ======
//! Every function the bridge may call on `window.interop` is listed here with
//! its fixed arity and return shape. Callers never pass a function name as a
//! string; they pick a `BrowserOp` and the descriptor supplies the rest.

#[cfg(test)]
#[path = "op_test.rs"]
mod op_test;

use serde::Serialize;
use serde_json::Value;

/// Global object on `window` that owns every browser-side entry point.
pub const NAMESPACE: &str = "interop";

/// Shape of the value a browser-side function hands back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnShape {
    /// Return value is ignored.
    Unit,
    /// A single string; `null`/`undefined` means empty.
    Text,
    /// An array of strings; `null`/`undefined` means empty.
    TextList,
}

/// One browser-side entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BrowserOp {
    SetCookie,
    GetCookie,
    UpdateTitle,
    IncludeMeta,
    IncludeLink,
    IncludeScript,
    GetElementByName,
    SubmitForm,
    GetFiles,
    UploadFiles,
}

impl BrowserOp {
    pub const ALL: [Self; 10] = [
        Self::SetCookie,
        Self::GetCookie,
        Self::UpdateTitle,
        Self::IncludeMeta,
        Self::IncludeLink,
        Self::IncludeScript,
        Self::GetElementByName,
        Self::SubmitForm,
        Self::GetFiles,
        Self::UploadFiles,
    ];

    /// Property name under `window.interop`.
    #[must_use]
    pub const fn function_name(self) -> &'static str {
        match self {
            Self::SetCookie => "setCookie",
            Self::GetCookie => "getCookie",
            Self::UpdateTitle => "updateTitle",
            Self::IncludeMeta => "includeMeta",
            Self::IncludeLink => "includeLink",
            Self::IncludeScript => "includeScript",
            Self::GetElementByName => "getElementByName",
            Self::SubmitForm => "submitForm",
            Self::GetFiles => "getFiles",
            Self::UploadFiles => "uploadFiles",
        }
    }

    /// Dotted name as seen from script, e.g. `interop.getCookie`.
    #[must_use]
    pub fn qualified_name(self) -> String {
        format!("{NAMESPACE}.{}", self.function_name())
    }

    /// Number of positional arguments the browser function expects.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::GetCookie | Self::UpdateTitle | Self::GetElementByName | Self::GetFiles => 1,
            Self::SubmitForm => 2,
            Self::SetCookie | Self::UploadFiles => 3,
            Self::IncludeMeta | Self::IncludeLink | Self::IncludeScript => 4,
        }
    }

    #[must_use]
    pub const fn returns(self) -> ReturnShape {
        match self {
            Self::GetCookie | Self::GetElementByName => ReturnShape::Text,
            Self::GetFiles => ReturnShape::TextList,
            _ => ReturnShape::Unit,
        }
    }
}

/// Where `includeScript` inserts the `<script>` element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptPlacement {
    #[default]
    Head,
    Body,
}

/// A single cross-boundary invocation: the target descriptor plus its
/// JSON-encoded positional arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct BrowserCall {
    pub op: BrowserOp,
    pub args: Vec<Value>,
}

impl BrowserCall {
    #[must_use]
    pub fn new(op: BrowserOp, args: Vec<Value>) -> Self {
        debug_assert_eq!(args.len(), op.arity(), "wrong argument count for {}", op.qualified_name());
        Self { op, args }
    }
}
