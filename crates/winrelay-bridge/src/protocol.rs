//! Control channel message types.
//!
//! Every message is a JSON object with a `type` field. Inbound types the
//! bridge does not know about, unknown calls and unknown fields are ignored
//! so newer content hosts keep working.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Messages the content host sends to the bridge.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Inbound {
    #[serde(rename = "extension")]
    Extension(ExtensionRequest),

    /// The content host wants the window gone.
    #[serde(rename = "exit_request")]
    ExitRequest,

    #[serde(other)]
    Unknown,
}

/// A native call request.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionRequest {
    pub extension_call: String,
    /// Correlation id echoed back in the response. Opaque to the bridge.
    pub extension_id: serde_json::Value,
    #[serde(default)]
    pub extension_parameters: Parameters,
}

/// Call parameters: normally a JSON document encoded as a string, but an
/// inline object is accepted too.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Parameters {
    Encoded(String),
    Inline(serde_json::Value),
}

impl Default for Parameters {
    fn default() -> Self {
        Self::Inline(serde_json::Value::Object(Default::default()))
    }
}

impl Parameters {
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match self {
            Self::Encoded(text) => serde_json::from_str(text),
            Self::Inline(value) => T::deserialize(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct FileDialogParams {
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default)]
    pub filter: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResizeParams {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TitleParams {
    pub title: String,
}

/// A decoded extension call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    OpenFile(FileDialogParams),
    OpenFiles(FileDialogParams),
    OpenDir(FileDialogParams),
    SaveFile(FileDialogParams),
    Resize(ResizeParams),
    SetTitle(TitleParams),
    SetAppIcon,
    UiInfo,
    Unknown(String),
}

impl ExtensionRequest {
    /// Decode the call-specific parameters.
    pub fn call(&self) -> Result<Call, serde_json::Error> {
        let params = &self.extension_parameters;
        Ok(match self.extension_call.as_str() {
            "openFile" => Call::OpenFile(params.decode()?),
            "openFiles" => Call::OpenFiles(params.decode()?),
            "openDir" => Call::OpenDir(params.decode()?),
            "saveFile" => Call::SaveFile(params.decode()?),
            "resize" => Call::Resize(params.decode()?),
            "setTitle" => Call::SetTitle(params.decode()?),
            "setAppIcon" => Call::SetAppIcon,
            "ui_info" => Call::UiInfo,
            other => Call::Unknown(other.to_string()),
        })
    }
}

/// Result carried in an `extension_response`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseValue {
    /// Single path; empty when the user cancelled.
    Path(String),
    /// Several paths; empty when the user cancelled.
    Paths(Vec<String>),
}

/// Answer to one `extension` request.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionResponse {
    /// Name of the call being answered, e.g. `openFile`.
    pub call: String,
    pub id: serde_json::Value,
    pub result: ResponseValue,
}

impl Serialize for ExtensionResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let key = format!("{}Response", self.call);
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("type", "extension_response")?;
        map.serialize_entry("extension_call", &key)?;
        map.serialize_entry("extension_id", &self.id)?;
        map.serialize_entry(&key, &self.result)?;
        map.end()
    }
}

/// Messages the bridge sends to the content host.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Sent once, right after the channel opens.
    Ready,
    Response(ExtensionResponse),
}

impl Serialize for Outbound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Ready => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", "extension_ready")?;
                map.end()
            }
            Self::Response(response) => response.serialize(serializer),
        }
    }
}
