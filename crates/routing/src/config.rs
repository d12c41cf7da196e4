//! Declarative bundle descriptions.

use crate::bundle::DataType;
use crate::port::PortList;

/// Description of one channel in a [`BundleConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelConfig {
    /// Channel display name.
    pub name: String,
    /// Qualified port names, in connection order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ports: PortList,
}

/// Description used to build a [`Bundle`](crate::Bundle).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BundleConfig {
    /// Bundle name, used as the prefix when merged into another bundle.
    pub name: String,
    /// Signal kind carried by the ports.
    pub data_type: DataType,
    /// Whether the ports are inputs (`true`) or outputs.
    pub ports_are_inputs: bool,
    /// Channels in index order.
    pub channels: Vec<ChannelConfig>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            data_type: DataType::Audio,
            ports_are_inputs: true,
            channels: Vec::new(),
        }
    }
}

impl BundleConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn as_outputs(mut self) -> Self {
        self.ports_are_inputs = false;
        self
    }

    pub fn with_channel<I, S>(mut self, name: impl Into<String>, ports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.channels.push(ChannelConfig {
            name: name.into(),
            ports: ports.into_iter().map(Into::into).collect(),
        });
        self
    }
}
