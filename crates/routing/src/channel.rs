use crate::port::PortList;

/// A named logical channel of a bundle and the ports it maps to.
///
/// Port order is insertion order and drives the connection cross product.
/// Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    /// Display name, e.g. "L".
    pub name: String,
    /// Qualified port names attached to the channel.
    pub ports: PortList,
}

impl Channel {
    /// Creates an empty channel.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ports: PortList::new(),
        }
    }

    /// Whether `port` is attached to this channel.
    pub fn has_port(&self, port: &str) -> bool {
        self.ports.iter().any(|p| p == port)
    }

    /// Whether `port` is the only port on this channel.
    pub fn offers_alone(&self, port: &str) -> bool {
        matches!(self.ports.as_slice(), [only] if only == port)
    }
}
