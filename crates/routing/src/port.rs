//! Qualified port identifiers of the form `"<owner>:<port>"`.

use thiserror::Error;

/// Ordered list of qualified port names.
pub type PortList = Vec<String>;

/// Separator between the owner (device or client) and the port name.
pub const PORT_SEPARATOR: char = ':';

/// Error describing a malformed port identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortNameError {
    /// The name lacks the owner/port separator.
    #[error("port name {0:?} is missing the ':' qualifier")]
    Unqualified(String),
    /// Either side of the separator is empty.
    #[error("port name {0:?} has an empty owner or port part")]
    EmptyPart(String),
}

/// Returns `true` if `name` carries an owner qualifier.
pub fn is_qualified(name: &str) -> bool {
    name.contains(PORT_SEPARATOR)
}

/// Splits a qualified name at its first separator into `(owner, port)`.
pub fn split_port_name(name: &str) -> Result<(&str, &str), PortNameError> {
    let (owner, port) = name
        .split_once(PORT_SEPARATOR)
        .ok_or_else(|| PortNameError::Unqualified(name.to_string()))?;
    if owner.is_empty() || port.is_empty() {
        return Err(PortNameError::EmptyPart(name.to_string()));
    }
    Ok((owner, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_first_separator() {
        assert_eq!(
            split_port_name("system:playback_1"),
            Ok(("system", "playback_1"))
        );
        assert_eq!(
            split_port_name("a2j:Midi Through:port"),
            Ok(("a2j", "Midi Through:port"))
        );
    }

    #[test]
    fn rejects_malformed_names() {
        assert!(!is_qualified("playback_1"));
        assert_eq!(
            split_port_name("playback_1"),
            Err(PortNameError::Unqualified("playback_1".into()))
        );
        assert_eq!(
            split_port_name(":out"),
            Err(PortNameError::EmptyPart(":out".into()))
        );
    }
}
