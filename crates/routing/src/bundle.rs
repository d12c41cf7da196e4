use std::fmt;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;
use tracing::{debug, trace};

use crate::channel::Channel;
use crate::config::{BundleConfig, ChannelConfig};
use crate::engine::RoutingEngine;
use crate::port::{self, PortList, PortNameError};
use crate::signal::Signal;

/// Kind of signal carried by a bundle's ports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    #[default]
    Audio,
    Midi,
}

/// Error produced when building a bundle from a [`BundleConfig`].
#[derive(Debug, Error)]
pub enum BundleError {
    /// A channel listed a malformed port name.
    #[error("channel {channel}: {source}")]
    InvalidPort {
        channel: usize,
        #[source]
        source: PortNameError,
    },
    /// A channel had a blank name.
    #[error("channel {index} has an empty name")]
    EmptyChannelName { index: usize },
}

#[derive(Debug, Clone)]
struct BundleMeta {
    name: String,
    data_type: DataType,
    ports_are_inputs: bool,
}

/// A named, ordered set of channels, each mapping to one or more ports.
///
/// Bundles are shared between subsystems as `Arc<Bundle>` and mutated
/// through `&self`. Channels sit behind a single mutex; readers get copies.
/// Observers are notified after the lock is released, so a callback may
/// call back into the same bundle. No guarantee spans two calls: adding a
/// channel and then a port to it are separate transactions.
pub struct Bundle {
    channels: Mutex<Vec<Channel>>,
    meta: RwLock<BundleMeta>,
    ports_changed: Signal<usize>,
    configuration_changed: Signal<()>,
    name_changed: Signal<()>,
}

fn check_channel(channels: &[Channel], ch: usize) {
    assert!(
        ch < channels.len(),
        "channel index {ch} out of range for bundle with {} channels",
        channels.len()
    );
}

fn check_port(port: &str) {
    assert!(
        port::is_qualified(port),
        "port name {port:?} must be qualified as <owner>:<port>"
    );
}

impl Bundle {
    /// Creates an empty audio bundle whose ports are inputs.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_meta(
            BundleMeta {
                name: name.into(),
                data_type: DataType::Audio,
                ports_are_inputs: true,
            },
            Vec::new(),
        )
    }

    /// Copies the channels, name, type and direction of `other`.
    /// Subscribers are not copied.
    pub fn copy_of(other: &Bundle) -> Self {
        let meta = other.meta.read().clone();
        Self::with_meta(meta, other.channels())
    }

    /// Builds a bundle from a declarative description, validating every
    /// channel name and port name.
    pub fn from_config(config: &BundleConfig) -> Result<Self, BundleError> {
        let mut channels = Vec::with_capacity(config.channels.len());
        for (index, channel) in config.channels.iter().enumerate() {
            if channel.name.trim().is_empty() {
                return Err(BundleError::EmptyChannelName { index });
            }
            for port in &channel.ports {
                port::split_port_name(port).map_err(|source| BundleError::InvalidPort {
                    channel: index,
                    source,
                })?;
            }
            channels.push(Channel {
                name: channel.name.clone(),
                ports: channel.ports.clone(),
            });
        }
        debug!(
            bundle = %config.name,
            channels = channels.len(),
            "bundle built from config"
        );
        Ok(Self::with_meta(
            BundleMeta {
                name: config.name.clone(),
                data_type: config.data_type,
                ports_are_inputs: config.ports_are_inputs,
            },
            channels,
        ))
    }

    /// Snapshots the bundle as a declarative description.
    pub fn to_config(&self) -> BundleConfig {
        let meta = self.meta.read().clone();
        BundleConfig {
            name: meta.name,
            data_type: meta.data_type,
            ports_are_inputs: meta.ports_are_inputs,
            channels: self
                .channels()
                .into_iter()
                .map(|channel| ChannelConfig {
                    name: channel.name,
                    ports: channel.ports,
                })
                .collect(),
        }
    }

    fn with_meta(meta: BundleMeta, channels: Vec<Channel>) -> Self {
        Self {
            channels: Mutex::new(channels),
            meta: RwLock::new(meta),
            ports_changed: Signal::new("ports_changed"),
            configuration_changed: Signal::new("configuration_changed"),
            name_changed: Signal::new("name_changed"),
        }
    }

    /// Emitted with the channel index whenever a channel's ports change.
    pub fn ports_changed(&self) -> &Signal<usize> {
        &self.ports_changed
    }

    /// Emitted when channels are added or removed, or type/direction change.
    pub fn configuration_changed(&self) -> &Signal<()> {
        &self.configuration_changed
    }

    /// Emitted when the bundle or one of its channels is renamed.
    pub fn name_changed(&self) -> &Signal<()> {
        &self.name_changed
    }

    pub fn name(&self) -> String {
        self.meta.read().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.meta.write().name = name.into();
        self.name_changed.emit(());
    }

    pub fn data_type(&self) -> DataType {
        self.meta.read().data_type
    }

    pub fn set_type(&self, data_type: DataType) {
        self.meta.write().data_type = data_type;
        self.configuration_changed.emit(());
    }

    pub fn ports_are_inputs(&self) -> bool {
        self.meta.read().ports_are_inputs
    }

    pub fn ports_are_outputs(&self) -> bool {
        !self.ports_are_inputs()
    }

    pub fn set_ports_are_inputs(&self) {
        self.set_direction(true);
    }

    pub fn set_ports_are_outputs(&self) {
        self.set_direction(false);
    }

    fn set_direction(&self, inputs: bool) {
        self.meta.write().ports_are_inputs = inputs;
        self.configuration_changed.emit(());
    }

    /// Number of channels.
    pub fn nchannels(&self) -> usize {
        self.channels.lock().len()
    }

    /// Copy of every channel, in index order.
    pub fn channels(&self) -> Vec<Channel> {
        self.channels.lock().clone()
    }

    /// Copy of the ports attached to channel `ch`.
    ///
    /// # Panics
    ///
    /// Panics if `ch` is out of range.
    pub fn channel_ports(&self, ch: usize) -> PortList {
        let channels = self.channels.lock();
        check_channel(&channels, ch);
        channels[ch].ports.clone()
    }

    /// Name of channel `ch`.
    ///
    /// # Panics
    ///
    /// Panics if `ch` is out of range.
    pub fn channel_name(&self, ch: usize) -> String {
        let channels = self.channels.lock();
        check_channel(&channels, ch);
        channels[ch].name.clone()
    }

    /// Renames channel `ch`.
    ///
    /// # Panics
    ///
    /// Panics if `ch` is out of range.
    pub fn set_channel_name(&self, ch: usize, name: impl Into<String>) {
        {
            let mut channels = self.channels.lock();
            check_channel(&channels, ch);
            channels[ch].name = name.into();
        }
        self.name_changed.emit(());
    }

    /// Appends an empty channel and returns its index.
    pub fn add_channel(&self, name: impl Into<String>) -> usize {
        let name = name.into();
        let index = {
            let mut channels = self.channels.lock();
            channels.push(Channel::new(name.clone()));
            channels.len() - 1
        };
        debug!(channel = %name, index, "bundle channel added");
        self.configuration_changed.emit(());
        index
    }

    /// Removes channel `ch`; later channels shift down by one.
    ///
    /// # Panics
    ///
    /// Panics if `ch` is out of range.
    pub fn remove_channel(&self, ch: usize) {
        {
            let mut channels = self.channels.lock();
            check_channel(&channels, ch);
            channels.remove(ch);
        }
        debug!(index = ch, "bundle channel removed");
        self.configuration_changed.emit(());
    }

    /// Removes every channel.
    pub fn remove_channels(&self) {
        self.channels.lock().clear();
        debug!("bundle channels cleared");
        self.configuration_changed.emit(());
    }

    /// Attaches `port` to channel `ch`.
    ///
    /// # Panics
    ///
    /// Panics if `ch` is out of range or `port` is not qualified.
    pub fn add_port_to_channel(&self, ch: usize, port: impl Into<String>) {
        let port = port.into();
        check_port(&port);
        {
            let mut channels = self.channels.lock();
            check_channel(&channels, ch);
            channels[ch].ports.push(port);
        }
        self.ports_changed.emit(ch);
    }

    /// Detaches the first occurrence of `port` from channel `ch`. Nothing
    /// happens, and nothing is emitted, if the port is not attached.
    ///
    /// # Panics
    ///
    /// Panics if `ch` is out of range.
    pub fn remove_port_from_channel(&self, ch: usize, port: &str) {
        let changed = {
            let mut channels = self.channels.lock();
            check_channel(&channels, ch);
            let ports = &mut channels[ch].ports;
            match ports.iter().position(|p| p == port) {
                Some(pos) => {
                    ports.remove(pos);
                    true
                }
                None => false,
            }
        };
        if changed {
            self.ports_changed.emit(ch);
        }
    }

    /// Makes `port` the only port on channel `ch`.
    ///
    /// # Panics
    ///
    /// Panics if `ch` is out of range or `port` is not qualified.
    pub fn set_port(&self, ch: usize, port: impl Into<String>) {
        let port = port.into();
        check_port(&port);
        {
            let mut channels = self.channels.lock();
            check_channel(&channels, ch);
            let ports = &mut channels[ch].ports;
            ports.clear();
            ports.push(port);
        }
        self.ports_changed.emit(ch);
    }

    /// Whether `port` is attached to channel `ch`.
    ///
    /// # Panics
    ///
    /// Panics if `ch` is out of range.
    pub fn port_attached_to_channel(&self, ch: usize, port: &str) -> bool {
        let channels = self.channels.lock();
        check_channel(&channels, ch);
        channels[ch].has_port(port)
    }

    /// Whether any channel uses `port`.
    pub fn uses_port(&self, port: &str) -> bool {
        self.channels.lock().iter().any(|c| c.has_port(port))
    }

    /// Whether some channel maps to `port` and nothing else, i.e. the
    /// channel can be connected one-to-one.
    pub fn offers_port_alone(&self, port: &str) -> bool {
        self.channels.lock().iter().any(|c| c.offers_alone(port))
    }

    /// Appends copies of `other`'s channels, named
    /// `"<other name> <channel name>"`, with all their ports.
    ///
    /// `other`'s topology is read once up front, so merging a bundle into
    /// itself duplicates its current channels. The new channels are appended
    /// in one locked step; observers then see *configuration changed* once,
    /// followed by *ports changed* for each appended channel that has ports.
    pub fn add_channels_from_bundle(&self, other: &Bundle) {
        let prefix = other.name();
        let incoming: Vec<Channel> = other
            .channels()
            .into_iter()
            .map(|channel| Channel {
                name: format!("{prefix} {}", channel.name),
                ports: channel.ports,
            })
            .collect();
        if incoming.is_empty() {
            return;
        }

        let (first, with_ports) = {
            let mut channels = self.channels.lock();
            let first = channels.len();
            let with_ports: Vec<usize> = incoming
                .iter()
                .enumerate()
                .filter(|(_, channel)| !channel.ports.is_empty())
                .map(|(offset, _)| first + offset)
                .collect();
            channels.extend(incoming);
            (first, with_ports)
        };
        debug!(from = %prefix, first, "bundle channels merged");

        self.configuration_changed.emit(());
        for ch in with_ports {
            self.ports_changed.emit(ch);
        }
    }

    /// Connects every port of each of our channels to every port of the
    /// corresponding channel of `other`.
    ///
    /// # Panics
    ///
    /// Panics if the channel counts differ.
    pub fn connect<E: RoutingEngine + ?Sized>(&self, other: &Bundle, engine: &E) {
        let links = self.for_each_link(other, "connect", |ours, theirs| {
            engine.connect(ours, theirs)
        });
        debug!(from = %self.name(), to = %other.name(), links, "bundles connected");
    }

    /// Reverses [`Bundle::connect`].
    ///
    /// # Panics
    ///
    /// Panics if the channel counts differ.
    pub fn disconnect<E: RoutingEngine + ?Sized>(&self, other: &Bundle, engine: &E) {
        let links = self.for_each_link(other, "disconnect", |ours, theirs| {
            engine.disconnect(ours, theirs)
        });
        debug!(from = %self.name(), to = %other.name(), links, "bundles disconnected");
    }

    /// Walks the per-channel cross product on snapshots, so the engine is
    /// called with neither bundle locked. Returns the number of pairs.
    fn for_each_link(
        &self,
        other: &Bundle,
        action: &'static str,
        mut f: impl FnMut(&str, &str),
    ) -> usize {
        let ours = self.channels();
        let theirs = other.channels();
        assert_eq!(
            ours.len(),
            theirs.len(),
            "cannot {action} bundles with different channel counts"
        );

        let mut links = 0;
        for (a, b) in ours.iter().zip(&theirs) {
            for our_port in &a.ports {
                for their_port in &b.ports {
                    trace!(action, from = %our_port, to = %their_port, "port link");
                    f(our_port, their_port);
                    links += 1;
                }
            }
        }
        links
    }
}

impl PartialEq for Bundle {
    /// Bundles are equal when their channels, including channel names and
    /// port order, match. Bundle name, type and direction are ignored.
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        let ours = self.channels();
        ours == other.channels()
    }
}

impl Eq for Bundle {}

impl fmt::Debug for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = self.meta.read().clone();
        f.debug_struct("Bundle")
            .field("name", &meta.name)
            .field("data_type", &meta.data_type)
            .field("ports_are_inputs", &meta.ports_are_inputs)
            .field("channels", &self.channels())
            .finish()
    }
}
