//! Channel bundles: named groups of routable ports.
//!
//! A [`Bundle`] describes a logical routing endpoint such as "stereo out"
//! as an ordered list of [`Channel`]s, each naming one or more qualified
//! ports. Bundles are shared (`Arc<Bundle>`) and internally locked, emit
//! per-instance [`Signal`]s when they change, and turn bundle-to-bundle
//! connections into pairwise port links on a [`RoutingEngine`].

mod bundle;
mod channel;
mod config;
mod engine;
pub mod port;
pub mod signal;

pub use bundle::{Bundle, BundleError, DataType};
pub use channel::Channel;
pub use config::{BundleConfig, ChannelConfig};
pub use engine::RoutingEngine;
pub use port::{PortList, PortNameError};
pub use signal::{Signal, SubscriptionId};
