// THEORY:
// This file is the entry point for the `brightspot` library crate. The public
// surface is small on purpose:
//
// - `Detector`: frame in, brightness-ranked `Subject`s out.
// - `OverlayManager`: frame plus subjects in, annotated frame out, with two
//   switchable styles.
// - `Session`: both of the above plus the runtime controls a capture loop binds
//   to keys.
// - `Config`: everything tunable, loadable from JSON, validated once.
//
// The spatial stack behind the detector lives in `core_modules` and is public
// for tests and tooling, but callers are not expected to need it.

pub mod config;
pub mod controls;
pub mod core_modules;
pub mod detector;
pub mod error;
pub mod overlay;
pub mod session;

pub use config::Config;
pub use controls::{Command, Flow};
pub use detector::{Detector, Subject};
pub use error::ConfigError;
pub use overlay::{Overlay, OverlayManager, OverlayStyle};
pub use session::{FrameResult, Session};
