//! Incremental mounting.
//!
//! A [`mount_point::MountPoint`] decides per render whether the live tree can be reused (props
//! are pushed through its [`channel::PropChannel`]) or a fresh tree must be built.

/// Tree builder boundary and the default builder.
pub mod builder;
/// Live prop streams.
pub mod channel;
/// Reuse-versus-rebuild decision.
pub mod diff;
pub(crate) mod fingerprint;
/// Test host for mounted trees.
pub mod host;
/// Mount points and one-shot tree building.
pub mod mount_point;
