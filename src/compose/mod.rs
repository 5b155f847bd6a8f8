//! Story composition: from annotations to callable stories.

/// Composer and composed stories.
pub mod composer;
/// Export naming and story ids.
pub mod naming;
