//! Embedded brand mark assets.
//!
//! The marks are opaque rasters shipped with the binary; the compositor
//! scales them to the target image, so native size only fixes their aspect
//! ratio (square icon, wide wordmark).

/// Square Luximed sun icon.
pub const LOGO_ICON_PNG: &[u8] = include_bytes!("../assets/logo_icon.png");

/// Full Luximed wordmark.
pub const LOGO_FULL_PNG: &[u8] = include_bytes!("../assets/logo_full.png");
