//! Movie document model: XML tree, asset references and font lookup.

/// Bundled font resolution for speech bubbles.
pub mod fonts;
/// Dotted asset reference codec.
pub mod reference;
/// Owned XML element tree over `quick-xml`.
pub mod xml;
