//! Build-fragment scanning
//!
//! Fragments are makefile snippets listing sources, headers and include
//! directories relative to a root variable. This module extracts those
//! references, resolves the variable, prefers platform overrides over
//! generic fallbacks and follows nested fragment includes.

pub mod fallback;
pub mod substitute;
pub mod token;
pub mod walker;

pub use fallback::{prefer_overrides, FALLBACK_MARKER};
pub use substitute::{substitute, substitute_variable, RootPath, DEFAULT_VARIABLE};
pub use token::{PathToken, TokenGrammar, TokenKind};
pub use walker::{walk, FragmentWalker, WalkError};
