//! Backends module - Filesystem traversal and document extraction
//!
//! Provides:
//! - walk: Directory traversal with walkdir and the per-file scan loop
//! - dispatch: Extension to extraction strategy mapping
//! - extract: Text, docx, pptx and pdf readers

pub mod dispatch;
pub mod extract;
pub mod walk;
