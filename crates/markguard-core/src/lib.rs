//! Markguard Core Types and Definitions
//!
//! This crate provides the data the markguard analyzer reads. It includes:
//!
//! - **Spans**: Byte ranges into a source file ([`span::Span`])
//! - **Syntax**: The markup tree with embedded expressions ([`syntax`] module)
//! - **Types**: Resolved type shapes and the [`types::TypeChecker`] trait ([`types`] module)
//! - **Documents**: The JSON interchange format for one file ([`document`] module)

pub mod document;
pub mod span;
pub mod syntax;
pub mod types;

pub use span::Span;
