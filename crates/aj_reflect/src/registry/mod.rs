//! Type reports and the registry that stores them.
//!
//! ## Menu
//!
//! - [`AttributeReport`]: how one attribute is named, grouped, formatted and validated.
//! - [`TypeReport`]: the attribute reports of one type, inherited ones included.
//! - [`TypeMetadata`]: the raw input of a registration, built by hand or by the derive.
//! - [`GetTypeMetadata`]: types able to describe themselves.
//! - [`TypeReportRegistry`]: stores reports by [`TypeId`](core::any::TypeId) and alias.
//! - [`TypeReportRegistryArc`]: a shareable, lock-protected registry.
//!
//! ## Raw attribute options
//!
//! | key        | value                                   | default          |
//! |------------|-----------------------------------------|------------------|
//! | `name`     | wire name                               | attribute name   |
//! | `groups`   | JSON list of strings or integers        | no restriction   |
//! | `d_format` | strftime pattern                        | [`DEFAULT_DATETIME_FORMAT`] |
//! | `required` | anything but `"false"` means required   | not required     |
//!
//! ## Inheritance
//!
//! Base reports already in the registry are merged underneath the new type's
//! own reports, keyed by attribute name. Earlier bases win over later ones.
//! An explicit entry replaces the inherited report, a bare type hint only
//! refreshes its declared type.

// -----------------------------------------------------------------------------
// Modules

mod attribute_report;
mod error;
mod report_registry;
mod type_metadata;
mod type_report;

// -----------------------------------------------------------------------------
// Exports

pub use attribute_report::{AttributeReport, DEFAULT_DATETIME_FORMAT, Groups};
pub use error::{AnnotationParseError, AttributeNotFound, ConstructError};
pub use error::{DuplicateTypeRegistrationError, RegisterError};
pub use report_registry::{DuplicatePolicy, TypeReportRegistry, TypeReportRegistryArc};
pub use type_metadata::{Constructor, GetTypeMetadata, RawAttributeMetadata, TypeMetadata};
pub use type_report::{TypeReport, WireName};
