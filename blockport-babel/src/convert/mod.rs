//! Document converters
//!
//! - [`forward`]: editor blocks -> portable nodes ([`EditorToPortable`])
//! - [`reverse`]: portable nodes -> editor blocks ([`PortableToEditor`])
//!
//! Both follow the same shape: look up a converter by the unit's type, convert
//! each unit in order, flatten, then run the transformer pipeline over the whole
//! result. Units with no matching converter are reported as diagnostics and
//! left out.

pub mod forward;
pub mod reverse;

pub use forward::{BlockConverter, EditorToPortable, ForwardContext};
pub use reverse::{BlockShape, NodeConverter, PortableToEditor, ReverseContext};

use crate::error::Diagnostic;

/// Output of a conversion together with everything that was skipped
#[derive(Debug, Clone, PartialEq)]
pub struct Converted<T> {
    pub output: Vec<T>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Converted<T> {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
