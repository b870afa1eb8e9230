//! Reading and editing Xcode `project.pbxproj` files without disturbing
//! their formatting.
//!
//! [`parse`] produces a [`Document`] that keeps every byte of whitespace and
//! every comment next to the syntax it precedes, so an unmodified document
//! serializes back to the exact input. [`ProjectDescriptor`] layers a typed
//! view of build phases and native targets on top, with the two edits the
//! wizard needs.

mod descriptor;
mod error;
mod parser;
mod quote;
mod syntax;
mod trivia;

pub use descriptor::{
    BuildPhase, NativeTarget, PhaseKind, ProjectDescriptor, SHELL_SCRIPT_ISA, ShellScriptPhase,
};
pub use error::{EditError, ParseError};
pub use parser::{MAX_DEPTH, parse};
pub use quote::{quote, unquote};
pub use syntax::{Array, ArrayItem, Dict, Document, Entry, Node, Scalar, Value};
