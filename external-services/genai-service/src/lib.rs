//! Generative flow integration for the SGC_USB backend
//!
//! Two named flows run on an external flow service:
//! - `solveLinearProgrammingFlow` solves a linear program and explains the
//!   result in Spanish
//! - `generateBrandedPdfFlow` renders a branded expense report as a PDF data URI
//!
//! [`FlowClient`] is the transport seam; [`HttpFlowClient`] talks to the
//! service over HTTP and [`GenAiService`] validates inputs and outputs around it.

pub mod branded_pdf;
pub mod client;
pub mod error;
pub mod linear_programming;
pub mod service;

pub use branded_pdf::*;
pub use client::*;
pub use error::*;
pub use linear_programming::*;
pub use service::*;
