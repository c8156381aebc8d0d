//! Diagram generation for the schema and the login flow
//!
//! Provides Mermaid source (for Markdown and the Mermaid CLI) and standalone
//! SVG drawn from the same schema catalogue and flowchart model.

pub mod flowchart;
pub mod mermaid;
pub mod svg;

pub use flowchart::{FlowEdge, FlowNode, Flowchart, NodeShape};
pub use mermaid::MermaidGenerator;
pub use svg::SvgRenderer;
