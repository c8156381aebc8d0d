//! Mermaid diagram generator for the schema ERD and the login flowchart
//!
//! Output is plain Mermaid source. Use [`MermaidGenerator::fenced`] to embed it
//! in Markdown for GitHub, GitLab and other viewers.

use super::flowchart::{Flowchart, NodeShape};
use crate::core::schema::{Cardinality, Column, Constraint, Schema};
use std::fmt::Write;

/// Generator for Mermaid diagram syntax
pub struct MermaidGenerator;

impl MermaidGenerator {
    /// Generate an `erDiagram` with every table, column and relationship
    #[must_use]
    pub fn erd(schema: &Schema) -> String {
        let mut output = String::from("erDiagram\n");

        for r in schema.relationships {
            let connector = match r.cardinality {
                Cardinality::OneToOne => "||--||",
                Cardinality::OneToMany => "||--o{",
            };
            let _ = writeln!(
                output,
                "    {} {connector} {} : \"{}\"",
                Self::sanitize_id(r.from),
                Self::sanitize_id(r.to),
                r.cardinality
            );
        }

        for table in schema.tables {
            let _ = writeln!(output, "    {} {{", Self::sanitize_id(table.name));
            for column in table.columns {
                let _ = writeln!(output, "        {}", Self::attribute(column));
            }
            output.push_str("    }\n");
        }

        output
    }

    /// Generate a top-down flowchart
    ///
    /// Terminals are stadium nodes, decisions are diamonds and branch labels
    /// appear on their edges.
    #[must_use]
    pub fn login_flow(flow: &Flowchart) -> String {
        let mut output = String::from("flowchart TD\n");

        for node in &flow.nodes {
            let id = Self::sanitize_id(node.id);
            let label = Self::escape_label(node.label);
            let _ = match node.shape {
                NodeShape::Terminal => writeln!(output, "    {id}([\"{label}\"])"),
                NodeShape::Process => writeln!(output, "    {id}[\"{label}\"]"),
                NodeShape::Decision => writeln!(output, "    {id}{{\"{label}\"}}"),
            };
        }

        output.push('\n');

        for edge in &flow.edges {
            let from = Self::sanitize_id(edge.from);
            let to = Self::sanitize_id(edge.to);
            let _ = match edge.label {
                Some(label) => writeln!(output, "    {from} -->|{label}| {to}"),
                None => writeln!(output, "    {from} --> {to}"),
            };
        }

        output
    }

    /// Wrap Mermaid source in a fenced code block for Markdown
    #[must_use]
    pub fn fenced(diagram: &str) -> String {
        format!("```mermaid\n{diagram}```\n")
    }

    /// One `type name KEYS "comment"` line of an entity block
    fn attribute(column: &Column) -> String {
        // Mermaid types must be bare words: VARCHAR(50) -> VARCHAR
        let sql_type: String = column
            .sql_type
            .chars()
            .take_while(char::is_ascii_alphanumeric)
            .collect();

        let mut keys = Vec::new();
        if column.is_primary_key() {
            keys.push("PK");
        }
        if column.foreign_key().is_some() {
            keys.push("FK");
        }
        if column.is_unique() {
            keys.push("UK");
        }

        let notes: Vec<String> = column
            .constraints
            .iter()
            .filter(|c| matches!(c, Constraint::NotNull | Constraint::Default(_)))
            .map(|c| c.to_string().replace('"', "'"))
            .collect();

        let mut line = format!("{sql_type} {}", column.name);
        if !keys.is_empty() {
            let _ = write!(line, " {}", keys.join(", "));
        }
        if !notes.is_empty() {
            let _ = write!(line, " \"{}\"", notes.join(", "));
        }
        line
    }

    fn escape_label(label: &str) -> String {
        label.replace('"', "#quot;")
    }

    /// Sanitize a key for use as a Mermaid node ID
    ///
    /// `end` is a flowchart keyword and gets a suffix.
    fn sanitize_id(key: &str) -> String {
        let id: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        if id.eq_ignore_ascii_case("end") {
            format!("{id}_node")
        } else {
            id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erd_generation() {
        let diagram = MermaidGenerator::erd(Schema::unihub());

        assert!(diagram.starts_with("erDiagram\n"));
        assert!(diagram.contains("    users ||--|| students : \"One-to-One\""));
        assert!(diagram.contains("    fee_structure ||--o{ fee_payments : \"One-to-Many\""));
        assert_eq!(diagram.matches("||--o{").count(), 10);
        assert!(diagram.contains("    admin_notifications {"));
        assert!(diagram.contains("        INT user_id PK"));
        assert!(diagram.contains("        INT user_id FK, UK"));
        assert!(diagram.contains("        VARCHAR receipt_number UK \"NOT NULL\""));
        assert!(diagram.contains("        INT max_marks_internal \"DEFAULT 30\""));
    }

    #[test]
    fn test_login_flow_generation() {
        let diagram = MermaidGenerator::login_flow(&Flowchart::login_dashboard());

        assert!(diagram.starts_with("flowchart TD\n"));
        assert!(diagram.contains("    start([\"Start\"])"));
        assert!(diagram.contains("    validate{\"System validates credentials\"}"));
        assert!(diagram.contains("    validate -->|Invalid| error"));
        assert!(diagram.contains("    validate -->|Valid| session"));
        assert!(diagram.contains("    error --> access"));
        assert!(diagram.contains("    navigate --> end_node"));
        assert!(diagram.contains("    end_node([\"End\"])"));
    }

    #[test]
    fn test_fenced() {
        let fenced = MermaidGenerator::fenced("flowchart TD\n");
        assert_eq!(fenced, "```mermaid\nflowchart TD\n```\n");
    }

    #[test]
    fn test_sanitize_id() {
        assert_eq!(MermaidGenerator::sanitize_id("fee structure"), "fee_structure");
        assert_eq!(MermaidGenerator::sanitize_id("CS-101"), "CS_101");
        assert_eq!(MermaidGenerator::sanitize_id("end"), "end_node");
    }
}
