//! Diagram command handler
//!
//! Writes the schema ERD and the login flowchart as Mermaid source or SVG.

use crate::args::{DiagramFormat, DiagramKind};
use logger::{error, info};
use unihub::config::Config;
use unihub::core::report::{Flowchart, MermaidGenerator, SvgRenderer};
use unihub::core::schema::Schema;
use std::path::{Path, PathBuf};

/// Run the diagram command.
pub fn run(kind: DiagramKind, format: DiagramFormat, output_dir: Option<&Path>, config: &Config) {
    let dir = output_dir.map_or_else(|| PathBuf::from(&config.paths.diagrams_dir), Path::to_path_buf);
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("✗ Failed to create diagrams directory {}: {e}", dir.display());
        return;
    }

    let wanted: &[DiagramKind] = match kind {
        DiagramKind::All => &[DiagramKind::Erd, DiagramKind::Flow],
        DiagramKind::Erd => &[DiagramKind::Erd],
        DiagramKind::Flow => &[DiagramKind::Flow],
    };

    for &diagram in wanted {
        let (stem, content) = render(diagram, format);
        let path = dir.join(format!("{stem}.{}", format.extension()));
        match std::fs::write(&path, content) {
            Ok(()) => {
                println!("✓ Diagram written: {}", path.display());
                info!("Diagram written: {}", path.display());
            }
            Err(e) => {
                error!("Failed to write {}: {e}", path.display());
                eprintln!("✗ Failed to write {}: {e}", path.display());
            }
        }
    }
}

/// File stem and document for one diagram
fn render(kind: DiagramKind, format: DiagramFormat) -> (&'static str, String) {
    match (kind, format) {
        (DiagramKind::Flow, DiagramFormat::Mermaid) => (
            "login_flowchart",
            MermaidGenerator::login_flow(&Flowchart::login_dashboard()),
        ),
        (DiagramKind::Flow, DiagramFormat::Svg) => (
            "login_flowchart",
            SvgRenderer::flowchart(&Flowchart::login_dashboard()),
        ),
        (_, DiagramFormat::Mermaid) => ("database_erd", MermaidGenerator::erd(Schema::unihub())),
        (_, DiagramFormat::Svg) => ("database_erd", SvgRenderer::erd(Schema::unihub())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_each_kind_and_format() {
        let (stem, erd) = render(DiagramKind::Erd, DiagramFormat::Mermaid);
        assert_eq!(stem, "database_erd");
        assert!(erd.starts_with("erDiagram"));

        let (stem, flow) = render(DiagramKind::Flow, DiagramFormat::Svg);
        assert_eq!(stem, "login_flowchart");
        assert!(flow.contains("<svg"));
    }
}
