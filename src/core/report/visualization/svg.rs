//! Standalone SVG rendering of the ERD and the login flowchart
//!
//! Both diagrams are drawn on fixed layouts. Entity and node positions are in
//! plot units and mapped onto a pixel canvas; everything else (relationships,
//! labels, edge routing) comes from the schema and flowchart models.

use super::flowchart::{Flowchart, NodeShape};
use crate::core::schema::{Cardinality, Schema};
use std::fmt::Write;

const LINE: &str = "#21808d";
const ENTITY_FILL: &str = "#B3E5EC";
const NODE_FILL: &str = "#e8f4f5";
const TEXT: &str = "#13343b";
const BACKGROUND: &str = "#F3F3EE";

/// Entities drawn on the ERD with their plot positions and the key fields shown
const ERD_LAYOUT: &[(&str, (f64, f64), &[&str])] = &[
    (
        "users",
        (1.0, 8.0),
        &["user_id PK", "username", "email", "password_hash", "user_type"],
    ),
    (
        "students",
        (1.0, 5.0),
        &[
            "student_id PK",
            "user_id FK",
            "enrollment_num",
            "first_name",
            "last_name",
            "course_id FK",
            "semester",
        ],
    ),
    (
        "courses",
        (4.0, 6.0),
        &["course_id PK", "course_code", "course_name", "department"],
    ),
    (
        "subjects",
        (4.0, 3.0),
        &[
            "subject_id PK",
            "subject_code",
            "subject_name",
            "course_id FK",
            "semester",
            "credits",
        ],
    ),
    (
        "attendance",
        (7.0, 4.0),
        &[
            "attendance_id PK",
            "student_id FK",
            "subject_id FK",
            "attend_date",
            "status",
        ],
    ),
    (
        "grades",
        (7.0, 1.0),
        &[
            "grade_id PK",
            "student_id FK",
            "subject_id FK",
            "internal_marks",
            "external_marks",
            "grade_points",
        ],
    ),
    (
        "internships",
        (1.0, 2.0),
        &["internship_id PK", "student_id FK", "company_name", "credits_earned"],
    ),
    (
        "fee_payments",
        (1.0, 0.0),
        &["payment_id PK", "student_id FK", "amount_paid", "payment_date"],
    ),
];

/// Linear mapping from plot units to canvas pixels (y axis flipped)
#[derive(Debug, Clone, Copy)]
struct Canvas {
    width: f64,
    height: f64,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl Canvas {
    fn x(&self, x: f64) -> f64 {
        (x - self.x_range.0) / (self.x_range.1 - self.x_range.0) * self.width
    }

    fn y(&self, y: f64) -> f64 {
        (self.y_range.1 - y) / (self.y_range.1 - self.y_range.0) * self.height
    }

    fn dx(&self, d: f64) -> f64 {
        d / (self.x_range.1 - self.x_range.0) * self.width
    }

    fn dy(&self, d: f64) -> f64 {
        d / (self.y_range.1 - self.y_range.0) * self.height
    }
}

const ERD_CANVAS: Canvas = Canvas {
    width: 1260.0,
    height: 900.0,
    x_range: (-0.5, 8.5),
    y_range: (-1.0, 9.0),
};

const FLOW_CANVAS: Canvas = Canvas {
    width: 800.0,
    height: 1000.0,
    x_range: (-0.05, 1.05),
    y_range: (0.05, 1.05),
};

const ENTITY_WIDTH: f64 = 170.0;
const ENTITY_HEADER: f64 = 24.0;
const FIELD_HEIGHT: f64 = 15.0;
const TITLE_HEIGHT: f64 = 40.0;

/// Renderer producing self-contained SVG documents
pub struct SvgRenderer;

impl SvgRenderer {
    /// Draw the ERD
    ///
    /// Only relationships whose tables both appear in the layout are drawn.
    #[must_use]
    pub fn erd(schema: &Schema) -> String {
        let canvas = ERD_CANVAS;
        let mut out = Self::open(canvas, "UniHub Database ERD");

        let position = |name: &str| {
            ERD_LAYOUT
                .iter()
                .find(|(n, _, _)| *n == name)
                .map(|(_, (x, y), _)| (canvas.x(*x), canvas.y(*y) + TITLE_HEIGHT))
        };

        for r in schema.relationships {
            let (Some((x1, y1)), Some((x2, y2))) = (position(r.from), position(r.to)) else {
                continue;
            };
            let tag = match r.cardinality {
                Cardinality::OneToOne => "1:1",
                Cardinality::OneToMany => "1:N",
            };
            let _ = writeln!(
                out,
                r#"  <line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{LINE}" stroke-width="2"/>"#
            );
            let _ = writeln!(
                out,
                r#"  <text x="{:.1}" y="{:.1}" font-size="11" fill="{TEXT}" text-anchor="middle">{tag}</text>"#,
                (x1 + x2) / 2.0,
                (y1 + y2) / 2.0 - 4.0
            );
        }

        for (name, (x, y), fields) in ERD_LAYOUT {
            let cx = canvas.x(*x);
            let cy = canvas.y(*y) + TITLE_HEIGHT;
            #[allow(clippy::cast_precision_loss)]
            let height = ENTITY_HEADER + FIELD_HEIGHT * fields.len() as f64 + 8.0;
            let left = cx - ENTITY_WIDTH / 2.0;
            let top = cy - height / 2.0;

            let _ = writeln!(
                out,
                r#"  <g class="entity" id="{name}">"#
            );
            let _ = writeln!(
                out,
                r#"    <rect x="{left:.1}" y="{top:.1}" width="{ENTITY_WIDTH}" height="{height:.1}" rx="6" fill="{ENTITY_FILL}" stroke="{LINE}" stroke-width="2"/>"#
            );
            let _ = writeln!(
                out,
                r#"    <text x="{cx:.1}" y="{:.1}" font-size="12" font-weight="bold" fill="{TEXT}" text-anchor="middle">{}</text>"#,
                top + 16.0,
                escape_xml(&name.to_uppercase())
            );
            let _ = writeln!(
                out,
                r#"    <line x1="{left:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{LINE}"/>"#,
                top + ENTITY_HEADER,
                left + ENTITY_WIDTH,
                top + ENTITY_HEADER
            );
            for (i, field) in fields.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let fy = top + ENTITY_HEADER + FIELD_HEIGHT * (i as f64 + 1.0);
                let _ = writeln!(
                    out,
                    r#"    <text x="{:.1}" y="{fy:.1}" font-size="11" fill="{TEXT}">{}</text>"#,
                    left + 8.0,
                    escape_xml(field)
                );
            }
            out.push_str("  </g>\n");
        }

        out.push_str("</svg>\n");
        out
    }

    /// Draw a flowchart
    ///
    /// Edges that point back up the chart are routed around the left side of
    /// their target.
    #[must_use]
    pub fn flowchart(flow: &Flowchart) -> String {
        let canvas = FLOW_CANVAS;
        let mut out = Self::open(canvas, flow.title);
        let _ = write!(
            out,
            "  <defs>\n    <marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"7\" markerHeight=\"7\" orient=\"auto-start-reverse\">\n      <path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{LINE}\"/>\n    </marker>\n  </defs>\n"
        );

        let place = |x: f64, y: f64| (canvas.x(x), canvas.y(y) + TITLE_HEIGHT);

        for edge in &flow.edges {
            let (Some(from), Some(to)) = (flow.node(edge.from), flow.node(edge.to)) else {
                continue;
            };
            let (fx, fy) = place(from.position.0, from.position.1);
            let (tx, ty) = place(to.position.0, to.position.1);
            let (_, from_half_h) = Self::half_size(canvas, from.shape);
            let (to_half_w, to_half_h) = Self::half_size(canvas, to.shape);

            if flow.is_back_edge(edge) {
                let points = format!(
                    "{fx:.1},{:.1} {fx:.1},{ty:.1} {:.1},{ty:.1}",
                    fy - from_half_h,
                    tx - to_half_w
                );
                let _ = writeln!(
                    out,
                    r#"  <polyline points="{points}" fill="none" stroke="{LINE}" stroke-width="2" marker-end="url(#arrow)"/>"#
                );
            } else {
                let (y1, y2) = (fy + from_half_h, ty - to_half_h);
                let _ = writeln!(
                    out,
                    r#"  <line x1="{fx:.1}" y1="{y1:.1}" x2="{tx:.1}" y2="{y2:.1}" stroke="{LINE}" stroke-width="2" marker-end="url(#arrow)"/>"#
                );
                if let Some(label) = edge.label {
                    let (mx, my) = ((fx + tx) / 2.0, (y1 + y2) / 2.0);
                    let _ = writeln!(
                        out,
                        r#"  <rect x="{:.1}" y="{:.1}" width="48" height="16" fill="{NODE_FILL}"/>"#,
                        mx - 24.0,
                        my - 8.0
                    );
                    let _ = writeln!(
                        out,
                        r#"  <text x="{mx:.1}" y="{:.1}" font-size="10" fill="{TEXT}" text-anchor="middle">{}</text>"#,
                        my + 4.0,
                        escape_xml(label)
                    );
                }
            }
        }

        for node in &flow.nodes {
            let (cx, cy) = place(node.position.0, node.position.1);
            let (hw, hh) = Self::half_size(canvas, node.shape);
            let style = format!(r#"fill="{NODE_FILL}" stroke="{LINE}" stroke-width="2""#);
            let _ = match node.shape {
                NodeShape::Terminal => writeln!(
                    out,
                    r#"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="{hh:.1}" {style}/>"#,
                    cx - hw,
                    cy - hh,
                    hw * 2.0,
                    hh * 2.0
                ),
                NodeShape::Process => writeln!(
                    out,
                    r#"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" {style}/>"#,
                    cx - hw,
                    cy - hh,
                    hw * 2.0,
                    hh * 2.0
                ),
                NodeShape::Decision => writeln!(
                    out,
                    r#"  <polygon points="{cx:.1},{:.1} {:.1},{cy:.1} {cx:.1},{:.1} {:.1},{cy:.1}" {style}/>"#,
                    cy - hh,
                    cx + hw,
                    cy + hh,
                    cx - hw
                ),
            };

            let lines = wrap(node.label, 26);
            #[allow(clippy::cast_precision_loss)]
            let first = cy - 6.0 * (lines.len() as f64 - 1.0) + 4.0;
            let _ = write!(
                out,
                r#"  <text x="{cx:.1}" y="{first:.1}" font-size="10" fill="{TEXT}" text-anchor="middle">"#
            );
            for (i, line) in lines.iter().enumerate() {
                let dy = if i == 0 { 0 } else { 12 };
                let _ = write!(
                    out,
                    r#"<tspan x="{cx:.1}" dy="{dy}">{}</tspan>"#,
                    escape_xml(line)
                );
            }
            out.push_str("</text>\n");
        }

        out.push_str("</svg>\n");
        out
    }

    /// Half width and half height of a node in pixels
    fn half_size(canvas: Canvas, shape: NodeShape) -> (f64, f64) {
        match shape {
            NodeShape::Terminal => (canvas.dx(0.08), canvas.dy(0.025)),
            NodeShape::Process => (canvas.dx(0.1), canvas.dy(0.03)),
            NodeShape::Decision => (canvas.dx(0.1), canvas.dy(0.04)),
        }
    }

    fn open(canvas: Canvas, title: &str) -> String {
        let width = canvas.width;
        let height = canvas.height + TITLE_HEIGHT;
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" font-family=\"Arial, sans-serif\">\n  <rect width=\"100%\" height=\"100%\" fill=\"{BACKGROUND}\"/>\n  <text x=\"{:.1}\" y=\"28\" font-size=\"18\" font-weight=\"bold\" fill=\"{TEXT}\" text-anchor=\"middle\">{}</text>\n",
            width / 2.0,
            escape_xml(title)
        )
    }
}

/// Greedy word wrap at `width` characters
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erd_svg() {
        let svg = SvgRenderer::erd(Schema::unihub());
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(BACKGROUND));
        assert_eq!(svg.matches("class=\"entity\"").count(), 8);
        assert!(svg.contains(">FEE_PAYMENTS<"));
        assert!(svg.contains(">enrollment_num<"));
        // fee_structure is not on the layout, so two of the eleven relationships are skipped
        assert_eq!(svg.matches(">1:N<").count(), 8);
        assert_eq!(svg.matches(">1:1<").count(), 1);
    }

    #[test]
    fn test_flowchart_svg() {
        let svg = SvgRenderer::flowchart(&Flowchart::login_dashboard());
        assert!(svg.contains("UniHub Student Login &amp; Dashboard Flow"));
        assert_eq!(svg.matches("<polygon").count(), 1);
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert_eq!(svg.matches("marker-end=\"url(#arrow)\"").count(), 11);
        assert!(svg.contains(">Invalid<"));
        assert!(svg.contains(">Valid<"));
        assert!(svg.contains(">Enters enrollment number &amp;<"));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("Start", 26), vec!["Start"]);
        assert_eq!(
            wrap("Enters enrollment number & password", 26),
            vec!["Enters enrollment number &", "password"]
        );
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn test_canvas_mapping() {
        let c = FLOW_CANVAS;
        assert!((c.x(-0.05)).abs() < 1e-9);
        assert!((c.x(1.05) - 800.0).abs() < 1e-9);
        assert!((c.y(1.05)).abs() < 1e-9);
        assert!((c.y(0.05) - 1000.0).abs() < 1e-9);
    }
}
