//! Flowchart model for the student login and dashboard flow

/// Shape of a flowchart node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// Start/End, drawn as a rounded rectangle
    Terminal,
    /// A step, drawn as a rectangle
    Process,
    /// A branch point, drawn as a diamond
    Decision,
}

/// A flowchart node placed on a unit canvas (x to the right, y upwards)
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    /// Identifier used by edges and Mermaid
    pub id: &'static str,
    /// Display text
    pub label: &'static str,
    /// Drawing shape
    pub shape: NodeShape,
    /// Layout position, `(x, y)` in [0, 1]
    pub position: (f64, f64),
}

/// A directed edge, optionally labelled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    /// Source node id
    pub from: &'static str,
    /// Target node id
    pub to: &'static str,
    /// Branch label (e.g. "Valid")
    pub label: Option<&'static str>,
}

/// A titled flowchart
#[derive(Debug, Clone, PartialEq)]
pub struct Flowchart {
    /// Diagram title
    pub title: &'static str,
    /// Nodes in drawing order
    pub nodes: Vec<FlowNode>,
    /// Edges in drawing order
    pub edges: Vec<FlowEdge>,
}

const fn node(
    id: &'static str,
    label: &'static str,
    shape: NodeShape,
    position: (f64, f64),
) -> FlowNode {
    FlowNode {
        id,
        label,
        shape,
        position,
    }
}

const fn edge(from: &'static str, to: &'static str, label: Option<&'static str>) -> FlowEdge {
    FlowEdge { from, to, label }
}

impl Flowchart {
    /// The student login and dashboard flow
    #[must_use]
    pub fn login_dashboard() -> Self {
        use NodeShape::{Decision, Process, Terminal};

        Self {
            title: "UniHub Student Login & Dashboard Flow",
            nodes: vec![
                node("start", "Start", Terminal, (0.5, 1.0)),
                node("access", "Student accesses login page", Process, (0.5, 0.92)),
                node("enter", "Enters enrollment number & password", Process, (0.5, 0.84)),
                node("validate", "System validates credentials", Decision, (0.5, 0.75)),
                node("error", "Show error message", Process, (0.15, 0.66)),
                node("session", "Create session", Process, (0.5, 0.60)),
                node("update", "Update last login timestamp", Process, (0.5, 0.52)),
                node("redirect", "Redirect to dashboard", Process, (0.5, 0.44)),
                node(
                    "dashboard",
                    "Dashboard displays: Profile, Course info, Semester, Notifications",
                    Process,
                    (0.5, 0.35),
                ),
                node(
                    "navigate",
                    "Navigate to: Attendance, Grades, Internship Credits, Fee Details, or Logout",
                    Process,
                    (0.5, 0.23),
                ),
                node("end", "End", Terminal, (0.5, 0.10)),
            ],
            edges: vec![
                edge("start", "access", None),
                edge("access", "enter", None),
                edge("enter", "validate", None),
                edge("validate", "error", Some("Invalid")),
                edge("error", "access", None),
                edge("validate", "session", Some("Valid")),
                edge("session", "update", None),
                edge("update", "redirect", None),
                edge("redirect", "dashboard", None),
                edge("dashboard", "navigate", None),
                edge("navigate", "end", None),
            ],
        }
    }

    /// Look up a node by id
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Whether an edge points back up the chart
    #[must_use]
    pub fn is_back_edge(&self, edge: &FlowEdge) -> bool {
        match (self.node(edge.from), self.node(edge.to)) {
            (Some(from), Some(to)) => to.position.1 > from.position.1,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_flow_shape() {
        let flow = Flowchart::login_dashboard();
        assert_eq!(flow.nodes.len(), 11);
        assert_eq!(flow.edges.len(), 11);
        for e in &flow.edges {
            assert!(flow.node(e.from).is_some(), "missing {}", e.from);
            assert!(flow.node(e.to).is_some(), "missing {}", e.to);
        }
        let decisions: Vec<_> = flow
            .nodes
            .iter()
            .filter(|n| n.shape == NodeShape::Decision)
            .collect();
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].id, "validate");
    }

    #[test]
    fn only_error_loops_back() {
        let flow = Flowchart::login_dashboard();
        let back: Vec<_> = flow.edges.iter().filter(|e| flow.is_back_edge(e)).collect();
        assert_eq!(back.len(), 1);
        assert_eq!((back[0].from, back[0].to), ("error", "access"));
    }
}
