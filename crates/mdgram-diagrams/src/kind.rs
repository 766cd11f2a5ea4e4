//! Mermaid diagram types.
//!
//! The first statement of a Mermaid body declares what kind of diagram it
//! is (`graph TD`, `sequenceDiagram`, ...).

/// Diagram types recognized by the Mermaid renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    Flowchart,
    Sequence,
    Class,
    State,
    EntityRelationship,
    Journey,
    Gantt,
    Pie,
    Quadrant,
    Requirement,
    GitGraph,
    C4,
    Mindmap,
    Timeline,
    Sankey,
    XyChart,
    Block,
    Packet,
    Architecture,
    Kanban,
    ZenUml,
}

impl DiagramKind {
    /// Parse a diagram declaration keyword.
    ///
    /// `graph` and `flowchart` are the same diagram type, as are the
    /// versioned and unversioned forms of class and state diagrams.
    ///
    /// Returns None if the keyword does not declare a known diagram type.
    #[must_use]
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "graph" | "flowchart" => Some(Self::Flowchart),
            "sequenceDiagram" => Some(Self::Sequence),
            "classDiagram" | "classDiagram-v2" => Some(Self::Class),
            "stateDiagram" | "stateDiagram-v2" => Some(Self::State),
            "erDiagram" => Some(Self::EntityRelationship),
            "journey" => Some(Self::Journey),
            "gantt" => Some(Self::Gantt),
            "pie" => Some(Self::Pie),
            "quadrantChart" => Some(Self::Quadrant),
            "requirementDiagram" => Some(Self::Requirement),
            "gitGraph" => Some(Self::GitGraph),
            "C4Context" | "C4Container" | "C4Component" | "C4Dynamic" | "C4Deployment" => {
                Some(Self::C4)
            }
            "mindmap" => Some(Self::Mindmap),
            "timeline" => Some(Self::Timeline),
            "sankey-beta" => Some(Self::Sankey),
            "xychart-beta" => Some(Self::XyChart),
            "block-beta" => Some(Self::Block),
            "packet-beta" => Some(Self::Packet),
            "architecture-beta" => Some(Self::Architecture),
            "kanban" => Some(Self::Kanban),
            "zenuml" => Some(Self::ZenUml),
            _ => None,
        }
    }

    /// Canonical declaration keyword for this diagram type.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Flowchart => "flowchart",
            Self::Sequence => "sequenceDiagram",
            Self::Class => "classDiagram",
            Self::State => "stateDiagram-v2",
            Self::EntityRelationship => "erDiagram",
            Self::Journey => "journey",
            Self::Gantt => "gantt",
            Self::Pie => "pie",
            Self::Quadrant => "quadrantChart",
            Self::Requirement => "requirementDiagram",
            Self::GitGraph => "gitGraph",
            Self::C4 => "C4Context",
            Self::Mindmap => "mindmap",
            Self::Timeline => "timeline",
            Self::Sankey => "sankey-beta",
            Self::XyChart => "xychart-beta",
            Self::Block => "block-beta",
            Self::Packet => "packet-beta",
            Self::Architecture => "architecture-beta",
            Self::Kanban => "kanban",
            Self::ZenUml => "zenuml",
        }
    }

    /// Whether the declaration may carry a layout direction (`graph LR`).
    #[must_use]
    pub fn has_direction(self) -> bool {
        matches!(self, Self::Flowchart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flowchart_aliases() {
        assert_eq!(DiagramKind::parse("graph"), Some(DiagramKind::Flowchart));
        assert_eq!(
            DiagramKind::parse("flowchart"),
            Some(DiagramKind::Flowchart)
        );
    }

    #[test]
    fn test_versioned_aliases() {
        assert_eq!(
            DiagramKind::parse("stateDiagram"),
            DiagramKind::parse("stateDiagram-v2")
        );
        assert_eq!(
            DiagramKind::parse("classDiagram"),
            DiagramKind::parse("classDiagram-v2")
        );
    }

    #[test]
    fn test_keyword_round_trips() {
        let kinds = [
            DiagramKind::Flowchart,
            DiagramKind::Sequence,
            DiagramKind::Class,
            DiagramKind::State,
            DiagramKind::EntityRelationship,
            DiagramKind::Gantt,
            DiagramKind::C4,
            DiagramKind::Sankey,
            DiagramKind::ZenUml,
        ];
        for kind in kinds {
            assert_eq!(
                DiagramKind::parse(kind.keyword()),
                Some(kind),
                "Wrong keyword for {kind:?}"
            );
        }
    }

    #[test]
    fn test_unknown_keywords() {
        assert!(DiagramKind::parse("Graph").is_none());
        assert!(DiagramKind::parse("sequence").is_none());
        assert!(DiagramKind::parse("").is_none());
        assert!(DiagramKind::parse("plantuml").is_none());
    }

    #[test]
    fn test_direction_only_for_flowcharts() {
        assert!(DiagramKind::Flowchart.has_direction());
        assert!(!DiagramKind::Sequence.has_direction());
        assert!(!DiagramKind::Pie.has_direction());
    }
}
