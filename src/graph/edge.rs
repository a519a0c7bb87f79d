use super::*;

pub trait EdgeOps {
    fn normalized(&self) -> Self;
    fn is_normalized(&self) -> bool;
    fn is_loop(&self) -> bool;
    fn reverse(&self) -> Self;
}

pub trait ColorQuery {
    fn is_red(&self) -> bool;
    fn is_black(&self) -> bool;
    fn is_none(&self) -> bool;
    fn is_some(&self) -> bool {
        !self.is_none()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Edge(pub Node, pub Node);

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct ColoredEdge(pub Node, pub Node, pub EdgeColor);

/// Color of an existing edge of a trigraph
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum EdgeColor {
    Black,
    Red,
}

/// State of a node pair: a black edge, a red edge, or no edge at all
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum EdgeKind {
    Black,
    Red,
    None,
}

impl EdgeKind {
    pub fn color(self) -> Option<EdgeColor> {
        match self {
            EdgeKind::Black => Some(EdgeColor::Black),
            EdgeKind::Red => Some(EdgeColor::Red),
            EdgeKind::None => None,
        }
    }
}

impl From<EdgeColor> for EdgeKind {
    fn from(color: EdgeColor) -> Self {
        match color {
            EdgeColor::Black => EdgeKind::Black,
            EdgeColor::Red => EdgeKind::Red,
        }
    }
}

impl ColorQuery for EdgeColor {
    fn is_red(&self) -> bool {
        *self == EdgeColor::Red
    }

    fn is_black(&self) -> bool {
        *self == EdgeColor::Black
    }

    fn is_none(&self) -> bool {
        false
    }
}

impl ColorQuery for EdgeKind {
    fn is_red(&self) -> bool {
        *self == EdgeKind::Red
    }

    fn is_black(&self) -> bool {
        *self == EdgeKind::Black
    }

    fn is_none(&self) -> bool {
        *self == EdgeKind::None
    }
}

impl PartialEq<EdgeKind> for EdgeColor {
    fn eq(&self, other: &EdgeKind) -> bool {
        EdgeKind::from(*self) == *other
    }
}

impl PartialEq<EdgeColor> for EdgeKind {
    fn eq(&self, other: &EdgeColor) -> bool {
        *self == EdgeKind::from(*other)
    }
}

impl EdgeOps for Edge {
    fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }
}

impl EdgeOps for ColoredEdge {
    fn normalized(&self) -> Self {
        ColoredEdge(self.0.min(self.1), self.0.max(self.1), self.2)
    }

    fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    fn reverse(&self) -> Self {
        ColoredEdge(self.1, self.0, self.2)
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(Node, Node)> for Edge {
    fn from(value: &(Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kinds_and_colors() {
        assert_eq!(EdgeKind::from(EdgeColor::Red), EdgeKind::Red);
        assert_eq!(EdgeKind::Black.color(), Some(EdgeColor::Black));
        assert_eq!(EdgeKind::None.color(), None);

        assert!(EdgeColor::Red == EdgeKind::Red);
        assert!(EdgeColor::Black != EdgeKind::None);
        assert!(EdgeKind::None.is_none());
        assert!(EdgeColor::Black.is_some());
    }

    #[test]
    fn normalization() {
        assert_eq!(Edge(5, 2).normalized(), Edge(2, 5));
        assert!(Edge(2, 5).is_normalized());
        assert!(Edge(3, 3).is_loop());
        assert_eq!(
            ColoredEdge(4, 1, EdgeColor::Red).reverse(),
            ColoredEdge(1, 4, EdgeColor::Red)
        );
    }
}
