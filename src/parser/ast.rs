//! Abstract Syntax Tree definitions
//!
//! Every node owns its children outright, so a finished tree is acyclic and
//! no node has two parents. The root of every parse is a [`Block`].

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Ordered sequence of sibling expressions
///
/// Used both as the program root and as the body of a parenthesized group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub children: Vec<Node>,
}

impl Block {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Render the tree as JSON indented by four spaces
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal value
    Literal { value: LiteralValue },

    /// Binary operation
    Binary {
        left: Box<Node>,
        operator: BinaryOp,
        right: Box<Node>,
    },

    /// Nested block of siblings
    Block(Block),

    /// Parenthesized group
    GroupedExpression { inner: Block },
}

impl Node {
    pub fn integer(value: i64) -> Self {
        Node::Literal {
            value: LiteralValue::Integer(value),
        }
    }

    pub fn binary(left: Node, operator: BinaryOp, right: Node) -> Self {
        Node::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn grouped(children: Vec<Node>) -> Self {
        Node::GroupedExpression {
            inner: Block::new(children),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Modulo,
}

impl BinaryOp {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '%' => Some(Self::Modulo),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Modulo => '%',
        }
    }
}

/// Literal value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Integer(i64),
    String(String),
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Block", 2)?;
        state.serialize_field("type", "block_node")?;
        state.serialize_field("children", &self.children)?;
        state.end()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Literal { value } => {
                let mut state = serializer.serialize_struct("Literal", 2)?;
                state.serialize_field("type", "literal_node")?;
                state.serialize_field("value", value)?;
                state.end()
            }
            Node::Binary { left, operator, right } => {
                let mut state = serializer.serialize_struct("Binary", 4)?;
                state.serialize_field("type", "binary_node")?;
                state.serialize_field("left", left)?;
                state.serialize_field("operator", operator)?;
                state.serialize_field("right", right)?;
                state.end()
            }
            Node::Block(block) => block.serialize(serializer),
            Node::GroupedExpression { inner } => {
                let mut state = serializer.serialize_struct("GroupedExpression", 2)?;
                state.serialize_field("type", "grouped_expression_node")?;
                state.serialize_field("inner", inner)?;
                state.end()
            }
        }
    }
}
