//! General syntax tree produced by the parser.
//!
//! This tree can describe far more than arithmetic. It exists so that every
//! construct a caller writes gets a name; [`super::validate`] then decides what
//! is allowed.

/// Binary operators the grammar knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    FloorDiv,
    Mod,
    MatMult,
    BitAnd,
    BitOr,
    LShift,
    RShift,
}

impl BinOp {
    /// Name used when the operator is rejected.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Sub => "Sub",
            Self::Mul => "Mult",
            Self::Div => "Div",
            Self::Pow => "Pow",
            Self::FloorDiv => "FloorDiv",
            Self::Mod => "Mod",
            Self::MatMult => "MatMult",
            Self::BitAnd => "BitAnd",
            Self::BitOr => "BitOr",
            Self::LShift => "LShift",
            Self::RShift => "RShift",
        }
    }
}

/// Prefix operators the grammar knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    Invert,
    Not,
}

impl UnaryOp {
    /// Name used when the operator is rejected.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Neg => "USub",
            Self::Pos => "UAdd",
            Self::Invert => "Invert",
            Self::Not => "Not",
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    NotEq,
    In,
    NotIn,
    Is,
    IsNot,
}

/// Short-circuit boolean operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

/// A node of the general syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Syntax {
    Number(f64),
    Str(String),
    Bool(bool),
    NoneLiteral,
    Name(String),
    Binary {
        op: BinOp,
        left: Box<Syntax>,
        right: Box<Syntax>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Syntax>,
    },
    Compare {
        left: Box<Syntax>,
        rest: Vec<(CmpOp, Syntax)>,
    },
    BoolOp {
        op: BoolOp,
        values: Vec<Syntax>,
    },
    IfExp {
        test: Box<Syntax>,
        body: Box<Syntax>,
        orelse: Box<Syntax>,
    },
    Lambda {
        params: Vec<String>,
        body: Box<Syntax>,
    },
    Call {
        func: Box<Syntax>,
        args: Vec<Syntax>,
    },
    Attribute {
        value: Box<Syntax>,
        attr: String,
    },
    Subscript {
        value: Box<Syntax>,
        index: Box<Syntax>,
    },
    Tuple(Vec<Syntax>),
    List(Vec<Syntax>),
    Import(Vec<String>),
}

impl Syntax {
    /// Name of the node kind, as reported by "Unsupported operation" errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "Number",
            Self::Str(_) => "String",
            Self::Bool(_) => "Bool",
            Self::NoneLiteral => "None",
            Self::Name(_) => "Name",
            Self::Binary { .. } => "BinOp",
            Self::Unary { .. } => "UnaryOp",
            Self::Compare { .. } => "Compare",
            Self::BoolOp { .. } => "BoolOp",
            Self::IfExp { .. } => "IfExp",
            Self::Lambda { .. } => "Lambda",
            Self::Call { .. } => "Call",
            Self::Attribute { .. } => "Attribute",
            Self::Subscript { .. } => "Subscript",
            Self::Tuple(_) => "Tuple",
            Self::List(_) => "List",
            Self::Import(_) => "Import",
        }
    }
}
