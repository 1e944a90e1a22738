use std::fmt;

use crate::ast::OperatorKind;

/// Expression node produced by grouping and folding.
///
/// Before resolution an expression is a leaf (`Number`, `Name`) or a
/// `Group`. Folding introduces `Operation`, `Call`, the implicit `Nothing`
/// operand and `VariableReference` assignment targets.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal number
    ///
    /// # Example
    /// ```text
    /// 42
    /// ```
    Number(f64),

    /// Implicit operand supplied for prefix `^` and open ranges
    ///
    /// # Example
    /// ```text
    /// ^5       // Operation { Power, Nothing, 5 }
    /// 2..      // Operation { Range, 2, Nothing }
    /// ```
    Nothing,

    /// Name resolved through the environment when evaluated
    Name(String),

    /// Assignment target, the left side of `=`
    ///
    /// # Example
    /// ```text
    /// x = 5    // Operation { Assign, VariableReference("x"), 5 }
    /// ```
    VariableReference(String),

    /// Bracketed group
    Group(Group),

    /// Binary operation
    ///
    /// # Examples
    /// ```text
    /// 2 + 3 * 4
    /// x > 0.5
    /// ```
    Operation {
        op: OperatorKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Function call, including the method form
    ///
    /// # Examples
    /// ```text
    /// abs(4)
    /// x.clamp(0, 1)     // Call { "clamp", [x, 0, 1] }
    /// x[0, 1]           // Call { "SubMat", [x, 0, 1] }
    /// ```
    Call { name: String, args: Vec<Expr> },
}

impl Expr {
    pub fn operation(op: OperatorKind, left: Expr, right: Expr) -> Self {
        Expr::Operation {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Nothing => f.write_str("<nothing>"),
            Expr::Name(name) => f.write_str(name),
            Expr::VariableReference(name) => write!(f, "VariableRef({})", name),
            Expr::Group(group) => write!(f, "{}", group),
            Expr::Operation { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Element of a group: either an expression or structural punctuation that
/// folding has not consumed yet.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Expr(Expr),
    Operator(OperatorKind),
    Dot,
    Comma,
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Expr(expr) => write!(f, "{}", expr),
            Item::Operator(op) => f.write_str(op.symbol()),
            Item::Dot => f.write_str("."),
            Item::Comma => f.write_str(","),
        }
    }
}

/// Contents of one bracket pair.
///
/// A comma-bearing group holds alternating segment groups and commas:
/// `(a, b + 1)` is `[Group(a), Comma, Group(b + 1)]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub items: Vec<Item>,
    pub has_comma: bool,
}

impl Group {
    pub fn new(items: Vec<Item>) -> Self {
        Group {
            items,
            has_comma: false,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str(")")
    }
}
