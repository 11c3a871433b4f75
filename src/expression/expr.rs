//! Expression tree nodes and their derived metadata.
//!
//! Nodes are immutable: every combinator allocates a new node, and the
//! metadata of an operation node (null-inclusion, aggregator, purely
//! functional, table dependencies) is computed from its operands exactly once,
//! when the node is built.

use crate::dialect::{Capability, Dialect};
use crate::expression::fallback;
use crate::expression::operator::{NullPolicy, Op};
use crate::expression::validate;
use crate::expression::{ExpressionError, ExpressionResult};
use crate::value::{ColumnRef, TableRef, Value};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Expression tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Literal constant value
    Literal(Value),

    /// Column reference
    Column(ColumnRef),

    /// Operator applied to operand subtrees
    Operation(Operation),
}

#[derive(Debug, Clone, Default, PartialEq)]
struct NodeMeta {
    includes_null: bool,
    aggregator: bool,
    purely_functional: bool,
    tables: BTreeSet<TableRef>,
}

impl NodeMeta {
    fn derive(op: &Op, operands: &[Expr]) -> Self {
        let mut tables = BTreeSet::new();
        for operand in operands {
            operand.collect_tables(&mut tables);
        }

        let aggregator = op.is_aggregate() || operands.iter().any(Expr::is_aggregator);
        let volatile = op.is_volatile() || operands.iter().any(|o| !o.is_purely_functional());
        let includes_null = match op.null_policy() {
            NullPolicy::Propagate => operands.iter().any(Expr::includes_null),
            NullPolicy::Never => false,
        };

        Self {
            includes_null,
            aggregator,
            purely_functional: !aggregator && !volatile,
            tables,
        }
    }
}

/// An operator node with 0..N operands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "OperationRepr", into = "OperationRepr")]
pub struct Operation {
    op: Op,
    operands: Vec<Expr>,
    meta: NodeMeta,
}

/// Serialized form of an operation: metadata is rebuilt on the way in
#[derive(Clone, Serialize, Deserialize)]
struct OperationRepr {
    op: Op,
    operands: Vec<Expr>,
}

impl From<OperationRepr> for Operation {
    fn from(repr: OperationRepr) -> Self {
        Operation::new(repr.op, repr.operands)
    }
}

impl From<Operation> for OperationRepr {
    fn from(operation: Operation) -> Self {
        OperationRepr {
            op: operation.op,
            operands: operation.operands,
        }
    }
}

impl Operation {
    pub fn new(op: Op, operands: Vec<Expr>) -> Self {
        let meta = NodeMeta::derive(&op, &operands);
        Self { op, operands, meta }
    }

    pub fn op(&self) -> &Op {
        &self.op
    }

    pub fn operands(&self) -> &[Expr] {
        &self.operands
    }

    /// Capability the dialect lacks for this node, if any
    fn missing_capability(&self, dialect: &dyn Dialect) -> Option<Capability> {
        self.op
            .capability()
            .filter(|capability| !dialect.supports(*capability))
    }

    fn to_sql(&self, dialect: &dyn Dialect) -> String {
        if let Some(capability) = self.missing_capability(dialect) {
            match fallback::expand(&self.op, &self.operands) {
                Some(alternative) => {
                    debug!(
                        "{}: no native {} ({}), rendering fallback formula",
                        dialect.name(),
                        self.op.name(),
                        capability
                    );
                    return alternative.to_sql(dialect);
                }
                None => warn!(
                    "{}: no native {} ({}) and no fallback exists",
                    dialect.name(),
                    self.op.name(),
                    capability
                ),
            }
        }

        match (&self.op, self.operands.as_slice()) {
            (Op::And, []) => return dialect.true_literal(),
            (Op::Or, []) => return dialect.false_literal(),
            (Op::And | Op::Or | Op::Concat, [single]) => return single.to_sql(dialect),
            _ => {}
        }

        let operands: Vec<String> = self.operands.iter().map(|o| o.to_sql(dialect)).collect();
        dialect.render_operator(&self.op, &operands)
    }
}

impl Expr {
    /// Create a literal expression
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    /// The absent literal
    pub fn null() -> Self {
        Expr::Literal(Value::Null)
    }

    /// Create a column reference expression
    pub fn column(column: ColumnRef) -> Self {
        Expr::Column(column)
    }

    /// Create an operation node, deriving its metadata from the operands
    pub fn operation(op: Op, operands: Vec<Expr>) -> Self {
        Expr::Operation(Operation::new(op, operands))
    }

    /// Operator of this node, if it is an operation
    pub fn op(&self) -> Option<&Op> {
        match self {
            Expr::Operation(node) => Some(node.op()),
            _ => None,
        }
    }

    /// Operands of this node; leaves have none
    pub fn operands(&self) -> &[Expr] {
        match self {
            Expr::Operation(node) => node.operands(),
            _ => &[],
        }
    }

    /// Structurally independent duplicate of this tree
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// New tree with operand `index` replaced; `self` is left untouched.
    ///
    /// Leaves have no operands, so replacing one is an `InvalidArgument`, as
    /// is an out-of-range index.
    pub fn with_operand(&self, index: usize, replacement: Expr) -> ExpressionResult<Expr> {
        let node = match self {
            Expr::Operation(node) => node,
            _ => {
                return Err(ExpressionError::InvalidArgument {
                    operation: "with-operand".to_string(),
                    reason: "leaves have no operands".to_string(),
                })
            }
        };
        if index >= node.operands.len() {
            return Err(ExpressionError::InvalidArgument {
                operation: node.op.name().to_string(),
                reason: format!(
                    "operand {} out of range for {} operands",
                    index,
                    node.operands.len()
                ),
            });
        }
        let mut operands = node.operands.clone();
        operands[index] = replacement;
        Ok(Expr::operation(node.op.clone(), operands))
    }

    /// Whether the expression may evaluate to NULL because of a NULL literal
    pub fn includes_null(&self) -> bool {
        match self {
            Expr::Literal(value) => value.is_null(),
            Expr::Column(_) => false,
            Expr::Operation(node) => node.meta.includes_null,
        }
    }

    pub fn is_aggregator(&self) -> bool {
        match self {
            Expr::Operation(node) => node.meta.aggregator,
            _ => false,
        }
    }

    /// True iff the tree holds no aggregate and no volatile function
    pub fn is_purely_functional(&self) -> bool {
        match self {
            Expr::Operation(node) => node.meta.purely_functional,
            _ => true,
        }
    }

    /// Every table referenced by a column leaf of this tree
    pub fn tables_involved(&self) -> BTreeSet<TableRef> {
        let mut tables = BTreeSet::new();
        self.collect_tables(&mut tables);
        tables
    }

    /// An expression spanning more than one table implies a join condition
    pub fn is_relationship(&self) -> bool {
        match self {
            Expr::Operation(node) => node.meta.tables.len() > 1,
            _ => false,
        }
    }

    fn collect_tables(&self, tables: &mut BTreeSet<TableRef>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Column(column) => {
                tables.insert(column.table.clone());
            }
            Expr::Operation(node) => tables.extend(node.meta.tables.iter().cloned()),
        }
    }

    /// Render this tree as a SQL fragment for `dialect`
    pub fn to_sql(&self, dialect: &dyn Dialect) -> String {
        match self {
            Expr::Literal(Value::DateRepeat(repeat))
                if !dialect.supports(Capability::DateRepeat) =>
            {
                dialect.render_value(&Value::String(repeat.to_string()))
            }
            Expr::Literal(value) => dialect.render_value(value),
            Expr::Column(column) => dialect.render_column(column),
            Expr::Operation(node) => node.to_sql(dialect),
        }
    }

    /// Check the tree against `dialect`, then render it
    pub fn try_to_sql(&self, dialect: &dyn Dialect) -> ExpressionResult<String> {
        self.validate(dialect)?;
        Ok(self.to_sql(dialect))
    }

    /// Report the first node `dialect` can neither render natively nor
    /// synthesise
    pub fn validate(&self, dialect: &dyn Dialect) -> ExpressionResult<()> {
        validate::validate(self, dialect)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Literal(value)
    }
}

impl From<ColumnRef> for Expr {
    fn from(column: ColumnRef) -> Self {
        Expr::Column(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DialectProfile;
    use crate::value::{DateRepeat, TableRef};

    fn col(table: &str, name: &str) -> Expr {
        Expr::column(TableRef::new(table).column(name))
    }

    #[test]
    fn test_leaf_metadata() {
        let null = Expr::null();
        assert!(null.includes_null());
        assert!(null.is_purely_functional());
        assert!(null.tables_involved().is_empty());

        let literal = Expr::literal(5);
        assert!(!literal.includes_null());
        assert!(!literal.is_aggregator());

        let column = col("marque", "uid");
        assert!(!column.includes_null());
        assert_eq!(
            column.tables_involved().into_iter().collect::<Vec<_>>(),
            vec![TableRef::new("marque")]
        );
        assert!(!column.is_relationship());
    }

    #[test]
    fn test_null_inclusion_propagates() {
        let sum = Expr::operation(Op::Plus, vec![Expr::literal(1), Expr::null()]);
        assert!(sum.includes_null());

        let nested = Expr::operation(Op::Times, vec![sum.clone(), Expr::literal(2)]);
        assert!(nested.includes_null());

        // Ordering comparisons never claim NULL even with a NULL operand
        let less = Expr::operation(Op::LessThan, vec![col("t", "a"), Expr::null()]);
        assert!(!less.includes_null());

        let is_null = Expr::operation(Op::IsNull, vec![Expr::null()]);
        assert!(!is_null.includes_null());
    }

    #[test]
    fn test_aggregator_poisons_ancestors() {
        let sum = Expr::operation(Op::Sum, vec![col("t", "a")]);
        assert!(sum.is_aggregator());
        assert!(!sum.is_purely_functional());

        let scaled = Expr::operation(Op::Times, vec![sum, Expr::literal(2)]);
        assert!(scaled.is_aggregator());
        assert!(!scaled.is_purely_functional());

        let plain = Expr::operation(Op::Times, vec![col("t", "a"), Expr::literal(2)]);
        assert!(!plain.is_aggregator());
        assert!(plain.is_purely_functional());
    }

    #[test]
    fn test_volatile_is_not_purely_functional() {
        let random = Expr::operation(Op::Random, vec![]);
        assert!(!random.is_purely_functional());
        assert!(!random.is_aggregator());

        let scaled = Expr::operation(Op::Times, vec![random, Expr::literal(10)]);
        assert!(!scaled.is_purely_functional());
    }

    #[test]
    fn test_tables_union_and_relationship() {
        let join = Expr::operation(
            Op::Equals,
            vec![col("car_company", "uid"), col("marque", "fk_car_company")],
        );
        let tables = join.tables_involved();
        assert_eq!(tables.len(), 2);
        assert!(tables.contains(&TableRef::new("car_company")));
        assert!(tables.contains(&TableRef::new("marque")));
        assert!(join.is_relationship());

        let single = Expr::operation(
            Op::Equals,
            vec![col("marque", "a"), col("marque", "b")],
        );
        assert!(!single.is_relationship());
    }

    #[test]
    fn test_copy_is_independent() {
        let original = Expr::operation(Op::Plus, vec![col("t", "a"), Expr::literal(1)]);
        let copy = original.copy();
        assert_eq!(copy, original);

        let changed = copy.with_operand(1, Expr::null()).unwrap();
        assert_ne!(changed, original);
        assert!(changed.includes_null());
        assert!(!original.includes_null());
        assert_eq!(original.operands()[1], Expr::literal(1));
        assert!(matches!(
            Expr::literal(1).with_operand(0, Expr::null()),
            Err(ExpressionError::InvalidArgument { .. })
        ));
        assert_eq!(
            original.with_operand(5, Expr::null()).unwrap_err().to_string(),
            "Invalid argument to plus: operand 5 out of range for 2 operands"
        );
    }

    #[test]
    fn test_render_empty_and_single_junctions() {
        let dialect = DialectProfile::ansi();
        assert_eq!(Expr::operation(Op::And, vec![]).to_sql(&dialect), "TRUE");
        assert_eq!(Expr::operation(Op::Or, vec![]).to_sql(&dialect), "FALSE");
        assert_eq!(
            Expr::operation(Op::And, vec![col("t", "flag")]).to_sql(&dialect),
            "t.flag"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let dialect = DialectProfile::minimal("bare");
        let expr = Expr::operation(Op::Tanh, vec![col("t", "x")]);
        assert_eq!(expr.to_sql(&dialect), expr.to_sql(&dialect));
    }

    #[test]
    fn test_serde_rebuilds_metadata() {
        let expr = Expr::operation(
            Op::Plus,
            vec![
                Expr::operation(Op::Sum, vec![col("t", "a")]),
                Expr::null(),
            ],
        );
        let json = serde_json::to_string(&expr).unwrap();
        assert!(!json.contains("meta"));

        let back: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expr);
        assert!(back.is_aggregator());
        assert!(back.includes_null());
        assert_eq!(back.tables_involved(), expr.tables_involved());
    }

    #[derive(Debug)]
    struct NationalStrings;

    impl Dialect for NationalStrings {
        fn name(&self) -> &str {
            "national"
        }

        fn supports(&self, _capability: Capability) -> bool {
            false
        }

        fn render_value(&self, value: &Value) -> String {
            match value {
                Value::String(s) => format!("N'{}'", s),
                other => crate::dialect::ansi::render_value(other),
            }
        }
    }

    #[test]
    fn test_repeat_literal_uses_dialect_string_quoting() {
        let repeat = Expr::literal(DateRepeat::new(1, 2, 3, 0, 0, 0));
        assert_eq!(repeat.to_sql(&NationalStrings), "N'P1Y2M3D0h0n0s'");
    }
}
