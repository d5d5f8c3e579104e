//! Literal node construction.
//!
//! Translation passes synthesize literal nodes from host constant values.
//! The type environment is always passed in explicitly so construction
//! stays pure and testable; there is no ambient global environment.

use crate::errors::TreeError;
use crate::nodes::NodeData;
use crate::tree::{NodeId, Tree};

/// A host constant value that a pass wants to materialize as a literal.
#[derive(Clone, PartialEq, Debug)]
pub enum ConstantValue {
    Bool(bool),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    /// The null reference. It has no literal node form in this kernel.
    Null,
}

impl ConstantValue {
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConstantValue::Bool(_) => "boolean",
            ConstantValue::Char(_) => "char",
            ConstantValue::Int(_) => "int",
            ConstantValue::Long(_) => "long",
            ConstantValue::Float(_) => "float",
            ConstantValue::Double(_) => "double",
            ConstantValue::Str(_) => "String",
            ConstantValue::Null => "null",
        }
    }
}

/// Names of the resolved types literal nodes are stamped with.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TypeEnv {
    pub boolean_type: String,
    pub char_type: String,
    pub int_type: String,
    pub long_type: String,
    pub float_type: String,
    pub double_type: String,
    pub string_type: String,
}

impl Default for TypeEnv {
    fn default() -> Self {
        TypeEnv {
            boolean_type: "boolean".to_string(),
            char_type: "char".to_string(),
            int_type: "int".to_string(),
            long_type: "long".to_string(),
            float_type: "float".to_string(),
            double_type: "double".to_string(),
            string_type: "String".to_string(),
        }
    }
}

/// Builds the literal node for a constant value. Numeric literals keep the
/// value's printed form as their token.
///
/// # Errors
///
/// [`TreeError::UnsupportedLiteralKind`] for value shapes with no literal
/// node form.
pub fn new_literal(
    tree: &mut Tree,
    value: &ConstantValue,
    env: &TypeEnv,
) -> Result<NodeId, TreeError> {
    let data = match value {
        ConstantValue::Bool(v) => NodeData::BooleanLiteral {
            value: *v,
            type_name: env.boolean_type.clone(),
        },
        ConstantValue::Char(v) => NodeData::CharacterLiteral {
            value: *v,
            type_name: env.char_type.clone(),
        },
        ConstantValue::Int(v) => NodeData::NumberLiteral {
            token: v.to_string(),
            type_name: env.int_type.clone(),
        },
        ConstantValue::Long(v) => NodeData::NumberLiteral {
            token: v.to_string(),
            type_name: env.long_type.clone(),
        },
        ConstantValue::Float(v) => NodeData::NumberLiteral {
            token: v.to_string(),
            type_name: env.float_type.clone(),
        },
        ConstantValue::Double(v) => NodeData::NumberLiteral {
            token: v.to_string(),
            type_name: env.double_type.clone(),
        },
        ConstantValue::Str(v) => NodeData::StringLiteral {
            value: v.clone(),
            type_name: env.string_type.clone(),
        },
        ConstantValue::Null => {
            return Err(TreeError::UnsupportedLiteralKind {
                kind: value.kind_name(),
            })
        }
    };
    Ok(tree.add(data))
}
