use std::error::Error;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::target::Component;
use crate::value::{ResolvedArguments, Value};

/// The declared type name standing for the lookup service itself.
pub const LOOKUP_TYPE: &str = "Lookup";

pub(crate) type Constructor = Arc<
    dyn Fn(ResolvedArguments) -> Result<Box<dyn Component>, Box<dyn Error + Send + Sync>>
        + Send
        + Sync,
>;

/// The declared type of a constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// No declared type; any value fits.
    Mixed,
    Class(String),
    Array,
    Int,
    Float,
    String,
    Bool,
    /// The lookup service's own interface.
    Lookup,
    Union(Vec<ParamType>),
}

impl ParamType {
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    /// The single name of this type, if it has one. Unions and untyped
    /// parameters have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Mixed | Self::Union(_) => None,
            Self::Class(name) => Some(name),
            Self::Array => Some("array"),
            Self::Int => Some("int"),
            Self::Float => Some("float"),
            Self::String => Some("string"),
            Self::Bool => Some("bool"),
            Self::Lookup => Some(LOOKUP_TYPE),
        }
    }

    /// The member types to check a value against, one for a plain type.
    pub fn members(&self) -> &[ParamType] {
        match self {
            Self::Union(members) => members,
            other => std::slice::from_ref(other),
        }
    }
}

impl Display for ParamType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Mixed => write!(f, "mixed"),
            Self::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            named => write!(f, "{}", named.name().unwrap_or_default()),
        }
    }
}

/// A statically declared constructor parameter: its name, declared type,
/// optional default and whether it accepts null.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    ty: ParamType,
    default: Option<Value>,
    nullable: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ParamType::Mixed,
            default: None,
            nullable: false,
        }
    }

    pub fn typed(mut self, ty: ParamType) -> Self {
        self.ty = ty;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &ParamType {
        &self.ty
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Untyped parameters accept null just like explicitly nullable ones.
    pub fn allows_null(&self) -> bool {
        self.nullable || self.ty == ParamType::Mixed
    }
}

/// Everything the overloader knows about one fully-qualified class.
///
/// A descriptor without a constructor stands for an abstract class or an
/// interface: it can be found and checked against, but not instantiated.
pub struct ClassDescriptor {
    name: String,
    ancestors: Vec<String>,
    parameters: Vec<Parameter>,
    constructor: Option<Constructor>,
}

impl ClassDescriptor {
    pub(crate) fn new(
        name: String,
        ancestors: Vec<String>,
        parameters: Vec<Parameter>,
        constructor: Option<Constructor>,
    ) -> Self {
        Self {
            name,
            ancestors,
            parameters,
            constructor,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct parents and implemented interfaces.
    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn is_instantiable(&self) -> bool {
        self.constructor.is_some()
    }

    pub(crate) fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }
}

impl Debug for ClassDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ClassDescriptor")
            .field("name", &self.name)
            .field("ancestors", &self.ancestors)
            .field("parameters", &self.parameters)
            .field("instantiable", &self.is_instantiable())
            .finish()
    }
}
