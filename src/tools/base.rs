use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Loosely typed keyword-argument bag handed to a tool callable.
pub type ToolArgs = Map<String, Value>;

type ToolFn = Box<dyn Fn(&ToolArgs) -> Result<String, ToolError> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Number,
    String,
}

impl ParamKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub required: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    MissingArgument(String),
    InvalidArgument { name: String, expected: ParamKind },
    UnknownTool(String),
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument(name) => write!(f, "missing argument '{name}'"),
            Self::InvalidArgument { name, expected } => {
                write!(f, "argument '{name}' is not a {}", expected.label())
            }
            Self::UnknownTool(name) => write!(f, "unknown tool '{name}'"),
        }
    }
}

impl Error for ToolError {}

/// A named, described unit of functionality invocable with keyword arguments.
///
/// The parameter list is declared once, at construction time, through
/// [`ToolSpec::builder`]; it mirrors the callable's parameters in declaration
/// order and is never mutated afterwards.
pub struct ToolSpec {
    name: String,
    description: String,
    parameters: Vec<ParamSpec>,
    function: ToolFn,
}

impl fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish()
    }
}

impl ToolSpec {
    pub fn builder(name: impl Into<String>, description: impl Into<String>) -> ToolSpecBuilder {
        ToolSpecBuilder {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &[ParamSpec] {
        &self.parameters
    }

    /// Invokes the wrapped callable with the supplied named arguments.
    ///
    /// Argument destructuring failures surface as [`ToolError`]; the caller
    /// decides how to report them.
    pub fn execute(&self, args: &ToolArgs) -> Result<String, ToolError> {
        (self.function)(args)
    }
}

pub struct ToolSpecBuilder {
    name: String,
    description: String,
    parameters: Vec<ParamSpec>,
}

impl ToolSpecBuilder {
    /// Declares a parameter without a default value.
    pub fn required(self, name: &str, kind: ParamKind) -> Self {
        self.param(name, kind, true)
    }

    /// Declares a parameter that has a default and may be omitted.
    pub fn optional(self, name: &str, kind: ParamKind) -> Self {
        self.param(name, kind, false)
    }

    fn param(mut self, name: &str, kind: ParamKind, required: bool) -> Self {
        self.parameters.push(ParamSpec {
            name: name.to_string(),
            kind,
            required,
            description: format!("Parameter {name}"),
        });
        self
    }

    pub fn build(
        self,
        function: impl Fn(&ToolArgs) -> Result<String, ToolError> + Send + Sync + 'static,
    ) -> ToolSpec {
        ToolSpec {
            name: self.name,
            description: self.description,
            parameters: self.parameters,
            function: Box::new(function),
        }
    }
}

pub fn number_arg(args: &ToolArgs, name: &str) -> Result<f64, ToolError> {
    let value = args
        .get(name)
        .ok_or_else(|| ToolError::MissingArgument(name.to_string()))?;
    value.as_f64().ok_or_else(|| ToolError::InvalidArgument {
        name: name.to_string(),
        expected: ParamKind::Number,
    })
}

pub fn string_arg(args: &ToolArgs, name: &str) -> Result<String, ToolError> {
    let value = args
        .get(name)
        .ok_or_else(|| ToolError::MissingArgument(name.to_string()))?;
    value
        .as_str()
        .map(ToOwned::to_owned)
        .ok_or_else(|| ToolError::InvalidArgument {
            name: name.to_string(),
            expected: ParamKind::String,
        })
}

/// Like [`string_arg`], but treats an absent or null value as "not supplied".
pub fn optional_string_arg(args: &ToolArgs, name: &str) -> Result<Option<String>, ToolError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_str()
            .map(|text| Some(text.to_string()))
            .ok_or_else(|| ToolError::InvalidArgument {
                name: name.to_string(),
                expected: ParamKind::String,
            }),
    }
}
