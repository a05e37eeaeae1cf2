mod base;
mod builtin;
mod registry;

pub use base::{
    ParamKind, ParamSpec, ToolArgs, ToolError, ToolSpec, number_arg, optional_string_arg,
    string_arg,
};
pub use builtin::{calculator, default_registry, get_weather, read_file};
pub use registry::ToolRegistry;
