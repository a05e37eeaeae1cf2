use std::fs;

use super::registry::ToolRegistry;
use super::base::{ParamKind, ToolSpec, number_arg, optional_string_arg, string_arg};

/// Performs basic arithmetic on two numbers. Operation matching is
/// case-insensitive; division by zero yields the literal marker "undefined"
/// and unrecognized operations yield "invalid operation" instead of failing.
pub fn calculator(a: f64, b: f64, operation: &str) -> String {
    let result = match operation.to_ascii_lowercase().as_str() {
        "add" => render_number(a + b),
        "subtract" => render_number(a - b),
        "multiply" => render_number(a * b),
        "divide" => {
            if b == 0.0 {
                "undefined".to_string()
            } else {
                render_number(a / b)
            }
        }
        _ => "invalid operation".to_string(),
    };

    format!(
        "The result of {} {operation} {} is {result}",
        render_number(a),
        render_number(b)
    )
}

/// Simulated weather lookup. Stands in for a real weather-data collaborator;
/// the condition and temperature are fixed.
pub fn get_weather(city: &str, country: Option<&str>) -> String {
    let location = match country {
        Some(country) => format!("{city}, {country}"),
        None => city.to_string(),
    };
    format!("Weather in {location}: Sunny, 25°C (simulated response)")
}

/// Reads a text file relative to the working directory. Failures of any kind
/// are reported as a formatted string, keeping the tool contract non-throwing.
pub fn read_file(filename: &str) -> String {
    match fs::read_to_string(filename) {
        Ok(contents) => contents,
        Err(err) => format!("Error reading file: {err}"),
    }
}

/// Registers every built-in tool. Adding a tool means writing the function,
/// registering it here, and teaching the router to detect it.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(
        ToolSpec::builder("calculator", "Performs basic arithmetic calculations")
            .required("a", ParamKind::Number)
            .required("b", ParamKind::Number)
            .optional("operation", ParamKind::String)
            .build(|args| {
                let a = number_arg(args, "a")?;
                let b = number_arg(args, "b")?;
                let operation =
                    optional_string_arg(args, "operation")?.unwrap_or_else(|| "add".to_string());
                Ok(calculator(a, b, &operation))
            }),
    );

    registry.register(
        ToolSpec::builder("get_weather", "Gets the current weather for a specified location")
            .required("city", ParamKind::String)
            .optional("country", ParamKind::String)
            .build(|args| {
                let city = string_arg(args, "city")?;
                let country = optional_string_arg(args, "country")?;
                Ok(get_weather(&city, country.as_deref()))
            }),
    );

    registry.register(
        ToolSpec::builder("read_file", "Reads the content of a specified file")
            .required("filename", ParamKind::String)
            .build(|args| {
                let filename = string_arg(args, "filename")?;
                Ok(read_file(&filename))
            }),
    );

    registry
}

// Whole floats print with one decimal, matching how the operands and results
// are rendered in the calculator sentence ("4" would read as an integer).
fn render_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
