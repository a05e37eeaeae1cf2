use serde_json::{Map, Value};

use crate::tools::{ToolArgs, ToolError, ToolRegistry};

/// Outcome of one dispatch attempt. When `matched` is false the caller is
/// expected to fall back to the completion provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteResult {
    pub matched: bool,
    pub response: String,
}

impl RouteResult {
    fn answered(response: String) -> Self {
        Self {
            matched: true,
            response,
        }
    }

    fn fallback() -> Self {
        Self {
            matched: false,
            response: String::new(),
        }
    }
}

const ARITHMETIC_TRIGGERS: [&str; 9] = [
    "calculate",
    "add",
    "subtract",
    "multiply",
    "divide",
    "+",
    "-",
    "*",
    "/",
];

/// Maps free-text input to a tool invocation via keyword heuristics.
///
/// Rules are evaluated top to bottom and the first successful one wins:
/// arithmetic, then weather, then file reading. A rule that fails while
/// extracting arguments simply does not match and evaluation continues.
/// Dispatch errors from the weather and file rules surface to the caller;
/// the arithmetic rule swallows its own failures entirely, deferring to the
/// smarter completion fallback.
pub fn route(input: &str, registry: &ToolRegistry) -> Result<RouteResult, ToolError> {
    let lowered = input.to_lowercase();

    if let Some(result) = try_arithmetic(input, &lowered, registry) {
        return Ok(result);
    }
    if let Some(result) = try_weather(input, &lowered, registry)? {
        return Ok(result);
    }
    if let Some(result) = try_read_file(input, &lowered, registry)? {
        return Ok(result);
    }

    Ok(RouteResult::fallback())
}

fn try_arithmetic(input: &str, lowered: &str, registry: &ToolRegistry) -> Option<RouteResult> {
    if !ARITHMETIC_TRIGGERS
        .iter()
        .any(|trigger| lowered.contains(trigger))
    {
        return None;
    }

    // A token is numeric when it is all digits once decimal points are
    // removed; "3.4.5" passes that test but fails the parse, which aborts
    // the whole rule rather than surfacing an error.
    let numbers = input
        .split_whitespace()
        .filter(|token| {
            let digits: String = token.chars().filter(|ch| *ch != '.').collect();
            !digits.is_empty() && digits.chars().all(|ch| ch.is_ascii_digit())
        })
        .map(str::parse::<f64>)
        .collect::<Result<Vec<f64>, _>>()
        .ok()?;
    if numbers.len() < 2 {
        return None;
    }

    // Hard-coded precedence, not user intent: subtract, then multiply, then
    // divide, defaulting to add. Operands are the first two numeric tokens
    // in left-to-right order regardless of sentence structure.
    let operation = if lowered.contains("subtract") || lowered.contains('-') {
        "subtract"
    } else if lowered.contains("multiply") || lowered.contains('*') {
        "multiply"
    } else if lowered.contains("divide") || lowered.contains('/') {
        "divide"
    } else {
        "add"
    };

    let tool = registry.get("calculator")?;
    let mut args: ToolArgs = Map::new();
    args.insert("a".to_string(), Value::from(numbers[0]));
    args.insert("b".to_string(), Value::from(numbers[1]));
    args.insert("operation".to_string(), Value::from(operation));

    let response = tool.execute(&args).ok()?;
    Some(RouteResult::answered(response))
}

fn try_weather(
    input: &str,
    lowered: &str,
    registry: &ToolRegistry,
) -> Result<Option<RouteResult>, ToolError> {
    if !lowered.contains("weather") {
        return Ok(None);
    }

    // The city is whatever follows the first standalone "in", with an
    // optional country right after. No "in", no match.
    let words: Vec<&str> = input.split_whitespace().collect();
    let Some(position) = words.iter().position(|word| *word == "in") else {
        return Ok(None);
    };
    let Some(city) = words.get(position + 1) else {
        return Ok(None);
    };
    let country = words.get(position + 2);

    let tool = registry
        .get("get_weather")
        .ok_or_else(|| ToolError::UnknownTool("get_weather".to_string()))?;
    let mut args: ToolArgs = Map::new();
    args.insert("city".to_string(), Value::from(*city));
    if let Some(country) = country {
        args.insert("country".to_string(), Value::from(*country));
    }

    let response = tool.execute(&args)?;
    Ok(Some(RouteResult::answered(response)))
}

fn try_read_file(
    input: &str,
    lowered: &str,
    registry: &ToolRegistry,
) -> Result<Option<RouteResult>, ToolError> {
    if !(lowered.contains("read file") || lowered.contains("open file")) {
        return Ok(None);
    }

    // Filename = everything after the last literal "file" in the raw input
    // (the whole input when absent), trimmed of whitespace and quotes.
    let tail = match input.rfind("file") {
        Some(position) => &input[position + "file".len()..],
        None => input,
    };
    let filename = tail
        .trim()
        .trim_matches(|ch: char| matches!(ch, '"' | '\'' | '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}'));
    if filename.is_empty() {
        return Ok(None);
    }

    let tool = registry
        .get("read_file")
        .ok_or_else(|| ToolError::UnknownTool("read_file".to_string()))?;
    let mut args: ToolArgs = Map::new();
    args.insert("filename".to_string(), Value::from(filename));

    let response = tool.execute(&args)?;
    Ok(Some(RouteResult::answered(response)))
}
