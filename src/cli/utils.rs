use serde_json::{json, Value};
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(fields)) = data {
                if let Some(object) = response.as_object_mut() {
                    object.extend(fields);
                }
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Print a labelled value in text mode
pub fn output_field(output_format: &OutputFormat, label: &str, value: impl std::fmt::Display) {
    if let OutputFormat::Text = output_format {
        println!("  {:<16} {}", format!("{}:", label), value);
    }
}

/// Read one line from stdin, trimmed of the trailing newline
pub fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    use std::io::Write;

    eprint!("{}", prompt);
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
