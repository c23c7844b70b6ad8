use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format; object `data` is
/// flattened into the JSON response.
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Value::Object(body)) = (data, &mut response) {
                body.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Print `label: value` pairs in text mode
pub fn output_fields(output_format: OutputFormat, fields: &[(&str, String)]) {
    if output_format == OutputFormat::Text {
        for (label, value) in fields {
            println!("  {:<12} {}", format!("{}:", label), value);
        }
    }
}
