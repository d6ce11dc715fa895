//! Rendering a [`prizm_tools::ToolResult`] for a terminal.

use clap::ValueEnum;
use prizm_tools::ToolResult;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print one tool result and return an error for the process exit code
/// when it was an error, without re-printing the message (already shown).
pub fn render(result: &ToolResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{}", result.text);
        }
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "text": result.text,
                "isError": result.is_error,
                "data": result.structured_data,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }
    if result.is_error {
        anyhow::bail!("{}", result.text);
    }
    Ok(())
}
