//! Sanitize command - clean typed amount input

use anyhow::Result;
use swapguard_core::domain::formatting::sanitize_numeric_input;

use super::arg_or_stdin;

pub fn run(input: Option<String>, json: bool) -> Result<()> {
    let input = arg_or_stdin(input, "input")?;
    let sanitized = sanitize_numeric_input(&input);

    if json {
        println!(
            "{}",
            serde_json::json!({ "input": input, "sanitized": sanitized })
        );
    } else {
        println!("{}", sanitized);
    }
    Ok(())
}
