//! Check command - run the full swap form validation

use anyhow::Result;
use colored::Colorize;
use swapguard_core::services::SwapForm;
use swapguard_core::LogEvent;

use super::{get_context, get_logger, log_event};

pub fn run(amount: &str, from: &str, to: &str, max: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    log_event(&logger, LogEvent::new("command_executed").with_command("check"));

    let mut form = SwapForm::new(from, to, amount);
    if max {
        form = form.with_max_amount(&ctx.wallet_service);
    }

    let errors = ctx.swap_form_service.validate(&form);
    let quote = ctx
        .quote_service
        .quote(&form.from_token, &form.to_token, &form.from_amount);

    if json {
        println!(
            "{}",
            serde_json::json!({
                "form": form,
                "valid": errors.is_empty(),
                "errors": errors,
                "quote": quote,
            })
        );
        return Ok(());
    }

    if !errors.is_empty() {
        for err in &errors {
            eprintln!("  {} {}", "✗".red(), err.message);
        }
        log_event(
            &logger,
            LogEvent::new("swap_rejected")
                .with_command("check")
                .with_token(form.from_token.to_uppercase())
                .with_error(errors[0].message.clone()),
        );
        anyhow::bail!("Swap cannot be submitted");
    }

    println!(
        "{} Swap {} {} → {} {} is ready to submit",
        "✓".green(),
        form.from_amount,
        form.from_token.to_uppercase(),
        quote.to_amount,
        form.to_token.to_uppercase()
    );
    Ok(())
}
