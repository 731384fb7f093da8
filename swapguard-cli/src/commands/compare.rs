//! Compare command - exact decimal comparison of two amounts

use std::cmp::Ordering;
use std::collections::HashMap;

use anyhow::Result;
use colored::Colorize;
use swapguard_core::domain::compare_decimals_at;
use swapguard_core::OperationResult;

pub fn run(a: &str, b: &str, precision: u32, json: bool) -> Result<()> {
    let compared = compare_decimals_at(a, b, precision);

    if json {
        let result = match compared {
            Ok(ordering) => {
                let mut context = HashMap::new();
                context.insert("a".to_string(), serde_json::json!(a));
                context.insert("b".to_string(), serde_json::json!(b));
                context.insert("precision".to_string(), serde_json::json!(precision));
                OperationResult::ok_with_context(ordering as i8, context)
            }
            Err(e) => OperationResult::fail(e.to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let sign = match compared? {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    };

    println!("{} {} {}", a, sign.bold(), b);
    Ok(())
}
