//! `slipcheck selectors` — print the built-in selector table.

use anyhow::Result;
use serde_json::json;
use slipcheck_evm::SwapDecoder;

pub fn run(as_json: bool) -> Result<()> {
    let entries = SwapDecoder::new().known_selectors();

    if as_json {
        let rows: Vec<_> = entries
            .iter()
            .map(|e| {
                json!({
                    "selector": e.selector_hex(),
                    "function": e.function.name(),
                    "signature": e.function.signature(),
                    "direction": e.function.direction(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{} known selectors:", entries.len());
    for e in entries {
        println!("  {}  {}", e.selector_hex(), e.function.signature());
    }
    Ok(())
}
