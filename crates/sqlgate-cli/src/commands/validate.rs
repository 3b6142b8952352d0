//! `sqlgate validate` - run the pre-flight checks without contacting the gateway.

use anyhow::Result;
use sqlgate_core::{split, validate};

/// Validate `sql` and report how many statements it contains.
pub fn run(sql: &str) -> Result<()> {
    validate(sql)?;
    let statements = split(sql);

    println!("✅ {} statement(s) ready to run", statements.len());
    for (idx, statement) in statements.iter().enumerate() {
        println!("   {}. {};", idx + 1, statement);
    }

    Ok(())
}
