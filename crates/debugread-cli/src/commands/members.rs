use debugread_core::{Result, members_table, status_counts};

use super::Context;

pub fn run(ctx: &Context) -> Result<()> {
    let (_, mut bundle) = ctx.open_bundle()?;
    let members = bundle.read_members()?;

    println!("{}", members_table(members));
    println!();
    let counts: Vec<String> = status_counts(members)
        .iter()
        .map(|(status, n)| format!("{status}: {n}"))
        .collect();
    println!("{} members ({})", members.len(), counts.join(", "));
    Ok(())
}
