use debugread_core::Result;

use super::Context;

const USAGE: &str = "Usage: consul-debug-read agent [--summary] [--config]

  --summary   node identity, version, mode and raft state
  --config    full runtime configuration (DebugConfig) as JSON";

/// Decode `agent.json` and `members.json`, then render the requested views.
/// Without a flag the usage text is returned, but only once the bundle has
/// decoded cleanly.
fn render(ctx: &Context, summary: bool, config: bool) -> Result<String> {
    let (_, mut bundle) = ctx.open_bundle()?;
    let member_count = bundle.read_members()?.len();
    let agent = bundle.read_agent()?;

    if !summary && !config {
        return Ok(USAGE.to_string());
    }

    let mut sections = Vec::new();
    if summary {
        sections.push(format!(
            "{}\nCluster members:    {member_count}",
            agent.summary()
        ));
    }
    if config {
        sections.push(agent.config_full());
    }
    Ok(sections.join("\n\n"))
}

pub fn run(ctx: &Context, summary: bool, config: bool) -> Result<()> {
    println!("{}", render(ctx, summary, config)?);
    Ok(())
}
