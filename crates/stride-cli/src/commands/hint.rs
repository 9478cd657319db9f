use clap::Args;
use stride_core::FocusPlan;

use crate::duration::parse_duration;

#[derive(Args)]
pub struct HintArgs {
    /// Focus length (e.g. "25m", "1h30m", "25:00")
    #[arg(allow_hyphen_values = true)]
    duration: String,
    /// Focus straight through without breaks
    #[arg(long)]
    skip_breaks: bool,
}

pub fn run(args: HintArgs) -> Result<(), Box<dyn std::error::Error>> {
    let plan = FocusPlan::new(parse_duration(&args.duration)?, args.skip_breaks);
    plan.validate()?;
    println!("{}", plan.hint());
    Ok(())
}
