use anyhow::Result;
use day6::TuningTrouble;

fn main() -> Result<()> {
    util::run::<TuningTrouble>()
}
