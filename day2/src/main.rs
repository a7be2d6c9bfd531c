use anyhow::Result;
use day2::RockPaperScissors;

fn main() -> Result<()> {
    util::run::<RockPaperScissors>()
}
