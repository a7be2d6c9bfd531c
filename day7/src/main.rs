use anyhow::Result;
use day7::NoSpaceLeft;

fn main() -> Result<()> {
    util::run::<NoSpaceLeft>()
}
