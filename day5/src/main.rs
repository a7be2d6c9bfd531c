use anyhow::Result;
use day5::SupplyStacks;

fn main() -> Result<()> {
    util::run::<SupplyStacks>()
}
