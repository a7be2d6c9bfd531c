use anyhow::Result;
use day3::RucksackReorganization;

fn main() -> Result<()> {
    util::run::<RucksackReorganization>()
}
