use anyhow::Result;
use day4::CampCleanup;

fn main() -> Result<()> {
    util::run::<CampCleanup>()
}
