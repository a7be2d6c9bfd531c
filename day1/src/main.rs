use anyhow::Result;
use day1::CalorieCounting;

fn main() -> Result<()> {
    util::run::<CalorieCounting>()
}
